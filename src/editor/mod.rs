//! Application state shared by every component.
//!
//! [`EditorState`] owns the graph store, the pointer-mode controller, the
//! config panel, the viewport and the open dialog. Components hold it in a
//! single signal and call its methods from their event handlers; nothing in
//! here touches the DOM.

mod interaction;
mod panel;
mod viewport;

use log::{debug, info};

pub use interaction::{CanvasEvent, Effect, InteractionController, InteractionState};
pub use panel::{ConfigPanel, ConfigTab};
pub use viewport::Viewport;

use crate::error::{EditorError, Result};
use crate::manifest::{self, Diagnostic};
use crate::model::{CellId, GraphStore, LinkKind, Point, ServiceFactory, deploy, layout};
use crate::settings::CanvasSettings;

/// Draft shown by the service edit dialog.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceDialog {
	/// Service the dialog edits.
	pub service: CellId,
	/// Name as loaded when the dialog opened.
	pub name: String,
	/// Description as loaded when the dialog opened.
	pub description: String,
}

/// Everything the page edits, behind one signal.
#[derive(Clone, Debug)]
pub struct EditorState {
	settings: CanvasSettings,
	graph: GraphStore,
	factory: ServiceFactory,
	interaction: InteractionController,
	panel: ConfigPanel,
	viewport: Viewport,
	dialog: Option<ServiceDialog>,
}

impl EditorState {
	/// Empty diagram.
	pub fn new(settings: CanvasSettings) -> Self {
		Self {
			graph: GraphStore::new(),
			factory: ServiceFactory::new(&settings),
			interaction: InteractionController::new(),
			panel: ConfigPanel::default(),
			viewport: Viewport::new(&settings),
			dialog: None,
			settings,
		}
	}

	/// Diagram as the page opens: one service, shown in the config panel.
	pub fn with_initial_service(settings: CanvasSettings) -> Self {
		let mut state = Self::new(settings);
		let id = state.add_service();
		if let Err(e) = state.show_config(id) {
			log::warn!("initial service not shown: {e}");
		}
		state
	}

	/// Settings the editor was built with.
	pub fn settings(&self) -> &CanvasSettings {
		&self.settings
	}

	/// Services and links on the canvas.
	pub fn graph(&self) -> &GraphStore {
		&self.graph
	}

	/// Config tabs and the editor buffer.
	pub fn panel(&self) -> &ConfigPanel {
		&self.panel
	}

	/// Pointer mode.
	pub fn interaction(&self) -> &InteractionController {
		&self.interaction
	}

	/// Pan and zoom.
	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	/// The open edit dialog, if any.
	pub fn dialog(&self) -> Option<&ServiceDialog> {
		self.dialog.as_ref()
	}

	/// Creates the next default service at the spawn point and gives it a tab.
	pub fn add_service(&mut self) -> CellId {
		let service = self
			.factory
			.create_service(self.settings.spawn_x, self.settings.spawn_y);
		let id = self.graph.add_service(service);
		if let Some(service) = self.graph.service(id) {
			self.panel.add_config_tab(service);
			info!("added {}", service.config.name);
		}
		id
	}

	/// Arms link creation from a toolbar caption such as `"REST API"`.
	pub fn arm_link(&mut self, caption: &str) -> Result<()> {
		let kind: LinkKind = caption.parse()?;
		self.dispatch(CanvasEvent::ArmLink(kind))
	}

	/// Feeds one canvas event through the controller and applies its effect.
	pub fn dispatch(&mut self, event: CanvasEvent) -> Result<()> {
		match self.interaction.handle(event) {
			Effect::None => Ok(()),
			Effect::CreateLink {
				source,
				target,
				kind,
			} => {
				self.graph.add_link(source, target, kind)?;
				Ok(())
			}
			Effect::Pan { dx, dy } => {
				self.viewport.pan(dx, dy);
				Ok(())
			}
			Effect::OpenDialog(id) => self.open_service_dialog(id),
		}
	}

	/// Topmost service under a screen-space point.
	pub fn service_at_screen(&self, p: Point) -> Option<CellId> {
		self.graph.service_at(self.viewport.screen_to_world(p))
	}

	/// Drops a dragged service at a world-space position.
	pub fn move_service(&mut self, id: CellId, position: Point) -> Result<()> {
		self.graph.move_service(id, position)
	}

	/// Makes `id` the active tab and loads its YAML into the buffer.
	pub fn show_config(&mut self, id: CellId) -> Result<()> {
		let service = self.graph.service(id).ok_or(EditorError::UnknownService(id))?;
		self.panel.show_config(service);
		Ok(())
	}

	/// Writes typed text straight into the active service's YAML.
	pub fn edit_buffer(&mut self, text: &str) -> Result<()> {
		let Some(id) = self.panel.set_buffer(text) else {
			return Ok(());
		};
		self.graph.service_mut(id)?.config.yaml = text.to_owned();
		Ok(())
	}

	/// Advisory findings for the buffer on display.
	pub fn diagnostics(&self) -> Vec<Diagnostic> {
		if self.panel.active().is_none() {
			return Vec::new();
		}
		manifest::diagnose(self.panel.buffer())
	}

	/// Opens the edit dialog on `id`, replacing any open one.
	pub fn open_service_dialog(&mut self, id: CellId) -> Result<()> {
		let service = self.graph.service(id).ok_or(EditorError::UnknownService(id))?;
		self.dialog = Some(ServiceDialog {
			service: id,
			name: service.config.name.clone(),
			description: service.config.description.clone(),
		});
		Ok(())
	}

	/// Closes the dialog without saving.
	pub fn cancel_service_edit(&mut self) {
		self.dialog = None;
	}

	/// Commits the dialog: name, description, node label, tab label and the
	/// YAML `name:` entry all take the new name.
	///
	/// A blank name is rejected and the dialog stays open.
	pub fn save_service_edit(&mut self, name: &str, description: &str) -> Result<()> {
		let dialog = self.dialog.as_ref().ok_or(EditorError::NoOpenDialog)?;
		let name = name.trim();
		if name.is_empty() {
			return Err(EditorError::EmptyServiceName);
		}
		let id = dialog.service;

		let service = self.graph.service_mut(id)?;
		service.config.name = name.to_owned();
		service.config.description = description.to_owned();
		service.label = name.to_owned();
		service.config.yaml = manifest::rename(&service.config.yaml, name);

		let service = self.graph.service(id).ok_or(EditorError::UnknownService(id))?;
		self.panel.update_config_tab(service)?;
		if self.panel.active() == Some(id) {
			self.panel.show_config(service);
		}
		debug!("saved service {id} as {name:?}");
		self.dialog = None;
		Ok(())
	}

	/// Removes the service being edited, its links and its tab.
	///
	/// The dialog closes only once the removal has gone through.
	pub fn delete_service(&mut self) -> Result<()> {
		let id = self
			.dialog
			.as_ref()
			.map(|d| d.service)
			.ok_or(EditorError::NoOpenDialog)?;
		let removed = self.graph.remove_service(id)?;
		self.dialog = None;
		if let Some(next) = self.panel.remove_tab(id) {
			self.show_config(next)?;
		}
		// A pending link may reference the removed service.
		if self.interaction.pending_source() == Some(id) {
			self.interaction = InteractionController::new();
		}
		info!("deleted {}", removed.config.name);
		Ok(())
	}

	/// `Ctrl+=`.
	pub fn zoom_in(&mut self) {
		self.viewport.zoom(self.settings.zoom_in_step);
	}

	/// `Ctrl+-`.
	pub fn zoom_out(&mut self) {
		self.viewport.zoom(self.settings.zoom_out_step);
	}

	/// Wheel zoom about the cursor.
	pub fn wheel_zoom(&mut self, anchor: Point, delta_y: f64) {
		let factor = if delta_y > 0.0 {
			self.settings.wheel_zoom_out
		} else {
			self.settings.wheel_zoom_in
		};
		self.viewport.zoom_at(anchor, factor);
	}

	/// Spreads services out with a force layout.
	pub fn arrange(&mut self) -> Result<()> {
		layout::arrange(&mut self.graph, &self.settings.layout)
	}

	/// The diagram as pretty-printed `{"cells": [...]}` JSON.
	pub fn export_json(&self) -> Result<String> {
		self.graph.export_json()
	}

	/// CloudFormation template deploying every service to ECS, as JSON.
	pub fn deploy_template_json(&self) -> Result<String> {
		let template = deploy::template(&self.graph.to_document())?;
		Ok(serde_json::to_string_pretty(&template)?)
	}
}

impl Default for EditorState {
	fn default() -> Self {
		Self::new(CanvasSettings::default())
	}
}
