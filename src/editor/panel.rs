use log::debug;

use crate::error::{EditorError, Result};
use crate::model::{CellId, Service};

/// Tab selecting which service's YAML is shown.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigTab {
	/// Service whose YAML the tab shows.
	pub service: CellId,
	/// The service's name when the tab was last updated.
	pub label: String,
}

/// Tab strip plus the single editor buffer.
///
/// Tabs are looked up by service id, never by label, so services sharing a
/// name keep separate tabs.
#[derive(Clone, Debug, Default)]
pub struct ConfigPanel {
	tabs: Vec<ConfigTab>,
	active: Option<CellId>,
	buffer: String,
}

impl ConfigPanel {
	/// Tabs in creation order.
	pub fn tabs(&self) -> &[ConfigTab] {
		&self.tabs
	}

	/// Service the buffer writes back to.
	pub fn active(&self) -> Option<CellId> {
		self.active
	}

	/// Text currently shown in the editor.
	pub fn buffer(&self) -> &str {
		&self.buffer
	}

	/// Tab of `service`, if it has one.
	pub fn tab(&self, service: CellId) -> Option<&ConfigTab> {
		self.tabs.iter().find(|tab| tab.service == service)
	}

	/// Adds a tab for `service` unless it already has one.
	pub fn add_config_tab(&mut self, service: &Service) {
		if self.tab(service.id).is_some() {
			return;
		}
		self.tabs.push(ConfigTab {
			service: service.id,
			label: service.config.name.clone(),
		});
	}

	/// Makes `service` active and loads its YAML, replacing the buffer.
	pub fn show_config(&mut self, service: &Service) {
		debug!("config panel: show {}", service.id);
		self.active = Some(service.id);
		self.buffer.clone_from(&service.config.yaml);
	}

	/// Re-labels the tab of `service` from its current name.
	pub fn update_config_tab(&mut self, service: &Service) -> Result<()> {
		let tab = self
			.tabs
			.iter_mut()
			.find(|tab| tab.service == service.id)
			.ok_or(EditorError::UnknownService(service.id))?;
		tab.label.clone_from(&service.config.name);
		Ok(())
	}

	/// Drops the tab of a removed service; returns the tab to activate next
	/// when the removed one was active.
	pub fn remove_tab(&mut self, service: CellId) -> Option<CellId> {
		self.tabs.retain(|tab| tab.service != service);
		if self.active != Some(service) {
			return None;
		}
		self.active = None;
		self.buffer.clear();
		self.tabs.first().map(|tab| tab.service)
	}

	/// Replaces the buffer with typed text; returns the service to write back to.
	pub fn set_buffer(&mut self, text: &str) -> Option<CellId> {
		self.buffer.clear();
		self.buffer.push_str(text);
		self.active
	}
}
