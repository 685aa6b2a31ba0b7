use std::collections::HashSet;

use crate::model::{CellId, GraphStore, Point};

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub service: Option<CellId>,
	/// Screen point where the drag began.
	pub start: Point,
	/// World position of the service when the drag began.
	pub node_start: Point,
}

/// Links and services drawn in the highlight stroke.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Highlight {
	pub links: HashSet<CellId>,
	pub services: HashSet<CellId>,
}

impl Highlight {
	/// Links touching `hovered` and the services at their far ends.
	pub fn around(store: &GraphStore, hovered: CellId) -> Self {
		let mut highlight = Self::default();
		for link in store.connected_links(hovered) {
			highlight.links.insert(link.id);
			if let Some(other) = link.opposite(hovered) {
				highlight.services.insert(other);
			}
		}
		highlight
	}
}

/// Pointer state that lives only as long as the canvas.
#[derive(Clone, Debug, Default)]
pub struct CanvasState {
	pub drag: DragState,
	pub hover: Option<CellId>,
	pub width: f64,
	pub height: f64,
}

impl CanvasState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			..Self::default()
		}
	}

	pub fn begin_drag(&mut self, service: CellId, start: Point, node_start: Point) {
		self.drag = DragState {
			service: Some(service),
			start,
			node_start,
		};
	}

	pub fn end_drag(&mut self) {
		self.drag = DragState::default();
	}

	/// New world position for the dragged service, if a drag is active.
	pub fn drag_target(&self, at: Point, scale: f64) -> Option<(CellId, Point)> {
		let id = self.drag.service?;
		Some((
			id,
			Point::new(
				self.drag.node_start.x + (at.x - self.drag.start.x) / scale,
				self.drag.node_start.y + (at.y - self.drag.start.y) / scale,
			),
		))
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
