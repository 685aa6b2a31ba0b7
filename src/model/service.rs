use serde::{Deserialize, Serialize};

use super::{CellId, Point, Size};
use crate::settings::CanvasSettings;

/// Per-service configuration payload edited in the dialog and the YAML panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
	/// Display name, mirrored into the label and the YAML `name:` entry.
	pub name: String,
	/// Free text from the dialog.
	pub description: String,
	/// Raw YAML from the config panel, stored even when it does not parse.
	pub yaml: String,
}

/// Body colours of a service box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyStyle {
	/// CSS colour.
	pub fill: String,
	/// CSS colour.
	pub stroke: String,
}

/// A service node on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Service {
	/// Store-assigned id; zero until the service is added.
	pub id: CellId,
	/// Top-left corner in world coordinates.
	pub position: Point,
	/// Box size in world units.
	pub size: Size,
	/// Box colours.
	pub body: BodyStyle,
	/// Text drawn inside the box.
	pub label: String,
	/// Name, description and YAML.
	pub config: ServiceConfig,
}

impl Service {
	/// Whether a world-space point falls inside the box.
	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.position.x
			&& p.x <= self.position.x + self.size.width
			&& p.y >= self.position.y
			&& p.y <= self.position.y + self.size.height
	}

	/// Centre of the box in world coordinates.
	pub fn center(&self) -> Point {
		Point::new(
			self.position.x + self.size.width / 2.0,
			self.position.y + self.size.height / 2.0,
		)
	}
}

/// YAML written into a freshly created service.
pub fn default_yaml(name: &str) -> String {
	format!("name: {name}\nport: 8080\n")
}

/// Builds services with auto-incrementing default names.
///
/// The counter is never rewound, so names stay unique for the session even
/// when services are deleted.
#[derive(Clone, Debug)]
pub struct ServiceFactory {
	next_index: u32,
	size: Size,
	body: BodyStyle,
}

impl ServiceFactory {
	/// Factory producing boxes sized and coloured from `settings`.
	pub fn new(settings: &CanvasSettings) -> Self {
		Self {
			next_index: 1,
			size: Size {
				width: settings.node_width,
				height: settings.node_height,
			},
			body: BodyStyle {
				fill: settings.node_fill.into(),
				stroke: settings.node_stroke.into(),
			},
		}
	}

	/// Allocates `Service <n>` at `(x, y)`. The id is assigned by the store on insert.
	pub fn create_service(&mut self, x: f64, y: f64) -> Service {
		let name = format!("Service {}", self.next_index);
		self.next_index += 1;
		Service {
			id: CellId(0),
			position: Point::new(x, y),
			size: self.size,
			body: self.body.clone(),
			label: name.clone(),
			config: ServiceConfig {
				yaml: default_yaml(&name),
				name,
				description: String::new(),
			},
		}
	}
}

impl Default for ServiceFactory {
	fn default() -> Self {
		Self::new(&CanvasSettings::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_names_count_up_and_match_yaml() {
		let mut factory = ServiceFactory::default();
		for n in 1..=5 {
			let service = factory.create_service(50.0, 50.0);
			let expected = format!("Service {n}");
			assert_eq!(service.config.name, expected);
			assert_eq!(service.label, expected);
			assert!(service.config.yaml.contains(&format!("name: {expected}")));
			assert!(service.config.yaml.contains("port: 8080"));
			assert!(service.config.description.is_empty());
		}
	}

	#[test]
	fn contains_uses_box_bounds() {
		let service = ServiceFactory::default().create_service(10.0, 20.0);
		assert!(service.contains(Point::new(10.0, 20.0)));
		assert!(service.contains(Point::new(130.0, 80.0)));
		assert!(!service.contains(Point::new(131.0, 50.0)));
		assert_eq!(service.center(), Point::new(70.0, 50.0));
	}
}
