//! Services, links and the store that holds them.

pub mod deploy;
mod export;
mod graph;
pub mod layout;
mod link;
mod service;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use export::{EXPORT_FILENAME, GraphDocument};
pub use graph::GraphStore;
pub use link::{CommunicationLink, LinkKind};
pub use service::{BodyStyle, Service, ServiceConfig, ServiceFactory, default_yaml};

/// Store-assigned identity shared by services and links.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(pub u32);

impl fmt::Display for CellId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

/// A point in world (graph) or screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
	/// Grows rightwards.
	pub x: f64,
	/// Grows downwards.
	pub y: f64,
}

impl Point {
	/// Shorthand constructor.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Width and height of a service box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
	/// In world units.
	pub width: f64,
	/// In world units.
	pub height: f64,
}
