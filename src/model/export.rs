//! Serialized form of the whole diagram.

use serde::Serialize;

use super::{BodyStyle, CellId, GraphStore, LinkKind, Point, ServiceConfig, Size};
use crate::error::Result;

/// File name offered for the exported document.
pub const EXPORT_FILENAME: &str = "microservice_workflow.json";

/// `{ "cells": [...] }`, services first, then links, each in creation order.
#[derive(Debug, Serialize)]
pub struct GraphDocument<'a> {
	/// Every service and link.
	pub cells: Vec<Cell<'a>>,
}

/// One exported cell, tagged by its `type` field.
#[allow(missing_docs)]
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Cell<'a> {
	#[serde(rename = "custom.Service")]
	Service {
		id: CellId,
		position: Point,
		size: Size,
		attrs: ServiceAttrs<'a>,
		config: &'a ServiceConfig,
	},
	#[serde(rename = "custom.CommunicationLink")]
	Link {
		id: CellId,
		source: Endpoint,
		target: Endpoint,
		kind: LinkKind,
		attrs: LinkAttrs,
	},
}

/// Presentation attributes of a service cell.
#[derive(Debug, Serialize)]
pub struct ServiceAttrs<'a> {
	body: &'a BodyStyle,
	label: Text<'a>,
}

/// Presentation attributes of a link cell.
#[derive(Debug, Serialize)]
pub struct LinkAttrs {
	line: Line,
	label: Text<'static>,
}

/// Line style of a link.
#[derive(Debug, Serialize)]
pub struct Line {
	stroke: &'static str,
}

/// `{"text": ..}` label.
#[derive(Debug, Serialize)]
pub struct Text<'a> {
	text: &'a str,
}

/// `{"id": ..}` reference to a service.
#[derive(Debug, Serialize)]
pub struct Endpoint {
	id: CellId,
}

impl GraphStore {
	/// Borrowing snapshot of every cell.
	pub fn to_document(&self) -> GraphDocument<'_> {
		let services = self.services().map(|s| Cell::Service {
			id: s.id,
			position: s.position,
			size: s.size,
			attrs: ServiceAttrs {
				body: &s.body,
				label: Text { text: &s.label },
			},
			config: &s.config,
		});
		let links = self.links().map(|l| Cell::Link {
			id: l.id,
			source: Endpoint { id: l.source },
			target: Endpoint { id: l.target },
			kind: l.kind,
			attrs: LinkAttrs {
				line: Line {
					stroke: l.kind.stroke(),
				},
				label: Text {
					text: l.kind.label(),
				},
			},
		});
		GraphDocument {
			cells: services.chain(links).collect(),
		}
	}

	/// Pretty-printed JSON of [`GraphStore::to_document`].
	pub fn export_json(&self) -> Result<String> {
		Ok(serde_json::to_string_pretty(&self.to_document())?)
	}
}

#[cfg(test)]
mod tests {
	use serde_json::Value;

	use super::*;
	use crate::model::ServiceFactory;

	#[test]
	fn counts_match_store() {
		let mut factory = ServiceFactory::default();
		let mut store = GraphStore::new();
		let a = store.add_service(factory.create_service(0.0, 0.0));
		let b = store.add_service(factory.create_service(200.0, 0.0));
		let c = store.add_service(factory.create_service(400.0, 0.0));
		store.add_link(a, b, LinkKind::MessageBroker).unwrap();
		store.remove_service(c).unwrap();

		let doc: Value = serde_json::from_str(&store.export_json().unwrap()).unwrap();
		let cells = doc["cells"].as_array().unwrap();
		let of_type = |t: &str| cells.iter().filter(|c| c["type"] == t).count();
		assert_eq!(of_type("custom.Service"), 2);
		assert_eq!(of_type("custom.CommunicationLink"), 1);
	}

	#[test]
	fn cells_embed_config_and_link_style() {
		let mut factory = ServiceFactory::default();
		let mut store = GraphStore::new();
		let a = store.add_service(factory.create_service(50.0, 50.0));
		let b = store.add_service(factory.create_service(250.0, 50.0));
		store.add_link(a, b, LinkKind::RestApi).unwrap();

		let doc = serde_json::to_value(store.to_document()).unwrap();
		let service = &doc["cells"][0];
		assert_eq!(service["id"], 1);
		assert_eq!(service["position"]["x"], 50.0);
		assert_eq!(service["size"]["width"], 120.0);
		assert_eq!(service["attrs"]["label"]["text"], "Service 1");
		assert_eq!(service["attrs"]["body"]["fill"], "#8b5cf6");
		assert_eq!(service["config"]["yaml"], "name: Service 1\nport: 8080\n");

		let link = &doc["cells"][2];
		assert_eq!(link["type"], "custom.CommunicationLink");
		assert_eq!(link["source"]["id"], 1);
		assert_eq!(link["target"]["id"], 2);
		assert_eq!(link["kind"], "REST API");
		assert_eq!(link["attrs"]["line"]["stroke"], "#3b82f6");
		assert_eq!(link["attrs"]["label"]["text"], "REST");
	}
}
