use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::CellId;
use crate::error::EditorError;

/// Protocol a communication link stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum LinkKind {
	#[serde(rename = "REST API")]
	RestApi,
	#[serde(rename = "gRPC")]
	Grpc,
	#[serde(rename = "Message Broker")]
	MessageBroker,
	#[serde(rename = "GraphQL")]
	Graphql,
}

impl LinkKind {
	/// Every kind, in toolbar order.
	pub const ALL: [LinkKind; 4] = [
		LinkKind::RestApi,
		LinkKind::Grpc,
		LinkKind::MessageBroker,
		LinkKind::Graphql,
	];

	/// Caption of the toolbar control that arms this kind.
	pub const fn caption(self) -> &'static str {
		match self {
			Self::RestApi => "REST API",
			Self::Grpc => "gRPC",
			Self::MessageBroker => "Message Broker",
			Self::Graphql => "GraphQL",
		}
	}

	/// Text drawn on the link.
	pub const fn label(self) -> &'static str {
		match self {
			Self::RestApi => "REST",
			Self::Grpc => "gRPC",
			Self::MessageBroker => "Queue",
			Self::Graphql => "GraphQL",
		}
	}

	/// Line and label-pill colour.
	pub const fn stroke(self) -> &'static str {
		match self {
			Self::RestApi => "#3b82f6",
			Self::Grpc => "#10b981",
			Self::MessageBroker => "#f59e0b",
			Self::Graphql => "#ec4899",
		}
	}
}

impl fmt::Display for LinkKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.caption())
	}
}

impl FromStr for LinkKind {
	type Err = EditorError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		Self::ALL
			.into_iter()
			.find(|kind| kind.caption() == s)
			.ok_or_else(|| EditorError::UnknownLinkType(s.to_string()))
	}
}

/// Directed edge between two distinct services.
#[derive(Clone, Debug, PartialEq)]
pub struct CommunicationLink {
	/// Store-assigned id.
	pub id: CellId,
	/// Service the arrow starts from.
	pub source: CellId,
	/// Service the arrow points at.
	pub target: CellId,
	/// Protocol.
	pub kind: LinkKind,
}

impl CommunicationLink {
	/// The endpoint across from `service`, if the link touches it.
	pub fn opposite(&self, service: CellId) -> Option<CellId> {
		if self.source == service {
			Some(self.target)
		} else if self.target == service {
			Some(self.source)
		} else {
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_toolbar_captions() {
		assert_eq!("REST API".parse::<LinkKind>().ok(), Some(LinkKind::RestApi));
		assert_eq!(" gRPC ".parse::<LinkKind>().ok(), Some(LinkKind::Grpc));
		assert_eq!("Message Broker".parse::<LinkKind>().ok(), Some(LinkKind::MessageBroker));
		assert_eq!("GraphQL".parse::<LinkKind>().ok(), Some(LinkKind::Graphql));
	}

	#[test]
	fn rejects_unknown_caption() {
		assert!(matches!(
			"SOAP".parse::<LinkKind>(),
			Err(EditorError::UnknownLinkType(s)) if s == "SOAP"
		));
	}

	#[test]
	fn every_kind_has_distinct_style() {
		let strokes: std::collections::HashSet<_> = LinkKind::ALL.iter().map(|k| k.stroke()).collect();
		assert_eq!(strokes.len(), 4);
		assert_eq!(LinkKind::MessageBroker.label(), "Queue");
	}

	#[test]
	fn opposite_endpoint() {
		let link = CommunicationLink {
			id: CellId(3),
			source: CellId(1),
			target: CellId(2),
			kind: LinkKind::Grpc,
		};
		assert_eq!(link.opposite(CellId(1)), Some(CellId(2)));
		assert_eq!(link.opposite(CellId(2)), Some(CellId(1)));
		assert_eq!(link.opposite(CellId(9)), None);
	}
}
