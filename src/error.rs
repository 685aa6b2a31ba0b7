//! Error types for the editor.

use thiserror::Error;

use crate::model::CellId;

/// Errors raised by editor actions.
#[derive(Error, Debug)]
pub enum EditorError {
	/// A link-type caption did not match any known protocol.
	#[error("unknown link type: {0:?}")]
	UnknownLinkType(String),

	/// A service id was not present in the graph store.
	#[error("unknown service: {0}")]
	UnknownService(CellId),

	/// A link was requested from a service to itself.
	#[error("service {0} cannot link to itself")]
	SelfLink(CellId),

	/// The service dialog was committed with a blank name.
	#[error("service name must not be empty")]
	EmptyServiceName,

	/// The dialog was committed while no service was being edited.
	#[error("no service dialog is open")]
	NoOpenDialog,

	/// A service's YAML could not be read for deployment.
	#[error("service {service:?} has an unusable config: {source}")]
	ServiceConfig {
		/// Name of the offending service.
		service: String,
		/// Parser error.
		#[source]
		source: serde_yaml::Error,
	},

	/// Serializing the graph failed.
	#[error("export failed: {0}")]
	Export(#[from] serde_json::Error),

	/// A browser API call failed.
	#[error("DOM error: {0}")]
	Dom(String),
}

impl From<wasm_bindgen::JsValue> for EditorError {
	fn from(value: wasm_bindgen::JsValue) -> Self {
		Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

/// Result alias for editor actions.
pub type Result<T> = std::result::Result<T, EditorError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_offender() {
		assert_eq!(
			EditorError::UnknownLinkType("SOAP".into()).to_string(),
			"unknown link type: \"SOAP\""
		);
		assert_eq!(EditorError::SelfLink(CellId(3)).to_string(), "service 3 cannot link to itself");
	}
}
