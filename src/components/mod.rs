//! Leptos components of the editor page.

pub mod canvas;
pub mod config_panel;
pub mod service_dialog;
pub mod toolbar;

use leptos::prelude::*;
use log::warn;

use crate::editor::EditorState;
use crate::error::Result;

/// Runs a fallible editor action, logging instead of propagating failures
/// out of an event handler.
pub(crate) fn act(editor: RwSignal<EditorState>, f: impl FnOnce(&mut EditorState) -> Result<()>) {
	editor.update(|s| {
		if let Err(e) = f(s) {
			warn!("{e}");
		}
	});
}
