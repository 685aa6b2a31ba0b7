//! Light/dark theme read from the `dark` class on the root element.

use log::warn;

const DARK_CLASS: &str = "dark";

/// Colour scheme of the page.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
	#[default]
	Light,
	Dark,
}

impl Theme {
	/// Fill drawn behind the diagram.
	pub const fn canvas_background(self) -> &'static str {
		match self {
			Self::Light => "rgba(0, 0, 0, 0.1)",
			Self::Dark => "rgba(255, 255, 255, 0.05)",
		}
	}

	/// Theme name applied to the YAML editor.
	pub const fn editor_theme(self) -> &'static str {
		match self {
			Self::Light => "vs-light",
			Self::Dark => "vs-dark",
		}
	}

	/// The other theme.
	pub const fn toggled(self) -> Self {
		match self {
			Self::Light => Self::Dark,
			Self::Dark => Self::Light,
		}
	}

	/// Reads the current theme from `document.documentElement`.
	pub fn detect() -> Self {
		let dark = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.document_element())
			.is_some_and(|root| root.class_list().contains(DARK_CLASS));
		if dark { Self::Dark } else { Self::Light }
	}

	/// Writes this theme back to the root element's class list.
	pub fn apply(self) {
		let Some(root) = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.document_element())
		else {
			warn!("no document element; theme not applied");
			return;
		};
		let classes = root.class_list();
		let result = match self {
			Self::Dark => classes.add_1(DARK_CLASS),
			Self::Light => classes.remove_1(DARK_CLASS),
		};
		if let Err(e) = result {
			warn!("theme class not updated: {e:?}");
		}
	}
}
