use leptos::prelude::*;

use crate::components::canvas::{DiagramCanvas, install_zoom_shortcuts};
use crate::components::config_panel::ConfigSidebar;
use crate::components::service_dialog::ServiceEditDialog;
use crate::components::toolbar::Toolbar;
use crate::editor::EditorState;
use crate::settings::CanvasSettings;
use crate::theme::Theme;

/// Editor page: toolbar, diagram canvas and config sidebar.
#[component]
pub fn Home() -> impl IntoView {
	let editor = RwSignal::new(EditorState::with_initial_service(CanvasSettings::default()));
	let theme = RwSignal::new(Theme::detect());
	install_zoom_shortcuts(editor);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="editor-layout">
				<Toolbar editor=editor theme=theme />
				<main class="editor-main">
					<div class="canvas-host">
						<DiagramCanvas editor=editor theme=theme />
					</div>
					<ConfigSidebar editor=editor theme=theme />
				</main>
				<ServiceEditDialog editor=editor />
			</div>
		</ErrorBoundary>
	}
}
