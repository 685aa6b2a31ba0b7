use leptos::prelude::*;
use log::error;

use crate::components::act;
use crate::download::download_json;
use crate::editor::EditorState;
use crate::model::deploy::TEMPLATE_FILENAME;
use crate::model::{EXPORT_FILENAME, LinkKind};
use crate::theme::Theme;

/// Toolbar: add service, link types, arrange, exports, theme.
#[component]
pub fn Toolbar(editor: RwSignal<EditorState>, theme: RwSignal<Theme>) -> impl IntoView {
	let armed = Memo::new(move |_| editor.with(|s| s.interaction().armed_kind()));

	let export = move |_| {
		let result = editor
			.with_untracked(|s| s.export_json())
			.and_then(|json| download_json(EXPORT_FILENAME, &json));
		if let Err(e) = result {
			error!("{e}");
		}
	};

	let export_stack = move |_| {
		let result = editor
			.with_untracked(|s| s.deploy_template_json())
			.and_then(|json| download_json(TEMPLATE_FILENAME, &json));
		if let Err(e) = result {
			error!("{e}");
		}
	};

	let toggle_theme = move |_| {
		theme.update(|t| {
			*t = t.toggled();
			t.apply();
		});
	};

	let link_buttons = LinkKind::ALL
		.into_iter()
		.map(|kind| {
			view! {
				<button
					class="toolbar-button link-button"
					class:armed=move || armed.get() == Some(kind)
					style=format!("border-color: {}", kind.stroke())
					on:click=move |_| act(editor, |s| s.arm_link(kind.caption()))
				>
					{kind.caption()}
				</button>
			}
		})
		.collect_view();

	view! {
		<nav class="toolbar">
			<button
				class="toolbar-button"
				on:click=move |_| {
					editor.update(|s| {
						s.add_service();
					})
				}
			>
				"Add Service"
			</button>
			<span class="toolbar-separator" />
			{link_buttons}
			<span class="toolbar-separator" />
			<button class="toolbar-button" on:click=move |_| act(editor, EditorState::arrange)>
				"Arrange"
			</button>
			<button class="toolbar-button" on:click=export>
				"Export JSON"
			</button>
			<button class="toolbar-button" on:click=export_stack>
				"Export Stack"
			</button>
			<button class="toolbar-button" on:click=toggle_theme>
				{move || match theme.get() {
					Theme::Light => "Dark mode",
					Theme::Dark => "Light mode",
				}}
			</button>
		</nav>
	}
}
