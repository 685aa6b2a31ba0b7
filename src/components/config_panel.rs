use leptos::prelude::*;

use crate::components::act;
use crate::editor::EditorState;
use crate::theme::Theme;

/// One tab per service above a YAML editor bound to the active service.
///
/// Every input event writes through to the service; diagnostics underneath
/// are advisory only.
#[component]
pub fn ConfigSidebar(editor: RwSignal<EditorState>, #[prop(into)] theme: Signal<Theme>) -> impl IntoView {
	let tabs = Memo::new(move |_| editor.with(|s| s.panel().tabs().to_vec()));
	let active = Memo::new(move |_| editor.with(|s| s.panel().active()));
	let buffer = Memo::new(move |_| editor.with(|s| s.panel().buffer().to_owned()));
	let diagnostics = Memo::new(move |_| {
		editor.with(|s| s.diagnostics().iter().map(ToString::to_string).collect::<Vec<_>>())
	});

	let add_tab = move |_| {
		act(editor, |s| {
			let id = s.add_service();
			s.show_config(id)
		})
	};

	view! {
		<section class="config-panel">
			<div class="config-tabs">
				<For
					each=move || tabs.get()
					key=|tab| (tab.service, tab.label.clone())
					children=move |tab| {
						let id = tab.service;
						view! {
							<button
								class="config-tab"
								class:active=move || active.get() == Some(id)
								on:click=move |_| act(editor, |s| s.show_config(id))
							>
								{tab.label}
							</button>
						}
					}
				/>
				<button class="config-tab add-tab" title="Add service" on:click=add_tab>
					"+"
				</button>
			</div>
			<textarea
				class=move || format!("config-editor {}", theme.get().editor_theme())
				spellcheck="false"
				disabled=move || active.get().is_none()
				prop:value=move || buffer.get()
				on:input=move |ev| {
					let text = event_target_value(&ev);
					act(editor, |s| s.edit_buffer(&text));
				}
			/>
			<ul class="config-diagnostics">
				{move || {
					diagnostics
						.get()
						.into_iter()
						.map(|d| view! { <li>{d}</li> })
						.collect_view()
				}}
			</ul>
		</section>
	}
}
