use leptos::prelude::*;

use crate::editor::EditorState;

/// Modal for renaming, describing or deleting the double-clicked service.
#[component]
pub fn ServiceEditDialog(editor: RwSignal<EditorState>) -> impl IntoView {
	let dialog = Memo::new(move |_| editor.with(|s| s.dialog().cloned()));
	let name = RwSignal::new(String::new());
	let description = RwSignal::new(String::new());
	let error = RwSignal::new(None::<String>);

	// Reload the draft whenever a (different) service is opened.
	Effect::new(move |_| {
		if let Some(d) = dialog.get() {
			name.set(d.name);
			description.set(d.description);
			error.set(None);
		}
	});

	let save = move |_| {
		let result = editor
			.try_update(|s| s.save_service_edit(&name.get_untracked(), &description.get_untracked()));
		if let Some(Err(e)) = result {
			log::warn!("{e}");
			error.set(Some(e.to_string()));
		}
	};
	let cancel = move |_| editor.update(EditorState::cancel_service_edit);
	let delete = move |_| {
		if let Some(Err(e)) = editor.try_update(EditorState::delete_service) {
			log::warn!("{e}");
		}
	};

	view! {
		<Show when=move || dialog.with(Option::is_some)>
			<div class="dialog-backdrop">
				<div class="dialog" role="dialog">
					<h2>"Edit Service"</h2>
					<label>
						"Name"
						<input
							type="text"
							prop:value=move || name.get()
							on:input=move |ev| name.set(event_target_value(&ev))
						/>
					</label>
					<label>
						"Description"
						<textarea
							prop:value=move || description.get()
							on:input=move |ev| description.set(event_target_value(&ev))
						/>
					</label>
					<Show when=move || error.with(Option::is_some)>
						<p class="dialog-error">{move || error.get().unwrap_or_default()}</p>
					</Show>
					<div class="dialog-actions">
						<button class="danger" on:click=delete>
							"Delete"
						</button>
						<button on:click=cancel>"Cancel"</button>
						<button class="primary" on:click=save>
							"Save"
						</button>
					</div>
				</div>
			</div>
		</Show>
	}
}
