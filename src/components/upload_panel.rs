use leptos::prelude::*;
use web_sys::{File, HtmlInputElement};

/// Upload controls: a hidden `.sql` file input behind a styled button,
/// the analyze / load-saved actions, and the current selection.
#[component]
pub fn UploadPanel(
	#[prop(into)] selected: Signal<Vec<String>>,
	#[prop(into)] loading: Signal<bool>,
	#[prop(into)] on_files: Callback<Vec<File>>,
	#[prop(into)] on_create: Callback<()>,
	#[prop(into)] on_load_saved: Callback<()>,
) -> impl IntoView {
	let on_change = move |ev: leptos::ev::Event| {
		let input = event_target::<HtmlInputElement>(&ev);
		let Some(list) = input.files() else {
			return;
		};
		let files: Vec<File> = (0..list.length()).filter_map(|i| list.get(i)).collect();
		if !files.is_empty() {
			on_files.run(files);
		}
	};

	view! {
		<div class="upload-panel">
			<div class="controls">
				<label class=move || {
					if loading.get() { "button primary disabled" } else { "button primary" }
				}>
					"Upload SQL Files"
					<input
						type="file"
						accept=".sql"
						multiple
						style="display: none;"
						disabled=move || loading.get()
						on:change=on_change
					/>
				</label>

				<button
					class="button secondary"
					disabled=move || loading.get()
					on:click=move |_| on_create.run(())
				>
					"Create Lineage"
				</button>

				<button
					class="button secondary"
					disabled=move || loading.get()
					on:click=move |_| on_load_saved.run(())
				>
					"Load Saved"
				</button>
			</div>

			<Show when=move || !selected.get().is_empty()>
				<p class="selected-files">
					"Selected files: " {move || selected.get().join(", ")}
				</p>
			</Show>
		</div>
	}
}
