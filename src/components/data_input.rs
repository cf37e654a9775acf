use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen_futures::JsFuture;
use web_sys::{DragEvent, Event, File, HtmlInputElement};

use crate::sankey::Dataset;

/// Replaces the dataset with parsed `text`. Blank text clears it; a parse
/// failure leaves the previous dataset in place.
fn load_text(dataset: RwSignal<Option<Dataset>>, text: &str) {
	match Dataset::from_text(text) {
		Ok(Some(loaded)) => dataset.set(Some(loaded)),
		Ok(None) => {
			info!("input cleared");
			dataset.set(None);
		}
		Err(err) => error!("{err}"),
	}
}

fn read_file(dataset: RwSignal<Option<Dataset>>, file: File) {
	info!("reading {} ({} bytes)", file.name(), file.size());
	wasm_bindgen_futures::spawn_local(async move {
		match JsFuture::from(file.text()).await {
			Ok(text) => match text.as_string() {
				Some(text) => load_text(dataset, &text),
				None => error!("{} did not read as text", file.name()),
			},
			Err(err) => error!("failed to read {}: {err:?}", file.name()),
		}
	});
}

/// File picker, drop zone and paste area.
#[component]
pub fn DataInput(dataset: RwSignal<Option<Dataset>>) -> impl IntoView {
	let (dragging, set_dragging) = signal(false);

	let on_file = move |ev: Event| {
		let input: HtmlInputElement = event_target(&ev);
		if let Some(file) = input.files().and_then(|files| files.get(0)) {
			read_file(dataset, file);
		}
	};

	let on_drop = move |ev: DragEvent| {
		ev.prevent_default();
		set_dragging.set(false);
		let file = ev
			.data_transfer()
			.and_then(|dt| dt.files())
			.and_then(|files| files.get(0));
		if let Some(file) = file {
			read_file(dataset, file);
		}
	};

	let on_dragover = move |ev: DragEvent| {
		ev.prevent_default();
		set_dragging.set(true);
	};

	let on_paste = move |ev: Event| load_text(dataset, &event_target_value(&ev));

	view! {
		<div
			class="csv-input-container"
			class:dragging=move || dragging.get()
			on:dragover=on_dragover
			on:dragleave=move |_| set_dragging.set(false)
			on:drop=on_drop
		>
			<h3>"Data Input"</h3>
			<div class="input-section">
				<h4>"Upload CSV File"</h4>
				<input type="file" accept=".csv,.tsv,.txt" on:change=on_file />
				<p class="hint">"or drop a file anywhere in this panel"</p>
			</div>
			<div class="input-section">
				<h4>"Or Paste CSV Data"</h4>
				<textarea on:input=on_paste />
			</div>
		</div>
	}
}
