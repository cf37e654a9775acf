use leptos::html::Canvas;
use leptos::prelude::*;
use log::error;

use crate::components::column_filters::ColumnFilters;
use crate::components::data_input::DataInput;
use crate::components::sankey::{LayoutResult, SankeyDiagram, is_drawable};
use crate::components::settings_panel::SettingsPanel;
use crate::error::ExportError;
use crate::export;
use crate::sankey::{self, Dataset, DiagramConfig, SankeyGraph};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let dataset = RwSignal::new(None::<Dataset>);
	let config = RwSignal::new(DiagramConfig::default());
	let canvas_ref = NodeRef::<Canvas>::new();

	// rebuilt from scratch whenever data, filters or settings change
	let graph: Memo<Option<SankeyGraph>> =
		Memo::new(move |_| dataset.with(|d| d.as_ref().map(Dataset::graph)));
	let layout: Memo<LayoutResult> = Memo::new(move |_| {
		let cfg = config.get();
		graph.with(|g| g.as_ref().map(|g| sankey::layout(g, &cfg)))
	});
	let has_data = move || dataset.with(Option::is_some);
	// a cyclic flow would make the exported page fail in d3
	let html_ready = move || layout.with(is_drawable);

	let on_png = move |_| {
		let result = canvas_ref
			.get_untracked()
			.ok_or(ExportError::NothingToExport)
			.and_then(|canvas| export::save_png(&canvas));
		if let Err(err) = result {
			error!("PNG export failed: {err}");
		}
	};

	let on_html = move |_| {
		let result = graph.with_untracked(|g| match g {
			Some(g) => config.with_untracked(|cfg| export::save_html(g, cfg)),
			None => Err(ExportError::NothingToExport),
		});
		if let Err(err) = result {
			error!("HTML export failed: {err}");
		}
	};

	view! {
		<div class="App">
			<h1>"Sankey Diagram Generator"</h1>
			<div class="main-content-container">
				<div class="input-settings-group">
					<DataInput dataset=dataset />
					<SettingsPanel config=config />
					<ColumnFilters dataset=dataset />
					<div class="export-buttons">
						<button on:click=on_png disabled=move || !has_data()>
							"Download PNG"
						</button>
						<button on:click=on_html disabled=move || !html_ready()>
							"Download HTML"
						</button>
					</div>
				</div>

				<Show when=has_data>
					<div class="sankey-diagram-container">
						<SankeyDiagram layout=layout config=config canvas_ref=canvas_ref />
					</div>
				</Show>
			</div>
		</div>
	}
}
