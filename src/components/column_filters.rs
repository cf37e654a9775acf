use leptos::prelude::*;
use web_sys::Event;

use crate::sankey::{ColumnMeta, Dataset};

/// One drop-down per column. Options come from the unfiltered data, so they
/// stay put while other columns are filtered.
#[component]
pub fn ColumnFilters(dataset: RwSignal<Option<Dataset>>) -> impl IntoView {
	let columns = move || {
		dataset.with(|d| {
			d.as_ref()
				.map(|d| d.columns().to_vec())
				.unwrap_or_default()
		})
	};

	let filter = move |(idx, meta): (usize, ColumnMeta)| {
		let selected = meta.selected_index();
		let on_select = move |ev: Event| {
			let Ok(option) = event_target_value(&ev).parse::<usize>() else {
				return;
			};
			dataset.update(|d| {
				if let Some(d) = d {
					d.select_index(idx, option);
				}
			});
		};
		let options = meta
			.labels()
			.enumerate()
			.map(|(i, label)| {
				view! {
					<option value=i.to_string() selected={i == selected}>
						{label}
					</option>
				}
			})
			.collect_view();
		view! {
			<div class="setting-group">
				<label>{meta.header.clone()}":"</label>
				<select on:change=on_select>{options}</select>
			</div>
		}
	};

	view! {
		<Show when=move || dataset.with(Option::is_some)>
			<div class="filters-container">
				<h3>"Column Filters"</h3>
				{move || columns().into_iter().enumerate().map(filter).collect_view()}
			</div>
		</Show>
	}
}
