use leptos::prelude::*;
use web_sys::Event;

use crate::sankey::{ColorScheme, DiagramConfig, NumericField};

const NUMERIC_FIELDS: [NumericField; 4] = [
	NumericField::FontSize,
	NumericField::NodePadding,
	NumericField::Width,
	NumericField::Height,
];

/// Number inputs commit on `change` so a floor is not applied mid-typing.
#[component]
fn NumericSetting(config: RwSignal<DiagramConfig>, field: NumericField) -> impl IntoView {
	view! {
		<div class="setting-group">
			<label>{field.label()}":"</label>
			<input
				type="number"
				min=field.floor().to_string()
				prop:value=move || config.with(|c| c.get(field)).to_string()
				on:change=move |ev| config.update(|c| c.set_numeric(field, &event_target_value(&ev)))
			/>
		</div>
	}
}

#[component]
fn ToggleSetting(
	label: &'static str,
	#[prop(into)] checked: Signal<bool>,
	#[prop(into)] on_toggle: Callback<bool>,
) -> impl IntoView {
	view! {
		<div class="setting-group">
			<label>{label}</label>
			<input
				type="checkbox"
				prop:checked=move || checked.get()
				on:change=move |ev| on_toggle.run(event_target_checked(&ev))
			/>
		</div>
	}
}

#[component]
pub fn SettingsPanel(config: RwSignal<DiagramConfig>) -> impl IntoView {
	let on_scheme = move |ev: Event| {
		if let Some(scheme) = ColorScheme::from_name(&event_target_value(&ev)) {
			config.update(|c| c.color_scheme = scheme);
		}
	};

	view! {
		<div class="settings-container">
			<h3>"Diagram Settings"</h3>
			{NUMERIC_FIELDS
				.into_iter()
				.map(|field| view! { <NumericSetting config=config field=field /> })
				.collect_view()}
			<div class="setting-group">
				<label>"Color Scheme:"</label>
				<select on:change=on_scheme>
					{ColorScheme::ALL
						.into_iter()
						.map(|scheme| {
							view! {
								<option
									value=scheme.name()
									selected=move || config.with(|c| c.color_scheme == scheme)
								>
									{scheme.name()}
								</option>
							}
						})
						.collect_view()}
				</select>
			</div>
			<ToggleSetting
				label="Enable Gradient:"
				checked=Signal::derive(move || config.with(|c| c.enable_gradient))
				on_toggle=move |on: bool| config.update(|c| c.enable_gradient = on)
			/>
			<ToggleSetting
				label="Auto Sort Nodes:"
				checked=Signal::derive(move || config.with(|c| c.auto_sort))
				on_toggle=move |on: bool| config.update(|c| c.auto_sort = on)
			/>
		</div>
	}
}
