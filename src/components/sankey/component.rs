use leptos::html::Canvas;
use leptos::prelude::*;
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::render;
use crate::error::LayoutError;
use crate::sankey::{DiagramConfig, SankeyLayout};

/// Current layout, or `None` before any data is loaded.
pub type LayoutResult = Option<Result<SankeyLayout, LayoutError>>;

/// The failure to show in place of the diagram, if any.
pub fn layout_error(current: &LayoutResult) -> Option<&LayoutError> {
	current.as_ref().and_then(|r| r.as_ref().err())
}

/// Whether there is a positioned diagram worth exporting.
pub fn is_drawable(current: &LayoutResult) -> bool {
	matches!(current, Some(Ok(_)))
}

/// Draws the positioned diagram onto a canvas sized by the configuration.
///
/// The canvas ref is owned by the caller so the PNG exporter can read the
/// same surface.
#[component]
pub fn SankeyDiagram(
	#[prop(into)] layout: Signal<LayoutResult>,
	#[prop(into)] config: Signal<DiagramConfig>,
	canvas_ref: NodeRef<Canvas>,
) -> impl IntoView {
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let cfg = config.get();
		canvas.set_width(cfg.width);
		canvas.set_height(cfg.height);

		let Some(ctx) = context_2d(&canvas) else {
			warn!("canvas has no 2d context");
			return;
		};
		layout.with(|current| match current {
			Some(Ok(positioned)) => render::render(positioned, &cfg, &ctx),
			Some(Err(err)) => {
				warn!("layout failed: {err}");
				render::clear(&cfg, &ctx);
			}
			None => render::clear(&cfg, &ctx),
		});
	});

	let error = move || layout.with(|current| layout_error(current).map(ToString::to_string));

	view! {
		<canvas node_ref=canvas_ref class="sankey-canvas" style="display: block;" />
		{move || error().map(|msg| view! { <p class="sankey-error">{msg}</p> })}
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sankey::{DiagramConfig, graph, layout};

	fn positioned(rows: &[[&str; 2]]) -> LayoutResult {
		let rows: Vec<Vec<String>> = rows
			.iter()
			.map(|r| r.iter().map(|s| s.to_string()).collect())
			.collect();
		Some(layout(&graph::build(&rows), &DiagramConfig::default()))
	}

	#[test]
	fn acyclic_flow_is_drawable() {
		let current = positioned(&[["A", "B"], ["B", "C"]]);
		assert!(is_drawable(&current));
		assert_eq!(layout_error(&current), None);
	}

	#[test]
	fn circular_flow_is_reported_and_not_drawable() {
		let current = positioned(&[["A", "B"], ["B", "A"]]);
		assert!(!is_drawable(&current));
		assert_eq!(layout_error(&current), Some(&LayoutError::CircularLink));
	}

	#[test]
	fn nothing_loaded_is_neither() {
		assert!(!is_drawable(&None));
		assert_eq!(layout_error(&None), None);
	}
}
