//! Saving the diagram to local files through a temporary download link.

use log::info;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, HtmlCanvasElement, Url, Window};

use crate::error::ExportError;
use crate::sankey::document::standalone_html;
use crate::sankey::{DiagramConfig, SankeyGraph};

pub const PNG_FILE_NAME: &str = "sankey-diagram.png";
pub const HTML_FILE_NAME: &str = "sankey-diagram.html";
/// How long an object URL outlives the click that downloads it, in ms.
const REVOKE_DELAY_MS: i32 = 1_000;

/// Saves the canvas contents, at the configured diagram size, as PNG.
pub fn save_png(canvas: &HtmlCanvasElement) -> Result<(), ExportError> {
	let url = canvas.to_data_url_with_type("image/png")?;
	trigger_download(&url, PNG_FILE_NAME)?;
	info!("exported {PNG_FILE_NAME}");
	Ok(())
}

/// Saves a standalone HTML page that redraws the diagram on open.
pub fn save_html(graph: &SankeyGraph, config: &DiagramConfig) -> Result<(), ExportError> {
	let html = standalone_html(graph, config)?;
	let parts = js_sys::Array::of1(&JsValue::from_str(&html));
	let options = BlobPropertyBag::new();
	options.set_type("text/html");
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;

	let url = Url::create_object_url_with_blob(&blob)?;
	let saved = trigger_download(&url, HTML_FILE_NAME);
	revoke_later(url)?;
	saved?;
	info!("exported {HTML_FILE_NAME} ({} bytes)", html.len());
	Ok(())
}

fn window() -> Result<Window, ExportError> {
	web_sys::window().ok_or_else(|| ExportError::Browser("no window available".into()))
}

fn document() -> Result<Document, ExportError> {
	window()?
		.document()
		.ok_or_else(|| ExportError::Browser("no document available".into()))
}

/// The download starts asynchronously after the click, so the URL has to
/// stay valid for a while.
fn revoke_later(url: String) -> Result<(), ExportError> {
	let revoke = Closure::once_into_js(move || {
		let _ = Url::revoke_object_url(&url);
	});
	window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
		revoke.unchecked_ref(),
		REVOKE_DELAY_MS,
	)?;
	Ok(())
}

fn trigger_download(href: &str, file_name: &str) -> Result<(), ExportError> {
	let document = document()?;
	let body = document
		.body()
		.ok_or_else(|| ExportError::Browser("document has no body".into()))?;
	let anchor: HtmlAnchorElement = document
		.create_element("a")?
		.dyn_into()
		.map_err(|_| ExportError::Browser("created element is not an anchor".into()))?;
	anchor.set_href(href);
	anchor.set_download(file_name);

	body.append_child(&anchor)?;
	anchor.click();
	body.remove_child(&anchor)?;
	Ok(())
}
