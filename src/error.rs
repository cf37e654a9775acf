//! Error types for ingestion, layout and export.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure turning raw text into a table.
#[derive(Debug, Error)]
pub enum IngestError {
	/// The CSV reader rejected the input.
	#[error("failed to parse CSV: {0}")]
	Csv(#[from] csv::Error),
}

/// Failure positioning a graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
	/// The flow contains a cycle (a self loop counts), so no depth ordering exists.
	#[error("circular link detected; Sankey diagrams need an acyclic flow")]
	CircularLink,
}

/// Failure producing or saving an export artifact.
#[derive(Debug, Error)]
pub enum ExportError {
	/// Embedding the diagram payload failed.
	#[error("failed to encode diagram data: {0}")]
	Encode(#[from] serde_json::Error),
	/// A browser API call failed.
	#[error("browser error: {0}")]
	Browser(String),
	/// There is nothing on screen to export yet.
	#[error("no diagram has been rendered")]
	NothingToExport,
}

impl From<JsValue> for ExportError {
	fn from(value: JsValue) -> Self {
		Self::Browser(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
