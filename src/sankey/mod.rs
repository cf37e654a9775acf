//! Browser-independent diagram logic: rows to graph, filters, settings,
//! layout and document export.

pub mod config;
pub mod dataset;
pub mod document;
pub mod filter;
pub mod graph;
pub mod layout;
pub mod palette;
pub mod types;

pub use config::{DiagramConfig, NumericField};
pub use dataset::Dataset;
pub use filter::{ColumnMeta, Selection};
pub use layout::{SankeyLayout, layout};
pub use palette::{ColorScheme, OrdinalColors};
pub use types::{Edge, Node, Row, SankeyGraph};
