//! Graph data shared by the builder, layout and exporters.

use serde::{Deserialize, Serialize};

/// One parsed record, one field per column.
pub type Row = Vec<String>;

/// A distinct field value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
	/// Display name, unique within a graph.
	pub name: String,
}

/// Directed flow between two entries of [`SankeyGraph::nodes`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
	/// Index of the upstream node.
	pub source: usize,
	/// Index of the downstream node.
	pub target: usize,
	/// Flow carried; 1 per row occurrence.
	pub value: f64,
}

/// Nodes in first-seen order plus one edge per adjacent field pair.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SankeyGraph {
	/// Nodes in first-seen order.
	pub nodes: Vec<Node>,
	/// Edges; parallel duplicates are kept.
	#[serde(rename = "links")]
	pub edges: Vec<Edge>,
}

impl SankeyGraph {
	/// True when no row produced a node.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Name of the node at `idx`.
	pub fn node_name(&self, idx: usize) -> Option<&str> {
		self.nodes.get(idx).map(|n| n.name.as_str())
	}
}
