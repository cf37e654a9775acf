//! Rows to nodes and edges.

use std::collections::HashMap;

use super::types::{Edge, Node, SankeyGraph};

/// Builds a graph from rows, one edge per adjacent pair of non-empty fields.
///
/// Nodes keep first-seen order scanning rows top to bottom and fields left to
/// right. Repeated source/target pairs stay separate edges of value 1.
pub fn build<R: AsRef<[String]>>(rows: &[R]) -> SankeyGraph {
	let mut graph = SankeyGraph::default();
	let mut index: HashMap<&str, usize> = HashMap::new();

	for row in rows {
		for pair in row.as_ref().windows(2) {
			let (source, target) = (pair[0].as_str(), pair[1].as_str());
			if source.is_empty() || target.is_empty() {
				continue;
			}
			let source = intern(&mut graph.nodes, &mut index, source);
			let target = intern(&mut graph.nodes, &mut index, target);
			graph.edges.push(Edge {
				source,
				target,
				value: 1.0,
			});
		}
	}
	graph
}

fn intern<'a>(
	nodes: &mut Vec<Node>,
	index: &mut HashMap<&'a str, usize>,
	name: &'a str,
) -> usize {
	*index.entry(name).or_insert_with(|| {
		nodes.push(Node { name: name.to_owned() });
		nodes.len() - 1
	})
}
