//! Sankey layout: columns by flow depth, node heights by value, vertical
//! positions by iterative relaxation.
//!
//! Nodes with outgoing links sit at their depth; sinks are pushed to the
//! last column. Within a column, nodes are stacked with `node_padding`
//! between them and then relaxed toward the weighted center of their
//! neighbors. With auto-sort off, a column keeps first-seen order.

use std::cmp::Ordering;

use serde::Serialize;

use super::config::{DiagramConfig, LAYOUT_ITERATIONS, NODE_WIDTH};
use super::types::SankeyGraph;
use crate::error::LayoutError;

const EPSILON: f64 = 1e-6;

/// A node with its rectangle `[x0, x1] x [y0, y1]`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PositionedNode {
	/// Display name.
	pub name: String,
	/// Larger of total inflow and total outflow.
	pub value: f64,
	/// Longest path from a source node.
	pub depth: usize,
	/// Column index after justification.
	pub layer: usize,
	/// Left edge.
	pub x0: f64,
	/// Right edge.
	pub x1: f64,
	/// Top edge.
	pub y0: f64,
	/// Bottom edge.
	pub y1: f64,
	#[serde(skip)]
	source_links: Vec<usize>,
	#[serde(skip)]
	target_links: Vec<usize>,
}

impl PositionedNode {
	/// Rectangle height, proportional to value.
	pub fn height(&self) -> f64 {
		self.y1 - self.y0
	}

	/// Vertical middle, where the label sits.
	pub fn center_y(&self) -> f64 {
		(self.y0 + self.y1) / 2.0
	}
}

/// A link with its band width and the vertical centers of its two ends.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PositionedLink {
	/// Index into [`SankeyLayout::nodes`].
	pub source: usize,
	/// Index into [`SankeyLayout::nodes`].
	pub target: usize,
	/// Flow carried.
	pub value: f64,
	/// Band thickness, `value` times the layout scale.
	pub width: f64,
	/// Center of the band where it leaves the source.
	pub y0: f64,
	/// Center of the band where it enters the target.
	pub y1: f64,
}

impl PositionedLink {
	/// Stroke width used when drawing; thin flows stay visible.
	pub fn stroke_width(&self) -> f64 {
		self.width.max(1.0)
	}
}

/// Horizontal cubic Bézier from the right edge of the source node to the
/// left edge of the target node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkPath {
	/// On the source node's right edge.
	pub start: (f64, f64),
	/// First control point.
	pub control1: (f64, f64),
	/// Second control point.
	pub control2: (f64, f64),
	/// On the target node's left edge.
	pub end: (f64, f64),
}

impl LinkPath {
	/// SVG path data, `M … C …`.
	pub fn to_svg(&self) -> String {
		format!(
			"M{},{}C{},{},{},{},{},{}",
			self.start.0,
			self.start.1,
			self.control1.0,
			self.control1.1,
			self.control2.0,
			self.control2.1,
			self.end.0,
			self.end.1
		)
	}
}

/// Positioned geometry for one graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SankeyLayout {
	/// Same order as the graph's nodes.
	pub nodes: Vec<PositionedNode>,
	/// Same order as the graph's edges.
	pub links: Vec<PositionedLink>,
}

impl SankeyLayout {
	/// True for a layout of an empty graph.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Horizontal cubic curve from the source to the target of `link`.
	pub fn path(&self, link: &PositionedLink) -> LinkPath {
		let sx = self.nodes[link.source].x1;
		let tx = self.nodes[link.target].x0;
		let mid = (sx + tx) / 2.0;
		LinkPath {
			start: (sx, link.y0),
			control1: (mid, link.y0),
			control2: (mid, link.y1),
			end: (tx, link.y1),
		}
	}

	/// Number of columns the nodes were spread over.
	pub fn column_count(&self) -> usize {
		self.nodes.iter().map(|n| n.layer + 1).max().unwrap_or(0)
	}
}

/// Positions `graph` inside the extent described by `config`.
pub fn layout(graph: &SankeyGraph, config: &DiagramConfig) -> Result<SankeyLayout, LayoutError> {
	if graph.nodes.is_empty() {
		return Ok(SankeyLayout::default());
	}
	let mut solver = Solver::new(graph, config);
	solver.compute_node_values();
	solver.compute_node_depths()?;
	let mut columns = solver.compute_node_layers();
	solver.compute_node_breadths(&mut columns);
	solver.compute_link_breadths();
	Ok(SankeyLayout {
		nodes: solver.nodes,
		links: solver.links,
	})
}

struct Solver {
	nodes: Vec<PositionedNode>,
	links: Vec<PositionedLink>,
	x0: f64,
	y0: f64,
	x1: f64,
	y1: f64,
	padding: f64,
	py: f64,
	auto_sort: bool,
}

impl Solver {
	fn new(graph: &SankeyGraph, config: &DiagramConfig) -> Self {
		let [[x0, y0], [x1, y1]] = config.extent();
		let mut nodes: Vec<PositionedNode> = graph
			.nodes
			.iter()
			.map(|n| PositionedNode {
				name: n.name.clone(),
				value: 0.0,
				depth: 0,
				layer: 0,
				x0: 0.0,
				x1: 0.0,
				y0: 0.0,
				y1: 0.0,
				source_links: Vec::new(),
				target_links: Vec::new(),
			})
			.collect();
		let links = graph
			.edges
			.iter()
			.enumerate()
			.map(|(i, e)| {
				nodes[e.source].source_links.push(i);
				nodes[e.target].target_links.push(i);
				PositionedLink {
					source: e.source,
					target: e.target,
					value: e.value,
					width: 0.0,
					y0: 0.0,
					y1: 0.0,
				}
			})
			.collect();
		let padding = f64::from(config.node_padding);
		Self {
			nodes,
			links,
			x0,
			y0,
			x1,
			y1,
			padding,
			py: padding,
			auto_sort: config.auto_sort,
		}
	}

	fn compute_node_values(&mut self) {
		for node in &mut self.nodes {
			let out: f64 = node.source_links.iter().map(|&l| self.links[l].value).sum();
			let inc: f64 = node.target_links.iter().map(|&l| self.links[l].value).sum();
			node.value = out.max(inc);
		}
	}

	/// Breadth-first waves from every node; a wave count above the node
	/// count means some node is its own ancestor.
	fn compute_node_depths(&mut self) -> Result<(), LayoutError> {
		let n = self.nodes.len();
		let mut current: Vec<usize> = (0..n).collect();
		let mut depth = 0;
		while !current.is_empty() {
			let mut queued = vec![false; n];
			let mut next = Vec::new();
			for &idx in &current {
				self.nodes[idx].depth = depth;
				for &l in &self.nodes[idx].source_links {
					let target = self.links[l].target;
					if !queued[target] {
						queued[target] = true;
						next.push(target);
					}
				}
			}
			depth += 1;
			if depth > n {
				return Err(LayoutError::CircularLink);
			}
			current = next;
		}
		Ok(())
	}

	fn compute_node_layers(&mut self) -> Vec<Vec<usize>> {
		let count = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0) + 1;
		let kx = if count > 1 {
			(self.x1 - self.x0 - NODE_WIDTH) / (count - 1) as f64
		} else {
			0.0
		};
		let mut columns = vec![Vec::new(); count];
		for (idx, node) in self.nodes.iter_mut().enumerate() {
			let layer = if node.source_links.is_empty() {
				count - 1
			} else {
				node.depth.min(count - 1)
			};
			node.layer = layer;
			node.x0 = self.x0 + layer as f64 * kx;
			node.x1 = node.x0 + NODE_WIDTH;
			columns[layer].push(idx);
		}
		columns.retain(|c| !c.is_empty());
		columns
	}

	fn compute_node_breadths(&mut self, columns: &mut [Vec<usize>]) {
		let tallest = columns.iter().map(Vec::len).max().unwrap_or(1);
		self.py = self
			.padding
			.min((self.y1 - self.y0) / (tallest as f64 - 1.0));
		self.initialize_node_breadths(columns);
		for i in 0..LAYOUT_ITERATIONS {
			let alpha = 0.99_f64.powi(i as i32);
			let beta = (1.0 - alpha).max((i + 1) as f64 / LAYOUT_ITERATIONS as f64);
			self.relax_right_to_left(columns, alpha, beta);
			self.relax_left_to_right(columns, alpha, beta);
		}
	}

	fn initialize_node_breadths(&mut self, columns: &[Vec<usize>]) {
		let ky = columns
			.iter()
			.map(|c| {
				let total: f64 = c.iter().map(|&n| self.nodes[n].value).sum();
				(self.y1 - self.y0 - (c.len() as f64 - 1.0) * self.py) / total
			})
			.fold(f64::INFINITY, f64::min);

		for column in columns {
			let mut y = self.y0;
			for &idx in column {
				let node = &mut self.nodes[idx];
				node.y0 = y;
				node.y1 = y + node.value * ky;
				y = node.y1 + self.py;
				for &l in &node.source_links {
					self.links[l].width = self.links[l].value * ky;
				}
			}
			let slack = (self.y1 - y + self.py) / (column.len() + 1) as f64;
			for (i, &idx) in column.iter().enumerate() {
				let shift = slack * (i + 1) as f64;
				self.nodes[idx].y0 += shift;
				self.nodes[idx].y1 += shift;
			}
			for &idx in column {
				self.sort_source_links(idx);
				self.sort_target_links(idx);
			}
		}
	}

	fn relax_left_to_right(&mut self, columns: &mut [Vec<usize>], alpha: f64, beta: f64) {
		for i in 1..columns.len() {
			for &target in &columns[i] {
				let node = &self.nodes[target];
				let (mut y, mut w) = (0.0, 0.0);
				for &l in &node.target_links {
					let link = &self.links[l];
					let v = link.value * (node.layer as f64 - self.nodes[link.source].layer as f64);
					y += self.target_top(link.source, target) * v;
					w += v;
				}
				if w <= 0.0 {
					continue;
				}
				let dy = (y / w - node.y0) * alpha;
				self.shift(target, dy);
				self.reorder_node_links(target);
			}
			if self.auto_sort {
				self.sort_by_breadth(&mut columns[i]);
			}
			self.resolve_collisions(&columns[i], beta);
		}
	}

	fn relax_right_to_left(&mut self, columns: &mut [Vec<usize>], alpha: f64, beta: f64) {
		for i in (0..columns.len().saturating_sub(1)).rev() {
			for &source in &columns[i] {
				let node = &self.nodes[source];
				let (mut y, mut w) = (0.0, 0.0);
				for &l in &node.source_links {
					let link = &self.links[l];
					let v = link.value * (self.nodes[link.target].layer as f64 - node.layer as f64);
					y += self.source_top(source, link.target) * v;
					w += v;
				}
				if w <= 0.0 {
					continue;
				}
				let dy = (y / w - node.y0) * alpha;
				self.shift(source, dy);
				self.reorder_node_links(source);
			}
			if self.auto_sort {
				self.sort_by_breadth(&mut columns[i]);
			}
			self.resolve_collisions(&columns[i], beta);
		}
	}

	fn shift(&mut self, idx: usize, dy: f64) {
		self.nodes[idx].y0 += dy;
		self.nodes[idx].y1 += dy;
	}

	fn sort_by_breadth(&self, column: &mut [usize]) {
		column.sort_by(|&a, &b| self.nodes[a].y0.total_cmp(&self.nodes[b].y0));
	}

	/// Pushes overlapping nodes apart, outward from the middle node, then
	/// back inside the extent.
	fn resolve_collisions(&mut self, column: &[usize], alpha: f64) {
		let Some(&subject) = column.get(column.len() >> 1) else {
			return;
		};
		let mid = column.len() >> 1;
		let (sy0, sy1) = (self.nodes[subject].y0, self.nodes[subject].y1);
		self.resolve_bottom_to_top(&column[..mid], sy0 - self.py, alpha);
		self.resolve_top_to_bottom(&column[mid + 1..], sy1 + self.py, alpha);
		self.resolve_bottom_to_top(column, self.y1, alpha);
		self.resolve_top_to_bottom(column, self.y0, alpha);
	}

	fn resolve_top_to_bottom(&mut self, nodes: &[usize], mut y: f64, alpha: f64) {
		for &idx in nodes {
			let dy = (y - self.nodes[idx].y0) * alpha;
			if dy > EPSILON {
				self.shift(idx, dy);
			}
			y = self.nodes[idx].y1 + self.py;
		}
	}

	fn resolve_bottom_to_top(&mut self, nodes: &[usize], mut y: f64, alpha: f64) {
		for &idx in nodes.iter().rev() {
			let dy = (self.nodes[idx].y1 - y) * alpha;
			if dy > EPSILON {
				self.shift(idx, -dy);
			}
			y = self.nodes[idx].y0 - self.py;
		}
	}

	/// Where the band from `source` would ideally enter `target`, measured
	/// at the top of `target`.
	fn target_top(&self, source: usize, target: usize) -> f64 {
		let s = &self.nodes[source];
		let mut y = s.y0 - (s.source_links.len() as f64 - 1.0) * self.py / 2.0;
		for &l in &s.source_links {
			let link = &self.links[l];
			if link.target == target {
				break;
			}
			y += link.width + self.py;
		}
		for &l in &self.nodes[target].target_links {
			let link = &self.links[l];
			if link.source == source {
				break;
			}
			y -= link.width;
		}
		y
	}

	fn source_top(&self, source: usize, target: usize) -> f64 {
		let t = &self.nodes[target];
		let mut y = t.y0 - (t.target_links.len() as f64 - 1.0) * self.py / 2.0;
		for &l in &t.target_links {
			let link = &self.links[l];
			if link.source == source {
				break;
			}
			y += link.width + self.py;
		}
		for &l in &self.nodes[source].source_links {
			let link = &self.links[l];
			if link.target == target {
				break;
			}
			y -= link.width;
		}
		y
	}

	fn reorder_node_links(&mut self, idx: usize) {
		let incoming = self.nodes[idx].target_links.clone();
		for l in incoming {
			self.sort_source_links(self.links[l].source);
		}
		let outgoing = self.nodes[idx].source_links.clone();
		for l in outgoing {
			self.sort_target_links(self.links[l].target);
		}
	}

	fn sort_source_links(&mut self, idx: usize) {
		let mut links = std::mem::take(&mut self.nodes[idx].source_links);
		links.sort_by(|&a, &b| self.by_breadth(self.links[a].target, self.links[b].target, a, b));
		self.nodes[idx].source_links = links;
	}

	fn sort_target_links(&mut self, idx: usize) {
		let mut links = std::mem::take(&mut self.nodes[idx].target_links);
		links.sort_by(|&a, &b| self.by_breadth(self.links[a].source, self.links[b].source, a, b));
		self.nodes[idx].target_links = links;
	}

	fn by_breadth(&self, node_a: usize, node_b: usize, link_a: usize, link_b: usize) -> Ordering {
		self.nodes[node_a]
			.y0
			.total_cmp(&self.nodes[node_b].y0)
			.then(link_a.cmp(&link_b))
	}

	fn compute_link_breadths(&mut self) {
		for node in &self.nodes {
			let mut y0 = node.y0;
			for &l in &node.source_links {
				let link = &mut self.links[l];
				link.y0 = y0 + link.width / 2.0;
				y0 += link.width;
			}
			let mut y1 = node.y0;
			for &l in &node.target_links {
				let link = &mut self.links[l];
				link.y1 = y1 + link.width / 2.0;
				y1 += link.width;
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sankey::graph;
	use crate::sankey::types::Row;

	const TOLERANCE: f64 = 1e-4;

	fn graph_of(rows: &[&[&str]]) -> SankeyGraph {
		let rows: Vec<Row> = rows
			.iter()
			.map(|r| r.iter().map(|s| s.to_string()).collect())
			.collect();
		graph::build(&rows)
	}

	fn node<'a>(layout: &'a SankeyLayout, name: &str) -> &'a PositionedNode {
		layout.nodes.iter().find(|n| n.name == name).unwrap()
	}

	fn assert_columns_disjoint(layout: &SankeyLayout, padding: f64) {
		for layer in 0..layout.column_count() {
			let mut column: Vec<_> = layout.nodes.iter().filter(|n| n.layer == layer).collect();
			column.sort_by(|a, b| a.y0.total_cmp(&b.y0));
			for pair in column.windows(2) {
				assert!(
					pair[1].y0 + TOLERANCE >= pair[0].y1 + padding,
					"{} overlaps {}",
					pair[0].name,
					pair[1].name
				);
			}
		}
	}

	#[test]
	fn empty_graph_gives_empty_layout() {
		let out = layout(&SankeyGraph::default(), &DiagramConfig::default()).unwrap();
		assert!(out.is_empty());
		assert_eq!(out.column_count(), 0);
	}

	#[test]
	fn chain_spreads_across_the_width() {
		let cfg = DiagramConfig::default();
		let out = layout(&graph_of(&[&["A", "B", "C"]]), &cfg).unwrap();
		let (a, b, c) = (node(&out, "A"), node(&out, "B"), node(&out, "C"));
		assert_eq!((a.layer, b.layer, c.layer), (0, 1, 2));
		assert_eq!(a.x0, 1.0);
		assert_eq!(c.x1, 899.0);
		assert!((b.x0 - (1.0 + (899.0 - 1.0 - NODE_WIDTH) / 2.0)).abs() < TOLERANCE);
		assert!(out.nodes.iter().all(|n| n.x1 - n.x0 == NODE_WIDTH));
	}

	#[test]
	fn sinks_are_justified_to_the_last_column() {
		let out = layout(
			&graph_of(&[&["A", "B", "C"], &["A", "D"]]),
			&DiagramConfig::default(),
		)
		.unwrap();
		assert_eq!(node(&out, "D").depth, 1);
		assert_eq!(node(&out, "D").layer, 2);
	}

	#[test]
	fn values_take_the_larger_side() {
		let out = layout(
			&graph_of(&[&["X", "Y", "Z"], &["X", "Y", "W"]]),
			&DiagramConfig::default(),
		)
		.unwrap();
		assert_eq!(node(&out, "X").value, 2.0);
		assert_eq!(node(&out, "Y").value, 2.0);
		assert_eq!(node(&out, "Z").value, 1.0);
		assert_eq!(out.links.len(), 4);
	}

	#[test]
	fn heights_are_proportional_to_value() {
		let out = layout(
			&graph_of(&[&["a", "b"], &["a", "b"], &["a", "c"], &["d", "c"]]),
			&DiagramConfig::default(),
		)
		.unwrap();
		let ratio = out.nodes[0].height() / out.nodes[0].value;
		for n in &out.nodes {
			assert!((n.height() / n.value - ratio).abs() < TOLERANCE, "{}", n.name);
		}
		for link in &out.links {
			assert!((link.width - link.value * ratio).abs() < TOLERANCE);
		}
	}

	#[test]
	fn nodes_stay_in_extent_without_overlap() {
		let cfg = DiagramConfig::default();
		let rows: Vec<[String; 3]> = (0..12)
			.map(|i| {
				[
					format!("s{}", i % 4),
					format!("m{}", i % 3),
					format!("t{}", i % 5),
				]
			})
			.collect();
		let out = layout(&graph::build(&rows), &cfg).unwrap();
		let [[x0, y0], [x1, y1]] = cfg.extent();
		for n in &out.nodes {
			assert!(n.x0 >= x0 - TOLERANCE && n.x1 <= x1 + TOLERANCE);
			assert!(n.y0 >= y0 - TOLERANCE && n.y1 <= y1 + TOLERANCE, "{:?}", n);
		}
		assert_columns_disjoint(&out, f64::from(cfg.node_padding));
	}

	#[test]
	fn insertion_order_kept_without_auto_sort() {
		let cfg = DiagramConfig {
			auto_sort: false,
			..DiagramConfig::default()
		};
		let g = graph_of(&[&["a", "z"], &["b", "y"], &["c", "x"], &["a", "x"], &["c", "z"]]);
		let out = layout(&g, &cfg).unwrap();
		for layer in 0..out.column_count() {
			let column: Vec<_> = out
				.nodes
				.iter()
				.enumerate()
				.filter(|(_, n)| n.layer == layer)
				.collect();
			for pair in column.windows(2) {
				assert!(pair[0].0 < pair[1].0);
				assert!(pair[0].1.y1 <= pair[1].1.y0 + TOLERANCE);
			}
		}
	}

	#[test]
	fn auto_sort_still_avoids_overlap() {
		let cfg = DiagramConfig {
			auto_sort: true,
			node_padding: 4,
			..DiagramConfig::default()
		};
		let g = graph_of(&[&["a", "z"], &["b", "y"], &["c", "x"], &["a", "x"], &["c", "z"]]);
		let out = layout(&g, &cfg).unwrap();
		assert_columns_disjoint(&out, 4.0);
	}

	#[test]
	fn link_ends_sit_inside_their_nodes() {
		let out = layout(
			&graph_of(&[&["A", "B", "C"], &["A", "B", "D"], &["E", "B"]]),
			&DiagramConfig::default(),
		)
		.unwrap();
		for link in &out.links {
			let (s, t) = (&out.nodes[link.source], &out.nodes[link.target]);
			assert!(link.y0 >= s.y0 - TOLERANCE && link.y0 <= s.y1 + TOLERANCE);
			assert!(link.y1 >= t.y0 - TOLERANCE && link.y1 <= t.y1 + TOLERANCE);
			let path = out.path(link);
			assert_eq!(path.start, (s.x1, link.y0));
			assert_eq!(path.end, (t.x0, link.y1));
			assert_eq!(path.control1.0, path.control2.0);
		}
	}

	#[test]
	fn cycles_are_rejected() {
		let cfg = DiagramConfig::default();
		assert_eq!(
			layout(&graph_of(&[&["A", "B"], &["B", "A"]]), &cfg),
			Err(LayoutError::CircularLink)
		);
		assert_eq!(
			layout(&graph_of(&[&["A", "A"]]), &cfg),
			Err(LayoutError::CircularLink)
		);
	}

	#[test]
	fn thin_links_get_a_visible_stroke() {
		let link = PositionedLink {
			source: 0,
			target: 1,
			value: 1.0,
			width: 0.2,
			y0: 0.0,
			y1: 0.0,
		};
		assert_eq!(link.stroke_width(), 1.0);
	}

	#[test]
	fn svg_path_is_a_single_cubic() {
		let path = LinkPath {
			start: (0.0, 1.0),
			control1: (5.0, 1.0),
			control2: (5.0, 3.0),
			end: (10.0, 3.0),
		};
		assert_eq!(path.to_svg(), "M0,1C5,1,5,3,10,3");
	}
}
