use web_sys::CanvasRenderingContext2d;

use crate::sankey::layout::{PositionedNode, SankeyLayout};
use crate::sankey::{DiagramConfig, OrdinalColors};

const LINK_OPACITY: f64 = 0.5;
const LABEL_GAP: f64 = 6.0;
const NODE_STROKE: &str = "#000";
const LABEL_FILL: &str = "#000";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Layer {
	Nodes,
	Links,
	Labels,
}

/// Paint order, the same as the standalone page's element order.
const LAYERS: [Layer; 3] = [Layer::Nodes, Layer::Links, Layer::Labels];

pub fn clear(config: &DiagramConfig, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, f64::from(config.width), f64::from(config.height));
}

pub fn render(layout: &SankeyLayout, config: &DiagramConfig, ctx: &CanvasRenderingContext2d) {
	clear(config, ctx);
	let mut scale = OrdinalColors::new(config.color_scheme);
	let colors: Vec<&str> = layout.nodes.iter().map(|n| scale.color(&n.name)).collect();
	for layer in LAYERS {
		match layer {
			Layer::Nodes => draw_nodes(&layout.nodes, &colors, ctx),
			Layer::Links => draw_links(layout, config, &colors, ctx),
			Layer::Labels => draw_labels(&layout.nodes, config, ctx),
		}
	}
}

fn draw_links(
	layout: &SankeyLayout,
	config: &DiagramConfig,
	colors: &[&str],
	ctx: &CanvasRenderingContext2d,
) {
	ctx.save();
	ctx.set_global_alpha(LINK_OPACITY);
	for link in &layout.links {
		let path = layout.path(link);
		let source_color = colors[link.source];

		if config.enable_gradient {
			let gradient = ctx.create_linear_gradient(path.start.0, 0.0, path.end.0, 0.0);
			let _ = gradient.add_color_stop(0.0, source_color);
			let _ = gradient.add_color_stop(1.0, colors[link.target]);
			#[allow(deprecated)]
			ctx.set_stroke_style(&gradient);
		} else {
			ctx.set_stroke_style_str(source_color);
		}
		ctx.set_line_width(link.stroke_width());

		ctx.begin_path();
		ctx.move_to(path.start.0, path.start.1);
		ctx.bezier_curve_to(
			path.control1.0,
			path.control1.1,
			path.control2.0,
			path.control2.1,
			path.end.0,
			path.end.1,
		);
		ctx.stroke();
	}
	ctx.restore();
}

fn draw_nodes(nodes: &[PositionedNode], colors: &[&str], ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(NODE_STROKE);
	ctx.set_line_width(1.0);
	for (node, color) in nodes.iter().zip(colors) {
		let (w, h) = (node.x1 - node.x0, node.height());
		ctx.set_fill_style_str(color);
		ctx.fill_rect(node.x0, node.y0, w, h);
		ctx.stroke_rect(node.x0, node.y0, w, h);
	}
}

/// Labels face inward: left-half nodes get text on their right, the rest on
/// their left.
fn draw_labels(nodes: &[PositionedNode], config: &DiagramConfig, ctx: &CanvasRenderingContext2d) {
	let half = f64::from(config.width) / 2.0;
	ctx.set_fill_style_str(LABEL_FILL);
	ctx.set_font(&format!("{}px sans-serif", config.font_size));
	ctx.set_text_baseline("middle");
	for node in nodes {
		let (x, align) = if node.x0 < half {
			(node.x1 + LABEL_GAP, "start")
		} else {
			(node.x0 - LABEL_GAP, "end")
		};
		ctx.set_text_align(align);
		let _ = ctx.fill_text(&node.name, x, node.center_y());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn links_are_painted_over_nodes_and_under_labels() {
		let pos = |layer| LAYERS.iter().position(|l| *l == layer).unwrap();
		assert!(pos(Layer::Nodes) < pos(Layer::Links));
		assert!(pos(Layer::Links) < pos(Layer::Labels));
	}
}
