//! Standalone HTML export: the graph and settings inlined as JSON next to a
//! script that redraws the diagram with d3-sankey.

use serde::Serialize;

use super::config::{DiagramConfig, NODE_WIDTH};
use super::types::SankeyGraph;
use crate::error::ExportError;

/// d3 bundle loaded by the exported page.
pub const D3_URL: &str = "https://cdn.jsdelivr.net/npm/d3@7";
/// d3-sankey plugin loaded after d3.
pub const D3_SANKEY_URL: &str = "https://cdn.jsdelivr.net/npm/d3-sankey@0.12";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Payload<'a> {
	graph: &'a SankeyGraph,
	config: &'a DiagramConfig,
	colors: &'static [&'static str],
	node_width: f64,
}

const SCRIPT: &str = r##"
const { graph, config, colors, nodeWidth } = JSON.parse(document.getElementById("sankey-data").textContent);
const width = config.width, height = config.height;
const svg = d3.select("#sankey").attr("width", width).attr("height", height).append("g");
const generator = d3.sankey()
  .nodeWidth(nodeWidth)
  .nodePadding(config.nodePadding)
  .extent([[1, 1], [width - 1, height - 6]]);
if (!config.autoSort) generator.nodeSort(null);
const { nodes, links } = generator({
  nodes: graph.nodes.map(d => Object.assign({}, d)),
  links: graph.links.map(d => Object.assign({}, d))
});
const color = d3.scaleOrdinal(colors);
nodes.forEach(d => color(d.name));
const defs = svg.append("defs");
if (config.enableGradient) {
  links.forEach((link, i) => {
    const gradient = defs.append("linearGradient")
      .attr("id", `gradient-${i}`)
      .attr("gradientUnits", "userSpaceOnUse")
      .attr("x1", link.source.x1)
      .attr("x2", link.target.x0);
    gradient.append("stop").attr("offset", "0%").attr("stop-color", color(link.source.name));
    gradient.append("stop").attr("offset", "100%").attr("stop-color", color(link.target.name));
  });
}
svg.append("g").selectAll("rect").data(nodes).join("rect")
  .attr("x", d => d.x0).attr("y", d => d.y0)
  .attr("height", d => d.y1 - d.y0).attr("width", d => d.x1 - d.x0)
  .attr("fill", d => color(d.name)).attr("stroke", "#000");
svg.append("g").attr("fill", "none").attr("stroke-opacity", 0.5)
  .selectAll("path").data(links).join("path")
  .attr("d", d3.sankeyLinkHorizontal())
  .attr("stroke", (d, i) => config.enableGradient ? `url(#gradient-${i})` : color(d.source.name))
  .attr("stroke-width", d => Math.max(1, d.width));
svg.append("g").style("font", `${config.fontSize}px sans-serif`)
  .selectAll("text").data(nodes).join("text")
  .attr("x", d => d.x0 < width / 2 ? d.x1 + 6 : d.x0 - 6)
  .attr("y", d => (d.y1 + d.y0) / 2)
  .attr("dy", "0.35em")
  .attr("text-anchor", d => d.x0 < width / 2 ? "start" : "end")
  .text(d => d.name);
"##;

/// Builds a self-contained page reproducing the current diagram. The page
/// fetches d3 from a CDN when opened.
pub fn standalone_html(graph: &SankeyGraph, config: &DiagramConfig) -> Result<String, ExportError> {
	let payload = serde_json::to_string(&Payload {
		graph,
		config,
		colors: config.color_scheme.colors(),
		node_width: NODE_WIDTH,
	})?;
	// keep the payload from closing its own <script> element
	let payload = payload.replace("</", "<\\/");

	Ok(format!(
		r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Sankey Diagram</title>
<script src="{D3_URL}"></script>
<script src="{D3_SANKEY_URL}"></script>
</head>
<body>
<svg id="sankey"></svg>
<script type="application/json" id="sankey-data">{payload}</script>
<script>{SCRIPT}</script>
</body>
</html>
"#
	))
}
