//! HTML rendering of the exported dependency graph
//!
//! Produces a self-contained vis-network page with the graph data
//! embedded as JSON. This is glue around the edge list; layout and
//! interaction belong to the embedded library.

use serde_json::json;

use cellscope_trace::{DependencyTree, Edge};

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Dependency graph</title>
<script src="https://unpkg.com/vis-network/standalone/umd/vis-network.min.js"></script>
<style>
  html, body { margin: 0; height: 100%; }
  #graph { width: 100%; height: 100%; }
</style>
</head>
<body>
<div id="graph"></div>
<script>
  const nodes = new vis.DataSet(__NODES__);
  const edges = new vis.DataSet(__EDGES__);
  const container = document.getElementById("graph");
  const options = {
    edges: { arrows: "to" },
    layout: { improvedLayout: true },
  };
  new vis.Network(container, { nodes, edges }, options);
</script>
</body>
</html>
"#;

/// Render the dependency graph as a standalone HTML document
///
/// Leaf nodes are labelled with their literal value; the root cell is
/// highlighted.
pub fn render_graph(tree: &DependencyTree, edges: &[Edge]) -> String {
    let root_address = tree.node(tree.root()).address();

    let node_values: Vec<serde_json::Value> = tree
        .nodes()
        .map(|(_, node)| {
            let address = node.address().to_string();
            let label = match node.value() {
                Some(v) => format!("{}\n{}", address, v),
                None => address.clone(),
            };
            if node.address() == root_address {
                json!({ "id": address, "label": label, "color": "#fb7e81" })
            } else {
                json!({ "id": address, "label": label })
            }
        })
        .collect();

    let edge_values: Vec<serde_json::Value> = edges
        .iter()
        .map(|e| json!({ "from": e.source.to_string(), "to": e.target.to_string() }))
        .collect();

    TEMPLATE
        .replace(
            "__NODES__",
            &serde_json::Value::Array(node_values).to_string(),
        )
        .replace(
            "__EDGES__",
            &serde_json::Value::Array(edge_values).to_string(),
        )
}
