use crate::error::{Error, Result};
use crate::node::NodeDisplayData;
use crate::progress::LoadProgress;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<NodeDisplayData>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl GraphDocument {
    /// Case-insensitive lookup by label.
    pub fn find_node(&self, label: &str) -> Result<&NodeDisplayData> {
        self.nodes
            .iter()
            .find(|node| node.label.eq_ignore_ascii_case(label))
            .ok_or_else(|| Error::NodeNotFound(label.to_string()))
    }

    pub fn first_node(&self) -> Result<&NodeDisplayData> {
        self.nodes.first().ok_or(Error::EmptyGraph)
    }
}

/// Reads a graph document, a bare array of nodes, or a single node object.
pub fn load_graph(input: &str, progress: &mut LoadProgress) -> Result<GraphDocument> {
    progress.begin();
    let value: Value = serde_json::from_str(input)?;
    let (raw_nodes, raw_edges) = match value {
        Value::Array(nodes) => (nodes, Vec::new()),
        Value::Object(mut map) if map.contains_key("nodes") => {
            let nodes = match map.remove("nodes") {
                Some(Value::Array(nodes)) => nodes,
                _ => Vec::new(),
            };
            let edges = match map.remove("edges") {
                Some(Value::Array(edges)) => edges,
                _ => Vec::new(),
            };
            (nodes, edges)
        }
        single => (vec![single], Vec::new()),
    };

    let mut graph = GraphDocument::default();
    for raw in raw_nodes {
        graph.nodes.push(serde_json::from_value(raw)?);
        progress.record_node();
    }
    for raw in raw_edges {
        graph.edges.push(serde_json::from_value(raw)?);
        progress.record_edge();
    }
    progress.finish();
    debug!(
        nodes = progress.nodes_loaded,
        edges = progress.edges_loaded,
        "graph loaded"
    );

    if graph.nodes.is_empty() {
        return Err(Error::EmptyGraph);
    }
    Ok(graph)
}
