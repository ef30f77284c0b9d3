use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{matches_optional, GraphRule};
use crate::graph::{Edge, LineageGraph};

/// Flips the direction of edges labeled `edge_type`.
///
/// The optional node type filters restrict which edges flip: when set,
/// `source_node_type` must match the group of the node at `from` and
/// `destination_node_type` the group of the node at `to`. With neither set,
/// every edge of the type flips, so applying the rule twice restores the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvertEdgeRule {
    /// Relationship type to match. The rule is inactive without it.
    pub edge_type: Option<String>,
    pub source_node_type: Option<String>,
    pub destination_node_type: Option<String>,
}

impl InvertEdgeRule {
    pub fn new(edge_type: impl Into<String>) -> Self {
        Self {
            edge_type: Some(edge_type.into()),
            ..Self::default()
        }
    }

    pub fn with_source_node_type(mut self, node_type: impl Into<String>) -> Self {
        self.source_node_type = Some(node_type.into());
        self
    }

    pub fn with_destination_node_type(mut self, node_type: impl Into<String>) -> Self {
        self.destination_node_type = Some(node_type.into());
        self
    }

    fn endpoints_match(&self, graph: &LineageGraph, edge: &Edge) -> bool {
        let from_group = graph.node_by_id(&edge.from).map(|n| n.group.as_str());
        let to_group = graph.node_by_id(&edge.to).map(|n| n.group.as_str());

        matches_optional(self.source_node_type.as_deref(), from_group)
            && matches_optional(self.destination_node_type.as_deref(), to_group)
    }
}

impl GraphRule for InvertEdgeRule {
    fn name(&self) -> &'static str {
        "invert_edge"
    }

    fn apply(&self, graph: &mut LineageGraph, _queried_guid: &str) -> bool {
        let Some(edge_type) = self.edge_type.as_deref() else {
            return false;
        };

        let view: &LineageGraph = graph;
        let to_invert: Vec<_> = view
            .edges()
            .filter(|(_, e)| e.has_label(edge_type) && self.endpoints_match(view, e))
            .map(|(idx, _)| idx)
            .collect();

        for &idx in &to_invert {
            if let Some(edge) = graph.edge_mut(idx) {
                edge.invert();
            }
        }

        debug!(edge_type, inverted = to_invert.len(), "inverted lineage edges");
        !to_invert.is_empty()
    }
}
