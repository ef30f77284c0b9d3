use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GraphRule, INCOMPLETE_MARKER, TYPE_PROPERTY};
use crate::graph::LineageGraph;

/// Replaces a classification node and its edge with a marker on the
/// classified node.
///
/// Every edge labeled `edge_type` whose destination belongs to
/// `destination_node_type` is removed together with the destination node,
/// and the source node gets `type = Incomplete`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncompleteRule {
    /// Relationship type to match.
    pub edge_type: Option<String>,
    /// Group the destination node must belong to.
    pub destination_node_type: Option<String>,
}

impl IncompleteRule {
    pub fn new(edge_type: impl Into<String>, destination_node_type: impl Into<String>) -> Self {
        Self {
            edge_type: Some(edge_type.into()),
            destination_node_type: Some(destination_node_type.into()),
        }
    }
}

impl GraphRule for IncompleteRule {
    fn name(&self) -> &'static str {
        "incomplete"
    }

    fn apply(&self, graph: &mut LineageGraph, _queried_guid: &str) -> bool {
        let Some(edge_type) = self.edge_type.as_deref() else {
            return false;
        };
        let Some(destination_type) = self.destination_node_type.as_deref() else {
            return false;
        };

        let mut edges_to_remove = Vec::new();
        let mut nodes_to_remove = Vec::new();
        let mut nodes_to_mark = Vec::new();

        for (edge_idx, edge) in graph.edges().filter(|(_, e)| e.has_label(edge_type)) {
            let Some(to_idx) = graph.node_idx(&edge.to) else {
                continue;
            };
            if !graph.node_in_group(&edge.to, destination_type) {
                continue;
            }

            if let Some(from_idx) = graph.node_idx(&edge.from) {
                nodes_to_mark.push(from_idx);
            }
            edges_to_remove.push(edge_idx);
            nodes_to_remove.push(to_idx);
        }

        if edges_to_remove.is_empty() {
            return false;
        }

        for idx in nodes_to_mark {
            if let Some(node) = graph.node_mut(idx) {
                node.set_property(TYPE_PROPERTY, INCOMPLETE_MARKER);
            }
        }

        let edges = graph.remove_edges(edges_to_remove);
        let nodes = graph.remove_nodes(nodes_to_remove);
        debug!(edge_type, edges, nodes, "collapsed classification nodes");

        true
    }
}
