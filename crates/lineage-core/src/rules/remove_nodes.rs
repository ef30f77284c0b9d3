use serde::{Deserialize, Serialize};
use tracing::debug;

use super::GraphRule;
use crate::graph::{Edge, EdgeIdx, LineageGraph, NodeIdx};

/// Splices nodes of selected types out of the graph.
///
/// Only fires when the queried node belongs to `queried_node_type`. Each node
/// whose group is in `node_types_to_remove` is removed along with all of its
/// edges, and every predecessor is bridged to every successor with an
/// unlabeled edge. A removed node without predecessors leaves its successors
/// disconnected.
///
/// Candidates are spliced one at a time in graph order, so a chain of
/// removable nodes collapses into a single bridge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoveNodesRule {
    /// Group the queried node must belong to for the rule to fire.
    pub queried_node_type: Option<String>,
    /// Groups to splice out.
    pub node_types_to_remove: Option<Vec<String>>,
}

impl RemoveNodesRule {
    pub fn new<I, S>(queried_node_type: impl Into<String>, node_types_to_remove: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queried_node_type: Some(queried_node_type.into()),
            node_types_to_remove: Some(node_types_to_remove.into_iter().map(Into::into).collect()),
        }
    }
}

impl GraphRule for RemoveNodesRule {
    fn name(&self) -> &'static str {
        "remove_nodes"
    }

    fn apply(&self, graph: &mut LineageGraph, queried_guid: &str) -> bool {
        let (Some(queried_type), Some(types)) =
            (self.queried_node_type.as_deref(), self.node_types_to_remove.as_ref())
        else {
            return false;
        };

        if !graph.node_in_group(queried_guid, queried_type) {
            debug!(queried_guid, queried_type, "queried node type does not match, skipping");
            return false;
        }

        let candidates: Vec<NodeIdx> = graph
            .nodes()
            .filter(|(_, n)| types.iter().any(|t| n.is_in_group(t)))
            .map(|(idx, _)| idx)
            .collect();

        let mut bridges = 0;
        for &idx in &candidates {
            bridges += splice(graph, idx);
        }

        debug!(removed = candidates.len(), bridges, "spliced lineage nodes");
        !candidates.is_empty()
    }
}

/// Remove one node and bridge its neighbours. Returns the number of bridges added.
fn splice(graph: &mut LineageGraph, idx: NodeIdx) -> usize {
    let Some(node_id) = graph.node(idx).map(|n| n.id.clone()) else {
        return 0;
    };

    let incoming = graph.edges_into(&node_id);
    let outgoing = graph.edges_from(&node_id);

    let sources = endpoints(graph, &incoming, |e| &e.from, &node_id);
    let targets = endpoints(graph, &outgoing, |e| &e.to, &node_id);

    graph.remove_edges(incoming.into_iter().chain(outgoing));
    graph.remove_node(idx);

    let mut added = 0;
    for source in &sources {
        for target in &targets {
            if source == target || graph.has_edge(source, target, None) {
                continue;
            }
            graph.add_edge(Edge::new(source.as_str(), target.as_str()));
            added += 1;
        }
    }
    added
}

/// Distinct far endpoints of `edges`, skipping self-loops on `node_id`.
fn endpoints(
    graph: &LineageGraph,
    edges: &[EdgeIdx],
    end: impl Fn(&Edge) -> &String,
    node_id: &str,
) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for edge in edges.iter().filter_map(|&idx| graph.edge(idx)) {
        let id = end(edge);
        if id != node_id && !ids.contains(id) {
            ids.push(id.clone());
        }
    }
    ids
}
