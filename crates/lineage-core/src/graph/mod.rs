//! Lineage graph model.
//!
//! A [`LineageGraph`] holds the nodes and edges returned by one lineage query.
//! Rules mutate it in place before it is handed to a renderer.
//!
//! Nodes and edges are kept in slot vectors and addressed through
//! [`NodeIdx`] / [`EdgeIdx`] handles. Removing an element leaves an empty slot,
//! so a handle collected before a removal never points at a different element.
//! Iteration always follows insertion order.
//!
//! No invariant ties edges to existing nodes: removing a node leaves the edges
//! that reference it in place. Use [`LineageGraph::dangling_edges`] or
//! [`LineageGraph::validate`] to check a graph after rewriting.

mod edge;
mod error;
mod levels;
mod node;

pub use edge::Edge;
pub use error::GraphError;
pub use node::RuleNode;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Handle to a node slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(usize);

/// Handle to an edge slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIdx(usize);

/// Plain serialized form of a lineage graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<RuleNode>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphData {
    /// Read graph data from a JSON or YAML file, chosen by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| GraphError::io(path, e))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            other => Err(GraphError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }
}

/// Mutable lineage graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "GraphData", into = "GraphData")]
pub struct LineageGraph {
    nodes: Vec<Option<RuleNode>>,
    edges: Vec<Option<Edge>>,
    node_index: HashMap<String, NodeIdx>,
    live_nodes: usize,
    live_edges: usize,
}

impl LineageGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from node and edge lists without validating them.
    ///
    /// A later node with an id already seen replaces the earlier one.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = RuleNode>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }
        for edge in edges {
            graph.add_edge(edge);
        }
        graph
    }

    /// Build a graph, rejecting duplicate node ids and dangling edges.
    pub fn try_from_data(data: GraphData) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for node in data.nodes {
            if graph.contains_node(&node.id) {
                return Err(GraphError::DuplicateNode(node.id));
            }
            graph.add_node(node);
        }
        for edge in data.edges {
            graph.add_edge(edge);
        }
        graph.validate()?;
        Ok(graph)
    }

    /// Load a graph from a JSON or YAML file, chosen by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        Ok(GraphData::from_file(path)?.into())
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Add a node, replacing any node with the same id.
    pub fn add_node(&mut self, node: RuleNode) -> NodeIdx {
        if let Some(idx) = self.node_idx(&node.id) {
            self.nodes[idx.0] = Some(node);
            return idx;
        }

        let idx = NodeIdx(self.nodes.len());
        self.node_index.insert(node.id.clone(), idx);
        self.nodes.push(Some(node));
        self.live_nodes += 1;
        idx
    }

    /// Add an edge. Endpoints are not checked.
    pub fn add_edge(&mut self, edge: Edge) -> EdgeIdx {
        let idx = EdgeIdx(self.edges.len());
        self.edges.push(Some(edge));
        self.live_edges += 1;
        idx
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn node(&self, idx: NodeIdx) -> Option<&RuleNode> {
        self.nodes.get(idx.0).and_then(Option::as_ref)
    }

    pub fn node_mut(&mut self, idx: NodeIdx) -> Option<&mut RuleNode> {
        self.nodes.get_mut(idx.0).and_then(Option::as_mut)
    }

    pub fn edge(&self, idx: EdgeIdx) -> Option<&Edge> {
        self.edges.get(idx.0).and_then(Option::as_ref)
    }

    pub fn edge_mut(&mut self, idx: EdgeIdx) -> Option<&mut Edge> {
        self.edges.get_mut(idx.0).and_then(Option::as_mut)
    }

    /// Get the handle of the node with the given id.
    ///
    /// Ids changed through [`node_mut`](Self::node_mut) are not re-indexed;
    /// such a node is found by neither its old nor its new id.
    pub fn node_idx(&self, id: &str) -> Option<NodeIdx> {
        self.node_index
            .get(id)
            .copied()
            .filter(|&idx| self.node(idx).is_some_and(|n| n.id == id))
    }

    pub fn node_by_id(&self, id: &str) -> Option<&RuleNode> {
        self.node_idx(id).and_then(|idx| self.node(idx))
    }

    pub fn node_by_id_mut(&mut self, id: &str) -> Option<&mut RuleNode> {
        let idx = self.node_idx(id)?;
        self.node_mut(idx)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_idx(id).is_some()
    }

    /// Returns true if a node with this id exists and belongs to `group`.
    pub fn node_in_group(&self, id: &str, group: &str) -> bool {
        self.node_by_id(id).is_some_and(|n| n.is_in_group(group))
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Iterate live nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIdx, &RuleNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|n| (NodeIdx(i), n)))
    }

    /// Iterate live edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeIdx, &Edge)> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|e| (EdgeIdx(i), e)))
    }

    /// Apply `f` to every live node in insertion order.
    ///
    /// A node whose id `f` changes is re-indexed under the new id.
    pub fn update_nodes(&mut self, mut f: impl FnMut(&mut RuleNode)) {
        for (i, slot) in self.nodes.iter_mut().enumerate() {
            let Some(node) = slot.as_mut() else {
                continue;
            };
            let idx = NodeIdx(i);
            let previous_id = node.id.clone();
            f(node);

            if node.id != previous_id {
                if self.node_index.get(&previous_id) == Some(&idx) {
                    self.node_index.remove(&previous_id);
                }
                self.node_index.insert(node.id.clone(), idx);
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.live_nodes
    }

    pub fn edge_count(&self) -> usize {
        self.live_edges
    }

    pub fn is_empty(&self) -> bool {
        self.live_nodes == 0 && self.live_edges == 0
    }

    /// Handles of edges ending at `node_id`.
    pub fn edges_into(&self, node_id: &str) -> Vec<EdgeIdx> {
        self.edges()
            .filter(|(_, e)| e.to == node_id)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Handles of edges starting at `node_id`.
    pub fn edges_from(&self, node_id: &str) -> Vec<EdgeIdx> {
        self.edges()
            .filter(|(_, e)| e.from == node_id)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Returns true if an edge with these endpoints and label exists.
    pub fn has_edge(&self, from: &str, to: &str, label: Option<&str>) -> bool {
        self.edges()
            .any(|(_, e)| e.from == from && e.to == to && e.label.as_deref() == label)
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Remove a node. Edges referencing it are left untouched.
    pub fn remove_node(&mut self, idx: NodeIdx) -> Option<RuleNode> {
        let node = self.nodes.get_mut(idx.0)?.take()?;
        if self.node_index.get(&node.id) == Some(&idx) {
            self.node_index.remove(&node.id);
        } else {
            self.node_index.retain(|_, slot| *slot != idx);
        }
        self.live_nodes -= 1;
        Some(node)
    }

    pub fn remove_edge(&mut self, idx: EdgeIdx) -> Option<Edge> {
        let edge = self.edges.get_mut(idx.0)?.take()?;
        self.live_edges -= 1;
        Some(edge)
    }

    /// Remove a batch of nodes. Returns how many were actually removed.
    pub fn remove_nodes(&mut self, handles: impl IntoIterator<Item = NodeIdx>) -> usize {
        handles
            .into_iter()
            .filter(|&idx| self.remove_node(idx).is_some())
            .count()
    }

    /// Remove a batch of edges. Returns how many were actually removed.
    pub fn remove_edges(&mut self, handles: impl IntoIterator<Item = EdgeIdx>) -> usize {
        handles
            .into_iter()
            .filter(|&idx| self.remove_edge(idx).is_some())
            .count()
    }

    // =========================================================================
    // Integrity
    // =========================================================================

    /// Handles of edges with at least one endpoint missing from the graph.
    pub fn dangling_edges(&self) -> Vec<EdgeIdx> {
        self.edges()
            .filter(|(_, e)| !self.contains_node(&e.from) || !self.contains_node(&e.to))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Check that every edge references existing nodes.
    pub fn validate(&self) -> Result<(), GraphError> {
        for (_, edge) in self.edges() {
            let missing = if !self.contains_node(&edge.from) {
                &edge.from
            } else if !self.contains_node(&edge.to) {
                &edge.to
            } else {
                continue;
            };

            return Err(GraphError::DanglingEdge {
                from: edge.from.clone(),
                to: edge.to.clone(),
                missing: missing.clone(),
            });
        }
        Ok(())
    }

    /// Remove every dangling edge. Returns how many were removed.
    pub fn prune_dangling_edges(&mut self) -> usize {
        let dangling = self.dangling_edges();
        if !dangling.is_empty() {
            warn!(count = dangling.len(), "pruning dangling lineage edges");
        }
        self.remove_edges(dangling)
    }

    // =========================================================================
    // Conversion
    // =========================================================================

    /// Copy the live nodes and edges into their serialized form.
    pub fn to_data(&self) -> GraphData {
        GraphData {
            nodes: self.nodes().map(|(_, n)| n.clone()).collect(),
            edges: self.edges().map(|(_, e)| e.clone()).collect(),
        }
    }
}

impl From<GraphData> for LineageGraph {
    fn from(data: GraphData) -> Self {
        Self::from_parts(data.nodes, data.edges)
    }
}

impl From<LineageGraph> for GraphData {
    fn from(graph: LineageGraph) -> Self {
        GraphData {
            nodes: graph.nodes.into_iter().flatten().collect(),
            edges: graph.edges.into_iter().flatten().collect(),
        }
    }
}
