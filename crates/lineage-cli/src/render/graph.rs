//! Conversion from a rewritten lineage graph to the Graphology format.

use std::collections::HashSet;

use lineage_core::rules::{INCOMPLETE_MARKER, PRIMARY_CATEGORY_PROPERTY, TYPE_PROPERTY};
use lineage_core::{LineageGraph, RuleNode};

use super::models::{EdgeAttributes, GraphologyData, GraphologyEdge, GraphologyNode, NodeAttributes};

// =============================================================================
// Node Styling
// =============================================================================

/// Get the hex color for a lineage group.
fn get_group_color(group: &str) -> &'static str {
    match group {
        "Process" | "SubProcess" | "DeployedAPI" => "#8250df",          // Purple
        "RelationalTable" | "TabularSchemaType" | "DataFile" => "#1a7f37", // Green
        "RelationalColumn" | "TabularColumn" => "#0969da",                 // Blue
        "GlossaryTerm" | "GlossaryCategory" => "#9a6700",                  // Yellow/Orange
        "Confidentiality" | "Criticality" => "#cf222e",                    // Red
        _ => "#57606a",                                                    // Gray (default)
    }
}

/// Color override for nodes whose classification was collapsed.
const INCOMPLETE_COLOR: &str = "#bf8700";

/// Get the node size for a lineage group.
fn get_group_size(group: &str) -> u32 {
    match group {
        "RelationalTable" | "TabularSchemaType" | "DataFile" => 12,
        "Process" | "SubProcess" => 10,
        "RelationalColumn" | "TabularColumn" => 8,
        _ => 6,
    }
}

// =============================================================================
// Graph Builder
// =============================================================================

/// Builder for constructing Graphology data from a lineage graph.
pub struct GraphBuilder {
    nodes: Vec<GraphologyNode>,
    edges: Vec<GraphologyEdge>,
    seen_keys: HashSet<String>,
    seen_edges: HashSet<String>,
}

impl GraphBuilder {
    /// Create a new graph builder.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            seen_keys: HashSet::new(),
            seen_edges: HashSet::new(),
        }
    }

    /// Build Graphology data from a lineage graph.
    ///
    /// Edges whose endpoints are missing are dropped, since Graphology
    /// refuses them. Parallel edges with the same relationship are merged.
    pub fn build_from_graph(self, graph: &LineageGraph) -> GraphologyData {
        let mut builder = self;

        for (_, node) in graph.nodes() {
            builder.add_node(node);
        }

        for (_, edge) in graph.edges() {
            builder.add_edge(&edge.from, &edge.to, edge.label.as_deref());
        }

        GraphologyData {
            nodes: builder.nodes,
            edges: builder.edges,
        }
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    /// Add a node if not already present.
    fn add_node(&mut self, node: &RuleNode) {
        if !self.seen_keys.insert(node.id.clone()) {
            return;
        }

        let incomplete = node.property(TYPE_PROPERTY) == Some(INCOMPLETE_MARKER);
        let color = if incomplete {
            INCOMPLETE_COLOR
        } else {
            get_group_color(&node.group)
        };

        self.nodes.push(GraphologyNode {
            key: node.id.clone(),
            attributes: NodeAttributes {
                label: node.label.clone(),
                group: node.group.clone(),
                color: color.to_string(),
                size: get_group_size(&node.group),
                level: node.level,
                incomplete,
                qualified_name: node.qualified_name.clone(),
                primary_category: node.property(PRIMARY_CATEGORY_PROPERTY).map(str::to_string),
            },
        });
    }

    /// Add an edge if both endpoints exist and it is not a duplicate.
    fn add_edge(&mut self, source: &str, target: &str, relationship: Option<&str>) {
        if !self.seen_keys.contains(source) || !self.seen_keys.contains(target) {
            return;
        }

        let edge_key = format!("{}:{}:{}", source, target, relationship.unwrap_or_default());
        if self.seen_edges.insert(edge_key) {
            self.edges.push(GraphologyEdge {
                source: source.to_string(),
                target: target.to_string(),
                attributes: relationship.map(|r| EdgeAttributes {
                    relationship: r.to_string(),
                }),
            });
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_core::Edge;

    #[test]
    fn test_build_marks_incomplete_and_skips_dangling() {
        let graph = LineageGraph::from_parts(
            [
                RuleNode::new("a", "orders", "RelationalTable")
                    .with_property(TYPE_PROPERTY, INCOMPLETE_MARKER),
                RuleNode::new("b", "load", "Process"),
            ],
            [
                Edge::labeled("a", "b", "LineageMapping"),
                Edge::labeled("a", "b", "LineageMapping"),
                Edge::new("b", "a"),
                Edge::new("b", "gone"),
            ],
        );

        let data = GraphBuilder::new().build_from_graph(&graph);

        assert_eq!(data.nodes.len(), 2);
        assert!(data.nodes[0].attributes.incomplete);
        assert_eq!(data.nodes[0].attributes.color, INCOMPLETE_COLOR);
        assert_eq!(data.nodes[1].attributes.color, "#8250df");

        assert_eq!(data.edges.len(), 2);
        assert!(data.edges[1].attributes.is_none());

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["edges"][0]["attributes"]["relationship"], "LineageMapping");
        assert!(json["nodes"][1]["attributes"].get("qualified_name").is_none());
    }
}
