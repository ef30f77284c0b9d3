use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{matches_optional, GraphRule, PRIMARY_CATEGORY_PROPERTY};
use crate::graph::LineageGraph;

/// Records the first category a node is linked to.
///
/// For each node in `source_node_type`, the first outgoing edge labeled
/// `edge_type` that reaches a node in `destination_node_type` names the
/// primary category. Its label is written to the `primaryCategory` property.
/// Unset node types match any group. Nothing is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryCategoryRule {
    /// Relationship type linking a node to its categories.
    pub edge_type: Option<String>,
    pub source_node_type: Option<String>,
    pub destination_node_type: Option<String>,
}

impl PrimaryCategoryRule {
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
}

impl GraphRule for PrimaryCategoryRule {
    fn name(&self) -> &'static str {
        "primary_category"
    }

    fn apply(&self, graph: &mut LineageGraph, _queried_guid: &str) -> bool {
        let Some(edge_type) = self.edge_type.as_deref() else {
            return false;
        };

        let mut assignments: Vec<(String, String)> = Vec::new();

        for (_, edge) in graph.edges().filter(|(_, e)| e.has_label(edge_type)) {
            if assignments.iter().any(|(id, _)| *id == edge.from) {
                continue;
            }
            let Some(source) = graph.node_by_id(&edge.from) else {
                continue;
            };
            let Some(category) = graph.node_by_id(&edge.to) else {
                continue;
            };
            if !matches_optional(self.source_node_type.as_deref(), Some(source.group.as_str()))
                || !matches_optional(self.destination_node_type.as_deref(), Some(category.group.as_str()))
            {
                continue;
            }
            assignments.push((source.id.clone(), category.label.clone()));
        }

        let mut changed = false;
        for (id, category) in assignments {
            if let Some(node) = graph.node_by_id_mut(&id) {
                if node.property(PRIMARY_CATEGORY_PROPERTY) != Some(category.as_str()) {
                    node.set_property(PRIMARY_CATEGORY_PROPERTY, category);
                    changed = true;
                }
            }
        }

        debug!(edge_type, changed, "assigned primary categories");
        changed
    }
}
