//! Edge type for lineage graphs.

use std::mem;

use serde::{Deserialize, Serialize};

/// A directed relationship between two nodes, referenced by node id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Id of the source node.
    pub from: String,
    /// Id of the destination node.
    pub to: String,
    /// Relationship type name (e.g. `LineageMapping`). Bridging edges have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Secondary classifier.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Edge {
    /// Create an unlabeled edge.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: None,
            from: from.into(),
            to: to.into(),
            label: None,
            kind: None,
        }
    }

    /// Create an edge carrying a relationship type.
    pub fn labeled(
        from: impl Into<String>,
        to: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::new(from, to)
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Returns true if the relationship type equals `label`.
    pub fn has_label(&self, label: &str) -> bool {
        self.label.as_deref() == Some(label)
    }

    /// Swap the endpoints in place.
    pub fn invert(&mut self) {
        mem::swap(&mut self.from, &mut self.to);
    }
}
