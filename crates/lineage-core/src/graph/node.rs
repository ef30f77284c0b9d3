//! Node type for lineage graphs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A node in a lineage graph.
///
/// The `group` carries the metadata type of the element (for example
/// `RelationalColumn` or `Process`) and is what rules match against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleNode {
    /// Unique identifier within the graph (the element GUID).
    pub id: String,
    /// Display label.
    pub label: String,
    /// Type tag used for rule matching.
    pub group: String,
    /// Free-form display properties. Rules write markers here.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// Distance from the queried node.
    #[serde(default)]
    pub level: i32,
    /// Fully qualified name, if the source system provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
}

impl RuleNode {
    /// Create a new node with no properties at level 0.
    pub fn new(id: impl Into<String>, label: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            group: group.into(),
            properties: BTreeMap::new(),
            level: 0,
            qualified_name: None,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn with_qualified_name(mut self, qualified_name: impl Into<String>) -> Self {
        self.qualified_name = Some(qualified_name.into());
        self
    }

    /// Returns true if this node belongs to the given group.
    pub fn is_in_group(&self, group: &str) -> bool {
        self.group == group
    }

    /// Get a property value.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Set a property value, replacing any previous one.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }
}
