use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GraphRule, IncompleteRule, InvertEdgeRule, PrimaryCategoryRule, RemoveNodesRule, Rule};
use crate::config::ConfigError;
use crate::graph::LineageGraph;

/// The configured rules, grouped by kind.
///
/// Rules run in a fixed order: incomplete, invert-edge, primary-category,
/// then remove-nodes. Node removal comes last so the other rules still see
/// the original node types.
///
/// In TOML:
/// ```toml
/// [[rules.incomplete]]
/// edge_type = "ClassificationAssignment"
/// destination_node_type = "Confidentiality"
///
/// [[rules.remove_nodes]]
/// queried_node_type = "RelationalColumn"
/// node_types_to_remove = ["Process"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incomplete: Option<Vec<IncompleteRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invert_edge: Option<Vec<InvertEdgeRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_category: Option<Vec<PrimaryCategoryRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_nodes: Option<Vec<RemoveNodesRule>>,
}

impl Rules {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load rules from a TOML, YAML or JSON file, chosen by extension.
    ///
    /// The file holds the rule lists at its top level.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("json") => Ok(serde_json::from_str(&content)?),
            other => Err(ConfigError::Invalid(format!(
                "unsupported rules file extension: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn with_incomplete(mut self, rule: IncompleteRule) -> Self {
        self.incomplete.get_or_insert_with(Vec::new).push(rule);
        self
    }

    pub fn with_invert_edge(mut self, rule: InvertEdgeRule) -> Self {
        self.invert_edge.get_or_insert_with(Vec::new).push(rule);
        self
    }

    pub fn with_primary_category(mut self, rule: PrimaryCategoryRule) -> Self {
        self.primary_category.get_or_insert_with(Vec::new).push(rule);
        self
    }

    pub fn with_remove_nodes(mut self, rule: RemoveNodesRule) -> Self {
        self.remove_nodes.get_or_insert_with(Vec::new).push(rule);
        self
    }

    /// All rules flattened in application order. Unset lists are skipped.
    pub fn all_rules(&self) -> Vec<Rule> {
        let incomplete = self.incomplete.iter().flatten().cloned().map(Rule::from);
        let invert_edge = self.invert_edge.iter().flatten().cloned().map(Rule::from);
        let primary_category = self.primary_category.iter().flatten().cloned().map(Rule::from);
        let remove_nodes = self.remove_nodes.iter().flatten().cloned().map(Rule::from);

        incomplete
            .chain(invert_edge)
            .chain(primary_category)
            .chain(remove_nodes)
            .collect()
    }

    /// Total number of configured rules.
    pub fn len(&self) -> usize {
        [
            self.incomplete.as_ref().map_or(0, Vec::len),
            self.invert_edge.as_ref().map_or(0, Vec::len),
            self.primary_category.as_ref().map_or(0, Vec::len),
            self.remove_nodes.as_ref().map_or(0, Vec::len),
        ]
        .iter()
        .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply every rule in order. Returns how many changed the graph.
    pub fn apply_all(&self, graph: &mut LineageGraph, queried_guid: &str) -> usize {
        let mut changed = 0;
        for rule in self.all_rules() {
            if rule.apply(graph, queried_guid) {
                changed += 1;
            } else {
                debug!(rule = rule.name(), "rule left graph unchanged");
            }
        }
        changed
    }
}
