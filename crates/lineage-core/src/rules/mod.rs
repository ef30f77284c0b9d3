//! Graph rewrite rules.
//!
//! Rules reshape a lineage graph for display after it has been retrieved:
//!
//! - **Incomplete**: collapse a classification node into a marker property
//! - **InvertEdge**: flip the direction of selected relationships
//! - **PrimaryCategory**: record a node's first category as a property
//! - **RemoveNodes**: splice out intermediate node types, bridging their
//!   neighbours
//!
//! Rules are configuration only. Applying one never fails and a rule with
//! missing settings matches nothing.

mod incomplete;
mod invert_edge;
mod primary_category;
mod remove_nodes;
mod set;

pub use incomplete::IncompleteRule;
pub use invert_edge::InvertEdgeRule;
pub use primary_category::PrimaryCategoryRule;
pub use remove_nodes::RemoveNodesRule;
pub use set::Rules;

use serde::{Deserialize, Serialize};

use crate::graph::LineageGraph;

/// Node property written by [`IncompleteRule`].
pub const TYPE_PROPERTY: &str = "type";

/// Value of [`TYPE_PROPERTY`] on nodes whose classification was collapsed.
pub const INCOMPLETE_MARKER: &str = "Incomplete";

/// Node property written by [`PrimaryCategoryRule`].
pub const PRIMARY_CATEGORY_PROPERTY: &str = "primaryCategory";

/// A rewrite applied to a lineage graph in place.
pub trait GraphRule: Send + Sync {
    /// Short name for logs and traces.
    fn name(&self) -> &'static str;

    /// Apply the rule for a query rooted at `queried_guid`.
    ///
    /// Returns true if the graph was modified.
    fn apply(&self, graph: &mut LineageGraph, queried_guid: &str) -> bool;
}

/// Any configured rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    Incomplete(IncompleteRule),
    InvertEdge(InvertEdgeRule),
    PrimaryCategory(PrimaryCategoryRule),
    RemoveNodes(RemoveNodesRule),
}

impl GraphRule for Rule {
    fn name(&self) -> &'static str {
        match self {
            Rule::Incomplete(rule) => rule.name(),
            Rule::InvertEdge(rule) => rule.name(),
            Rule::PrimaryCategory(rule) => rule.name(),
            Rule::RemoveNodes(rule) => rule.name(),
        }
    }

    fn apply(&self, graph: &mut LineageGraph, queried_guid: &str) -> bool {
        match self {
            Rule::Incomplete(rule) => rule.apply(graph, queried_guid),
            Rule::InvertEdge(rule) => rule.apply(graph, queried_guid),
            Rule::PrimaryCategory(rule) => rule.apply(graph, queried_guid),
            Rule::RemoveNodes(rule) => rule.apply(graph, queried_guid),
        }
    }
}

impl From<IncompleteRule> for Rule {
    fn from(rule: IncompleteRule) -> Self {
        Rule::Incomplete(rule)
    }
}

impl From<InvertEdgeRule> for Rule {
    fn from(rule: InvertEdgeRule) -> Self {
        Rule::InvertEdge(rule)
    }
}

impl From<PrimaryCategoryRule> for Rule {
    fn from(rule: PrimaryCategoryRule) -> Self {
        Rule::PrimaryCategory(rule)
    }
}

impl From<RemoveNodesRule> for Rule {
    fn from(rule: RemoveNodesRule) -> Self {
        Rule::RemoveNodes(rule)
    }
}

/// Returns true if `filter` is unset or equals `group`.
fn matches_optional(filter: Option<&str>, group: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(wanted) => group == Some(wanted),
    }
}
