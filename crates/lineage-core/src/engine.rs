//! Rule engine that rewrites lineage graphs.
//!
//! The engine holds a read-only rule set and can rewrite any number of graphs.
//! Each rewrite optionally recomputes levels, applies the rules in order,
//! optionally prunes dangling edges, and in strict mode refuses a result that
//! still references removed nodes.

use tracing::{debug, info, info_span};

use crate::config::{Config, EngineConfig};
use crate::graph::{GraphError, LineageGraph};
use crate::rules::{GraphRule, Rules};

/// A trace entry for a single rule application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTrace {
    /// The name of the rule that was applied.
    pub rule: &'static str,
    /// Whether the rule changed the graph.
    pub changed: bool,
    pub nodes_before: usize,
    pub nodes_after: usize,
    pub edges_before: usize,
    pub edges_after: usize,
}

/// Summary of one rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// One entry per rule, in application order.
    pub trace: Vec<RuleTrace>,
    /// Nodes assigned a level, when level assignment is enabled.
    pub levels_assigned: usize,
    /// Dangling edges removed after the rules ran.
    pub pruned_edges: usize,
}

impl RewriteReport {
    /// Number of rules that changed the graph.
    pub fn rules_applied(&self) -> usize {
        self.trace.iter().filter(|t| t.changed).count()
    }

    /// Format the trace as a human-readable string.
    pub fn format_trace(&self) -> String {
        let mut output = format!(
            "{} rules evaluated, {} changed the graph\n",
            self.trace.len(),
            self.rules_applied()
        );

        for (i, entry) in self.trace.iter().enumerate() {
            let marker = if entry.changed { "*" } else { " " };
            output.push_str(&format!(
                "{} {:>2}. {:<18} nodes {} -> {}, edges {} -> {}\n",
                marker,
                i + 1,
                entry.rule,
                entry.nodes_before,
                entry.nodes_after,
                entry.edges_before,
                entry.edges_after,
            ));
        }

        if self.pruned_edges > 0 {
            output.push_str(&format!("pruned {} dangling edges\n", self.pruned_edges));
        }

        output
    }
}

/// Applies a rule set to lineage graphs.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    rules: Rules,
    config: EngineConfig,
}

impl RuleEngine {
    /// Create an engine with default engine settings.
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            config: EngineConfig::default(),
        }
    }

    /// Create an engine from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            rules: config.rules.clone(),
            config: config.engine.clone(),
        }
    }

    pub fn with_engine_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn engine_config(&self) -> &EngineConfig {
        &self.config
    }

    /// Rewrite `graph` in place for a query rooted at `queried_guid`.
    ///
    /// In strict mode the dangling-edge check runs after the rules, so an
    /// `Err` is returned with `graph` already rewritten. Pass a clone to keep
    /// the input intact.
    pub fn rewrite(
        &self,
        graph: &mut LineageGraph,
        queried_guid: &str,
    ) -> Result<RewriteReport, GraphError> {
        let span = info_span!("rewrite", queried_guid);
        let _guard = span.enter();

        let mut report = RewriteReport::default();

        if self.config.assign_levels {
            report.levels_assigned = graph.assign_levels(queried_guid);
        }

        for rule in self.rules.all_rules() {
            let nodes_before = graph.node_count();
            let edges_before = graph.edge_count();

            let changed = rule.apply(graph, queried_guid);
            debug!(rule = rule.name(), changed, "applied rule");

            report.trace.push(RuleTrace {
                rule: rule.name(),
                changed,
                nodes_before,
                nodes_after: graph.node_count(),
                edges_before,
                edges_after: graph.edge_count(),
            });
        }

        if self.config.prune_dangling {
            report.pruned_edges = graph.prune_dangling_edges();
        }

        if self.config.strict {
            graph.validate()?;
        }

        info!(
            rules = report.trace.len(),
            applied = report.rules_applied(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "lineage graph rewritten"
        );

        Ok(report)
    }
}
