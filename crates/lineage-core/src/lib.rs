pub mod config;
pub mod engine;
pub mod graph;
pub mod rules;

pub use config::{Config, ConfigError, EngineConfig, LoggingConfig};
pub use engine::{RewriteReport, RuleEngine, RuleTrace};
pub use graph::{Edge, EdgeIdx, GraphData, GraphError, LineageGraph, NodeIdx, RuleNode};
pub use rules::{
    GraphRule, IncompleteRule, InvertEdgeRule, PrimaryCategoryRule, RemoveNodesRule, Rule, Rules,
};
