//! Output rendering for rewritten lineage graphs.
//!
//! # Module Structure
//!
//! - `models` - Graphology document types (DTOs)
//! - `graph` - Graph building logic

mod graph;
mod models;

use clap::ValueEnum;
use lineage_core::LineageGraph;

use graph::GraphBuilder;

/// Output format for `lineage apply`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The rewritten graph in its input shape (`nodes` / `edges` with `from` / `to`).
    #[default]
    Raw,
    /// Sigma.js/Graphology document (`key` / `attributes`, `source` / `target`).
    Graphology,
}

/// Render a graph as pretty-printed JSON.
pub fn to_json(graph: &LineageGraph, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Raw => serde_json::to_string_pretty(graph),
        OutputFormat::Graphology => {
            serde_json::to_string_pretty(&GraphBuilder::new().build_from_graph(graph))
        }
    }
}
