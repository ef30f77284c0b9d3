//! Lineage graph error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or checking a lineage graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// An edge references a node that is not in the graph.
    #[error("Dangling edge {from} -> {to}: node {missing} not found")]
    DanglingEdge {
        from: String,
        to: String,
        missing: String,
    },

    /// Two nodes share an id.
    #[error("Duplicate node id: {0}")]
    DuplicateNode(String),

    /// IO error.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension is not one we know how to read.
    #[error("Unsupported graph format: {0}")]
    UnsupportedFormat(String),
}

impl GraphError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GraphError::Io {
            path: path.into(),
            source,
        }
    }
}
