//! Output models for the Graphology export.
//!
//! These are Data Transfer Objects (DTOs) that define the shape of
//! JSON documents consumed by Sigma.js/Graphology front ends.

use serde::Serialize;

// =============================================================================
// Graph Data Models (for Sigma.js/Graphology)
// =============================================================================

/// Full graph document.
#[derive(Debug, Serialize)]
pub struct GraphologyData {
    pub nodes: Vec<GraphologyNode>,
    pub edges: Vec<GraphologyEdge>,
}

/// A node in the graph visualization.
#[derive(Debug, Serialize)]
pub struct GraphologyNode {
    /// Node GUID.
    pub key: String,
    /// Visual and metadata attributes.
    pub attributes: NodeAttributes,
}

/// Node attributes for rendering and display.
#[derive(Debug, Serialize)]
pub struct NodeAttributes {
    /// Display label for the node.
    pub label: String,
    /// Metadata type of the node.
    /// Note: This is NOT Sigma's render type - it's the lineage group.
    pub group: String,
    /// Hex color for rendering.
    pub color: String,
    /// Node size in pixels.
    pub size: u32,
    /// Distance from the queried node.
    pub level: i32,
    /// Whether a classification was collapsed into this node.
    pub incomplete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_category: Option<String>,
}

/// An edge (relationship) in the graph visualization.
#[derive(Debug, Serialize)]
pub struct GraphologyEdge {
    /// Source node key.
    pub source: String,
    /// Target node key.
    pub target: String,
    /// Missing for bridging edges created by node removal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<EdgeAttributes>,
}

/// Edge attributes for rendering.
#[derive(Debug, Serialize)]
pub struct EdgeAttributes {
    /// Relationship type (e.g., "LineageMapping").
    /// Note: Using "relationship" instead of "type" to avoid conflict with Sigma's edge type.
    pub relationship: String,
}
