//! Error types for waygraph operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for waygraph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A graph document failed validation.
    #[error("Invalid graph document: {0}")]
    Validation(#[from] ValidationError),

    /// The stored records could not be assembled into a graph, or a query
    /// batch was rejected.
    #[error("Graph error: {0}")]
    Graph(#[from] waygraph_core::Error),

    /// No `.waygraph/` directory was found.
    #[error("Not a waygraph directory (searched upwards from {})", .0.display())]
    NotInitialized(PathBuf),
}

/// A reason a graph document was rejected.
///
/// Validation stops at the first problem found.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The graph has an empty `id`.
    #[error("graph must have an id")]
    MissingGraphId,

    /// The graph has an empty `name`.
    #[error("graph must have a name")]
    MissingGraphName,

    /// The `nodes` list is empty.
    #[error("graph must contain at least one node")]
    NoNodes,

    /// A node has an empty `id`.
    #[error("node at position {0} has an empty id")]
    EmptyNodeId(usize),

    /// Two nodes share an identifier.
    #[error("duplicate node id '{0}'")]
    DuplicateNode(String),

    /// Two edges share an identifier.
    #[error("duplicate edge id '{0}'")]
    DuplicateEdge(String),

    /// An edge endpoint is not among the document's nodes.
    #[error("edge '{edge}' references undefined node '{node}'")]
    UnknownNode {
        /// Offending edge id.
        edge: String,
        /// The missing node id.
        node: String,
    },

    /// An edge cost is negative, NaN or infinite.
    #[error("edge '{edge}' has invalid cost {cost}; costs must be finite and non-negative")]
    InvalidCost {
        /// Offending edge id.
        edge: String,
        /// The rejected cost.
        cost: f64,
    },
}

/// A specialized Result type for waygraph operations.
pub type Result<T> = std::result::Result<T, Error>;
