//! Error types for graph construction and query processing.
//!
//! Only two things can go wrong once records are in hand:
//!
//! - **Construction**: an edge names a node that was never added.
//! - **Query batches**: the batch or one of its descriptors has no
//!   recognisable shape.
//!
//! Everything else (unknown endpoints, unreachable targets, empty graphs,
//! self-loops, cost ties) is a normal, well-defined outcome and never an
//! error.

use thiserror::Error;

/// Result type for waygraph-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for waygraph-core operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An edge references a node identifier that is not in the node set.
    ///
    /// Raised by graph construction; no partial graph is returned.
    #[error("edge {from} -> {to} references unknown node '{missing}'")]
    InvalidReference {
        /// Source node identifier of the offending edge.
        from: String,
        /// Target node identifier of the offending edge.
        to: String,
        /// The identifier that could not be resolved.
        missing: String,
    },

    /// A query batch document is valid JSON but not a batch.
    ///
    /// Raised before any descriptor is looked at.
    #[error("malformed query batch: {reason}")]
    MalformedBatch {
        /// What was wrong with it.
        reason: String,
    },

    /// A query descriptor in a batch could not be interpreted.
    ///
    /// Raised by the query processor; the whole batch fails.
    #[error("malformed query at index {index}: {reason}")]
    MalformedQuery {
        /// Position of the descriptor within the batch.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },
}

impl Error {
    /// Shorthand for building a [`Error::MalformedQuery`].
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedQuery {
            index,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_reference_names_the_missing_node() {
        let err = Error::InvalidReference {
            from: "a".to_string(),
            to: "zz".to_string(),
            missing: "zz".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("a -> zz"));
        assert!(message.contains("'zz'"));
    }

    #[test]
    fn malformed_query_includes_index_and_reason() {
        let err = Error::malformed(3, "missing 'start'");

        assert_eq!(
            err.to_string(),
            "malformed query at index 3: missing 'start'"
        );
    }
}
