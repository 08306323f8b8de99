//! waygraph-core: structural queries over an in-memory weighted digraph.
//!
//! The crate builds an immutable [`Graph`] once from flat node/edge records
//! and answers three kinds of question against it:
//!
//! - every simple path between two nodes ([`paths`]),
//! - the least-cost path between two nodes ([`cheapest`]),
//! - every elementary cycle ([`cycles`]).
//!
//! [`query`] wraps the first two in a batched request/answer protocol.
//!
//! Nothing here performs I/O or logs; errors are returned to the caller.
//!
//! ```
//! use waygraph_core::{Graph, QueryDescriptor, process, find_cheapest_path};
//!
//! let graph = Graph::build(
//!     ["a", "b", "c"],
//!     [("a", "b", 1.0), ("b", "c", 1.0), ("a", "c", 5.0)],
//! )?;
//!
//! assert_eq!(
//!     find_cheapest_path(&graph, "a", "c"),
//!     Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
//! );
//!
//! let answers = process(&[QueryDescriptor::paths("a", "c")], &graph);
//! assert_eq!(answers.len(), 1);
//! # Ok::<(), waygraph_core::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod cheapest;
pub mod cycles;
pub mod error;
pub mod graph;
pub mod paths;
pub mod query;

#[cfg(test)]
mod fixtures;

pub use cheapest::{CheapestPath, cheapest_path, find_cheapest_path};
pub use cycles::{CycleMembership, cycle_membership, simple_cycles};
pub use error::{Error, Result};
pub use graph::{Graph, GraphBuilder, Node, WeightedEdge};
pub use paths::{
    NodePath, PathLimits, PathSet, TraversalStrategy, all_simple_paths, bfs_paths, dfs_paths,
    dfs_paths_iterative, enumerate_paths,
};
pub use query::{
    Answer, AnswerDocument, CheapestAnswer, Endpoints, PathsAnswer, QueryBatch, QueryDescriptor,
    QueryOptions, QueryProcessor, Request, parse_queries, process, process_values,
};
