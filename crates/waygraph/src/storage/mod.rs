//! Record storage for loaded graphs.
//!
//! Graph documents are stored as two flat record sets, nodes and edges,
//! keyed by identifier. Two backends are provided:
//!
//! - **In-memory**: records live in an `Arc<Mutex<..>>` and vanish with the
//!   process.
//! - **JSONL**: records are kept in memory and written through to
//!   `nodes.jsonl` / `edges.jsonl` in a data directory after every save.
//!
//! The queryable [`Graph`] is never stored; [`load_graph`] rebuilds it from
//! whatever the store currently holds.
//!
//! # Example
//!
//! ```no_run
//! use waygraph::domain::NodeRecord;
//! use waygraph::storage::{RecordStore, StorageBackend, create_storage, load_graph};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let mut store = create_storage(StorageBackend::InMemory).await?;
//!     store
//!         .save_nodes(&[NodeRecord { id: "a".into(), name: "A".into() }])
//!         .await?;
//!
//!     let graph = load_graph(store.as_ref()).await?;
//!     assert_eq!(graph.node_count(), 1);
//!     Ok(())
//! }
//! ```

use crate::domain::{EdgeRecord, NodeRecord, UpsertSummary};
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use waygraph_core::Graph;

pub mod in_memory;
pub mod jsonl;

pub use in_memory::InMemoryStore;
pub use jsonl::{JsonlStore, LoadWarning};

/// Storage for node and edge records.
///
/// Saves upsert by record id: an existing id is replaced where it stands, a
/// new id is appended. Reads return records in stored order, which becomes
/// node and edge insertion order when the graph is rebuilt.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Upsert node records.
    async fn save_nodes(&mut self, nodes: &[NodeRecord]) -> Result<UpsertSummary>;

    /// Upsert edge records.
    ///
    /// Endpoints are not checked here; a dangling edge surfaces when the
    /// graph is rebuilt.
    async fn save_edges(&mut self, edges: &[EdgeRecord]) -> Result<UpsertSummary>;

    /// All node records in stored order.
    async fn get_nodes(&self) -> Result<Vec<NodeRecord>>;

    /// All edge records in stored order.
    async fn get_edges(&self) -> Result<Vec<EdgeRecord>>;
}

/// Storage backend selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// In-memory storage (ephemeral)
    InMemory,

    /// JSONL files in the given data directory (persistent)
    Jsonl(PathBuf),
}

impl StorageBackend {
    /// Returns the data directory for file-based backends.
    pub fn data_dir(&self) -> Option<&Path> {
        match self {
            StorageBackend::Jsonl(dir) => Some(dir),
            StorageBackend::InMemory => None,
        }
    }
}

/// Create a record store for `backend`.
///
/// For the JSONL backend, existing files are loaded resiliently; skipped
/// lines are logged as warnings and the store remains usable.
///
/// # Errors
///
/// Returns `Error::Io` if the data directory cannot be read.
pub async fn create_storage(backend: StorageBackend) -> Result<Box<dyn RecordStore>> {
    match backend {
        StorageBackend::InMemory => Ok(Box::new(InMemoryStore::new())),
        StorageBackend::Jsonl(dir) => {
            let (store, warnings) = JsonlStore::open(&dir).await?;
            for warning in &warnings {
                tracing::warn!(%warning, "JSONL load warning");
            }
            Ok(Box::new(store))
        }
    }
}

/// Rebuild the queryable graph from the store's current records.
///
/// # Errors
///
/// Returns `Error::Graph` if an edge references a node the store does not
/// hold, or any read error of the backend.
pub async fn load_graph(store: &dyn RecordStore) -> Result<Graph> {
    let nodes = store.get_nodes().await?;
    let edges = store.get_edges().await?;
    tracing::debug!(nodes = nodes.len(), edges = edges.len(), "Building graph");

    let graph = Graph::build(
        nodes
            .into_iter()
            .map(|n| waygraph_core::Node::new(n.id, n.name)),
        edges
            .into_iter()
            .map(|e| waygraph_core::WeightedEdge::new(e.from, e.to, e.cost)),
    )?;
    Ok(graph)
}
