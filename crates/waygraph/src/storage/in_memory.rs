//! In-memory record store.
//!
//! Records are held in `Arc<Mutex<Records>>`, so clones of an
//! [`InMemoryStore`] share the same data. Nothing survives the process.

use crate::domain::{EdgeRecord, NodeRecord, UpsertSummary, upsert};
use crate::error::Result;
use crate::storage::RecordStore;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The two record sets, in stored order.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Records {
    pub(crate) nodes: Vec<NodeRecord>,
    pub(crate) edges: Vec<EdgeRecord>,
}

/// Ephemeral [`RecordStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Records>>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_records(records: Records) -> Self {
        Self {
            inner: Arc::new(Mutex::new(records)),
        }
    }

    /// Replace the node set wholesale.
    pub(crate) async fn replace_nodes(&self, nodes: Vec<NodeRecord>) {
        self.inner.lock().await.nodes = nodes;
    }

    /// Replace the edge set wholesale.
    pub(crate) async fn replace_edges(&self, edges: Vec<EdgeRecord>) {
        self.inner.lock().await.edges = edges;
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn save_nodes(&mut self, nodes: &[NodeRecord]) -> Result<UpsertSummary> {
        let mut inner = self.inner.lock().await;
        Ok(upsert(&mut inner.nodes, nodes))
    }

    async fn save_edges(&mut self, edges: &[EdgeRecord]) -> Result<UpsertSummary> {
        let mut inner = self.inner.lock().await;
        Ok(upsert(&mut inner.edges, edges))
    }

    async fn get_nodes(&self) -> Result<Vec<NodeRecord>> {
        Ok(self.inner.lock().await.nodes.clone())
    }

    async fn get_edges(&self) -> Result<Vec<EdgeRecord>> {
        Ok(self.inner.lock().await.edges.clone())
    }
}
