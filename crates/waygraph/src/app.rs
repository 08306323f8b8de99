//! Application context for CLI command execution.
//!
//! [`App`] locates the repository, loads its configuration and opens the
//! configured record store.
//!
//! # Example
//!
//! ```no_run
//! use waygraph::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     let graph = app.graph().await?;
//!     println!("{} nodes", graph.node_count());
//!     Ok(())
//! }
//! ```

use crate::config::{WaygraphConfig, config_path, require_root};
use crate::error::Result;
use crate::storage::{RecordStore, StorageBackend, create_storage, load_graph};
use std::path::{Path, PathBuf};
use waygraph_core::Graph;

/// Application context for CLI operations.
pub struct App {
    /// The record store (trait object for polymorphism)
    store: Box<dyn RecordStore>,

    /// Directory containing `.waygraph/`
    root: PathBuf,

    /// Loaded configuration
    config: WaygraphConfig,

    backend: StorageBackend,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("root", &self.root)
            .field("config", &self.config)
            .field("backend", &self.backend)
            .field("store", &"<dyn RecordStore>")
            .finish()
    }
}

impl App {
    /// Create an App from the given working directory.
    ///
    /// Searches up the directory tree for `.waygraph/`, loads its
    /// configuration and opens the record store.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No waygraph repository is found in the directory tree
    /// - The configuration cannot be parsed
    /// - The store cannot be opened
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root = require_root(working_dir)?;
        let config = WaygraphConfig::load_or_default(&config_path(&root)).await?;
        let backend = config.storage_backend(&root);
        tracing::debug!(root = %root.display(), ?backend, "Opening repository");

        let store = create_storage(backend.clone()).await?;

        Ok(Self {
            store,
            root,
            config,
            backend,
        })
    }

    /// Get a mutable reference to the store.
    pub fn store_mut(&mut self) -> &mut dyn RecordStore {
        self.store.as_mut()
    }

    /// Get an immutable reference to the store.
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// The repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The loaded configuration.
    pub fn config(&self) -> &WaygraphConfig {
        &self.config
    }

    /// The storage backend in use.
    pub fn backend(&self) -> &StorageBackend {
        &self.backend
    }

    /// Rebuild the graph from the store.
    ///
    /// # Errors
    ///
    /// Returns `Error::Graph` if the stored edges reference missing nodes.
    pub async fn graph(&self) -> Result<Graph> {
        load_graph(self.store.as_ref()).await
    }
}
