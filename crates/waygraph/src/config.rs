//! Repository configuration and initialization.
//!
//! A waygraph repository is a directory containing `.waygraph/`:
//!
//! ```text
//! .waygraph/
//!   config.yaml     storage backend and query defaults
//!   data/
//!     nodes.jsonl
//!     edges.jsonl
//! ```

use crate::error::{Error, Result};
use crate::storage::StorageBackend;
use crate::storage::jsonl::{EDGES_FILE_NAME, NODES_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use waygraph_core::{PathLimits, QueryOptions, TraversalStrategy};

/// Name of the waygraph directory
pub const WAYGRAPH_DIR_NAME: &str = ".waygraph";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Default data directory, relative to the repository root
pub const DEFAULT_DATA_DIR: &str = ".waygraph/data";

/// Maximum directory depth to traverse when searching for a waygraph root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaygraphConfig {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Defaults for `query` and `paths`
    #[serde(default)]
    pub query: QueryConfig,
}

/// Which record store backs the repository.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// JSONL files under `data_dir`
    #[default]
    Jsonl,
    /// Ephemeral, nothing is persisted
    Memory,
}

/// Storage configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Storage backend type
    #[serde(default)]
    pub backend: BackendKind,

    /// Data directory, relative to the repository root unless absolute
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            data_dir: default_data_dir(),
        }
    }
}

/// Query defaults section
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QueryConfig {
    /// Path enumeration strategy (`dfs`, `dfs-iterative` or `bfs`)
    pub strategy: TraversalStrategy,

    /// Maximum number of edges per enumerated path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,

    /// Maximum number of paths per request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_paths: Option<usize>,

    /// Answer batches on the rayon thread pool
    pub parallel: bool,
}

impl QueryConfig {
    /// Options for a query processor.
    #[must_use]
    pub fn options(&self) -> QueryOptions {
        QueryOptions {
            strategy: self.strategy,
            limits: PathLimits {
                max_depth: self.max_depth,
                max_paths: self.max_paths,
            },
            parallel: self.parallel,
        }
    }
}

impl WaygraphConfig {
    /// Load configuration from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration, falling back to defaults if the file is absent.
    pub async fn load_or_default(path: &Path) -> Result<Self> {
        if fs::try_exists(path).await? {
            Self::load(path).await
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// The storage backend for a repository rooted at `root`.
    #[must_use]
    pub fn storage_backend(&self, root: &Path) -> StorageBackend {
        match self.storage.backend {
            BackendKind::Memory => StorageBackend::InMemory,
            BackendKind::Jsonl => StorageBackend::Jsonl(root.join(&self.storage.data_dir)),
        }
    }
}

/// Path of the configuration file for a repository rooted at `root`.
#[must_use]
pub fn config_path(root: &Path) -> PathBuf {
    root.join(WAYGRAPH_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created waygraph directory
    pub waygraph_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the created data directory
    pub data_dir: PathBuf,
}

/// Initialize a new waygraph repository in `base_dir`.
///
/// Creates `.waygraph/`, a default `config.yaml` and empty data files.
///
/// # Errors
///
/// Returns `Error::Config` if `.waygraph/` already exists, or `Error::Io`
/// if the filesystem operations fail.
pub async fn init(base_dir: &Path) -> Result<InitResult> {
    let waygraph_dir = base_dir.join(WAYGRAPH_DIR_NAME);

    if fs::try_exists(&waygraph_dir).await? {
        return Err(Error::Config(format!(
            "Waygraph is already initialized in this directory. Found existing '{WAYGRAPH_DIR_NAME}'"
        )));
    }

    let config = WaygraphConfig::default();
    let data_dir = base_dir.join(&config.storage.data_dir);
    fs::create_dir_all(&data_dir).await?;

    let config_file = waygraph_dir.join(CONFIG_FILE_NAME);
    config.save(&config_file).await?;

    fs::write(data_dir.join(NODES_FILE_NAME), "").await?;
    fs::write(data_dir.join(EDGES_FILE_NAME), "").await?;

    Ok(InitResult {
        waygraph_dir,
        config_file,
        data_dir,
    })
}

/// Find the waygraph root directory by searching up the directory tree.
///
/// Returns the first ancestor of `start_dir` (itself included) that contains
/// `.waygraph/`, or `None` if none is found within [`MAX_TRAVERSAL_DEPTH`]
/// levels.
#[must_use]
pub fn find_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(WAYGRAPH_DIR_NAME).is_dir() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}

/// Like [`find_root`], but an error when no repository is found.
///
/// # Errors
///
/// Returns `Error::NotInitialized` naming `start_dir`.
pub fn require_root(start_dir: &Path) -> Result<PathBuf> {
    find_root(start_dir).ok_or_else(|| Error::NotInitialized(start_dir.to_path_buf()))
}
