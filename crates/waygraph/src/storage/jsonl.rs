//! JSONL-backed record store.
//!
//! A data directory holds one JSON object per line in `nodes.jsonl` and
//! `edges.jsonl`. The files are read once when the store is opened and
//! rewritten on every save. A save reaches memory only after its file has
//! been written, so a failed write leaves the store as it was.
//!
//! # Resilient loading
//!
//! Blank lines are ignored. A line that does not parse as a record is
//! skipped and reported as a [`LoadWarning`]; the rest of the file still
//! loads. A missing file reads as empty.
//!
//! # Atomic writes
//!
//! Saves write the full record set to `<file>.tmp`, flush it and rename it
//! over the target, so a crash mid-write leaves the previous file intact.

use crate::domain::{EdgeRecord, NodeRecord, UpsertSummary, upsert};
use crate::error::{Error, Result};
use crate::storage::RecordStore;
use crate::storage::in_memory::{InMemoryStore, Records};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

/// Name of the node records file inside the data directory.
pub const NODES_FILE_NAME: &str = "nodes.jsonl";

/// Name of the edge records file inside the data directory.
pub const EDGES_FILE_NAME: &str = "edges.jsonl";

/// A non-fatal problem found while loading a JSONL file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// A line could not be parsed and was skipped.
    MalformedJson {
        /// File the line came from.
        file: PathBuf,
        /// 1-based line number.
        line_number: usize,
        /// Parser message.
        error: String,
    },
}

impl LoadWarning {
    /// Returns the line number associated with this warning.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            LoadWarning::MalformedJson { line_number, .. } => *line_number,
        }
    }
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::MalformedJson {
                file,
                line_number,
                error,
            } => write!(
                f,
                "skipped malformed line {line_number} in {}: {error}",
                file.display()
            ),
        }
    }
}

/// Persistent [`RecordStore`] over a data directory of JSONL files.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    dir: PathBuf,
    records: InMemoryStore,
}

impl JsonlStore {
    /// Open the store in `dir`, loading whatever records exist.
    ///
    /// The directory is created on the first save if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if `dir` exists but is not a directory, and
    /// `Error::Io` if an existing file cannot be read.
    pub async fn open(dir: &Path) -> Result<(Self, Vec<LoadWarning>)> {
        if let Ok(metadata) = fs::metadata(dir).await
            && !metadata.is_dir()
        {
            return Err(Error::Storage(format!(
                "data path {} is not a directory",
                dir.display()
            )));
        }

        let (nodes, mut warnings) =
            read_jsonl_resilient::<NodeRecord>(&dir.join(NODES_FILE_NAME)).await?;
        let (edges, edge_warnings) =
            read_jsonl_resilient::<EdgeRecord>(&dir.join(EDGES_FILE_NAME)).await?;
        warnings.extend(edge_warnings);

        tracing::debug!(
            dir = %dir.display(),
            nodes = nodes.len(),
            edges = edges.len(),
            warnings = warnings.len(),
            "Opened JSONL store"
        );

        let store = Self {
            dir: dir.to_path_buf(),
            records: InMemoryStore::from_records(Records { nodes, edges }),
        };
        Ok((store, warnings))
    }

    /// The data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn persist<T: Serialize>(&self, file_name: &str, records: &[T]) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;
        write_jsonl_atomic(&self.dir.join(file_name), records).await
    }
}

#[async_trait]
impl RecordStore for JsonlStore {
    async fn save_nodes(&mut self, nodes: &[NodeRecord]) -> Result<UpsertSummary> {
        let mut updated = self.records.get_nodes().await?;
        let summary = upsert(&mut updated, nodes);
        self.persist(NODES_FILE_NAME, &updated).await?;
        self.records.replace_nodes(updated).await;
        Ok(summary)
    }

    async fn save_edges(&mut self, edges: &[EdgeRecord]) -> Result<UpsertSummary> {
        let mut updated = self.records.get_edges().await?;
        let summary = upsert(&mut updated, edges);
        self.persist(EDGES_FILE_NAME, &updated).await?;
        self.records.replace_edges(updated).await;
        Ok(summary)
    }

    async fn get_nodes(&self) -> Result<Vec<NodeRecord>> {
        self.records.get_nodes().await
    }

    async fn get_edges(&self) -> Result<Vec<EdgeRecord>> {
        self.records.get_edges().await
    }
}

/// Read every parseable record from a JSONL file.
///
/// Returns an empty set if the file does not exist.
async fn read_jsonl_resilient<T>(path: &Path) -> Result<(Vec<T>, Vec<LoadWarning>)>
where
    T: DeserializeOwned,
{
    let file = match File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok((Vec::new(), Vec::new()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut lines = BufReader::new(file).lines();
    let mut values = Vec::new();
    let mut warnings = Vec::new();
    let mut line_number = 0;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str(trimmed) {
            Ok(value) => values.push(value),
            Err(e) => warnings.push(LoadWarning::MalformedJson {
                file: path.to_path_buf(),
                line_number,
                error: e.to_string(),
            }),
        }
    }

    Ok((values, warnings))
}

/// Write `values` to `path` one JSON object per line, atomically.
async fn write_jsonl_atomic<T: Serialize>(path: &Path, values: &[T]) -> Result<()> {
    let temp_path = make_temp_path(path);

    if let Err(e) = write_to_temp_file(&temp_path, values).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e);
    }

    fs::rename(&temp_path, path).await?;
    Ok(())
}

/// `nodes.jsonl` becomes `nodes.jsonl.tmp`.
fn make_temp_path(path: &Path) -> PathBuf {
    let mut temp_path = path.as_os_str().to_os_string();
    temp_path.push(".tmp");
    PathBuf::from(temp_path)
}

async fn write_to_temp_file<T: Serialize>(temp_path: &Path, values: &[T]) -> Result<()> {
    let file = File::create(temp_path).await?;
    let mut writer = BufWriter::new(file);
    for value in values {
        let mut line = serde_json::to_vec(value)?;
        line.push(b'\n');
        writer.write_all(&line).await?;
    }
    writer.flush().await?;
    writer.get_ref().sync_all().await?;
    Ok(())
}
