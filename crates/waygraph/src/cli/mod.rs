//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `init`: Initialize a new waygraph repository
//! - `load`: Validate a graph document and store its records
//! - `query`: Answer a JSON query batch
//! - `paths`: List simple paths between two nodes
//! - `cheapest`: Show the least-cost path between two nodes
//! - `cycles`: List elementary cycles
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format
//! - `--root <DIR>`: Start the repository search here instead of the
//!   current directory
//! - `-v`: Increase log verbosity (repeatable)
//!
//! # Example
//!
//! ```bash
//! waygraph init
//! waygraph load graph.json
//! waygraph paths a e --strategy bfs
//! echo '{"queries": [{"cheapest": {"start": "a", "end": "e"}}]}' | waygraph query
//! ```

mod args;

pub mod cheapest;
pub mod cycles;
pub mod init;
pub mod load;
pub mod paths;
pub mod query;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

pub use args::{
    CheapestArgs, CyclesArgs, LoadArgs, PathsArgs, QueryArgs, SourceArgs, StrategyArg,
    TraversalArgs,
};

use crate::app::App;
use crate::config::{WaygraphConfig, config_path, find_root};
use crate::domain::load_document;
use crate::output::OutputMode;
use waygraph_core::Graph;

/// Waygraph - path, cheapest-path and cycle queries over weighted digraphs
///
/// Graph documents are validated and stored under `.waygraph/`; queries run
/// against the stored graph or directly against a document.
#[derive(Parser, Debug)]
#[command(name = "waygraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Repository directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new waygraph repository
    ///
    /// Creates `.waygraph/` with a default configuration and empty data files.
    Init,

    /// Validate a graph document and upsert its records into the store
    Load(LoadArgs),

    /// Answer a batch of path and cheapest-path queries
    ///
    /// Reads `{"queries": [...]}` from a file or stdin and prints
    /// `{"answers": [...]}`.
    Query(QueryArgs),

    /// List every simple path between two nodes
    Paths(PathsArgs),

    /// Show the least-cost path between two nodes
    Cheapest(CheapestArgs),

    /// List every elementary cycle
    Cycles(CyclesArgs),
}

impl Cli {
    /// Parse command-line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Tracing filter directive for the `-v` count.
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "waygraph=warn,waygraph_core=warn",
            1 => "waygraph=info,waygraph_core=info",
            2 => "waygraph=debug,waygraph_core=debug",
            _ => "waygraph=trace,waygraph_core=trace",
        }
    }

    /// Execute the selected command.
    ///
    /// # Errors
    ///
    /// Returns the command's error with context for display.
    pub async fn execute(self) -> Result<()> {
        let working_dir = match self.root {
            Some(dir) => dir,
            None => std::env::current_dir().context("failed to get current directory")?,
        };
        let ctx = Context {
            working_dir,
            output: OutputMode::from_flag(self.json),
        };

        match self.command {
            Commands::Init => init::run(&ctx).await,
            Commands::Load(args) => load::run(&ctx, &args).await,
            Commands::Query(args) => query::run(&ctx, &args).await,
            Commands::Paths(args) => paths::run(&ctx, &args).await,
            Commands::Cheapest(args) => cheapest::run(&ctx, &args).await,
            Commands::Cycles(args) => cycles::run(&ctx, &args).await,
        }
    }
}

/// Shared state for command implementations.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory the repository search starts from.
    pub working_dir: PathBuf,
    /// Output format.
    pub output: OutputMode,
}

impl Context {
    /// Open the repository containing the working directory.
    ///
    /// # Errors
    ///
    /// Fails if no repository is found or its store cannot be opened.
    pub async fn open_app(&self) -> Result<App> {
        Ok(App::from_directory(&self.working_dir).await?)
    }

    /// The graph to query and the configuration to query it with.
    ///
    /// With `--document` the document is validated and queried directly; the
    /// repository configuration still applies when one is found. Otherwise
    /// the graph is rebuilt from the repository store.
    ///
    /// # Errors
    ///
    /// Fails if the document is invalid, no repository is found, or the
    /// stored records do not form a graph.
    pub async fn graph(&self, source: &SourceArgs) -> Result<(Graph, WaygraphConfig)> {
        match &source.document {
            Some(path) => {
                let config = match find_root(&self.working_dir) {
                    Some(root) => WaygraphConfig::load_or_default(&config_path(&root)).await?,
                    None => WaygraphConfig::default(),
                };
                let graph = document_graph(path).await?;
                Ok((graph, config))
            }
            None => {
                let app = self.open_app().await?;
                let graph = app
                    .graph()
                    .await
                    .context("stored records do not form a valid graph")?;
                Ok((graph, app.config().clone()))
            }
        }
    }
}

async fn document_graph(path: &Path) -> Result<Graph> {
    let document = load_document(path)
        .await
        .with_context(|| format!("failed to load graph document {}", path.display()))?;
    tracing::debug!(
        graph = %document.id,
        nodes = document.nodes.len(),
        edges = document.edges.len(),
        "Loaded graph document"
    );
    Ok(document.to_graph()?)
}
