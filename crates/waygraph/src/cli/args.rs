//! Argument structs for CLI commands.

use clap::{Args, ValueEnum};
use std::path::PathBuf;
use waygraph_core::{PathLimits, TraversalStrategy};

/// Arguments for the load command
#[derive(Args, Debug, Clone)]
pub struct LoadArgs {
    /// Graph document (JSON) to validate and store
    pub document: PathBuf,
}

/// Where a read-only command gets its graph from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Query this graph document directly instead of the repository store
    #[arg(short, long, value_name = "FILE")]
    pub document: Option<PathBuf>,
}

/// Path enumeration overrides; unset fields fall back to the config.
#[derive(Args, Debug, Clone, Default)]
pub struct TraversalArgs {
    /// Traversal strategy
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Maximum number of edges per path
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Stop after this many paths
    #[arg(long, value_name = "N")]
    pub max_paths: Option<usize>,
}

impl TraversalArgs {
    /// Apply these overrides on top of configured defaults.
    #[must_use]
    pub fn resolve(
        &self,
        strategy: TraversalStrategy,
        limits: PathLimits,
    ) -> (TraversalStrategy, PathLimits) {
        (
            self.strategy.map_or(strategy, Into::into),
            PathLimits {
                max_depth: self.max_depth.or(limits.max_depth),
                max_paths: self.max_paths.or(limits.max_paths),
            },
        )
    }
}

/// Arguments for the query command
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Query batch file (reads stdin when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub traversal: TraversalArgs,

    /// Answer queries in parallel
    #[arg(long)]
    pub parallel: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the paths command
#[derive(Args, Debug, Clone)]
pub struct PathsArgs {
    /// Start node id
    pub start: String,

    /// End node id
    pub end: String,

    #[command(flatten)]
    pub traversal: TraversalArgs,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the cheapest command
#[derive(Args, Debug, Clone)]
pub struct CheapestArgs {
    /// Start node id
    pub start: String,

    /// End node id
    pub end: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the cycles command
#[derive(Args, Debug, Clone)]
pub struct CyclesArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Traversal strategy names accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    /// Recursive depth-first
    Dfs,
    /// Depth-first with an explicit stack (same order as dfs)
    DfsIterative,
    /// Breadth-first (shortest paths first)
    Bfs,
}

impl From<StrategyArg> for TraversalStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Dfs => TraversalStrategy::DepthFirst,
            StrategyArg::DfsIterative => TraversalStrategy::DepthFirstIterative,
            StrategyArg::Bfs => TraversalStrategy::BreadthFirst,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win_over_config() {
        let args = TraversalArgs {
            strategy: Some(StrategyArg::Bfs),
            max_depth: None,
            max_paths: Some(2),
        };
        let configured = PathLimits {
            max_depth: Some(6),
            max_paths: Some(10),
        };

        let (strategy, limits) = args.resolve(TraversalStrategy::DepthFirst, configured);
        assert_eq!(strategy, TraversalStrategy::BreadthFirst);
        assert_eq!(limits.max_depth, Some(6));
        assert_eq!(limits.max_paths, Some(2));
    }

    #[test]
    fn no_overrides_keep_config() {
        let (strategy, limits) = TraversalArgs::default()
            .resolve(TraversalStrategy::DepthFirstIterative, PathLimits::unbounded());
        assert_eq!(strategy, TraversalStrategy::DepthFirstIterative);
        assert_eq!(limits, PathLimits::unbounded());
    }
}
