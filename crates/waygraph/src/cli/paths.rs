//! `waygraph paths` command implementation.

use anyhow::Result;

use super::{Context, PathsArgs};
use crate::output::print_paths;
use waygraph_core::enumerate_paths;

/// Run the paths command.
pub async fn run(ctx: &Context, args: &PathsArgs) -> Result<()> {
    let (graph, config) = ctx.graph(&args.source).await?;
    let configured = config.query.options();
    let (strategy, limits) = args
        .traversal
        .resolve(configured.strategy, configured.limits);

    for endpoint in [&args.start, &args.end] {
        if !graph.contains(endpoint) {
            tracing::warn!(node = %endpoint, "Unknown node; no paths can exist");
        }
    }

    let found = enumerate_paths(&graph, &args.start, &args.end, strategy, limits);
    tracing::debug!(?strategy, paths = found.len(), truncated = found.truncated, "Enumerated paths");

    print_paths(&args.start, &args.end, &found, ctx.output)?;
    Ok(())
}
