//! `waygraph cheapest` command implementation.

use anyhow::Result;

use super::{CheapestArgs, Context};
use crate::output::print_cheapest;
use waygraph_core::cheapest_path;

/// Run the cheapest command.
pub async fn run(ctx: &Context, args: &CheapestArgs) -> Result<()> {
    let (graph, _config) = ctx.graph(&args.source).await?;

    let best = cheapest_path(&graph, &args.start, &args.end);
    if let Some(best) = &best {
        tracing::debug!(cost = best.cost, hops = best.nodes.len() - 1, "Found cheapest path");
    }

    print_cheapest(&args.start, &args.end, best.as_ref(), ctx.output)?;
    Ok(())
}
