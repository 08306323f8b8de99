//! `waygraph cycles` command implementation.

use anyhow::Result;

use super::{Context, CyclesArgs};
use crate::output::print_cycles;
use waygraph_core::cycle_membership;

/// Run the cycles command.
pub async fn run(ctx: &Context, args: &CyclesArgs) -> Result<()> {
    let (graph, _config) = ctx.graph(&args.source).await?;

    let membership = cycle_membership(&graph);
    tracing::debug!(
        cycles = membership.cycles.len(),
        nodes = membership.nodes.len(),
        "Enumerated cycles"
    );

    print_cycles(&membership, ctx.output)?;
    Ok(())
}
