//! `waygraph query` command implementation.

use anyhow::{Context as _, Result};
use tokio::io::AsyncReadExt;

use super::{Context, QueryArgs};
use crate::output::print_json;
use waygraph_core::{QueryBatch, QueryOptions, QueryProcessor};

/// Run the query command.
///
/// The answer document is always JSON, whatever `--json` says.
pub async fn run(ctx: &Context, args: &QueryArgs) -> Result<()> {
    let input = match &args.input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read query batch {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read query batch from stdin")?;
            buf
        }
    };
    let document: serde_json::Value =
        serde_json::from_str(&input).context("query batch is not valid JSON")?;
    let batch = QueryBatch::from_value(document)?;

    let (graph, config) = ctx.graph(&args.source).await?;
    let configured = config.query.options();
    let (strategy, limits) = args
        .traversal
        .resolve(configured.strategy, configured.limits);
    let options = QueryOptions {
        strategy,
        limits,
        parallel: args.parallel || configured.parallel,
    };
    tracing::debug!(queries = batch.queries.len(), ?options, "Answering query batch");

    let answers = QueryProcessor::new(&graph)
        .with_options(options)
        .process_batch(&batch)?;
    print_json(&answers)?;

    Ok(())
}
