//! `waygraph load` command implementation.

use anyhow::{Context as _, Result};
use colored::Colorize;
use serde::Serialize;

use super::{Context, LoadArgs};
use crate::domain::{UpsertSummary, load_document};
use crate::output::{OutputMode, print_json};
use crate::storage::StorageBackend;

#[derive(Serialize)]
struct LoadReport<'a> {
    graph: &'a str,
    nodes_inserted: usize,
    nodes_updated: usize,
    edges_inserted: usize,
    edges_updated: usize,
}

/// Run the load command.
///
/// The document is validated before anything is written; an invalid
/// document leaves the store untouched.
pub async fn run(ctx: &Context, args: &LoadArgs) -> Result<()> {
    let document = load_document(&args.document)
        .await
        .with_context(|| format!("failed to load graph document {}", args.document.display()))?;

    let mut app = ctx.open_app().await?;
    if *app.backend() == StorageBackend::InMemory {
        tracing::warn!("Storage backend is 'memory'; loaded records will not persist");
    }

    let nodes: UpsertSummary = app.store_mut().save_nodes(&document.nodes).await?;
    let edges: UpsertSummary = app.store_mut().save_edges(&document.edges).await?;
    tracing::info!(
        graph = %document.id,
        nodes_inserted = nodes.inserted,
        nodes_updated = nodes.updated,
        edges_inserted = edges.inserted,
        edges_updated = edges.updated,
        "Loaded graph document"
    );

    match ctx.output {
        OutputMode::Json => print_json(&LoadReport {
            graph: &document.id,
            nodes_inserted: nodes.inserted,
            nodes_updated: nodes.updated,
            edges_inserted: edges.inserted,
            edges_updated: edges.updated,
        })?,
        OutputMode::Text => {
            println!(
                "{} '{}' ({})",
                "Loaded graph".green(),
                document.name,
                document.id.cyan()
            );
            println!(
                "  Nodes: {} added, {} updated",
                nodes.inserted, nodes.updated
            );
            println!(
                "  Edges: {} added, {} updated",
                edges.inserted, edges.updated
            );
        }
    }

    Ok(())
}
