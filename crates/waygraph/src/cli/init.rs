//! `waygraph init` command implementation.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::config;
use crate::output::{OutputMode, print_json};

/// Run the init command.
pub async fn run(ctx: &Context) -> Result<()> {
    let result = config::init(&ctx.working_dir).await?;
    tracing::info!(dir = %result.waygraph_dir.display(), "Initialized repository");

    match ctx.output {
        OutputMode::Json => print_json(&serde_json::json!({
            "waygraph_dir": result.waygraph_dir.display().to_string(),
            "config": result.config_file.display().to_string(),
            "data_dir": result.data_dir.display().to_string(),
        }))?,
        OutputMode::Text => {
            println!(
                "{} {}",
                "Initialized waygraph in".green(),
                result.waygraph_dir.display()
            );
            println!("  Config: {}", result.config_file.display());
            println!("  Data:   {}", result.data_dir.display());
        }
    }

    Ok(())
}
