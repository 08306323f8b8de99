//! Waygraph CLI binary.

use std::process::ExitCode;

use colored::Colorize;
use tracing_subscriber::EnvFilter;
use waygraph::cli::Cli;

/// Uses tokio's current_thread runtime; commands are sequential and
/// I/O-bound, and parallel query answering runs on rayon.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // RUST_LOG overrides the -v derived filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting waygraph CLI");

    match cli.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            for cause in e.chain().skip(1) {
                eprintln!("  {}: {cause}", "caused by".dimmed());
            }
            ExitCode::FAILURE
        }
    }
}
