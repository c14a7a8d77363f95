//! Courseboard CLI — cohort submission and grading aggregator.
//!
//! Fetches pull requests, contributor profiles, and assignment results,
//! then merges them into one ranked per-user snapshot.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
