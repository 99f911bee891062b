//! Rollcall CLI: Senate roll-call vote tables with tie-vote analysis.
//!
//! Downloads LIS vote lists and vote records, builds per-session vote
//! tables, and exports them as CSV or JSON.

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
