//! ## sporhund-cli
//! **Operator interface for post-capture trace analysis**
//!
//! Entrypoint for the batch analyzer: traffic statistics, report artifacts
//! and port-scan findings from one pcap file.

use clap::Parser;

mod commands;
mod report;

use commands::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => commands::run_analyze(args),
        Commands::Detect(args) => commands::run_detect(args),
    }
}
