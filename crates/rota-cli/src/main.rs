use anyhow::Result;
use clap::Parser;

mod cli;
mod roster_cmd;
mod select_cmd;
mod sources;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing (stderr only; stdout carries the single result line)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init()
        .ok();

    let cli = Cli::parse();
    let output_format = cli.format.clone();

    match cli.command {
        Commands::Select {
            source,
            exclusions,
            recent_window,
        } => select_cmd::handle_select(source, exclusions, recent_window, output_format),
        Commands::Previous { source } => roster_cmd::handle_previous(source, output_format),
        Commands::Roster { source } => roster_cmd::handle_roster(source, output_format),
    }
}
