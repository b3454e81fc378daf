// spiritguard/src/main.rs

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `--format json` stays pipeable.
    // RUST_LOG=debug spiritguard anomalies ... for the details
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Overview { common } => commands::overview::execute(common),
        Commands::Trends { common, district } => commands::trends::execute(common, district),
        Commands::States { common } => commands::states::execute(common),
        Commands::Anomalies { common, top } => commands::anomalies::execute(common, top),
        Commands::Geo { common, year } => commands::geo::execute(common, year),
        Commands::Fleet { common, at } => commands::fleet::execute(common, at),
        Commands::Production {
            common,
            factory,
            today,
        } => commands::production::execute(common, factory, today),
        Commands::Batches {
            common,
            limit,
            today,
        } => commands::batches::execute(common, limit, today),
        Commands::Verify {
            batch_id,
            common,
            today,
        } => commands::verify::execute(common, batch_id, today),
    }
}
