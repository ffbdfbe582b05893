//! Mapstack CLI - Layer Stack Controller
//!
//! Command-line demo and inspection tool for the mapstack controller.

use clap::Parser;
use env_logger::Env;
use log::info;

use mapstack::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!("Mapstack v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Inspect { catalog } => commands::inspect(&catalog),
        Commands::Simulate { catalog, ops } => commands::simulate(&catalog, &ops),
        Commands::Query { catalog, x, y, ops } => commands::query(&catalog, x, y, &ops).await,
    }
}
