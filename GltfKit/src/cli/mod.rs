//! `GltfKit` CLI - Command-line interface for glTF / GLB assets

pub mod commands;

use clap::Parser;
use commands::Commands;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gltfkit", version)]
#[command(about = "GltfKit: inspect, split and pack glTF 2.0 assets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the `GltfKit` CLI
///
/// Log output is controlled with `RUST_LOG` (e.g. `RUST_LOG=gltfkit=debug`).
pub fn run_cli() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}
