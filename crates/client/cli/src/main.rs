//! Headless command-line client.
//!
//! `generate` prints a single map; `autoplay` runs a seeded session with
//! random moves and reports what happened. Both read `DUNGEON_SEED` and
//! `DUNGEON_CONFIG` from the environment (or a `.env` file), overridable by
//! flags.
mod commands;
mod config;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Autoplay, Generate};
use config::CliConfig;

/// Dungeon crawler command-line client
#[derive(Parser)]
#[command(name = "client-cli")]
#[command(about = "Generate dungeons and play scripted sessions", long_about = None)]
#[command(version)]
struct Cli {
    /// RNG seed (overrides DUNGEON_SEED)
    #[arg(long, global = true, value_name = "SEED")]
    seed: Option<u64>,

    /// Content TOML file (overrides DUNGEON_CONFIG)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate a map and print it
    Generate(Generate),

    /// Play a session with random moves
    Autoplay(Autoplay),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();
    let config = CliConfig::from_env().with_overrides(cli.seed, cli.config);

    match cli.command {
        Command::Generate(cmd) => cmd.execute(&config),
        Command::Autoplay(cmd) => cmd.execute(&config),
    }
}

/// Logs go to stderr so stdout stays clean for maps and reports.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
