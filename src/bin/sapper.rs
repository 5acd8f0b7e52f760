//! sapper CLI - Knowledge-based Minesweeper agent
//!
//! This CLI provides a unified interface for:
//! - Playing single games with the inference agent
//! - Benchmarking the agent's deduction over many boards

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sapper")]
#[command(version, about = "Knowledge-based Minesweeper agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game, optionally rendering every move
    Play(sapper::cli::commands::play::PlayArgs),

    /// Run many games and report aggregate statistics
    Bench(sapper::cli::commands::bench::BenchArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => sapper::cli::commands::play::execute(args),
        Commands::Bench(args) => sapper::cli::commands::bench::execute(args),
    }
}
