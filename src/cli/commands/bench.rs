//! Bench command - Measure the agent's performance over many games

use std::{fs::File, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::{
    analysis::BatchStats,
    cli::output::{create_bench_progress, print_section, print_stats_table},
    knowledge::InferenceDepth,
    session::{SessionConfig, play_game},
};

#[derive(Parser, Debug)]
#[command(about = "Run many games and report aggregate statistics")]
pub struct BenchArgs {
    /// Board height
    #[arg(long, default_value_t = 8)]
    pub height: usize,

    /// Board width
    #[arg(long, default_value_t = 8)]
    pub width: usize,

    /// Number of mines
    #[arg(long, short = 'm', default_value_t = 8)]
    pub mines: usize,

    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Base seed; game `i` is seeded with `seed + i`
    #[arg(long)]
    pub seed: Option<u64>,

    /// Inference depth (`fixed-point` or `single-pass`)
    #[arg(long, default_value = "fixed-point")]
    pub depth: String,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: BenchArgs) -> Result<()> {
    let depth: InferenceDepth = args.depth.parse()?;
    let base = SessionConfig::new(args.height, args.width, args.mines).with_depth(depth);

    print_section("Benchmark Configuration");
    print_stats_table(&[
        ("Board", format!("{}x{}", base.height, base.width)),
        ("Mines", base.mines.to_string()),
        ("Games", args.games.to_string()),
        ("Depth", depth.to_string()),
    ]);
    if let Some(seed) = args.seed {
        crate::cli::output::print_kv("Base seed", &seed.to_string());
    }

    let pb = create_bench_progress(args.games as u64);
    let mut records = Vec::with_capacity(args.games);
    for game_index in 0..args.games {
        let mut config = base;
        if let Some(seed) = args.seed {
            config = config.with_seed(seed.wrapping_add(game_index as u64));
        }
        records.push(play_game(config)?);

        pb.inc(1);
        if (game_index + 1).is_multiple_of(10) {
            let wins = records
                .iter()
                .filter(|record| {
                    matches!(record.outcome, Some(crate::minesweeper::GameOutcome::Won))
                })
                .count();
            pb.set_message(format!("{wins} won"));
        }
    }
    pb.finish_and_clear();

    let stats = BatchStats::from_records(&records);

    print_section("Benchmark Results");
    print_stats_table(&[
        ("Games", stats.total_games.to_string()),
        (
            "Won",
            format!("{} ({:.1}%)", stats.outcomes.wins, stats.win_rate * 100.0),
        ),
        ("Lost", stats.outcomes.losses.to_string()),
        ("Unfinished", stats.outcomes.unfinished.to_string()),
        ("Avg moves", format!("{:.1}", stats.average_moves)),
        (
            "Deduced moves",
            format!(
                "{} ({:.1}%)",
                stats.safe_moves,
                stats.deduction_share * 100.0
            ),
        ),
        ("Guessed moves", stats.random_moves.to_string()),
    ]);

    if let Some(export_path) = &args.export {
        export_results(&base, args.games, args.seed, &stats, export_path)?;
        println!("\nResults exported to: {}", export_path.display());
    }

    Ok(())
}

/// Export benchmark results to JSON
fn export_results(
    config: &SessionConfig,
    games: usize,
    base_seed: Option<u64>,
    stats: &BatchStats,
    path: &PathBuf,
) -> Result<()> {
    #[derive(Serialize)]
    struct BenchExport<'a> {
        benchmark: BenchmarkSection,
        stats: &'a BatchStats,
    }

    #[derive(Serialize)]
    struct BenchmarkSection {
        height: usize,
        width: usize,
        mines: usize,
        games: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        base_seed: Option<u64>,
        depth: String,
    }

    let export = BenchExport {
        benchmark: BenchmarkSection {
            height: config.height,
            width: config.width,
            mines: config.mines,
            games,
            base_seed,
            depth: config.depth.to_string(),
        },
        stats,
    };

    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &export)?;
    Ok(())
}
