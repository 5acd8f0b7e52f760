//! Play command - Play a single game with the inference agent

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{print_kv, print_section},
    knowledge::InferenceDepth,
    minesweeper::GameOutcome,
    session::{GameSession, SessionConfig},
};

#[derive(Parser, Debug)]
#[command(about = "Play a single game with the inference agent")]
pub struct PlayArgs {
    /// Board height
    #[arg(long, default_value_t = 8)]
    pub height: usize,

    /// Board width
    #[arg(long, default_value_t = 8)]
    pub width: usize,

    /// Number of mines
    #[arg(long, short = 'm', default_value_t = 8)]
    pub mines: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Inference depth (`fixed-point` or `single-pass`)
    #[arg(long, default_value = "fixed-point")]
    pub depth: String,

    /// Print the board after every move
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let depth: InferenceDepth = args.depth.parse()?;
    let mut config = SessionConfig::new(args.height, args.width, args.mines).with_depth(depth);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    print_section("Game Configuration");
    print_kv("Board", &format!("{}x{}", config.height, config.width));
    print_kv("Mines", &config.mines.to_string());
    print_kv("Depth", &depth.to_string());
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }

    let mut session = GameSession::new(config)?;

    while let Some(record) = session.step()? {
        if args.verbose {
            let kind = match record.kind {
                crate::agent::MoveKind::Safe => "safe",
                crate::agent::MoveKind::Random => "guess",
            };
            match record.nearby {
                Some(count) => println!("\nOpened {} ({kind}), {count} nearby", record.cell),
                None => println!("\nOpened {} ({kind}) - mine!", record.cell),
            }
            println!("{}", session.game().render());
        }
    }

    let record = session.record();
    print_section("Result");
    match record.outcome {
        Some(GameOutcome::Won) => print_kv("Outcome", "won"),
        Some(GameOutcome::Lost { mine }) => print_kv("Outcome", &format!("lost on {mine}")),
        None => print_kv("Outcome", "unfinished"),
    }
    print_kv("Moves", &record.moves.len().to_string());
    print_kv("Deduced", &record.safe_moves.to_string());
    print_kv("Guessed", &record.random_moves.to_string());
    print_kv("Mines flagged", &record.flagged.to_string());

    if !args.verbose {
        println!("\n{}", session.game().render());
    }

    Ok(())
}
