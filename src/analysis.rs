//! Aggregate statistics over batches of games

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{minesweeper::GameOutcome, session::GameRecord};

/// Distribution of session outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeDistribution {
    pub wins: usize,
    pub losses: usize,
    /// Sessions truncated by a move budget before reaching an outcome
    pub unfinished: usize,
}

/// Summary of a batch of completed sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStats {
    pub total_games: usize,
    pub outcomes: OutcomeDistribution,
    pub win_rate: f64,
    pub average_moves: f64,
    pub safe_moves: usize,
    pub random_moves: usize,
    /// Share of all moves that were proven safe rather than guessed
    pub deduction_share: f64,
    /// Number of games per move-count
    pub length_histogram: HashMap<usize, usize>,
}

impl BatchStats {
    /// Summarize a batch of game records.
    pub fn from_records(records: &[GameRecord]) -> Self {
        let mut outcomes = OutcomeDistribution::default();
        let mut length_histogram = HashMap::new();
        let mut safe_moves = 0;
        let mut random_moves = 0;
        let mut total_moves = 0;

        for record in records {
            match record.outcome {
                Some(GameOutcome::Won) => outcomes.wins += 1,
                Some(GameOutcome::Lost { .. }) => outcomes.losses += 1,
                None => outcomes.unfinished += 1,
            }
            *length_histogram.entry(record.moves.len()).or_insert(0) += 1;
            safe_moves += record.safe_moves;
            random_moves += record.random_moves;
            total_moves += record.moves.len();
        }

        let total_games = records.len();
        let win_rate = if total_games > 0 {
            outcomes.wins as f64 / total_games as f64
        } else {
            0.0
        };
        let average_moves = if total_games > 0 {
            total_moves as f64 / total_games as f64
        } else {
            0.0
        };
        let deduction_share = if total_moves > 0 {
            safe_moves as f64 / total_moves as f64
        } else {
            0.0
        };

        BatchStats {
            total_games,
            outcomes,
            win_rate,
            average_moves,
            safe_moves,
            random_moves,
            deduction_share,
            length_histogram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minesweeper::Cell;

    fn record(outcome: Option<GameOutcome>, safe: usize, random: usize) -> GameRecord {
        use crate::{agent::MoveKind, session::MoveRecord};

        let mut moves = Vec::new();
        for i in 0..safe {
            moves.push(MoveRecord {
                cell: Cell::new(0, i),
                kind: MoveKind::Safe,
                nearby: Some(0),
            });
        }
        for i in 0..random {
            moves.push(MoveRecord {
                cell: Cell::new(1, i),
                kind: MoveKind::Random,
                nearby: Some(0),
            });
        }
        GameRecord {
            outcome,
            moves,
            safe_moves: safe,
            random_moves: random,
            flagged: 0,
        }
    }

    #[test]
    fn summarizes_outcomes_and_moves() {
        let records = vec![
            record(Some(GameOutcome::Won), 3, 1),
            record(
                Some(GameOutcome::Lost {
                    mine: Cell::new(0, 0),
                }),
                0,
                2,
            ),
            record(None, 1, 1),
        ];
        let stats = BatchStats::from_records(&records);
        assert_eq!(stats.total_games, 3);
        assert_eq!(
            stats.outcomes,
            OutcomeDistribution {
                wins: 1,
                losses: 1,
                unfinished: 1
            }
        );
        assert!((stats.win_rate - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.safe_moves, 4);
        assert_eq!(stats.random_moves, 4);
        assert!((stats.deduction_share - 0.5).abs() < 1e-9);
        assert_eq!(stats.length_histogram.get(&2), Some(&2));
        assert_eq!(stats.length_histogram.get(&4), Some(&1));
    }

    #[test]
    fn empty_batch_yields_zeroed_stats() {
        let stats = BatchStats::from_records(&[]);
        assert_eq!(stats.total_games, 0);
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.average_moves, 0.0);
        assert_eq!(stats.deduction_share, 0.0);
    }
}
