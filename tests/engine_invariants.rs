//! Invariant and soundness checks over randomized full games.
//!
//! Every conclusion the knowledge base draws is checked against the ground
//! truth of the board that produced the observations.

use sapper::{GameOutcome, GameSession, InferenceDepth, SessionConfig};

fn check_session(config: SessionConfig) {
    let mut session = GameSession::new(config).expect("valid session config");
    let record = session.run().expect("session must not stall");
    assert!(record.outcome.is_some(), "unbounded sessions always finish");

    let kb = session.agent().knowledge();
    let board = session.game().board();

    // Derived sets stay disjoint.
    assert!(kb.safes().is_disjoint(kb.mines()));
    assert!(kb.moves_made().is_disjoint(kb.mines()));

    // Soundness against ground truth: proven safes are never mines and
    // proven mines always are. A lost game's final reveal never enters
    // the knowledge base, so the check holds there too.
    for cell in kb.safes() {
        assert!(!board.is_mine(*cell), "cell {cell} proven safe but mined");
    }
    for cell in kb.mines() {
        assert!(board.is_mine(*cell), "cell {cell} proven mined but clear");
    }

    // Sentence invariants at rest.
    for sentence in kb.knowledge() {
        assert!(!sentence.is_empty(), "empty sentences must be purged");
        assert!(sentence.count() <= sentence.cells().len());
        for cell in sentence.cells() {
            assert!(
                !kb.safes().contains(cell) && !kb.mines().contains(cell),
                "sentence {sentence} mentions resolved cell {cell}"
            );
        }
    }

    // Won games flagged exactly the mine set or opened every clear cell.
    if record.outcome == Some(GameOutcome::Won) {
        let clear_cells = board.height() * board.width() - board.num_mines();
        assert!(
            board.won() || session.game().revealed().len() == clear_cells,
            "a win requires exact flags or a fully opened board"
        );
    }
}

#[test]
fn invariants_hold_across_seeded_games() {
    for seed in 0..40 {
        check_session(SessionConfig::new(6, 6, 6).with_seed(seed));
    }
}

#[test]
fn invariants_hold_in_single_pass_mode() {
    for seed in 0..40 {
        check_session(
            SessionConfig::new(6, 6, 6)
                .with_seed(seed)
                .with_depth(InferenceDepth::SinglePass),
        );
    }
}

#[test]
fn invariants_hold_on_extreme_densities() {
    for seed in 0..10 {
        // No mines: every game is a win.
        check_session(SessionConfig::new(4, 4, 0).with_seed(seed));
        // Dense board: mostly losses, but never corruption.
        check_session(SessionConfig::new(4, 4, 12).with_seed(seed));
    }
}

#[test]
fn mine_free_games_are_always_won() {
    for seed in 0..10 {
        let mut session =
            GameSession::new(SessionConfig::new(5, 5, 0).with_seed(seed)).expect("valid config");
        let record = session.run().expect("session must not stall");
        assert_eq!(record.outcome, Some(GameOutcome::Won));
    }
}

#[test]
fn both_depths_complete_the_same_boards() {
    // Identical seeds play identical boards under either propagation
    // policy; both must reach an outcome within the board-size move bound.
    for seed in 0..20 {
        let fixed = sapper::play_game(SessionConfig::new(6, 6, 6).with_seed(seed))
            .expect("session must not stall");
        let single = sapper::play_game(
            SessionConfig::new(6, 6, 6)
                .with_seed(seed)
                .with_depth(InferenceDepth::SinglePass),
        )
        .expect("session must not stall");

        for record in [&fixed, &single] {
            assert!(record.outcome.is_some());
            assert!(record.moves.len() <= 36);
        }
    }
}
