use std::io::Write;

use rand::seq::SliceRandom;
use gridsolve::tapatan::maximizing_for;
use gridsolve::{
    best_move, is_terminal, legal_moves, rng_for_instance, Adjacency, Board, EvalWeights,
    Evaluator, GameState, Minimax, Move, Player, SearchLimits,
};

fn state(text: &str, next: Player, adjacency: Adjacency) -> GameState {
    GameState::with_board(text.parse::<Board>().expect("board"), next, adjacency)
}

/// Reachable positions from the opening, by seeded random play.
fn sample_states() -> Vec<GameState> {
    let mut out = Vec::new();
    for adjacency in [Adjacency::Orthogonal, Adjacency::Diagonal] {
        for game in 0..6u64 {
            let mut rng = rng_for_instance(0x7A7A, game);
            let mut s = GameState::initial(adjacency);
            for _ in 0..8 {
                out.push(s);
                let moves = legal_moves(&s);
                if is_terminal(&s) {
                    break;
                }
                s = s.apply(*moves.choose(&mut rng).expect("non-terminal has moves"));
            }
        }
    }
    out
}

#[test]
fn opening_depth_five_returns_a_legal_move() {
    let s = GameState::initial(Adjacency::default());
    let (_, mv) = best_move(&s, 5, true);
    let mv = mv.expect("opening is not terminal");
    assert!(legal_moves(&s).contains(&mv));
}

#[test]
fn opening_depth_five_is_legal_on_both_boards_and_evaluators() {
    for adjacency in [Adjacency::Orthogonal, Adjacency::Diagonal] {
        for evaluator in [Evaluator::Utility, Evaluator::default()] {
            let s = GameState::initial(adjacency);
            let mut m = Minimax::new(SearchLimits { max_depth: 5 }, evaluator);
            let res = m.search(&s, maximizing_for(s.next));
            assert!(legal_moves(&s).contains(&res.best_move.expect("move")));
            assert_eq!(res.depth, 5);
            assert!(res.nodes > 1);
        }
    }
}

#[test]
fn same_state_same_depth_same_move() {
    for s in sample_states() {
        let a = best_move(&s, 4, maximizing_for(s.next));
        let b = best_move(&s, 4, maximizing_for(s.next));
        assert_eq!(a.1, b.1);
        assert_eq!(a.0, b.0);
    }
}

#[test]
fn alpha_beta_matches_unpruned_values() {
    for evaluator in [Evaluator::Utility, Evaluator::default()] {
        for s in sample_states() {
            for depth in 1..=4u8 {
                let mut m = Minimax::new(SearchLimits { max_depth: depth }, evaluator);
                let pruned = m.search(&s, maximizing_for(s.next));
                let plain = m.search_unpruned(&s, maximizing_for(s.next));
                assert_eq!(pruned.value, plain.value, "depth {depth} state {:?}", s.board);
                assert!(pruned.nodes <= plain.nodes);
            }
        }
    }
}

#[test]
fn terminal_root_has_no_move_and_exact_utility() {
    let won = state("XXX/O.O/..O", Player::O, Adjacency::Orthogonal);
    let (value, mv) = best_move(&won, 5, false);
    assert_eq!(mv, None);
    assert_eq!(value, 1.0);

    let lost = state("OOO/X.X/..X", Player::X, Adjacency::Orthogonal);
    let (value, mv) = best_move(&lost, 5, true);
    assert_eq!(mv, None);
    assert_eq!(value, -1.0);
}

#[test]
fn minimizer_takes_its_win() {
    let s = state("OO./X.O/X.X", Player::O, Adjacency::Orthogonal);
    let (value, mv) = best_move(&s, 1, false);
    assert_eq!(value, -1.0);
    assert_eq!(mv, Some(Move::new(5, 2)));
}

#[test]
fn maximizer_blocks_the_only_threat() {
    // O threatens 5 -> 2 completing the top row; only X's centre piece can reach 2.
    let s = state("OO./XXO/..X", Player::X, Adjacency::Diagonal);
    let (value, mv) = best_move(&s, 2, true);
    assert_eq!(mv, Some(Move::new(4, 2)));
    assert!(value > -1.0);
}

#[test]
fn utility_evaluator_scores_quiet_cutoffs_as_draws() {
    let s = GameState::initial(Adjacency::Orthogonal);
    let mut m = Minimax::new(SearchLimits { max_depth: 1 }, Evaluator::Utility);
    let res = m.search(&s, true);
    assert_eq!(res.value, 0.0);
    // first move wins ties
    assert_eq!(res.best_move, Some(Move::new(0, 3)));
}

#[test]
fn weights_file_changes_nothing_when_it_repeats_defaults() {
    let mut f = tempfile::NamedTempFile::new().expect("tempfile");
    write!(f, "{}", serde_json::to_string(&EvalWeights::default()).unwrap()).unwrap();
    let loaded = EvalWeights::from_json_file(f.path()).expect("load weights");
    assert_eq!(loaded, EvalWeights::default());

    let s = GameState::initial(Adjacency::Orthogonal);
    let mut a = Minimax::new(SearchLimits { max_depth: 3 }, Evaluator::Heuristic(loaded));
    let mut b = Minimax::new(SearchLimits { max_depth: 3 }, Evaluator::default());
    assert_eq!(a.search(&s, true), b.search(&s, true));
}

#[test]
fn missing_weights_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EvalWeights::from_json_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, gridsolve::Error::Io { .. }));
}

fn weights_file(json: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("tempfile");
    write!(f, "{json}").unwrap();
    f
}

#[test]
fn immediate_win_beats_estimates_under_a_tiny_scale() {
    let f = weights_file(r#"{ "scale": 1 }"#);
    let w = EvalWeights::from_json_file(f.path()).expect("scale 1 is valid");
    let s = state("XX./O.X/O.O", Player::X, Adjacency::Orthogonal);
    for depth in 1..=3u8 {
        let mut m = Minimax::new(SearchLimits { max_depth: depth }, Evaluator::Heuristic(w));
        let res = m.search(&s, true);
        assert_eq!(res.best_move, Some(Move::new(5, 2)), "depth {depth}");
        assert_eq!(res.value, 1.0);
    }
}

#[test]
fn zero_or_negative_scale_is_rejected_on_load() {
    for json in [r#"{ "scale": 0 }"#, r#"{ "scale": -5.0 }"#] {
        let f = weights_file(json);
        let err = EvalWeights::from_json_file(f.path()).unwrap_err();
        assert!(
            matches!(err, gridsolve::Error::InvalidWeight { field: "scale", .. }),
            "{json}: {err}"
        );
    }
}

#[test]
fn cutoff_values_stay_strictly_inside_the_win_bound() {
    let w = EvalWeights {
        scale: 0.01,
        ..EvalWeights::default()
    };
    for s in sample_states() {
        let mut m = Minimax::new(SearchLimits { max_depth: 2 }, Evaluator::Heuristic(w));
        let res = m.search(&s, maximizing_for(s.next));
        assert!(res.value.is_finite());
        // Either an exact game result or a clamped estimate, never in between.
        let v = res.value.abs();
        assert!(v == 1.0 || v <= gridsolve::tapatan::MAX_ESTIMATE, "{v}");
    }
}
