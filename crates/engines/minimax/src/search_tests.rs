use super::*;
use crate::eval::MATE_SCORE;
use chess_core::{parse_uci_move, Position};
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

fn uci(p: &Position, txt: &str) -> Move {
    parse_uci_move(p, txt).unwrap()
}

fn keyed(seed: u64, pruning: bool) -> SearchOptions {
    SearchOptions {
        naturalism_filter: false,
        pruning,
        noise: NoiseModel::Keyed { range: 5.0, seed },
    }
}

#[test]
fn test_white_finds_back_rank_mate() {
    let mut p = pos("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1");
    let expected = uci(&p, "e1e8");
    let mut rng = StdRng::seed_from_u64(1);

    for depth in 1..=2 {
        let out = choose_move(&mut p, Color::White, depth, &SearchOptions::exact(), &mut rng);
        assert_eq!(out.best_move, Some(expected));
        assert_eq!(out.score, MATE_SCORE);
        assert!(!out.fallback);
    }
}

#[test]
fn test_black_finds_back_rank_mate() {
    let mut p = pos("4q1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1");
    let expected = uci(&p, "e8e1");
    let mut rng = StdRng::seed_from_u64(1);

    let out = choose_move(&mut p, Color::Black, 2, &SearchOptions::exact(), &mut rng);
    assert_eq!(out.best_move, Some(expected));
    assert_eq!(out.score, -MATE_SCORE);
}

#[test]
fn test_mate_survives_noise_and_filter() {
    // Root moves are never filtered and noise cannot pull a mate below +inf
    let mut p = pos("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1");
    let expected = uci(&p, "e1e8");
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let out = choose_move(&mut p, Color::White, 1, &SearchOptions::default(), &mut rng);
        assert_eq!(out.best_move, Some(expected));
    }
}

#[test]
fn test_no_legal_moves_returns_none() {
    let mut p = pos("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    let mut rng = StdRng::seed_from_u64(1);
    let out = choose_move(&mut p, Color::White, 3, &SearchOptions::default(), &mut rng);
    assert_eq!(out.best_move, None);
    assert_eq!(out.nodes, 0);
    assert!(!out.fallback);
}

#[test]
fn test_forced_loss_falls_back_to_a_legal_move() {
    // Ka2 is the only move and Ra8 mates
    let mut p = pos("7r/8/8/8/8/8/2k5/K7 w - - 0 1");
    let only = uci(&p, "a1a2");
    let mut rng = StdRng::seed_from_u64(5);

    let out = choose_move(&mut p, Color::White, 2, &SearchOptions::exact(), &mut rng);
    assert!(out.fallback);
    assert_eq!(out.best_move, Some(only));
    assert_eq!(out.score, -MATE_SCORE);
}

#[test]
fn test_ties_keep_first_generated_move() {
    // Bare kings: f1 and f2 share the best king-table entry
    let mut p = pos("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    let scores: Vec<(Move, f64)> = p
        .legal_moves()
        .into_iter()
        .map(|mv| {
            let mut child = p.clone();
            child.make_move(mv);
            (mv, evaluate(&child))
        })
        .collect();
    let top = scores.iter().map(|&(_, s)| s).fold(f64::NEG_INFINITY, f64::max);
    let tied: Vec<Move> = scores.iter().filter(|&&(_, s)| s == top).map(|&(mv, _)| mv).collect();
    assert!(tied.len() > 1);

    let mut rng = StdRng::seed_from_u64(1);
    let out = choose_move(&mut p, Color::White, 1, &SearchOptions::exact(), &mut rng);
    assert_eq!(out.best_move, Some(tied[0]));
}

#[test]
fn test_depth_zero_searches_one_ply() {
    let mut p = Position::startpos();
    let mut rng = StdRng::seed_from_u64(1);

    let out = choose_move(&mut p, Color::White, 0, &SearchOptions::exact(), &mut rng);
    assert!(out.best_move.is_some());
    assert_eq!(out.nodes, 20);
}

#[test]
fn test_search_restores_position() {
    let fens = [
        chess_core::START_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ];
    for fen in fens {
        let mut p = pos(fen);
        let before = p.clone();
        let color = p.side_to_move;
        let mut rng = StdRng::seed_from_u64(7);
        choose_move(&mut p, color, 2, &SearchOptions::default(), &mut rng);
        assert_eq!(p, before, "{fen}");
    }
}

#[test]
fn test_pruning_does_not_change_the_choice() {
    let cases = [
        (chess_core::START_FEN, 3),
        ("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3", 2),
        ("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", 2),
        ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 3),
    ];
    for (fen, depth) in cases {
        for seed in [11, 12] {
            let mut p = pos(fen);
            let color = p.side_to_move;
            let mut rng = StdRng::seed_from_u64(0);

            let pruned = choose_move(&mut p, color, depth, &keyed(seed, true), &mut rng);
            let full = choose_move(&mut p, color, depth, &keyed(seed, false), &mut rng);

            assert_eq!(pruned.best_move, full.best_move, "{fen}");
            assert_eq!(pruned.score, full.score, "{fen}");
            assert!(pruned.nodes <= full.nodes);
        }
    }
}

#[test]
fn test_pruning_visits_fewer_nodes() {
    let mut p = Position::startpos();
    let mut rng = StdRng::seed_from_u64(0);
    let pruned = choose_move(&mut p, Color::White, 3, &keyed(1, true), &mut rng);
    let full = choose_move(&mut p, Color::White, 3, &keyed(1, false), &mut rng);
    assert!(pruned.nodes < full.nodes);
    // 20 + 400 + 8902 calls below the root
    assert_eq!(full.nodes, 9322);
}

#[test]
fn test_same_seed_same_choice() {
    let run = |seed| {
        let mut p = Position::startpos();
        let mut rng = StdRng::seed_from_u64(seed);
        choose_move(&mut p, Color::White, 2, &SearchOptions::default(), &mut rng)
    };
    assert_eq!(run(99), run(99));
}

#[test]
fn test_filter_drops_long_slides() {
    // An rng pinned near 1.0 flags every move whose keep probability is below 1
    let mut p = pos("4k3/8/8/8/8/8/8/K6R w - - 0 1");
    let options = SearchOptions::default();
    let mut rng = StepRng::new(u64::MAX, 0);
    let mut searcher = Searcher {
        options: &options,
        rng: &mut rng,
        nodes: 0,
    };

    let candidates = searcher.candidates(&mut p);
    let mut names: Vec<String> = candidates.iter().map(|mv| mv.to_string()).collect();
    names.sort();
    assert_eq!(
        names,
        ["a1a2", "a1b1", "a1b2", "h1f1", "h1g1", "h1h2", "h1h3"]
    );
}

#[test]
fn test_filter_off_keeps_every_move() {
    let mut p = pos("4k3/8/8/8/8/8/8/K6R w - - 0 1");
    let options = SearchOptions::exact();
    let mut rng = StepRng::new(u64::MAX, 0);
    let mut searcher = Searcher {
        options: &options,
        rng: &mut rng,
        nodes: 0,
    };
    assert_eq!(searcher.candidates(&mut p).len(), 16);
}
