use super::*;
use chess_core::legal_moves;
use std::collections::HashSet;

fn fen(s: &str) -> Position {
    Position::from_fen(s).unwrap()
}

#[test]
fn random_engine_returns_legal_move() {
    let mut engine = RandomEngine::seeded(1);
    let pos = Position::startpos();
    let limits = SearchLimits::depth(1);

    let result = engine.search(&pos, limits);

    assert!(result.best_move.is_some());
    assert!(legal_moves(&pos).contains(&result.best_move.unwrap()));
}

#[test]
fn random_engine_handles_checkmate() {
    let mut engine = RandomEngine::seeded(1);
    let pos = fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1");

    let result = engine.search(&pos, SearchLimits::depth(1));

    assert!(result.best_move.is_none());
}

#[test]
fn random_engine_handles_stalemate() {
    let mut engine = RandomEngine::seeded(1);
    let pos = fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1");

    let result = engine.search(&pos, SearchLimits::depth(1));

    assert!(result.best_move.is_none());
}

#[test]
fn random_engine_spreads_its_choices() {
    let mut engine = RandomEngine::seeded(2).avoid_mate_in_one(false);
    let pos = Position::startpos();

    let seen: HashSet<_> = (0..400)
        .filter_map(|_| engine.search(&pos, SearchLimits::depth(1)).best_move)
        .collect();

    assert_eq!(seen.len(), 20);
}

#[test]
fn random_engine_avoids_allowing_mate() {
    // After 1.f3 e5, only 2.g4 lets Black play Qh4#
    let pos = fen("rnbqkbnr/pppp1ppp/8/4p3/8/5P2/PPPPP1PP/RNBQKBNR w KQkq - 0 2");
    let blunder = chess_core::parse_uci_move(&pos, "g2g4").unwrap();
    let mut engine = RandomEngine::seeded(3);

    for _ in 0..300 {
        let mv = engine.search(&pos, SearchLimits::depth(1)).best_move.unwrap();
        assert_ne!(mv, blunder);
    }
}

#[test]
fn random_engine_without_filter_can_blunder() {
    let pos = fen("rnbqkbnr/pppp1ppp/8/4p3/8/5P2/PPPPP1PP/RNBQKBNR w KQkq - 0 2");
    let blunder = chess_core::parse_uci_move(&pos, "g2g4").unwrap();
    let mut engine = RandomEngine::seeded(3).avoid_mate_in_one(false);

    let hit = (0..2_000).any(|_| engine.search(&pos, SearchLimits::depth(1)).best_move == Some(blunder));
    assert!(hit);
}

#[test]
fn random_engine_falls_back_when_every_move_loses() {
    // Ka2 is forced and Ra8 mates
    let pos = fen("7r/8/8/8/8/8/2k5/K7 w - - 0 1");
    let mut engine = RandomEngine::seeded(4);

    let result = engine.search(&pos, SearchLimits::depth(1));

    assert_eq!(result.best_move, chess_core::parse_uci_move(&pos, "a1a2"));
}
