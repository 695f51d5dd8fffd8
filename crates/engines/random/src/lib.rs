//! Random Move Chess Engine
//!
//! Picks a legal move uniformly at random. The console's "bot" opponent, and
//! a baseline any searching engine should beat easily.

use chess_core::{legal_moves_into, Engine, Move, Position, SearchLimits, SearchResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

#[cfg(test)]
mod lib_tests;

/// A chess engine that plays random legal moves.
///
/// With `avoid_mate_in_one` set, moves that let the opponent mate on the
/// very next ply are discarded first, unless every move does.
#[derive(Debug, Clone)]
pub struct RandomEngine<R = StdRng> {
    rng: R,
    avoid_mate_in_one: bool,
    nodes: u64,
}

impl RandomEngine<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            avoid_mate_in_one: true,
            nodes: 0,
        }
    }

    pub fn avoid_mate_in_one(mut self, enabled: bool) -> Self {
        self.avoid_mate_in_one = enabled;
        self
    }

    /// Moves after which the opponent has no immediate checkmate.
    fn safe_moves(&mut self, pos: &mut Position, moves: &[Move]) -> Vec<Move> {
        let mut replies = Vec::with_capacity(64);
        let mut safe = Vec::with_capacity(moves.len());
        for &mv in moves {
            let undo = pos.make_move(mv);
            legal_moves_into(pos, &mut replies);
            let allows_mate = replies.iter().any(|&reply| {
                let reply_undo = pos.make_move(reply);
                self.nodes += 1;
                let mate = pos.is_checkmate();
                pos.unmake_move(reply, reply_undo);
                mate
            });
            pos.unmake_move(mv, undo);
            if !allows_mate {
                safe.push(mv);
            }
        }
        safe
    }
}

impl<R: Rng> Engine for RandomEngine<R> {
    fn search(&mut self, pos: &Position, _limits: SearchLimits) -> SearchResult {
        self.nodes = 1;

        let mut pos_copy = pos.clone();
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(&mut pos_copy, &mut moves);

        if self.avoid_mate_in_one && !moves.is_empty() {
            let safe = self.safe_moves(&mut pos_copy, &moves);
            if safe.is_empty() {
                debug!("every move allows mate in one, choosing among all of them");
            } else {
                moves = safe;
            }
        }

        let best_move = moves.choose(&mut self.rng).copied();

        SearchResult {
            best_move,
            score: 0.0,
            depth: 1,
            nodes: self.nodes,
        }
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
