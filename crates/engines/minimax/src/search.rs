//! Depth-limited minimax with alpha-beta pruning.
//!
//! White maximizes and Black minimizes; scores are always from White's
//! perspective, so there is no negation between plies. Leaves get noise from
//! [`NoiseModel`] and inner nodes drop moves the naturalism filter flags.

use chess_core::{Color, Move};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::{eval::evaluate, naturalism::is_long_move, noise::NoiseModel, rules::SearchPosition};

/// Knobs that change how the tree is walked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Drop moves a human would likely overlook at inner nodes.
    pub naturalism_filter: bool,
    /// Stop scanning siblings once `beta <= alpha`.
    pub pruning: bool,
    pub noise: NoiseModel,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            naturalism_filter: true,
            pruning: true,
            noise: NoiseModel::default(),
        }
    }
}

impl SearchOptions {
    /// Full-width, noiseless search: the evaluator alone decides.
    pub fn exact() -> Self {
        Self {
            naturalism_filter: false,
            pruning: true,
            noise: NoiseModel::Off,
        }
    }
}

/// Result of [`choose_move`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// None only when the root has no legal moves
    pub best_move: Option<Move>,
    /// Minimax value of `best_move`, from White's perspective
    pub score: f64,
    /// Number of minimax calls made below the root
    pub nodes: u64,
    /// True when no root move beat the initial bound and a random legal
    /// move was picked instead
    pub fallback: bool,
}

/// Picks a move for `engine_color` by searching `depth` plies.
///
/// Every root move is searched with a fresh `(-inf, +inf)` window. White
/// keeps the strictly highest score and Black the strictly lowest, so ties
/// go to the move generated first. A depth of 0 is searched as 1.
///
/// `pos` is mutated during the search and restored before returning.
pub fn choose_move<P, R>(
    pos: &mut P,
    engine_color: Color,
    depth: u8,
    options: &SearchOptions,
    rng: &mut R,
) -> SearchOutcome
where
    P: SearchPosition + ?Sized,
    R: Rng + ?Sized,
{
    let depth = depth.max(1);
    let moves = pos.legal_moves();
    if moves.is_empty() {
        return SearchOutcome {
            best_move: None,
            score: evaluate(&*pos),
            nodes: 0,
            fallback: false,
        };
    }

    let maximizing_child = engine_color == Color::Black;
    let mut best_score = match engine_color {
        Color::White => f64::NEG_INFINITY,
        Color::Black => f64::INFINITY,
    };
    let mut best_move = None;

    let mut searcher = Searcher {
        options,
        rng: &mut *rng,
        nodes: 0,
    };

    for &mv in &moves {
        let undo = pos.make_move(mv);
        let score = searcher.minimax(
            pos,
            depth - 1,
            f64::NEG_INFINITY,
            f64::INFINITY,
            maximizing_child,
        );
        pos.unmake_move(mv, undo);
        debug!(%mv, score, "root move");

        let better = match engine_color {
            Color::White => score > best_score,
            Color::Black => score < best_score,
        };
        if better {
            best_score = score;
            best_move = Some(mv);
        }
    }

    let nodes = searcher.nodes;
    match best_move {
        Some(mv) => SearchOutcome {
            best_move: Some(mv),
            score: best_score,
            nodes,
            fallback: false,
        },
        None => {
            let mv = moves.choose(rng).copied();
            warn!(
                color = %engine_color,
                score = best_score,
                "every move scored the losing bound, playing a random one"
            );
            SearchOutcome {
                best_move: mv,
                score: best_score,
                nodes,
                fallback: true,
            }
        }
    }
}

struct Searcher<'a, R: ?Sized> {
    options: &'a SearchOptions,
    rng: &'a mut R,
    nodes: u64,
}

impl<R: Rng + ?Sized> Searcher<'_, R> {
    fn minimax<P: SearchPosition + ?Sized>(
        &mut self,
        pos: &mut P,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> f64 {
        self.nodes += 1;

        if depth == 0 || pos.is_game_over() {
            return evaluate(&*pos) + self.options.noise.sample(pos.key(), &mut *self.rng);
        }

        let candidates = self.candidates(pos);

        if maximizing {
            let mut best = f64::NEG_INFINITY;
            for mv in candidates {
                let undo = pos.make_move(mv);
                let score = self.minimax(pos, depth - 1, alpha, beta, false);
                pos.unmake_move(mv, undo);

                best = best.max(score);
                alpha = alpha.max(score);
                if self.options.pruning && beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = f64::INFINITY;
            for mv in candidates {
                let undo = pos.make_move(mv);
                let score = self.minimax(pos, depth - 1, alpha, beta, true);
                pos.unmake_move(mv, undo);

                best = best.min(score);
                beta = beta.min(score);
                if self.options.pruning && beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// Legal moves minus the ones the naturalism filter flags. Never empty
    /// while the position has a legal move.
    fn candidates<P: SearchPosition + ?Sized>(&mut self, pos: &mut P) -> Vec<Move> {
        let legal = pos.legal_moves();
        if !self.options.naturalism_filter {
            return legal;
        }

        let rng = &mut *self.rng;
        let natural: Vec<Move> = legal
            .iter()
            .copied()
            .filter(|&mv| !is_long_move(mv, &*pos, &mut *rng))
            .collect();
        if natural.is_empty() {
            legal
        } else {
            natural
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
