//! Static evaluation: weighted material plus piece-square bonuses.

use chess_core::{Color, PieceKind};

use crate::{pst, rules::SearchPosition};

/// Score of a position where Black has been mated. White mated is its negation.
pub const MATE_SCORE: f64 = f64::INFINITY;

pub const STALEMATE_SCORE: f64 = 0.0;

/// Material counts this many times over relative to the positional bonus.
pub const MATERIAL_WEIGHT: f64 = 1.5;

/// Material values in centipawns, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
pub const PIECE_VALUES: [i32; 6] = [100, 300, 330, 500, 900, 0];

pub fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind.idx()]
}

/// Evaluates the position from White's perspective.
///
/// - `+MATE_SCORE` when Black is checkmated, `-MATE_SCORE` when White is
/// - `0` on stalemate
/// - otherwise the sum over every piece of `1.5 * material + bonus`, added
///   for White pieces and subtracted for Black ones
///
/// The queen table is chosen from the halfmove clock on every call.
pub fn evaluate<P: SearchPosition + ?Sized>(pos: &P) -> f64 {
    if pos.is_checkmate() {
        return match pos.side_to_move() {
            Color::White => -MATE_SCORE,
            Color::Black => MATE_SCORE,
        };
    }
    if pos.is_stalemate() {
        return STALEMATE_SCORE;
    }

    let clock = pos.halfmove_clock();
    let mut score = 0.0;
    for sq in 0..64u8 {
        let Some(pc) = pos.piece_at(sq) else {
            continue;
        };
        let contribution =
            MATERIAL_WEIGHT * f64::from(piece_value(pc.kind)) + f64::from(pst::bonus(pc, sq, clock));
        match pc.color {
            Color::White => score += contribution,
            Color::Black => score -= contribution,
        }
    }
    score
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
