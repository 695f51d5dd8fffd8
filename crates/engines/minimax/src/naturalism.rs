//! Human-like oversight of long sliding moves.
//!
//! A player scanning the board tends to miss a bishop sweeping across six
//! squares more often than a one-square rook shuffle. The search drops moves
//! this filter flags, so the engine sometimes "overlooks" them the same way.

use chess_core::{Move, PieceKind};
use rand::Rng;

use crate::rules::SearchPosition;

/// Keep probability by diagonal distance (index 0 unused).
pub const DIAGONAL_KEEP: [f64; 8] = [0.0, 1.0, 1.0, 0.99, 0.9, 0.85, 0.7, 0.6];

/// Keep probability by straight-line distance (index 0 unused).
pub const STRAIGHT_KEEP: [f64; 8] = [0.0, 1.0, 1.0, 0.99, 0.95, 0.9, 0.85, 0.8];

/// Probability that `mv` is kept, or `None` for pieces the filter never
/// touches (pawns, knights, kings) and for a missing mover.
pub fn keep_probability<P: SearchPosition + ?Sized>(mv: Move, pos: &P) -> Option<f64> {
    let piece = pos.piece_at(mv.from)?;
    let (df, dr) = (mv.file_diff(), mv.rank_diff());
    let (distance, table) = match piece.kind {
        PieceKind::Bishop => (dr, &DIAGONAL_KEEP),
        PieceKind::Rook => (df.max(dr), &STRAIGHT_KEEP),
        PieceKind::Queen if df > 0 && dr > 0 => (dr, &DIAGONAL_KEEP),
        PieceKind::Queen => (df.max(dr), &STRAIGHT_KEEP),
        PieceKind::Pawn | PieceKind::Knight | PieceKind::King => return None,
    };
    table.get(distance as usize).copied().filter(|_| distance > 0)
}

/// True when a human would likely miss `mv`. Consumes one draw from `rng`
/// for every bishop, rook or queen move, none otherwise.
pub fn is_long_move<P, R>(mv: Move, pos: &P, rng: &mut R) -> bool
where
    P: SearchPosition + ?Sized,
    R: Rng + ?Sized,
{
    match keep_probability(mv, pos) {
        Some(keep) => rng.gen::<f64>() > keep,
        None => false,
    }
}

#[cfg(test)]
#[path = "naturalism_tests.rs"]
mod naturalism_tests;
