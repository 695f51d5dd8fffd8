//! Piece-square tables.
//!
//! Tables are written for White and indexed by square, a1 = 0 .. h8 = 63, so
//! each source row below is one rank starting from rank 1. A Black piece on
//! square `s` reads the entry of the vertically mirrored square.

use chess_core::{mirror, Color, Piece, PieceKind};

/// Halfmove clock up to which the queen uses [`QUEEN_OPENING_TABLE`].
pub const QUEEN_OPENING_CLOCK: u32 = 10;

#[rustfmt::skip]
pub const PAWN_TABLE: [i32; 64] = [
     0,   0,   0,    0,    0,   0,   0,   0,
    50,  50,  50,   50,   50,  50,  50,  50,
    10,  10,  20,   30,   30,  20,  10,  10,
     5,   5,  10,   25,   25,  10,   5,   5,
     0,   0,   0,   20,   20,   0,   0,   0,
     5,  20, -10,    0,    0, -10,  20,   5,
     5,  10,  10, -100, -100,  10,  10,   5,
     0,   0,   0,    0,    0,   0,   0,   0,
];

#[rustfmt::skip]
pub const KNIGHT_TABLE: [i32; 64] = [
    -50, -10,  -5, -10, -10,  -5, -10, -50,
    -10, -10,   0,   5,   5,   0, -10, -10,
    -10,   5,  25,  20,  20,  25,   5, -10,
    -10,   0,  10, -20, -20,  10,   0, -10,
    -10,   5,   5, -20, -20,   5,   5, -10,
    -10,   0,  25,   0,   0,  20,   0, -10,
    -10, -10,   0,   0,   0,   0, -10, -10,
    -50, -10,  -5, -10, -10,  -5, -10, -50,
];

#[rustfmt::skip]
pub const BISHOP_TABLE: [i32; 64] = [
    -30, -10, -10, -10, -10, -10, -10, -30,
    -10,   0,   0,   0,   0,   0,   0,   0,
    -10,   0,   0,   0,   0,   0,   0,   0,
    -10,   5,   0,  10,  10,   0,   5, -10,
    -10,   0,  20,  10,  10,  20,   0, -10,
      4,   0,   0,   0,   0,   0,   0,   4,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -30, -10, -20, -10, -10, -20, -10, -30,
];

#[rustfmt::skip]
pub const ROOK_TABLE: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
    10,  20,  20,  20,  20,  20,  20,  10,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
     0,   0,   0,  10,  10,   3,   0,   0,
];

/// Queen while few quiet plies have passed: everything off the central
/// d/e band of the first two ranks is heavily penalized.
#[rustfmt::skip]
pub const QUEEN_OPENING_TABLE: [i32; 64] = [
    -100, -100, -100,   50,   50, -100, -100, -100,
    -100, -100, -100,  100,  100, -100, -100, -100,
    -100, -100, -100, -100, -100, -100, -100, -100,
    -100, -100, -100, -100, -100, -100, -100, -100,
    -100, -100, -100, -100, -100, -100, -100, -100,
    -100, -100, -100, -100, -100, -100, -100, -100,
    -100, -100, -100, -100, -100, -100, -100, -100,
    -100, -100, -100, -100, -100, -100, -100, -100,
];

#[rustfmt::skip]
pub const QUEEN_TABLE: [i32; 64] = [
    -20, -10, -10, -50, -50, -10, -10, -20,
    -10,   0,   0, -30, -30,   0,   0, -10,
    -10,  10,  10,   0,   0,  10,  10, -10,
     -5,  10,  10,  30,  30,  10,  10,  -5,
     -5,  10,  10,  30,  30,  10,  10,  -5,
     20,  40,  40,  20,  20,  40,  40,  20,
     20,  40,  40,  40,  40,  40,  40,  20,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
pub const KING_TABLE: [i32; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
     20,  20,   0,   0,   0,   0,  20,  20,
     20,  30,  10,   0,   0,  10,  30,  20,
];

/// The table for `kind`; the queen's depends on the halfmove clock.
pub fn table(kind: PieceKind, halfmove_clock: u32) -> &'static [i32; 64] {
    match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen if halfmove_clock <= QUEEN_OPENING_CLOCK => &QUEEN_OPENING_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => &KING_TABLE,
    }
}

/// Positional bonus of `piece` standing on `sq`, before the color sign is applied.
pub fn bonus(piece: Piece, sq: u8, halfmove_clock: u32) -> i32 {
    let idx = match piece.color {
        Color::White => sq,
        Color::Black => mirror(sq),
    };
    table(piece.kind, halfmove_clock)[idx as usize]
}
