//! Zobrist hashing.
//!
//! A position's key is the XOR of one random value per (piece, square), one
//! for Black to move, one per castling right still held and one per
//! en-passant file. Equal positions therefore always hash equal, which the
//! search uses to derive reproducible per-leaf noise.

use crate::{
    board::Position,
    types::{Color, Piece},
};

const PIECE_KEYS: usize = 2 * 6 * 64;
const SIDE_KEY: usize = PIECE_KEYS;
const CASTLING_KEYS: usize = SIDE_KEY + 1;
const EP_KEYS: usize = CASTLING_KEYS + 4;
const KEY_COUNT: usize = EP_KEYS + 8;

/// All keys in one flat table: pieces by (color, kind, square), then the
/// side-to-move key, the four castling keys (wk, wq, bk, bq) and the eight
/// en-passant file keys.
pub static KEYS: [u64; KEY_COUNT] = fill_keys(0x5EED_C0DE_2024_0001);

/// Fixed-seed splitmix64 stream, so keys are identical across runs and builds.
const fn fill_keys(mut state: u64) -> [u64; KEY_COUNT] {
    let mut keys = [0u64; KEY_COUNT];
    let mut i = 0;
    while i < KEY_COUNT {
        state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        keys[i] = z ^ (z >> 31);
        i += 1;
    }
    keys
}

#[inline]
pub fn piece_key(piece: Piece, sq: u8) -> u64 {
    KEYS[(piece.color.idx() * 6 + piece.kind.idx()) * 64 + sq as usize]
}

#[inline]
pub fn side_key() -> u64 {
    KEYS[SIDE_KEY]
}

/// `right`: 0 = white king side, 1 = white queen side, 2 = black king side,
/// 3 = black queen side.
#[inline]
pub fn castling_key(right: usize) -> u64 {
    KEYS[CASTLING_KEYS + right]
}

#[inline]
pub fn ep_key(file: u8) -> u64 {
    KEYS[EP_KEYS + file as usize]
}

/// Key of `pos`, computed from scratch.
pub fn position_key(pos: &Position) -> u64 {
    let mut key = pos
        .pieces()
        .fold(0u64, |key, (sq, pc)| key ^ piece_key(pc, sq));
    if pos.side_to_move == Color::Black {
        key ^= side_key();
    }
    for (right, held) in pos.castling.as_array().into_iter().enumerate() {
        if held {
            key ^= castling_key(right);
        }
    }
    if let Some(ep) = pos.en_passant {
        key ^= ep_key(ep % 8);
    }
    key
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
