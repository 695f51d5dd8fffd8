//! Coordinate move notation (`e2e4`, `e7e8q`) and a plain-text board diagram.

use crate::{board::Position, movegen::legal_moves, types::*};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.letter());
    }
    s
}

/// Resolves coordinate text against the legal moves of `pos`, so the castling
/// and en-passant flags of the result are correct. A promotion written
/// without a piece letter promotes to a queen; a piece letter on a move
/// that is not a promotion is rejected.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    let txt = txt.trim();
    if !txt.is_ascii() || txt.len() < 4 || txt.len() > 5 {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt.chars().nth(4) {
        Some(c) => match PieceKind::from_letter(c)? {
            PieceKind::Pawn | PieceKind::King => return None,
            kind => Some(kind),
        },
        None => None,
    };

    legal_moves(pos).into_iter().find(|m| {
        m.from == from
            && m.to == to
            && match m.promo {
                None => promo.is_none(),
                Some(kind) => kind == promo.unwrap_or(PieceKind::Queen),
            }
    })
}

/// Eight ranks, rank 8 on top, `.` for empty squares.
pub fn board_diagram(pos: &Position) -> String {
    let mut out = String::with_capacity(200);
    for rank in (0..8u8).rev() {
        out.push((b'1' + rank) as char);
        out.push(' ');
        for file in 0..8u8 {
            let c = pos.piece_at(rank * 8 + file).map_or('.', |pc| pc.symbol());
            out.push(c);
            out.push(' ');
        }
        out.pop();
        out.push('\n');
    }
    out.push_str("  a b c d e f g h");
    out
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
