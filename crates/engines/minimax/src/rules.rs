//! The capability set the evaluator and search need from a rules engine.
//!
//! Search and evaluation are written against [`SearchPosition`] only, so the
//! board representation behind it can be replaced without touching them.

use chess_core::{legal_moves_into, Color, Move, Piece, Position, Undo};

pub trait SearchPosition {
    /// State needed to take back a move played with [`make_move`](Self::make_move).
    type Undo;

    fn side_to_move(&self) -> Color;

    /// Legal moves for the side to move, in the rules engine's stable order.
    fn legal_moves(&mut self) -> Vec<Move>;

    /// Plays a move taken from [`legal_moves`](Self::legal_moves).
    fn make_move(&mut self, mv: Move) -> Self::Undo;

    /// Takes back the most recent move. Apply/undo must nest strictly.
    fn unmake_move(&mut self, mv: Move, undo: Self::Undo);

    fn is_checkmate(&self) -> bool;
    fn is_stalemate(&self) -> bool;
    fn is_game_over(&self) -> bool;

    fn piece_at(&self, sq: u8) -> Option<Piece>;

    /// Plies since the last capture or pawn move.
    fn halfmove_clock(&self) -> u32;

    /// Hash that is equal for equal positions.
    fn key(&self) -> u64;

    fn piece_count(&self) -> usize {
        (0..64u8).filter(|&sq| self.piece_at(sq).is_some()).count()
    }
}

impl SearchPosition for Position {
    type Undo = Undo;

    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn legal_moves(&mut self) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        legal_moves_into(self, &mut out);
        out
    }

    fn make_move(&mut self, mv: Move) -> Undo {
        Position::make_move(self, mv)
    }

    fn unmake_move(&mut self, mv: Move, undo: Undo) {
        Position::unmake_move(self, mv, undo)
    }

    fn is_checkmate(&self) -> bool {
        Position::is_checkmate(self)
    }

    fn is_stalemate(&self) -> bool {
        Position::is_stalemate(self)
    }

    fn is_game_over(&self) -> bool {
        Position::is_game_over(self)
    }

    fn piece_at(&self, sq: u8) -> Option<Piece> {
        Position::piece_at(self, sq)
    }

    fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    fn key(&self) -> u64 {
        self.zobrist_key()
    }

    fn piece_count(&self) -> usize {
        Position::piece_count(self)
    }
}
