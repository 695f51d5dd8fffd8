pub mod board;
pub mod error;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod types;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use error::FenError;
pub use movegen::*;
pub use notation::*;
pub use perft::{perft, perft_divide};
pub use types::*;

// =============================================================================
// Engine trait: implemented by every move chooser
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The chosen move (None if there are no legal moves)
    pub best_move: Option<Move>,
    /// Score of the chosen move from White's perspective
    pub score: f64,
    /// Depth the move was searched to
    pub depth: u8,
    /// Number of nodes visited
    pub nodes: u64,
}

/// How far an engine may look ahead for one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Search depth in plies (half-moves)
    pub depth: u8,
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self { depth }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(3)
    }
}

/// Trait that all move choosers implement, so the game loop can drive a
/// searching engine and a random bot the same way.
pub trait Engine {
    /// Choose a move for the side to move in `pos`.
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult;

    /// Returns the engine's display name
    fn name(&self) -> &str;

    /// Preferred limits for `pos`. Engines with their own depth policy
    /// override this; the default ignores the position.
    fn limits_for(&self, _pos: &Position) -> SearchLimits {
        SearchLimits::default()
    }

    /// Reset per-game state
    fn new_game(&mut self) {}
}
