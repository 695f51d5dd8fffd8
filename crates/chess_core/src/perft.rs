//! Move-generation verification by leaf counting.

use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Number of leaves of the legal move tree `depth` plies below `pos`.
/// `pos` is back in its original state on return.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    let mut buffers = vec![Vec::with_capacity(64); depth as usize];
    count(pos, &mut buffers)
}

/// Per root move leaf counts, in generation order. Their sum is
/// `perft(pos, depth)`; comparing against another generator move by move
/// narrows down where two trees diverge.
pub fn perft_divide(pos: &mut Position, depth: u8) -> Vec<(Move, u64)> {
    let mut roots = Vec::with_capacity(64);
    legal_moves_into(pos, &mut roots);
    let mut buffers = vec![Vec::with_capacity(64); depth.saturating_sub(1) as usize];

    roots
        .into_iter()
        .map(|mv| {
            let undo = pos.make_move(mv);
            let nodes = count(pos, &mut buffers);
            pos.unmake_move(mv, undo);
            (mv, nodes)
        })
        .collect()
}

/// One move buffer per remaining ply, so nothing is allocated while walking.
fn count(pos: &mut Position, buffers: &mut [Vec<Move>]) -> u64 {
    let Some((moves, deeper)) = buffers.split_first_mut() else {
        return 1;
    };
    legal_moves_into(pos, moves);
    if deeper.is_empty() {
        return moves.len() as u64;
    }

    let mut leaves = 0;
    for &mv in moves.iter() {
        let undo = pos.make_move(mv);
        leaves += count(pos, deeper);
        pos.unmake_move(mv, undo);
    }
    leaves
}
