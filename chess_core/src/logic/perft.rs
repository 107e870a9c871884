use crate::logic::board::Board;
use crate::logic::moves::Move;
use rayon::prelude::*;

/// Depth from which the first ply is split across threads.
const PARALLEL_DEPTH: u8 = 4;

/// Counts the leaf positions reachable in exactly `depth` legal plies.
#[must_use]
pub fn perft(board: &Board, depth: u8) -> u64 {
    let moves = board.current_player().legal_moves();
    match depth {
        0 => 1,
        1 => moves.len() as u64,
        _ if depth >= PARALLEL_DEPTH => moves
            .par_iter()
            .map(|mv| perft(&mv.apply(board), depth - 1))
            .sum(),
        _ => moves
            .iter()
            .map(|mv| perft(&mv.apply(board), depth - 1))
            .sum(),
    }
}

/// Leaf counts per root move, in generation order.
#[must_use]
pub fn perft_divide(board: &Board, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    board
        .current_player()
        .legal_moves()
        .iter()
        .map(|mv| (*mv, perft(&mv.apply(board), depth - 1)))
        .collect()
}
