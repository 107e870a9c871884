use crate::logic::board::Board;
use crate::logic::moves::Move;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod eval;
pub mod search;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
    pub time_ms: u64,
}

/// Best root move with its backed-up score (positive favours White).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub best_move: Move,
    pub score: i32,
    pub stats: SearchStats,
}

pub trait Evaluator {
    /// Static score from White's point of view. `depth` scales the checkmate
    /// bonus for callers scoring a finished line. The search passes 0, since
    /// it scores positions without legal moves through its own mate scores.
    fn evaluate(&self, board: &Board, depth: u8) -> i32;
}

pub trait Searcher {
    /// Best move for the side to move, or `None` when the game is over.
    fn execute(&mut self, board: &Board) -> Option<Move>;
}
