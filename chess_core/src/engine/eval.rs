use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::Board;
use crate::logic::eval_constants::{
    PST_BISHOP, PST_KING, PST_KNIGHT, PST_PAWN, PST_QUEEN, PST_ROOK,
};
use crate::logic::piece::{Alliance, Piece, PieceType};
use std::sync::Arc;

pub struct SimpleEvaluator {
    config: Arc<EngineConfig>,
}

impl SimpleEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    /// Score from `alliance`'s point of view.
    #[must_use]
    pub fn score_for(&self, board: &Board, alliance: Alliance) -> i32 {
        self.evaluate(board, 0) * alliance.score_sign()
    }

    fn side_score(&self, board: &Board, alliance: Alliance, depth: u8) -> i32 {
        let material: i32 = board
            .active_pieces(alliance)
            .iter()
            .map(|&piece| self.config.piece_value(piece.piece_type) + square_bonus(piece))
            .sum();

        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let mobility =
            board.pseudo_legal_moves(alliance).len() as i32 * self.config.mobility_weight;

        let opponent = board.player(alliance.opposite());
        let check = if opponent.is_in_check() {
            self.config.check_bonus
        } else {
            0
        };
        let checkmate = if opponent.is_in_checkmate() {
            self.config.checkmate_bonus * self.depth_bonus(depth)
        } else {
            0
        };

        material + mobility + check + checkmate
    }

    fn depth_bonus(&self, depth: u8) -> i32 {
        if depth == 0 {
            1
        } else {
            self.config.depth_bonus * i32::from(depth)
        }
    }
}

impl Evaluator for SimpleEvaluator {
    fn evaluate(&self, board: &Board, depth: u8) -> i32 {
        self.side_score(board, Alliance::White, depth)
            - self.side_score(board, Alliance::Black, depth)
    }
}

fn square_bonus(piece: Piece) -> i32 {
    let square = match piece.alliance {
        Alliance::White => piece.coordinate,
        Alliance::Black => piece.coordinate.mirrored(),
    };
    let table = match piece.piece_type {
        PieceType::Pawn => &PST_PAWN,
        PieceType::Knight => &PST_KNIGHT,
        PieceType::Bishop => &PST_BISHOP,
        PieceType::Rook => &PST_ROOK,
        PieceType::Queen => &PST_QUEEN,
        PieceType::King => &PST_KING,
    };
    table.get(square.index()).copied().unwrap_or(0)
}
