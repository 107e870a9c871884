use crate::logic::board::Board;
use crate::logic::coordinate::Coordinate;
use crate::logic::moves::{Move, MoveFactory};
use crate::logic::piece::{Alliance, PieceType};
use crate::logic::player::{MoveStatus, MoveTransition};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    OutOfBounds,
    InvalidPromotion,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "coordinate is off the board"),
            Self::InvalidPromotion => write!(f, "invalid promotion choice"),
        }
    }
}

impl std::error::Error for MoveError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    /// The side to move is in check but has an escape.
    Check,
    Checkmate(Alliance), // Winner
    Stalemate,
}

impl GameStatus {
    #[must_use]
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Checkmate(_) | Self::Stalemate)
    }
}

/// Validates a raw request and forwards it to the side to move.
///
/// Bad input (off-board squares, a promotion choice that cannot apply) is an
/// `Err`. A well-formed request that the rules refuse comes back as a failed
/// [`MoveTransition`].
pub fn attempt_move(
    board: &Board,
    from: (i32, i32),
    to: (i32, i32),
    promotion: Option<PieceType>,
) -> Result<MoveTransition, MoveError> {
    let from = Coordinate::new(from.0, from.1).ok_or(MoveError::OutOfBounds)?;
    let to = Coordinate::new(to.0, to.1).ok_or(MoveError::OutOfBounds)?;

    let Some(default_move) = MoveFactory::create_move(board, from, to) else {
        log::debug!("no move from {from} to {to}");
        return Ok(MoveTransition::failed(None, MoveStatus::IllegalMove));
    };

    let chosen = match promotion {
        None => default_move,
        Some(upgrade) => {
            if !default_move.is_promotion() || !upgrade.is_promotion_choice() {
                return Err(MoveError::InvalidPromotion);
            }
            MoveFactory::promotion_moves(board, from, to)
                .into_iter()
                .find(|mv| mv.upgrade() == Some(upgrade))
                .ok_or(MoveError::InvalidPromotion)?
        }
    };

    Ok(board.current_player().make_move(&chosen))
}

/// Destinations of the side to move's legal moves from `from`, deduplicated
/// across promotion variants.
#[must_use]
pub fn legal_destinations(board: &Board, from: Coordinate) -> Vec<Coordinate> {
    let mut destinations: Vec<Coordinate> = Vec::new();
    for mv in board.current_player().legal_moves() {
        if mv.source() == from && !destinations.contains(&mv.destination) {
            destinations.push(mv.destination);
        }
    }
    destinations
}

#[must_use]
pub fn game_status(board: &Board) -> GameStatus {
    let player = board.current_player();
    match (player.is_in_check(), player.has_escape_moves()) {
        (true, false) => GameStatus::Checkmate(player.alliance().opposite()),
        (false, false) => GameStatus::Stalemate,
        (true, true) => GameStatus::Check,
        (false, true) => GameStatus::Playing,
    }
}

/// Move text with `+` or `#` appended from the successor's point of view.
#[must_use]
pub fn notation_with_status(mv: &Move, successor: &Board) -> String {
    match game_status(successor) {
        GameStatus::Checkmate(_) => format!("{mv}#"),
        GameStatus::Check => format!("{mv}+"),
        GameStatus::Playing | GameStatus::Stalemate => mv.to_string(),
    }
}
