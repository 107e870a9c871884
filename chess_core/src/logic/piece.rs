use crate::logic::coordinate::{Coordinate, BOARD_HEIGHT};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alliance {
    White,
    Black,
}

impl Alliance {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Rank delta of a pawn step. White starts at the bottom and moves up.
    #[must_use]
    pub const fn direction(self) -> i32 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    #[must_use]
    pub const fn opposite_direction(self) -> i32 {
        -self.direction()
    }

    #[must_use]
    pub const fn is_white(self) -> bool {
        matches!(self, Self::White)
    }

    #[must_use]
    pub const fn pawn_start_rank(self) -> i32 {
        match self {
            Self::White => BOARD_HEIGHT - 2,
            Self::Black => 1,
        }
    }

    #[must_use]
    pub const fn is_pawn_start_rank(self, coordinate: Coordinate) -> bool {
        coordinate.rank() == self.pawn_start_rank()
    }

    #[must_use]
    pub const fn is_pawn_promotion_rank(self, coordinate: Coordinate) -> bool {
        match self {
            Self::White => coordinate.rank() == 0,
            Self::Black => coordinate.rank() == BOARD_HEIGHT - 1,
        }
    }

    /// Sign applied to scores so that positive favours white.
    #[must_use]
    pub const fn score_sign(self) -> i32 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => write!(f, "White"),
            Self::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceType {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    /// Upgrade choices for a promoting pawn. The first entry is the default.
    pub const PROMOTIONS: [Self; 4] = [Self::Queen, Self::Rook, Self::Bishop, Self::Knight];

    #[must_use]
    pub const fn is_promotion_choice(self) -> bool {
        matches!(self, Self::Queen | Self::Rook | Self::Bishop | Self::Knight)
    }

    /// Upper-case letter used in notation and FEN.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'P' => Some(Self::Pawn),
            'N' => Some(Self::Knight),
            'B' => Some(Self::Bishop),
            'R' => Some(Self::Rook),
            'Q' => Some(Self::Queen),
            'K' => Some(Self::King),
            _ => None,
        }
    }
}

/// A piece standing on a specific tile.
///
/// Pieces never change: moving one produces a fresh value at the destination
/// with `first_move` cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub alliance: Alliance,
    pub coordinate: Coordinate,
    pub first_move: bool,
}

impl Piece {
    #[must_use]
    pub const fn new(piece_type: PieceType, alliance: Alliance, coordinate: Coordinate) -> Self {
        Self {
            piece_type,
            alliance,
            coordinate,
            first_move: true,
        }
    }

    #[must_use]
    pub const fn with_first_move(mut self, first_move: bool) -> Self {
        self.first_move = first_move;
        self
    }

    /// The piece after it has moved to `destination`.
    #[must_use]
    pub const fn moved_to(self, destination: Coordinate) -> Self {
        Self {
            piece_type: self.piece_type,
            alliance: self.alliance,
            coordinate: destination,
            first_move: false,
        }
    }

    /// A pawn promoted to `upgrade` on `destination`.
    #[must_use]
    pub const fn promoted_to(self, upgrade: PieceType, destination: Coordinate) -> Self {
        Self {
            piece_type: upgrade,
            alliance: self.alliance,
            coordinate: destination,
            first_move: false,
        }
    }

    #[must_use]
    pub const fn is_king(self) -> bool {
        matches!(self.piece_type, PieceType::King)
    }

    #[must_use]
    pub const fn is_pawn(self) -> bool {
        matches!(self.piece_type, PieceType::Pawn)
    }

    /// FEN letter: upper case for white, lower case for black.
    #[must_use]
    pub const fn symbol(self) -> char {
        let letter = self.piece_type.letter();
        match self.alliance {
            Alliance::White => letter,
            Alliance::Black => letter.to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
