use crate::logic::coordinate::{Coordinate, BOARD_HEIGHT, BOARD_WIDTH, NUM_TILES};
use crate::logic::generator::MoveGenerator;
use crate::logic::layouts::Layout;
use crate::logic::moves::Move;
use crate::logic::piece::{Alliance, Piece, PieceType};
use crate::logic::player::Player;
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;
use std::sync::OnceLock;

/// A square and whatever stands on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty(Coordinate),
    Occupied(Piece),
}

impl Tile {
    #[must_use]
    pub const fn coordinate(self) -> Coordinate {
        match self {
            Self::Empty(coordinate) => coordinate,
            Self::Occupied(piece) => piece.coordinate,
        }
    }

    #[must_use]
    pub const fn piece(self) -> Option<Piece> {
        match self {
            Self::Empty(_) => None,
            Self::Occupied(piece) => Some(piece),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty(_))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty(_) => write!(f, "-"),
            Self::Occupied(piece) => write!(f, "{piece}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenError {
    MissingField,
    InvalidPiece(char),
    BadPlacement,
    InvalidSideToMove,
    InvalidEnPassant,
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField => write!(f, "FEN is missing a required field"),
            Self::InvalidPiece(c) => write!(f, "unknown piece letter '{c}'"),
            Self::BadPlacement => write!(f, "piece placement does not describe an 8x8 board"),
            Self::InvalidSideToMove => write!(f, "side to move must be 'w' or 'b'"),
            Self::InvalidEnPassant => write!(f, "en passant square does not match a pawn jump"),
        }
    }
}

impl std::error::Error for FenError {}

/// Accumulates a placement map and the side to move, then builds a [`Board`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Builder {
    #[serde(with = "BigArray")]
    placements: [Option<Piece>; NUM_TILES],
    next_move_maker: Alliance,
    en_passant_pawn: Option<Piece>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            placements: [None; NUM_TILES],
            next_move_maker: Alliance::White,
            en_passant_pawn: None,
        }
    }

    /// Places `piece` on its own coordinate, replacing any previous occupant.
    pub fn set_piece(&mut self, piece: Piece) -> &mut Self {
        if let Some(slot) = self.placements.get_mut(piece.coordinate.index()) {
            *slot = Some(piece);
        }
        self
    }

    pub fn set_move_maker(&mut self, alliance: Alliance) -> &mut Self {
        self.next_move_maker = alliance;
        self
    }

    /// Marks the pawn that just jumped two squares.
    pub fn set_en_passant_pawn(&mut self, pawn: Piece) -> &mut Self {
        self.en_passant_pawn = Some(pawn);
        self
    }

    #[must_use]
    pub fn build(&self) -> Board {
        Board::new(self)
    }
}

impl From<Builder> for Board {
    fn from(builder: Builder) -> Self {
        builder.build()
    }
}

impl From<Board> for Builder {
    fn from(board: Board) -> Self {
        Self {
            placements: board.tiles,
            next_move_maker: board.next_move_maker,
            en_passant_pawn: board.en_passant_pawn,
        }
    }
}

/// An immutable position.
///
/// Every board knows the pseudo-legal moves of both sides. Legal moves are
/// filtered on first request and cached, since filtering builds a successor
/// board per candidate move.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Builder", into = "Builder")]
pub struct Board {
    tiles: [Option<Piece>; NUM_TILES],
    white_pieces: Vec<Piece>,
    black_pieces: Vec<Piece>,
    en_passant_pawn: Option<Piece>,
    next_move_maker: Alliance,
    white_moves: Vec<Move>,
    black_moves: Vec<Move>,
    legal_moves: [OnceLock<Vec<Move>>; 2],
}

impl Board {
    fn new(builder: &Builder) -> Self {
        let mut tiles = [None; NUM_TILES];
        let mut white_pieces = Vec::with_capacity(16);
        let mut black_pieces = Vec::with_capacity(16);

        for (coordinate, slot) in Coordinate::all().zip(tiles.iter_mut()) {
            let Some(placed) = builder.placements.get(coordinate.index()).copied().flatten() else {
                continue;
            };
            // The tile decides where a piece stands.
            let piece = Piece {
                coordinate,
                ..placed
            };
            *slot = Some(piece);
            match piece.alliance {
                Alliance::White => white_pieces.push(piece),
                Alliance::Black => black_pieces.push(piece),
            }
        }

        let en_passant_pawn = builder.en_passant_pawn.and_then(|pawn| {
            let on_board = tiles.get(pawn.coordinate.index()).copied().flatten()?;
            (on_board.is_pawn() && on_board.alliance == pawn.alliance).then_some(on_board)
        });

        let mut board = Self {
            tiles,
            white_pieces,
            black_pieces,
            en_passant_pawn,
            next_move_maker: builder.next_move_maker,
            white_moves: Vec::new(),
            black_moves: Vec::new(),
            legal_moves: [OnceLock::new(), OnceLock::new()],
        };

        let generator = MoveGenerator::new();
        board.white_moves = generator.generate_moves(&board, Alliance::White);
        board.black_moves = generator.generate_moves(&board, Alliance::Black);
        board
    }

    /// The standard starting position, white to move.
    #[must_use]
    pub fn standard() -> Self {
        Layout::Standard.build()
    }

    #[must_use]
    pub fn tile(&self, coordinate: Coordinate) -> Tile {
        self.piece_at(coordinate)
            .map_or(Tile::Empty(coordinate), Tile::Occupied)
    }

    #[must_use]
    pub fn piece_at(&self, coordinate: Coordinate) -> Option<Piece> {
        self.tiles.get(coordinate.index()).copied().flatten()
    }

    #[must_use]
    pub const fn en_passant_pawn(&self) -> Option<Piece> {
        self.en_passant_pawn
    }

    #[must_use]
    pub const fn next_move_maker(&self) -> Alliance {
        self.next_move_maker
    }

    #[must_use]
    pub fn white_pieces(&self) -> &[Piece] {
        &self.white_pieces
    }

    #[must_use]
    pub fn black_pieces(&self) -> &[Piece] {
        &self.black_pieces
    }

    #[must_use]
    pub fn active_pieces(&self, alliance: Alliance) -> &[Piece] {
        match alliance {
            Alliance::White => &self.white_pieces,
            Alliance::Black => &self.black_pieces,
        }
    }

    /// Moves consistent with piece geometry, before king-safety filtering.
    #[must_use]
    pub fn pseudo_legal_moves(&self, alliance: Alliance) -> &[Move] {
        match alliance {
            Alliance::White => &self.white_moves,
            Alliance::Black => &self.black_moves,
        }
    }

    pub(crate) fn legal_move_cache(&self, alliance: Alliance) -> &OnceLock<Vec<Move>> {
        match alliance {
            Alliance::White => &self.legal_moves[0],
            Alliance::Black => &self.legal_moves[1],
        }
    }

    #[must_use]
    pub fn king(&self, alliance: Alliance) -> Option<Piece> {
        self.active_pieces(alliance)
            .iter()
            .copied()
            .find(|piece| piece.is_king())
    }

    #[must_use]
    pub const fn white_player(&self) -> Player<'_> {
        Player::new(self, Alliance::White)
    }

    #[must_use]
    pub const fn black_player(&self) -> Player<'_> {
        Player::new(self, Alliance::Black)
    }

    #[must_use]
    pub const fn player(&self, alliance: Alliance) -> Player<'_> {
        Player::new(self, alliance)
    }

    #[must_use]
    pub const fn current_player(&self) -> Player<'_> {
        Player::new(self, self.next_move_maker)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for rank in 0..BOARD_HEIGHT {
            let mut empty_count = 0;
            for file in 0..BOARD_WIDTH {
                let piece = Coordinate::new(file, rank).and_then(|c| self.piece_at(c));
                if let Some(piece) = piece {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.symbol());
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank < BOARD_HEIGHT - 1 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if self.next_move_maker.is_white() { 'w' } else { 'b' });

        // Castling is not modelled.
        fen.push_str(" - ");
        let target = self.en_passant_pawn.and_then(|pawn| {
            pawn.coordinate
                .offset(0, pawn.alliance.opposite_direction())
        });
        match target {
            Some(square) => fen.push_str(&square.to_string()),
            None => fen.push('-'),
        }
        fen
    }

    /// Parses piece placement, side to move and (optionally) the en passant
    /// square. Castling rights and move counters are accepted and ignored.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or(FenError::MissingField)?;
        let side = fields.next().ok_or(FenError::MissingField)?;

        let mover = match side {
            "w" => Alliance::White,
            "b" => Alliance::Black,
            _ => return Err(FenError::InvalidSideToMove),
        };

        let mut builder = Builder::new();
        builder.set_move_maker(mover);

        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != BOARD_HEIGHT as usize {
            return Err(FenError::BadPlacement);
        }
        for (rank, row) in (0..BOARD_HEIGHT).zip(rows) {
            let mut file = 0;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += i32::try_from(skip).map_err(|_| FenError::BadPlacement)?;
                    continue;
                }
                let piece_type = PieceType::from_letter(c).ok_or(FenError::InvalidPiece(c))?;
                let alliance = if c.is_ascii_uppercase() {
                    Alliance::White
                } else {
                    Alliance::Black
                };
                let coordinate = Coordinate::new(file, rank).ok_or(FenError::BadPlacement)?;
                let first_move = match piece_type {
                    PieceType::Pawn => rank == alliance.pawn_start_rank(),
                    _ => rank == alliance.pawn_start_rank() - alliance.direction(),
                };
                builder.set_piece(
                    Piece::new(piece_type, alliance, coordinate).with_first_move(first_move),
                );
                file += 1;
            }
            if file != BOARD_WIDTH {
                return Err(FenError::BadPlacement);
            }
        }

        let _castling = fields.next();
        if let Some(square) = fields.next().filter(|s| *s != "-") {
            let target = Coordinate::from_algebraic(square).ok_or(FenError::InvalidEnPassant)?;
            let jumper = mover.opposite();
            let pawn = target
                .offset(0, jumper.direction())
                .and_then(|c| builder.placements.get(c.index()).copied().flatten())
                .filter(|p| p.is_pawn() && p.alliance == jumper)
                .ok_or(FenError::InvalidEnPassant)?;
            builder.set_en_passant_pawn(pawn);
        }

        Ok(builder.build())
    }
}

/// Positions are equal when the same kinds of pieces stand on the same tiles,
/// the same side is to move and the same pawn may be taken en passant.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        let same_tiles = self
            .tiles
            .iter()
            .zip(other.tiles.iter())
            .all(|(a, b)| a.map(|p| p.symbol()) == b.map(|p| p.symbol()));
        same_tiles
            && self.next_move_maker == other.next_move_maker
            && self.en_passant_pawn.map(|p| p.coordinate)
                == other.en_passant_pawn.map(|p| p.coordinate)
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..BOARD_HEIGHT {
            for file in 0..BOARD_WIDTH {
                if let Some(coordinate) = Coordinate::new(file, rank) {
                    write!(f, "{:>3}", self.tile(coordinate).to_string())?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
