use crate::logic::board::Board;
use crate::logic::moves::Move;
use crate::logic::piece::{Alliance, Piece, PieceType};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];
const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
const QUEEN_DIRECTIONS: [(i32, i32); 8] = KING_OFFSETS;

/// Pawn steps relative to the pawn's own forward direction: single step,
/// jump, then the two diagonals.
const PAWN_OFFSETS: [(i32, i32); 4] = [(0, 1), (0, 2), (-1, 1), (1, 1)];

/// Produces pseudo-legal moves: geometry only, no king-safety check.
pub struct MoveGenerator;

impl Default for MoveGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Moves of every active piece of `alliance`, in tile order.
    #[must_use]
    pub fn generate_moves(&self, board: &Board, alliance: Alliance) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for piece in board.active_pieces(alliance) {
            self.generate_piece_moves(board, *piece, &mut moves);
        }
        moves
    }

    pub fn generate_piece_moves(&self, board: &Board, piece: Piece, moves: &mut Vec<Move>) {
        match piece.piece_type {
            PieceType::Pawn => self.generate_pawn_moves(board, piece, moves),
            PieceType::Knight => self.generate_offset_moves(board, piece, &KNIGHT_OFFSETS, moves),
            PieceType::Bishop => {
                self.generate_sliding_moves(board, piece, &BISHOP_DIRECTIONS, moves);
            }
            PieceType::Rook => self.generate_sliding_moves(board, piece, &ROOK_DIRECTIONS, moves),
            PieceType::Queen => {
                self.generate_sliding_moves(board, piece, &QUEEN_DIRECTIONS, moves);
            }
            PieceType::King => self.generate_offset_moves(board, piece, &KING_OFFSETS, moves),
        }
    }

    fn generate_offset_moves(
        &self,
        board: &Board,
        piece: Piece,
        offsets: &[(i32, i32)],
        moves: &mut Vec<Move>,
    ) {
        for &(d_file, d_rank) in offsets {
            let Some(destination) = piece.coordinate.offset(d_file, d_rank) else {
                continue;
            };
            match board.piece_at(destination) {
                None => moves.push(Move::normal(piece, destination)),
                Some(target) if target.alliance != piece.alliance => {
                    moves.push(Move::attack(piece, destination, target));
                }
                Some(_) => {}
            }
        }
    }

    fn generate_sliding_moves(
        &self,
        board: &Board,
        piece: Piece,
        directions: &[(i32, i32)],
        moves: &mut Vec<Move>,
    ) {
        for &(d_file, d_rank) in directions {
            let mut current = piece.coordinate;
            while let Some(destination) = current.offset(d_file, d_rank) {
                if let Some(target) = board.piece_at(destination) {
                    if target.alliance != piece.alliance {
                        moves.push(Move::attack(piece, destination, target));
                    }
                    break;
                }
                moves.push(Move::normal(piece, destination));
                current = destination;
            }
        }
    }

    fn generate_pawn_moves(&self, board: &Board, pawn: Piece, moves: &mut Vec<Move>) {
        let alliance = pawn.alliance;
        let direction = alliance.direction();
        let from = pawn.coordinate;

        for &(rel_file, rel_rank) in &PAWN_OFFSETS {
            let Some(destination) = from.offset(rel_file * direction, rel_rank * direction) else {
                continue;
            };
            let occupant = board.piece_at(destination);
            let promotion = alliance.is_pawn_promotion_rank(destination);

            match (rel_file, rel_rank) {
                (0, 1) => {
                    if occupant.is_none() {
                        push_pawn_move(Move::pawn_move(pawn, destination), promotion, moves);
                    }
                }
                (0, 2) => {
                    if !alliance.is_pawn_start_rank(from) || occupant.is_some() {
                        continue;
                    }
                    let middle_is_empty = from
                        .offset(0, direction)
                        .is_some_and(|middle| board.piece_at(middle).is_none());
                    if middle_is_empty {
                        moves.push(Move::pawn_jump(pawn, destination));
                    }
                }
                _ => match occupant {
                    Some(target) if target.alliance != alliance => {
                        push_pawn_move(Move::pawn_attack(pawn, destination, target), promotion, moves);
                    }
                    Some(_) => {}
                    None => {
                        // The jumped pawn stands beside us on the destination file.
                        let Some(passant) = board.en_passant_pawn() else {
                            continue;
                        };
                        let beside = from.offset(rel_file * direction, 0);
                        if passant.alliance != alliance && Some(passant.coordinate) == beside {
                            moves.push(Move::en_passant(pawn, destination, passant));
                        }
                    }
                },
            }
        }
    }
}

/// Pushes `base`, or one promotion per upgrade choice when it reaches the last rank.
fn push_pawn_move(base: Move, promotion: bool, moves: &mut Vec<Move>) {
    if promotion {
        moves.extend(
            PieceType::PROMOTIONS
                .iter()
                .map(|&upgrade| Move::promotion(base, upgrade)),
        );
    } else {
        moves.push(base);
    }
}
