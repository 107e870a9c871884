use crate::logic::board::{Board, Builder};
use crate::logic::coordinate::Coordinate;
use crate::logic::piece::{Piece, PieceType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The pawn move underneath a promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromotionBase {
    PawnMove,
    PawnAttack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// A non-pawn piece moving to an empty tile.
    Normal,
    /// A non-pawn piece capturing.
    Attack,
    PawnMove,
    /// Double step from the start rank.
    PawnJump,
    PawnAttack,
    EnPassant,
    Promotion {
        base: PromotionBase,
        upgrade: PieceType,
    },
}

/// A transition from the board the move was generated on.
///
/// Two moves are equal when the same piece goes to the same destination; the
/// promotion upgrade is not part of the identity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Move {
    pub kind: MoveKind,
    pub piece: Piece,
    pub destination: Coordinate,
    pub captured: Option<Piece>,
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.piece == other.piece && self.destination == other.destination
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.piece.hash(state);
        self.destination.hash(state);
    }
}

impl Move {
    #[must_use]
    pub const fn normal(piece: Piece, destination: Coordinate) -> Self {
        Self {
            kind: MoveKind::Normal,
            piece,
            destination,
            captured: None,
        }
    }

    #[must_use]
    pub const fn attack(piece: Piece, destination: Coordinate, captured: Piece) -> Self {
        Self {
            kind: MoveKind::Attack,
            piece,
            destination,
            captured: Some(captured),
        }
    }

    #[must_use]
    pub const fn pawn_move(piece: Piece, destination: Coordinate) -> Self {
        Self {
            kind: MoveKind::PawnMove,
            piece,
            destination,
            captured: None,
        }
    }

    #[must_use]
    pub const fn pawn_jump(piece: Piece, destination: Coordinate) -> Self {
        Self {
            kind: MoveKind::PawnJump,
            piece,
            destination,
            captured: None,
        }
    }

    #[must_use]
    pub const fn pawn_attack(piece: Piece, destination: Coordinate, captured: Piece) -> Self {
        Self {
            kind: MoveKind::PawnAttack,
            piece,
            destination,
            captured: Some(captured),
        }
    }

    /// `captured` is the pawn beside the mover, not a piece on `destination`.
    #[must_use]
    pub const fn en_passant(piece: Piece, destination: Coordinate, captured: Piece) -> Self {
        Self {
            kind: MoveKind::EnPassant,
            piece,
            destination,
            captured: Some(captured),
        }
    }

    /// Wraps a pawn move or pawn attack. Any other kind is returned unchanged.
    #[must_use]
    pub const fn promotion(base: Self, upgrade: PieceType) -> Self {
        let promotion_base = match base.kind {
            MoveKind::PawnMove => PromotionBase::PawnMove,
            MoveKind::PawnAttack => PromotionBase::PawnAttack,
            MoveKind::Promotion { base: inner, .. } => inner,
            _ => return base,
        };
        Self {
            kind: MoveKind::Promotion {
                base: promotion_base,
                upgrade,
            },
            ..base
        }
    }

    #[must_use]
    pub const fn source(&self) -> Coordinate {
        self.piece.coordinate
    }

    #[must_use]
    pub const fn is_attack(&self) -> bool {
        self.captured.is_some()
    }

    #[must_use]
    pub const fn attacked_piece(&self) -> Option<Piece> {
        self.captured
    }

    #[must_use]
    pub const fn is_promotion(&self) -> bool {
        matches!(self.kind, MoveKind::Promotion { .. })
    }

    #[must_use]
    pub const fn upgrade(&self) -> Option<PieceType> {
        match self.kind {
            MoveKind::Promotion { upgrade, .. } => Some(upgrade),
            _ => None,
        }
    }

    /// The piece as it stands after the move.
    #[must_use]
    pub const fn moved_piece(&self) -> Piece {
        match self.kind {
            MoveKind::Promotion { upgrade, .. } => self.piece.promoted_to(upgrade, self.destination),
            _ => self.piece.moved_to(self.destination),
        }
    }

    /// Builds the successor of `board`, which must be the board this move was
    /// generated on. Every other piece is carried over, the captured piece (if
    /// any) is dropped, and only a pawn jump leaves an en passant pawn behind.
    #[must_use]
    pub fn apply(&self, board: &Board) -> Board {
        let mover = self.piece.alliance;
        let mut builder = Builder::new();

        for piece in board.active_pieces(mover) {
            if *piece != self.piece {
                builder.set_piece(*piece);
            }
        }
        for piece in board.active_pieces(mover.opposite()) {
            if Some(*piece) != self.captured {
                builder.set_piece(*piece);
            }
        }

        let moved = self.moved_piece();
        builder.set_piece(moved).set_move_maker(mover.opposite());
        if self.kind == MoveKind::PawnJump {
            builder.set_en_passant_pawn(moved);
        }
        builder.build()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source_file = self.source().file_letter();
        match self.kind {
            MoveKind::Normal => write!(f, "{}{}", self.piece.piece_type.letter(), self.destination),
            MoveKind::Attack => write!(f, "{}x{}", self.piece.piece_type.letter(), self.destination),
            MoveKind::PawnMove | MoveKind::PawnJump => write!(f, "{}", self.destination),
            MoveKind::PawnAttack | MoveKind::EnPassant => {
                write!(f, "{source_file}x{}", self.destination)
            }
            MoveKind::Promotion { base, upgrade } => match base {
                PromotionBase::PawnMove => write!(f, "{}={}", self.destination, upgrade.letter()),
                PromotionBase::PawnAttack => write!(
                    f,
                    "{source_file}x{}={}",
                    self.destination,
                    upgrade.letter()
                ),
            },
        }
    }
}

/// Resolves (source, destination) requests against a board.
pub struct MoveFactory;

impl MoveFactory {
    /// The first move of the side to move from `from` to `to`. For promotions
    /// this is the queen upgrade.
    #[must_use]
    pub fn create_move(board: &Board, from: Coordinate, to: Coordinate) -> Option<Move> {
        board
            .pseudo_legal_moves(board.next_move_maker())
            .iter()
            .find(|mv| mv.source() == from && mv.destination == to)
            .copied()
    }

    /// Every promotion variant of the side to move from `from` to `to`.
    #[must_use]
    pub fn promotion_moves(board: &Board, from: Coordinate, to: Coordinate) -> Vec<Move> {
        board
            .pseudo_legal_moves(board.next_move_maker())
            .iter()
            .filter(|mv| mv.is_promotion() && mv.source() == from && mv.destination == to)
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::piece::Alliance;

    fn at(square: &str) -> Coordinate {
        Coordinate::from_algebraic(square).unwrap()
    }

    #[test]
    fn test_apply_pawn_jump_sets_en_passant() {
        let board = Board::standard();
        let mv = MoveFactory::create_move(&board, at("e2"), at("e4")).unwrap();
        assert_eq!(mv.kind, MoveKind::PawnJump);

        let next = mv.apply(&board);
        assert!(next.piece_at(at("e2")).is_none());
        let pawn = next.piece_at(at("e4")).unwrap();
        assert!(!pawn.first_move);
        assert_eq!(next.en_passant_pawn(), Some(pawn));
        assert_eq!(next.next_move_maker(), Alliance::Black);
        // The source board is untouched.
        assert!(board.piece_at(at("e2")).is_some());
    }

    #[test]
    fn test_en_passant_resets_after_other_move() {
        let board = Board::standard();
        let jump = MoveFactory::create_move(&board, at("e2"), at("e4")).unwrap();
        let board = jump.apply(&board);
        assert!(board.en_passant_pawn().is_some());

        let reply = MoveFactory::create_move(&board, at("g8"), at("f6")).unwrap();
        let board = reply.apply(&board);
        assert!(board.en_passant_pawn().is_none());
    }

    #[test]
    fn test_capture_removes_piece() {
        let board = Board::from_fen("4k3/8/3p4/8/4N3/8/8/4K3 w - -").unwrap();
        let mv = MoveFactory::create_move(&board, at("e4"), at("d6")).unwrap();
        assert_eq!(mv.kind, MoveKind::Attack);
        let next = mv.apply(&board);
        assert_eq!(next.black_pieces().len(), 1);
        assert_eq!(
            next.piece_at(at("d6")).map(|p| p.piece_type),
            Some(PieceType::Knight)
        );
    }

    #[test]
    fn test_en_passant_removes_jumped_pawn() {
        let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6").unwrap();
        let mv = MoveFactory::create_move(&board, at("e5"), at("d6")).unwrap();
        assert_eq!(mv.kind, MoveKind::EnPassant);
        let next = mv.apply(&board);
        assert!(next.piece_at(at("d5")).is_none());
        assert!(next.piece_at(at("d6")).is_some());
        assert_eq!(next.black_pieces().len(), 1);
    }

    #[test]
    fn test_promotion_default_is_queen() {
        let board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - -").unwrap();
        let mv = MoveFactory::create_move(&board, at("a7"), at("a8")).unwrap();
        assert_eq!(mv.upgrade(), Some(PieceType::Queen));
        let next = mv.apply(&board);
        assert_eq!(
            next.piece_at(at("a8")).map(|p| p.piece_type),
            Some(PieceType::Queen)
        );

        let all = MoveFactory::promotion_moves(&board, at("a7"), at("a8"));
        let upgrades: Vec<_> = all.iter().filter_map(Move::upgrade).collect();
        assert_eq!(upgrades, PieceType::PROMOTIONS.to_vec());
    }

    #[test]
    fn test_promotion_wraps_only_pawn_moves() {
        let knight = Piece::new(PieceType::Knight, Alliance::White, at("b1"));
        let plain = Move::normal(knight, at("c3"));
        assert_eq!(Move::promotion(plain, PieceType::Queen).kind, MoveKind::Normal);
    }

    #[test]
    fn test_notation() {
        let pawn = Piece::new(PieceType::Pawn, Alliance::White, at("e4"));
        let target = Piece::new(PieceType::Pawn, Alliance::Black, at("d5"));
        assert_eq!(Move::pawn_jump(pawn, at("e4")).to_string(), "e4");
        assert_eq!(Move::pawn_attack(pawn, at("d5"), target).to_string(), "exd5");

        let knight = Piece::new(PieceType::Knight, Alliance::White, at("g1"));
        assert_eq!(Move::normal(knight, at("f3")).to_string(), "Nf3");

        let queen = Piece::new(PieceType::Queen, Alliance::White, at("d1"));
        let rook = Piece::new(PieceType::Rook, Alliance::Black, at("d7"));
        assert_eq!(Move::attack(queen, at("d7"), rook).to_string(), "Qxd7");

        let runner = Piece::new(PieceType::Pawn, Alliance::White, at("e7"));
        let promo = Move::promotion(Move::pawn_move(runner, at("e8")), PieceType::Queen);
        assert_eq!(promo.to_string(), "e8=Q");
        let bishop = Piece::new(PieceType::Bishop, Alliance::Black, at("f8"));
        let capture_promo =
            Move::promotion(Move::pawn_attack(runner, at("f8"), bishop), PieceType::Knight);
        assert_eq!(capture_promo.to_string(), "exf8=N");
    }

    #[test]
    fn test_equality_ignores_upgrade() {
        let runner = Piece::new(PieceType::Pawn, Alliance::White, at("e7"));
        let base = Move::pawn_move(runner, at("e8"));
        let queen = Move::promotion(base, PieceType::Queen);
        let rook = Move::promotion(base, PieceType::Rook);
        assert_eq!(queen, rook);
        assert_ne!(queen.upgrade(), rook.upgrade());
    }
}
