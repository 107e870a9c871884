use crate::logic::board::Board;
use crate::logic::moves::Move;
use crate::logic::piece::{Alliance, Piece};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveStatus {
    Done,
    /// Not one of the mover's generated moves, or not the mover's turn.
    IllegalMove,
    LeavesPlayerInCheck,
}

impl MoveStatus {
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Outcome of [`Player::make_move`].
#[derive(Debug, Clone)]
pub struct MoveTransition {
    pub attempted: Option<Move>,
    pub status: MoveStatus,
    board: Option<Board>,
}

impl MoveTransition {
    #[must_use]
    pub const fn done(mv: Move, board: Board) -> Self {
        Self {
            attempted: Some(mv),
            status: MoveStatus::Done,
            board: Some(board),
        }
    }

    #[must_use]
    pub const fn failed(attempted: Option<Move>, status: MoveStatus) -> Self {
        Self {
            attempted,
            status,
            board: None,
        }
    }

    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.status.is_done()
    }

    /// The successor board when the move went through.
    #[must_use]
    pub const fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    #[must_use]
    pub fn into_board(self) -> Option<Board> {
        self.board
    }
}

/// One side's view of a board.
#[derive(Debug, Clone, Copy)]
pub struct Player<'a> {
    board: &'a Board,
    alliance: Alliance,
}

impl<'a> Player<'a> {
    #[must_use]
    pub const fn new(board: &'a Board, alliance: Alliance) -> Self {
        Self { board, alliance }
    }

    #[must_use]
    pub const fn alliance(&self) -> Alliance {
        self.alliance
    }

    #[must_use]
    pub const fn board(&self) -> &'a Board {
        self.board
    }

    #[must_use]
    pub const fn opponent(&self) -> Player<'a> {
        Player::new(self.board, self.alliance.opposite())
    }

    #[must_use]
    pub fn active_pieces(&self) -> &'a [Piece] {
        self.board.active_pieces(self.alliance)
    }

    #[must_use]
    pub fn king(&self) -> Option<Piece> {
        self.board.king(self.alliance)
    }

    #[must_use]
    pub fn pseudo_legal_moves(&self) -> &'a [Move] {
        self.board.pseudo_legal_moves(self.alliance)
    }

    #[must_use]
    pub fn opponent_moves(&self) -> &'a [Move] {
        self.board.pseudo_legal_moves(self.alliance.opposite())
    }

    /// Pseudo-legal moves that do not leave this side's king attacked, in
    /// generation order. Computed once per board.
    #[must_use]
    pub fn legal_moves(&self) -> &'a [Move] {
        let board = self.board;
        let alliance = self.alliance;
        board.legal_move_cache(alliance).get_or_init(|| {
            board
                .pseudo_legal_moves(alliance)
                .iter()
                .filter(|mv| !leaves_king_attacked(&mv.apply(board), alliance))
                .copied()
                .collect()
        })
    }

    #[must_use]
    pub fn legal_moves_for_piece(&self, piece: Piece) -> Vec<Move> {
        self.legal_moves()
            .iter()
            .filter(|mv| mv.piece == piece)
            .copied()
            .collect()
    }

    /// A side without a king is never in check.
    #[must_use]
    pub fn is_in_check(&self) -> bool {
        self.king().is_some_and(|king| {
            self.opponent_moves()
                .iter()
                .any(|mv| mv.destination == king.coordinate)
        })
    }

    #[must_use]
    pub fn has_escape_moves(&self) -> bool {
        !self.legal_moves().is_empty()
    }

    #[must_use]
    pub fn is_in_checkmate(&self) -> bool {
        self.is_in_check() && !self.has_escape_moves()
    }

    #[must_use]
    pub fn is_in_stalemate(&self) -> bool {
        !self.is_in_check() && !self.has_escape_moves()
    }

    /// The only way to get from one board to the next.
    ///
    /// `mv` is matched against the generated moves (including the promotion
    /// upgrade), so a hand-built move cannot smuggle in a different kind.
    #[must_use]
    pub fn make_move(&self, mv: &Move) -> MoveTransition {
        if self.alliance != self.board.next_move_maker() {
            log::debug!("{} tried to move out of turn: {mv}", self.alliance);
            return MoveTransition::failed(Some(*mv), MoveStatus::IllegalMove);
        }

        let Some(generated) = self
            .pseudo_legal_moves()
            .iter()
            .find(|candidate| *candidate == mv && candidate.upgrade() == mv.upgrade())
            .copied()
        else {
            log::debug!("rejected {mv}: not a move of {}", self.alliance);
            return MoveTransition::failed(Some(*mv), MoveStatus::IllegalMove);
        };

        let successor = generated.apply(self.board);
        if leaves_king_attacked(&successor, self.alliance) {
            log::debug!("rejected {generated}: leaves the {} king attacked", self.alliance);
            return MoveTransition::failed(Some(generated), MoveStatus::LeavesPlayerInCheck);
        }
        MoveTransition::done(generated, successor)
    }
}

/// True when some opposing move on `board` lands on the king of `alliance`.
fn leaves_king_attacked(board: &Board, alliance: Alliance) -> bool {
    board.king(alliance).is_some_and(|king| {
        board
            .pseudo_legal_moves(alliance.opposite())
            .iter()
            .any(|mv| mv.destination == king.coordinate)
    })
}
