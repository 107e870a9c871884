use crate::logic::board::{Board, Builder};
use crate::logic::coordinate::{Coordinate, BOARD_WIDTH};
use crate::logic::piece::{Alliance, Piece, PieceType};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

const STANDARD_BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    Standard,
    /// Shuffled back ranks, mirrored for both sides. The seed makes the
    /// shuffle reproducible.
    Random(u64),
    /// Black's usual army against thirty-six white pawns and no white king.
    Horde,
    /// Three white queens against seven black knights.
    LightBrigade,
}

impl Layout {
    /// Builds the starting board for this layout, white to move.
    #[must_use]
    pub fn build(self) -> Board {
        let mut builder = Builder::new();
        match self {
            Self::Standard => {
                place_back_rank(&mut builder, Alliance::White, &STANDARD_BACK_RANK);
                place_back_rank(&mut builder, Alliance::Black, &STANDARD_BACK_RANK);
                place_pawn_rank(&mut builder, Alliance::White);
                place_pawn_rank(&mut builder, Alliance::Black);
            }
            Self::Random(seed) => {
                let back_rank = shuffled_back_rank(seed);
                place_back_rank(&mut builder, Alliance::White, &back_rank);
                place_back_rank(&mut builder, Alliance::Black, &back_rank);
                place_pawn_rank(&mut builder, Alliance::White);
                place_pawn_rank(&mut builder, Alliance::Black);
            }
            Self::Horde => {
                place_back_rank(&mut builder, Alliance::Black, &STANDARD_BACK_RANK);
                place_pawn_rank(&mut builder, Alliance::Black);
                place_horde(&mut builder);
            }
            Self::LightBrigade => {
                let queens = [
                    None,
                    Some(PieceType::Queen),
                    None,
                    Some(PieceType::Queen),
                    Some(PieceType::King),
                    None,
                    Some(PieceType::Queen),
                    None,
                ];
                let knights = [
                    Some(PieceType::Knight),
                    Some(PieceType::Knight),
                    Some(PieceType::Knight),
                    Some(PieceType::Knight),
                    Some(PieceType::King),
                    Some(PieceType::Knight),
                    Some(PieceType::Knight),
                    Some(PieceType::Knight),
                ];
                place_sparse_rank(&mut builder, Alliance::White, &queens);
                place_sparse_rank(&mut builder, Alliance::Black, &knights);
                place_pawn_rank(&mut builder, Alliance::White);
                place_pawn_rank(&mut builder, Alliance::Black);
            }
        }
        builder.set_move_maker(Alliance::White);
        builder.build()
    }
}

const fn back_rank(alliance: Alliance) -> i32 {
    alliance.pawn_start_rank() - alliance.direction()
}

fn place_back_rank(builder: &mut Builder, alliance: Alliance, pieces: &[PieceType; 8]) {
    let sparse = pieces.map(Some);
    place_sparse_rank(builder, alliance, &sparse);
}

fn place_sparse_rank(builder: &mut Builder, alliance: Alliance, pieces: &[Option<PieceType>; 8]) {
    let rank = back_rank(alliance);
    for (file, piece_type) in (0..BOARD_WIDTH).zip(pieces) {
        if let (Some(piece_type), Some(coordinate)) = (piece_type, Coordinate::new(file, rank)) {
            builder.set_piece(Piece::new(*piece_type, alliance, coordinate));
        }
    }
}

fn place_pawn_rank(builder: &mut Builder, alliance: Alliance) {
    let rank = alliance.pawn_start_rank();
    for coordinate in (0..BOARD_WIDTH).filter_map(|file| Coordinate::new(file, rank)) {
        builder.set_piece(Piece::new(PieceType::Pawn, alliance, coordinate));
    }
}

/// Ranks 1-4 full of pawns plus four advanced pawns on the fifth rank.
fn place_horde(builder: &mut Builder) {
    let white = Alliance::White;
    let home = back_rank(white);
    for step in 0..4 {
        let rank = home + step * white.direction();
        for coordinate in (0..BOARD_WIDTH).filter_map(|file| Coordinate::new(file, rank)) {
            builder.set_piece(Piece::new(PieceType::Pawn, white, coordinate));
        }
    }
    let fifth = home + 4 * white.direction();
    for file in [1, 2, 5, 6] {
        if let Some(coordinate) = Coordinate::new(file, fifth) {
            builder.set_piece(Piece::new(PieceType::Pawn, white, coordinate).with_first_move(false));
        }
    }
}

/// Random back rank with the two bishops on opposite colours.
fn shuffled_back_rank(seed: u64) -> [PieceType; 8] {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rank = [PieceType::Pawn; 8];

    // One bishop on an even file and one on an odd file.
    let even_files = [0usize, 2, 4, 6];
    let odd_files = [1usize, 3, 5, 7];
    let even_bishop = even_files.choose(&mut rng).copied().unwrap_or(2);
    let odd_bishop = odd_files.choose(&mut rng).copied().unwrap_or(5);

    let mut others = vec![
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Queen,
        PieceType::King,
        PieceType::Knight,
        PieceType::Rook,
    ];
    others.shuffle(&mut rng);

    let mut remaining = others.into_iter();
    for (file, slot) in rank.iter_mut().enumerate() {
        *slot = if file == even_bishop || file == odd_bishop {
            PieceType::Bishop
        } else {
            remaining.next().unwrap_or(PieceType::Knight)
        };
    }
    rank
}
