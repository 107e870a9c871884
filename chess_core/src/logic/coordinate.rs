use serde::{Deserialize, Serialize};
use std::fmt;

pub const BOARD_WIDTH: i32 = 8;
pub const BOARD_HEIGHT: i32 = 8;
pub const NUM_TILES: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

/// A square on the board.
///
/// `file` runs 0..8 from the a-file to the h-file. `rank` runs 0..8 from the top
/// of the board: rank 0 is black's back rank, rank 7 is white's back rank.
/// A `Coordinate` can only be obtained through the checked constructors, so
/// every value is on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(i32, i32)", into = "(i32, i32)")]
pub struct Coordinate {
    file: u8,
    rank: u8,
}

#[must_use]
pub const fn is_valid(file: i32, rank: i32) -> bool {
    file >= 0 && file < BOARD_WIDTH && rank >= 0 && rank < BOARD_HEIGHT
}

impl Coordinate {
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn new(file: i32, rank: i32) -> Option<Self> {
        if is_valid(file, rank) {
            Some(Self {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    #[must_use]
    pub const fn file(self) -> i32 {
        self.file as i32
    }

    #[must_use]
    pub const fn rank(self) -> i32 {
        self.rank as i32
    }

    /// Tile index, row-major from the top-left corner.
    #[must_use]
    pub const fn index(self) -> usize {
        self.rank as usize * BOARD_WIDTH as usize + self.file as usize
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index >= NUM_TILES {
            return None;
        }
        Self::new(
            (index % BOARD_WIDTH as usize) as i32,
            (index / BOARD_WIDTH as usize) as i32,
        )
    }

    /// The coordinate shifted by `(d_file, d_rank)`, or `None` when that leaves the board.
    #[must_use]
    pub const fn offset(self, d_file: i32, d_rank: i32) -> Option<Self> {
        Self::new(self.file() + d_file, self.rank() + d_rank)
    }

    #[must_use]
    pub const fn file_letter(self) -> char {
        (b'a' + self.file) as char
    }

    /// Light squares have an even `file + rank` sum.
    #[must_use]
    pub const fn is_light(self) -> bool {
        (self.file + self.rank) % 2 == 0
    }

    /// The same square seen from the other side of the board.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        Self {
            file: self.file,
            rank: (BOARD_HEIGHT - 1) as u8 - self.rank,
        }
    }

    /// Parses algebraic notation such as `e4`.
    #[must_use]
    pub fn from_algebraic(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let file_char = chars.next()?;
        let rank_char = chars.next()?;
        if chars.next().is_some() || !file_char.is_ascii_lowercase() {
            return None;
        }
        let file = i32::from(file_char as u8) - i32::from(b'a');
        let rank_number = i32::try_from(rank_char.to_digit(10)?).ok()?;
        Self::new(file, BOARD_HEIGHT - rank_number)
    }

    /// All coordinates in tile order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..NUM_TILES).filter_map(Self::from_index)
    }
}

impl TryFrom<(i32, i32)> for Coordinate {
    type Error = String;

    fn try_from((file, rank): (i32, i32)) -> Result<Self, Self::Error> {
        Self::new(file, rank).ok_or_else(|| format!("coordinate ({file}, {rank}) is off the board"))
    }
}

impl From<Coordinate> for (i32, i32) {
    fn from(coordinate: Coordinate) -> Self {
        (coordinate.file(), coordinate.rank())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_letter(), BOARD_HEIGHT - self.rank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Coordinate::new(0, 0).is_some());
        assert!(Coordinate::new(7, 7).is_some());
        assert!(Coordinate::new(8, 0).is_none());
        assert!(Coordinate::new(0, -1).is_none());
        assert!(Coordinate::new(-3, 9).is_none());
    }

    #[test]
    fn test_index_roundtrip() {
        for c in Coordinate::all() {
            assert_eq!(Coordinate::from_index(c.index()), Some(c));
        }
        assert_eq!(Coordinate::all().count(), NUM_TILES);
        assert!(Coordinate::from_index(64).is_none());
    }

    #[test]
    fn test_algebraic() {
        let e1 = Coordinate::new(4, 7).unwrap();
        assert_eq!(e1.to_string(), "e1");
        assert_eq!(Coordinate::from_algebraic("e1"), Some(e1));
        assert_eq!(Coordinate::from_algebraic("a8"), Coordinate::new(0, 0));
        assert_eq!(Coordinate::from_algebraic("h9"), None);
        assert_eq!(Coordinate::from_algebraic("e"), None);
        assert_eq!(Coordinate::from_algebraic("e44"), None);
    }

    #[test]
    fn test_offset_stays_on_board() {
        let h1 = Coordinate::from_algebraic("h1").unwrap();
        assert_eq!(h1.offset(1, 0), None);
        assert_eq!(h1.offset(0, 1), None);
        assert_eq!(h1.offset(-1, -1), Coordinate::from_algebraic("g2"));
    }

    #[test]
    fn test_serde_rejects_off_board() {
        let json = serde_json::to_string(&Coordinate::new(3, 4).unwrap()).unwrap();
        assert_eq!(json, "[3,4]");
        assert!(serde_json::from_str::<Coordinate>("[9,1]").is_err());
    }
}
