use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: i8 = 8;

/// Error when parsing a square name such as `"e4"`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid square notation: '{0}'")]
pub struct ParseSquareError(String);

/// A (row, column) coordinate.
///
/// Row 0 is Black's back rank (rank 8) and row 7 is White's back rank
/// (rank 1); column 0 is the a-file. Coordinates are signed so that
/// off-board values, such as [`Position::INVALID`], can be represented and
/// rejected rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: i8,
    col: i8,
}

impl Position {
    /// Sentinel for "no square".
    pub const INVALID: Position = Position::new(-1, -1);

    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn row(self) -> i8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> i8 {
        self.col
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE && self.col >= 0 && self.col < BOARD_SIZE
    }

    /// Grid index (`row * 8 + col`), or `None` for off-board positions.
    #[inline]
    pub const fn index(self) -> Option<usize> {
        if self.is_valid() {
            Some((self.row * BOARD_SIZE + self.col) as usize)
        } else {
            None
        }
    }

    /// Shift by a row/column delta. The result may be off the board.
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8) -> Self {
        Self::new(self.row.saturating_add(dr), self.col.saturating_add(dc))
    }

    /// Iterate every valid square in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str("-");
        }
        let file = char::from(b'a' + self.col as u8);
        let rank = BOARD_SIZE - self.row;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Position {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSquareError(s.to_string());
        let &[file, rank] = s.as_bytes() else {
            return Err(err());
        };
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(err());
        }
        let col = (file - b'a') as i8;
        let row = BOARD_SIZE - (rank - b'0') as i8;
        Ok(Position::new(row, col))
    }
}
