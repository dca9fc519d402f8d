//! Grid coordinates.
//!
//! Squares are signed so that pointer input mapped from outside the board
//! (negative or past the far edge) is representable and can simply be
//! rejected by the placement rules.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A square on the board, addressed by column and row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    /// Column index (x axis).
    pub col: i32,
    /// Row index (y axis).
    pub row: i32,
}

impl Square {
    /// Create a new square.
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Square shifted by the given offsets.
    #[must_use]
    pub const fn offset(self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }

    /// The eight squares at Chebyshev distance 1.
    ///
    /// Neighbours are not bounds-checked; callers filter against the board.
    #[must_use]
    pub fn neighbours(self) -> SmallVec<[Square; 8]> {
        let mut out = SmallVec::new();
        for drow in -1..=1 {
            for dcol in -1..=1 {
                if dcol != 0 || drow != 0 {
                    out.push(self.offset(dcol, drow));
                }
            }
        }
        out
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

impl From<(i32, i32)> for Square {
    fn from((col, row): (i32, i32)) -> Self {
        Self::new(col, row)
    }
}

/// Board size measured in squares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    /// Number of columns.
    pub width: i32,
    /// Number of rows.
    pub height: i32,
}

impl Dimensions {
    /// Create new dimensions.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Check if a square lies within `[0,width) x [0,height)`.
    #[must_use]
    pub const fn contains(self, square: Square) -> bool {
        square.col >= 0 && square.row >= 0 && square.col < self.width && square.row < self.height
    }

    /// Total number of squares.
    #[must_use]
    pub const fn area(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Centre square (rounded towards the origin for even sizes).
    #[must_use]
    pub const fn centre(self) -> Square {
        Square::new(self.width / 2, self.height / 2)
    }

    /// Dimensions grown by `amount` in each axis.
    #[must_use]
    pub const fn grown(self, amount: i32) -> Self {
        Self::new(self.width + amount, self.height + amount)
    }

    /// Iterate all squares in row-major order.
    pub fn squares(self) -> impl Iterator<Item = Square> {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Square::new(col, row)))
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
