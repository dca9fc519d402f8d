//! Placement rules.
//!
//! A tile of value `v` may go on a square when the square is on the board,
//! empty, and the values of its eight neighbours sum to exactly `v`.
//! Off-board squares are ordinary input (they come straight from pointer
//! mapping) and are simply not placeable.

use super::Board;
use crate::core::Square;

impl Board {
    /// Sum of the tiles on the eight neighbouring squares.
    ///
    /// Empty or off-board neighbours contribute 0.
    #[must_use]
    pub fn adjacent_sum(&self, square: Square) -> u32 {
        square
            .neighbours()
            .into_iter()
            .filter_map(|n| self.tile_at(n))
            .map(|t| t.value)
            .sum()
    }

    /// Check if a square is on the board and unoccupied.
    #[must_use]
    pub fn is_square_free(&self, square: Square) -> bool {
        self.dimensions().contains(square) && self.tile_at(square).is_none()
    }

    /// The placement rule.
    #[must_use]
    pub fn can_place(&self, value: u32, square: Square) -> bool {
        self.is_square_free(square) && self.adjacent_sum(square) == value
    }

    /// Every square where `value` may be placed, in row-major order.
    #[must_use]
    pub fn possible_squares(&self, value: u32) -> Vec<Square> {
        self.dimensions()
            .squares()
            .filter(|&sq| self.can_place(value, sq))
            .collect()
    }

    /// Check if `value` has anywhere to go. Stops at the first hit.
    #[must_use]
    pub fn has_possible_square(&self, value: u32) -> bool {
        self.dimensions().squares().any(|sq| self.can_place(value, sq))
    }

    /// Sum of all placed tile values.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.tiles().map(|t| t.value).sum()
    }
}
