//! Pixel geometry for the render and input collaborators.
//!
//! Boards wider than `max_visible_squares` are drawn scaled down so they
//! keep a fixed on-screen footprint. Pointer positions are mapped back to
//! squares through the same scale; the result may lie off the board.

use serde::{Deserialize, Serialize};

use crate::core::{Dimensions, Square};

/// Tile size and display clamp.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    /// Side of one unscaled square in pixels.
    pub tile_size: f32,
    /// Widest board drawn at full scale.
    pub max_visible_squares: i32,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            tile_size: 40.0,
            max_visible_squares: 15,
        }
    }
}

impl BoardLayout {
    /// Create a layout.
    #[must_use]
    pub fn new(tile_size: f32, max_visible_squares: i32) -> Self {
        Self {
            tile_size,
            max_visible_squares,
        }
    }

    /// Draw scale for a board of the given size.
    #[must_use]
    pub fn scale(&self, dimensions: Dimensions) -> f32 {
        if dimensions.width > self.max_visible_squares {
            self.max_visible_squares as f32 / dimensions.width as f32
        } else {
            1.0
        }
    }

    /// Side of one square on screen.
    #[must_use]
    pub fn square_size(&self, dimensions: Dimensions) -> f32 {
        self.tile_size * self.scale(dimensions)
    }

    /// Square under a board-local pointer position.
    #[must_use]
    pub fn square_at(&self, dimensions: Dimensions, x: f32, y: f32) -> Square {
        let size = self.square_size(dimensions);
        Square::new((x / size).floor() as i32, (y / size).floor() as i32)
    }

    /// Board-local top-left corner of a square.
    #[must_use]
    pub fn square_origin(&self, dimensions: Dimensions, square: Square) -> (f32, f32) {
        let size = self.square_size(dimensions);
        (square.col as f32 * size, square.row as f32 * size)
    }

    /// Queue-local top-left corner of a queue slot.
    #[must_use]
    pub fn queue_slot_origin(&self, slot: usize) -> (f32, f32) {
        (slot as f32 * self.tile_size, 0.0)
    }
}
