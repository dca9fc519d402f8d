//! The tile queue.
//!
//! Tiles wait here in order; the front tile is the next one placed. The
//! queue is full between transitions and one short while the motion
//! controller carries the front tile to the board.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{Tile, TileId, TileLocation};

/// Ordered line of tiles awaiting placement.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Queue {
    capacity: usize,
    tiles: VecDeque<Tile>,
}

impl Queue {
    /// Create an empty queue.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Queue capacity must be at least 1");
        Self {
            capacity,
            tiles: VecDeque::with_capacity(capacity),
        }
    }

    /// Maximum number of tiles.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Check if the queue holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Check if the queue is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.tiles.len() == self.capacity
    }

    /// Next tile to be placed.
    #[must_use]
    pub fn front(&self) -> Option<&Tile> {
        self.tiles.front()
    }

    /// Tile at a slot.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&Tile> {
        self.tiles.get(slot)
    }

    /// Iterate tiles front to back.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Append a new tile at the back.
    ///
    /// Panics if the queue is full.
    pub fn push(&mut self, id: TileId, value: u32) {
        assert!(!self.is_full(), "push onto a full queue ({} tiles)", self.capacity);
        let slot = self.tiles.len();
        self.tiles.push_back(Tile::new(id, value, TileLocation::InQueue(slot)));
    }

    /// Detach the front tile.
    ///
    /// Remaining tiles keep their old slot numbers until [`Queue::reindex`]
    /// runs, which the motion controller triggers once they finish sliding.
    pub fn pop_front(&mut self) -> Option<Tile> {
        self.tiles.pop_front()
    }

    /// Re-derive every tile's slot from its position.
    pub fn reindex(&mut self) {
        for (slot, tile) in self.tiles.iter_mut().enumerate() {
            tile.location = TileLocation::InQueue(slot);
        }
    }

    /// Remove every tile.
    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}
