//! Tiles and their location.
//!
//! Every tile is owned by exactly one container at a time: the board, the
//! queue, or the motion controller while it travels from one to the other.
//! `TileLocation` records which, and containers check it on insertion.

use serde::{Deserialize, Serialize};

use super::square::Square;

/// Number of distinct tile colours. Values wrap around, so 1 and 16 share one.
pub const TILE_COLOURS: u32 = 15;

/// Unique identifier for a tile within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Where a tile currently lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileLocation {
    /// Placed permanently on a board square.
    OnBoard(Square),
    /// Waiting in the queue at the given slot (0 = front).
    InQueue(usize),
    /// Detached from the queue and animating towards a board square.
    InTransit {
        /// Square the tile will occupy once it settles.
        destination: Square,
    },
}

/// A numbered tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Session-unique ID.
    pub id: TileId,

    /// Face value, always at least 1.
    pub value: u32,

    /// Current owner/location.
    pub location: TileLocation,
}

impl Tile {
    /// Create a tile at the given location.
    #[must_use]
    pub fn new(id: TileId, value: u32, location: TileLocation) -> Self {
        debug_assert!(value >= 1, "tile values start at 1");
        Self { id, value, location }
    }

    /// Check if the tile is placed on the board.
    #[must_use]
    pub fn is_on_board(&self) -> bool {
        matches!(self.location, TileLocation::OnBoard(_))
    }

    /// Board square, if the tile is on the board.
    #[must_use]
    pub fn square(&self) -> Option<Square> {
        match self.location {
            TileLocation::OnBoard(square) => Some(square),
            _ => None,
        }
    }

    /// Queue slot, if the tile is waiting in the queue.
    #[must_use]
    pub fn queue_position(&self) -> Option<usize> {
        match self.location {
            TileLocation::InQueue(slot) => Some(slot),
            _ => None,
        }
    }

    /// Index into the tile colour strip.
    #[must_use]
    pub fn colour_index(&self) -> u32 {
        (self.value - 1) % TILE_COLOURS
    }
}
