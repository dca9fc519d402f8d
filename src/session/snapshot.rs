//! Read-only view handed to the render collaborator each frame.

use crate::board::Board;
use crate::core::{Dimensions, Tile, TileId, TileLocation};

use super::SessionPhase;

/// Render data for one tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileView {
    /// Tile ID.
    pub id: TileId,
    /// Face value.
    pub value: u32,
    /// Where the tile lives.
    pub location: TileLocation,
    /// Index into the colour strip.
    pub colour_index: u32,
    /// Movement progress in `[0, 1]` while the tile is animating.
    pub motion_progress: Option<f32>,
}

impl TileView {
    pub(crate) fn new(tile: &Tile, motion_progress: Option<f32>) -> Self {
        Self {
            id: tile.id,
            value: tile.value,
            location: tile.location,
            colour_index: tile.colour_index(),
            motion_progress,
        }
    }
}

/// Everything needed to draw one frame.
///
/// The board is a structural clone, so taking a snapshot every frame does
/// not copy the tiles.
#[derive(Clone, Debug)]
pub struct SessionSnapshot {
    /// Session phase.
    pub phase: SessionPhase,
    /// Board size in squares.
    pub dimensions: Dimensions,
    /// Draw scale for the board.
    pub display_scale: f32,
    /// Current score.
    pub score: u32,
    /// Placed tiles.
    pub board: Board,
    /// Queue tiles, front first.
    pub queue: Vec<TileView>,
    /// Tile travelling to the board, if any.
    pub in_transit: Option<TileView>,
    /// Set once no legal placement remains.
    pub game_over: bool,
}

impl SessionSnapshot {
    /// Placed tiles as views.
    pub fn board_tiles(&self) -> impl Iterator<Item = TileView> + '_ {
        self.board.tiles().map(|t| TileView::new(t, None))
    }
}
