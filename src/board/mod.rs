//! The board: permanently placed tiles and growth.
//!
//! The board owns every placed tile, keyed by square. Tiles are never
//! removed during a game, so the score only goes up. When the score
//! passes a benchmark the board grows by a ring of squares on every side
//! ("upsize") and existing tiles shift one square down and right to stay
//! centred.
//!
//! ## Storage
//!
//! Tiles live in an `im::OrdMap`, so cloning the board for a render
//! snapshot shares structure instead of copying.
//!
//! Placement rules live in [`rules`]; pixel geometry in [`layout`].

pub mod layout;
pub mod rules;

pub use layout::BoardLayout;

use im::OrdMap;
use log::info;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Dimensions, Square, Tile, TileId, TileLocation};

/// Squares added to each axis by a single upsize.
pub const UPSIZE_GROWTH: i32 = 2;

/// Benchmarks crossed by one placement, in ascending order.
pub type CrossedBenchmarks = SmallVec<[u32; 2]>;

/// Grid of placed tiles.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    dimensions: Dimensions,
    tiles: OrdMap<Square, Tile>,
    benchmarks: Vec<u32>,
    benchmarks_crossed: Vec<u32>,
}

impl Board {
    /// Create an empty board.
    ///
    /// `benchmarks` must be ascending; see `GameConfig::validate`.
    #[must_use]
    pub fn new(dimensions: Dimensions, benchmarks: Vec<u32>) -> Self {
        Self {
            dimensions,
            tiles: OrdMap::new(),
            benchmarks,
            benchmarks_crossed: Vec::new(),
        }
    }

    /// Current size in squares.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Configured benchmark thresholds.
    #[must_use]
    pub fn benchmarks(&self) -> &[u32] {
        &self.benchmarks
    }

    /// Benchmarks already triggered this game, in the order they fired.
    #[must_use]
    pub fn benchmarks_crossed(&self) -> &[u32] {
        &self.benchmarks_crossed
    }

    /// Number of tiles on the board.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Tile occupying a square, if any.
    #[must_use]
    pub fn tile_at(&self, square: Square) -> Option<&Tile> {
        self.tiles.get(&square)
    }

    /// Iterate placed tiles (ordered by square).
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Find a tile by ID.
    #[must_use]
    pub fn find(&self, id: TileId) -> Option<&Tile> {
        self.tiles.values().find(|t| t.id == id)
    }

    /// Remove every tile and reset size and benchmark history.
    pub fn reset(&mut self, dimensions: Dimensions) {
        self.dimensions = dimensions;
        self.tiles.clear();
        self.benchmarks_crossed.clear();
    }

    /// Put a tile on a square without checking the placement rule.
    ///
    /// Used for game setup (the first tile has no neighbours to sum).
    /// Does not evaluate benchmarks.
    ///
    /// Panics if the square is off the board or already occupied.
    pub fn add_tile(&mut self, id: TileId, value: u32, square: Square) {
        self.insert(Tile::new(id, value, TileLocation::OnBoard(square)));
    }

    /// Adopt a tile that has finished moving onto the board.
    ///
    /// The tile's location becomes `OnBoard(destination)`. Benchmarks
    /// between the old and new score fire in ascending order, each one
    /// upsizing the board before the next is considered.
    ///
    /// Panics if the tile is not in transit, or its destination is taken.
    pub fn adopt(&mut self, mut tile: Tile) -> CrossedBenchmarks {
        let destination = match tile.location {
            TileLocation::InTransit { destination } => destination,
            other => panic!("{} adopted from {:?}, expected in transit", tile.id, other),
        };
        let previous_score = self.score();
        tile.location = TileLocation::OnBoard(destination);
        self.insert(tile);
        self.check_upsize(previous_score, self.score())
    }

    /// Fire every benchmark in `(previous_score, new_score]` that has not
    /// fired yet this game.
    ///
    /// Returns the benchmarks that fired.
    pub fn check_upsize(&mut self, previous_score: u32, new_score: u32) -> CrossedBenchmarks {
        let crossed: CrossedBenchmarks = self
            .benchmarks
            .iter()
            .copied()
            .filter(|&b| previous_score < b && b <= new_score)
            .filter(|b| !self.benchmarks_crossed.contains(b))
            .collect();

        for &benchmark in &crossed {
            self.upsize();
            self.benchmarks_crossed.push(benchmark);
            info!(
                "score passed {}, board grew to {}",
                benchmark, self.dimensions
            );
        }

        crossed
    }

    /// Grow by a ring of squares and shift every tile one square inwards.
    fn upsize(&mut self) {
        self.dimensions = self.dimensions.grown(UPSIZE_GROWTH);
        let shift = UPSIZE_GROWTH / 2;
        self.tiles = self
            .tiles
            .iter()
            .map(|(square, tile)| {
                let square = square.offset(shift, shift);
                let moved = Tile {
                    location: TileLocation::OnBoard(square),
                    ..*tile
                };
                (square, moved)
            })
            .collect();
    }

    fn insert(&mut self, tile: Tile) {
        let square = match tile.location {
            TileLocation::OnBoard(square) => square,
            other => panic!("{} inserted with location {:?}", tile.id, other),
        };
        assert!(
            self.dimensions.contains(square),
            "{} placed outside the {} board at {}",
            tile.id,
            self.dimensions,
            square
        );
        if let Some(existing) = self.tiles.insert(square, tile) {
            panic!("{} placed on {} already held by {}", tile.id, square, existing.id);
        }
    }
}
