//! Core types: squares, tiles, RNG, configuration.
//!
//! Everything here is independent of game flow. The board, queue,
//! distributor and motion controller all build on these.

pub mod square;
pub mod tile;
pub mod rng;
pub mod config;

pub use square::{Dimensions, Square};
pub use tile::{Tile, TileId, TileLocation, TILE_COLOURS};
pub use rng::{GameRng, RandomSource};
pub use config::{ConfigError, GameConfig, DEFAULT_BENCHMARKS};
