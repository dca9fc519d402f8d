//! # connect-plus
//!
//! Rule engine and tile-flow controller for Connect Plus, a single-player
//! number puzzle.
//!
//! Numbered tiles wait in a queue and are placed one at a time onto a
//! square board. A tile may only go on an empty square whose eight
//! neighbours sum to exactly its value. The board grows as the score
//! (sum of placed values) passes benchmarks, and the game ends when the
//! front tile has nowhere to go.
//!
//! ## Design Principles
//!
//! 1. **Explicit ownership**: every tile is owned by the board, the queue,
//!    or the motion controller carrying it between the two, and records
//!    which in its `TileLocation`.
//!
//! 2. **Frame-stepped**: one call to `GameSession::step` is one frame.
//!    Animations are countdowns advanced by that call, never callbacks.
//!
//! 3. **Injected randomness**: tile generation draws from a
//!    `RandomSource`, so games replay exactly from a seed.
//!
//! Drawing, asset loading and input polling belong to the host; the
//! session exposes a snapshot to draw from and takes at most one square
//! per frame as input.
//!
//! ## Modules
//!
//! - `core`: Squares, tiles, RNG, configuration
//! - `board`: Placement rules, score, growth, pixel layout
//! - `queue`: Tiles awaiting placement
//! - `distributor`: Weighted adaptive choice of new tile values
//! - `motion`: Placement animation state machine
//! - `session`: Game lifecycle and frame loop
//! - `autoplay`: Headless random play

pub mod core;
pub mod board;
pub mod queue;
pub mod distributor;
pub mod motion;
pub mod session;
pub mod autoplay;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, Dimensions, GameConfig, GameRng, RandomSource, Square, Tile, TileId, TileLocation,
};

pub use crate::board::{Board, BoardLayout};

pub use crate::queue::Queue;

pub use crate::distributor::{TileValueDistributor, ValueHistogram};

pub use crate::motion::{MotionController, MotionEvent, MotionState};

pub use crate::session::{GameSession, SessionEvent, SessionPhase, SessionSnapshot, TileView};

pub use crate::autoplay::{AutoplayConfig, GameSummary};
