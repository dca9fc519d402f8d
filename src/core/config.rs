//! Game configuration.
//!
//! `GameConfig` carries every tunable of the puzzle: starting board size,
//! queue capacity, the score benchmarks that grow the board, animation
//! length, the distributor's correction base and the RNG seed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::square::Dimensions;

/// Default score thresholds at which the board grows.
pub const DEFAULT_BENCHMARKS: [u32; 8] = [20, 50, 100, 200, 300, 500, 800, 1300];

/// Reasons a configuration is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Board must be at least one square in each axis.
    #[error("initial dimensions {0} must be at least 1x1")]
    InvalidDimensions(Dimensions),

    /// Queue must hold at least one tile.
    #[error("queue capacity must be at least 1")]
    EmptyQueue,

    /// Animations must last at least one tick.
    #[error("motion ticks must be at least 1")]
    ZeroMotionTicks,

    /// Base must exceed 1 for under-represented values to be favoured.
    #[error("weight base {0} must be greater than 1")]
    InvalidWeightBase(f64),

    /// Benchmarks must be non-zero and strictly ascending.
    #[error("benchmarks must be non-zero and strictly ascending, got {0:?}")]
    UnorderedBenchmarks(Vec<u32>),

    /// Display clamp must allow at least one square.
    #[error("max visible squares must be at least 1")]
    InvalidVisibleSquares,
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board size at the start of each game.
    pub initial_dimensions: Dimensions,

    /// Number of tiles waiting in the queue.
    pub queue_capacity: usize,

    /// Score thresholds that trigger an upsize, ascending.
    pub benchmarks: Vec<u32>,

    /// Ticks a tile takes to move (N). The session holds for N+1.
    pub motion_ticks: u32,

    /// Base of the distributor's exponential correction.
    pub weight_base: f64,

    /// Widest board drawn at full scale; larger boards are scaled down.
    pub max_visible_squares: i32,

    /// Seed for the session RNG.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_dimensions: Dimensions::new(5, 5),
            queue_capacity: 4,
            benchmarks: DEFAULT_BENCHMARKS.to_vec(),
            motion_ticks: 8,
            weight_base: 8.0,
            max_visible_squares: 15,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting board size.
    #[must_use]
    pub fn with_dimensions(mut self, width: i32, height: i32) -> Self {
        self.initial_dimensions = Dimensions::new(width, height);
        self
    }

    /// Set the queue capacity.
    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Replace the benchmark list.
    #[must_use]
    pub fn with_benchmarks(mut self, benchmarks: impl Into<Vec<u32>>) -> Self {
        self.benchmarks = benchmarks.into();
        self
    }

    /// Set the per-tile animation length.
    #[must_use]
    pub fn with_motion_ticks(mut self, ticks: u32) -> Self {
        self.motion_ticks = ticks;
        self
    }

    /// Set the distributor's correction base.
    #[must_use]
    pub fn with_weight_base(mut self, base: f64) -> Self {
        self.weight_base = base;
        self
    }

    /// Set the display clamp.
    #[must_use]
    pub fn with_max_visible_squares(mut self, squares: i32) -> Self {
        self.max_visible_squares = squares;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = self.initial_dimensions;
        if dims.width < 1 || dims.height < 1 {
            return Err(ConfigError::InvalidDimensions(dims));
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::EmptyQueue);
        }
        if self.motion_ticks == 0 {
            return Err(ConfigError::ZeroMotionTicks);
        }
        // Written so NaN fails too.
        if !(self.weight_base > 1.0) {
            return Err(ConfigError::InvalidWeightBase(self.weight_base));
        }
        let ascending = self.benchmarks.windows(2).all(|w| w[0] < w[1]);
        if !ascending || self.benchmarks.first() == Some(&0) {
            return Err(ConfigError::UnorderedBenchmarks(self.benchmarks.clone()));
        }
        if self.max_visible_squares < 1 {
            return Err(ConfigError::InvalidVisibleSquares);
        }
        Ok(())
    }
}
