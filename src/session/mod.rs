//! Game session: lifecycle and frame loop.
//!
//! `GameSession` owns the board, queue, distributor and motion controller
//! and moves between three phases:
//!
//! ```text
//! Playing --placement accepted--> Transitioning
//! Transitioning --motion done, moves left--> Playing
//! Transitioning --motion done, no moves--> GameOver
//! any --restart--> Playing
//! ```
//!
//! Input is only acted on in `Playing`, which is what stops a second
//! placement from sneaking in mid-animation. Illegal placements are
//! silently ignored.
//!
//! ## Usage
//!
//! ```
//! use connect_plus::core::{GameConfig, Square};
//! use connect_plus::session::{GameSession, SessionPhase};
//!
//! let mut session = GameSession::new(GameConfig::default()).unwrap();
//!
//! // The first queued tile is always a 1, and a 1 sits in the centre.
//! assert!(session.attempt_placement(Square::new(2, 3)));
//! assert_eq!(session.phase(), SessionPhase::Transitioning);
//!
//! while session.phase() == SessionPhase::Transitioning {
//!     session.step(None);
//! }
//! assert_eq!(session.score(), 2);
//! ```

mod snapshot;

pub use snapshot::{SessionSnapshot, TileView};

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardLayout, UPSIZE_GROWTH};
use crate::core::{
    ConfigError, Dimensions, GameConfig, GameRng, RandomSource, Square, Tile, TileId, TileLocation,
};
use crate::distributor::TileValueDistributor;
use crate::motion::{MotionController, MotionEvent};
use crate::queue::Queue;

/// Session lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for a placement.
    Playing,
    /// A placement is animating; input is ignored.
    Transitioning,
    /// No legal placement remains for the front tile.
    GameOver,
}

/// Signals for the surrounding runtime, in the order they happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A new game was set up.
    Started,
    /// A tile settled on the board.
    TilePlaced {
        /// Placed tile.
        tile: TileId,
        /// Its value.
        value: u32,
        /// Its square after any resulting upsize.
        square: Square,
        /// Score including the tile.
        score: u32,
    },
    /// The board grew.
    BoardUpsized {
        /// Benchmark that triggered the growth.
        benchmark: u32,
        /// Board size after this growth.
        dimensions: Dimensions,
    },
    /// A transition finished and a replacement tile was queued.
    TransitionComplete,
    /// The front tile has nowhere to go.
    GameOver {
        /// Final score.
        score: u32,
    },
}

/// One game of the puzzle, from setup to game over.
#[derive(Debug)]
pub struct GameSession<R: RandomSource = GameRng> {
    config: GameConfig,
    phase: SessionPhase,
    board: Board,
    queue: Queue,
    distributor: TileValueDistributor,
    motion: MotionController,
    layout: BoardLayout,
    rng: R,
    next_tile_id: u32,
    events: Vec<SessionEvent>,
}

impl GameSession<GameRng> {
    /// Create and start a session seeded from `config.seed`.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = GameRng::new(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: RandomSource> GameSession<R> {
    /// Create and start a session drawing tile values from `rng`.
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut session = Self {
            phase: SessionPhase::Playing,
            board: Board::new(config.initial_dimensions, config.benchmarks.clone()),
            queue: Queue::new(config.queue_capacity),
            distributor: TileValueDistributor::new(config.weight_base),
            motion: MotionController::new(config.motion_ticks),
            layout: BoardLayout {
                max_visible_squares: config.max_visible_squares,
                ..BoardLayout::default()
            },
            rng,
            next_tile_id: 0,
            events: Vec::new(),
            config,
        };
        session.start();
        Ok(session)
    }

    // === Accessors ===

    /// Configuration the session was built with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Check if the game has ended.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The queue.
    #[must_use]
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// The motion controller.
    #[must_use]
    pub fn motion(&self) -> &MotionController {
        &self.motion
    }

    /// Pixel layout used for pointer mapping and display scale.
    #[must_use]
    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Replace the pixel layout (e.g. after the window is resized).
    pub fn set_layout(&mut self, layout: BoardLayout) {
        self.layout = layout;
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.board.score()
    }

    /// Value of the next tile to place.
    #[must_use]
    pub fn front_value(&self) -> Option<u32> {
        self.queue.front().map(|t| t.value)
    }

    /// Squares where the front tile may go.
    #[must_use]
    pub fn possible_squares(&self) -> Vec<Square> {
        self.front_value()
            .map(|v| self.board.possible_squares(v))
            .unwrap_or_default()
    }

    /// Square under a board-local pointer position.
    #[must_use]
    pub fn square_at_pointer(&self, x: f32, y: f32) -> Square {
        self.layout.square_at(self.board.dimensions(), x, y)
    }

    /// Take all events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for drawing.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let dimensions = self.board.dimensions();
        SessionSnapshot {
            phase: self.phase,
            dimensions,
            display_scale: self.layout.scale(dimensions),
            score: self.board.score(),
            board: self.board.clone(),
            queue: self
                .queue
                .tiles()
                .map(|t| TileView::new(t, self.motion.progress(t.id)))
                .collect(),
            in_transit: self
                .motion
                .in_transit()
                .map(|t| TileView::new(t, self.motion.progress(t.id))),
            game_over: self.is_game_over(),
        }
    }

    // === Lifecycle ===

    /// Set up a fresh game.
    ///
    /// Clears board and queue, puts a 1 in the centre of the board, queues
    /// an explicit 1 followed by generated tiles, and enters `Playing`.
    pub fn start(&mut self) {
        let dimensions = self.config.initial_dimensions;
        self.motion.reset();
        self.board.reset(dimensions);
        self.queue.clear();
        self.next_tile_id = 0;

        let id = self.alloc_tile_id();
        self.board.add_tile(id, 1, dimensions.centre());
        let id = self.alloc_tile_id();
        self.queue.push(id, 1);
        while !self.queue.is_full() {
            self.queue_generated_tile();
        }

        self.phase = SessionPhase::Playing;
        self.events.push(SessionEvent::Started);
        info!("game started on a {} board", dimensions);

        // Only a board too small to hold a neighbour can be stuck from the start.
        self.check_game_over();
    }

    /// Throw the current game away and start again. Allowed in any phase.
    pub fn restart(&mut self) {
        debug!("restarting from {:?} with score {}", self.phase, self.score());
        self.start();
    }

    // === Play ===

    /// Try to place the front tile on `square`.
    ///
    /// Returns `true` if the placement was accepted and a transition began.
    /// Does nothing outside `Playing` or when the placement rule fails.
    pub fn attempt_placement(&mut self, square: Square) -> bool {
        if self.phase != SessionPhase::Playing {
            trace!("placement at {} ignored during {:?}", square, self.phase);
            return false;
        }
        let Some(value) = self.front_value() else {
            return false;
        };
        if !self.board.can_place(value, square) {
            trace!("rejected {} at {}", value, square);
            return false;
        }

        if self.motion.begin(&mut self.queue, square).is_none() {
            return false;
        }
        self.phase = SessionPhase::Transitioning;
        debug!("placing {} at {}", value, square);
        true
    }

    /// Advance a running transition by one tick.
    pub fn tick(&mut self) {
        if self.phase != SessionPhase::Transitioning {
            return;
        }

        for event in self.motion.tick() {
            match event {
                MotionEvent::TileArrived(tile) => self.settle(tile),
                MotionEvent::QueueSettled => self.queue.reindex(),
                MotionEvent::TransitionComplete => self.on_transition_complete(),
            }
        }
    }

    /// Per-frame entry point.
    ///
    /// Takes at most one primary action (a square under the pointer):
    /// - `Transitioning`: advances the animation; input is ignored.
    /// - `GameOver`: any action restarts.
    /// - `Playing`: an action attempts a placement.
    pub fn step(&mut self, input: Option<Square>) {
        match self.phase {
            SessionPhase::Transitioning => self.tick(),
            SessionPhase::GameOver => {
                if input.is_some() {
                    self.restart();
                }
            }
            SessionPhase::Playing => {
                if let Some(square) = input {
                    self.attempt_placement(square);
                }
            }
        }
    }

    fn settle(&mut self, tile: Tile) {
        let TileLocation::InTransit { destination } = tile.location else {
            unreachable!("{} arrived without a destination", tile.id);
        };
        let before = self.board.dimensions();
        let crossed = self.board.adopt(tile);

        // each upsize shifts the new tile along with the rest
        let shift = crossed.len() as i32 * (UPSIZE_GROWTH / 2);
        let square = destination.offset(shift, shift);
        debug_assert_eq!(self.board.tile_at(square).map(|t| t.id), Some(tile.id));

        self.events.push(SessionEvent::TilePlaced {
            tile: tile.id,
            value: tile.value,
            square,
            score: self.board.score(),
        });
        let mut dimensions = before;
        for benchmark in crossed {
            dimensions = dimensions.grown(UPSIZE_GROWTH);
            self.events.push(SessionEvent::BoardUpsized { benchmark, dimensions });
        }
    }

    fn on_transition_complete(&mut self) {
        self.queue_generated_tile();
        debug_assert!(self.queue.is_full(), "queue not refilled after transition");

        self.phase = SessionPhase::Playing;
        self.events.push(SessionEvent::TransitionComplete);
        debug!(
            "transition complete, next tile {:?}, score {}",
            self.front_value(),
            self.score()
        );
        self.check_game_over();
    }

    fn check_game_over(&mut self) {
        let stuck = self
            .front_value()
            .map_or(true, |v| !self.board.has_possible_square(v));
        if stuck {
            let score = self.score();
            self.phase = SessionPhase::GameOver;
            self.events.push(SessionEvent::GameOver { score });
            info!("game over with score {} on a {} board", score, self.board.dimensions());
        }
    }

    fn queue_generated_tile(&mut self) {
        let value = self.distributor.next_value(&self.board, &self.queue, &mut self.rng);
        let id = self.alloc_tile_id();
        self.queue.push(id, value);
    }

    fn alloc_tile_id(&mut self) -> TileId {
        let id = TileId::new(self.next_tile_id);
        self.next_tile_id += 1;
        id
    }
}
