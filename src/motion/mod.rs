//! Frame-stepped placement animation.
//!
//! Accepting a placement starts a transition:
//!
//! 1. The front queue tile is detached and carried by the controller
//!    towards its board square for N ticks.
//! 2. Every remaining queue tile slides one slot forward over the same
//!    N ticks.
//! 3. When a tile's countdown reaches 0 it settles: the carried tile is
//!    handed back for the board to adopt, and the queue re-derives its
//!    slot numbers.
//! 4. The transition itself lasts N+1 ticks, so every tile has settled
//!    before [`MotionEvent::TransitionComplete`] fires.
//!
//! Transitions cannot be cancelled. Everything advances through the single
//! [`MotionController::tick`] call, which reports what happened as events.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Square, Tile, TileId, TileLocation};
use crate::queue::Queue;

/// What a moving tile is doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionKind {
    /// Travelling from the queue front to a board square.
    ToBoard {
        /// Square the tile will occupy.
        destination: Square,
    },
    /// Sliding one slot towards the queue front.
    QueueShift,
}

/// Countdown for one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMotion {
    /// Tile being animated.
    pub tile_id: TileId,
    /// Kind of movement.
    pub kind: MotionKind,
    ticks_remaining: u32,
    total_ticks: u32,
}

impl TileMotion {
    fn new(tile_id: TileId, kind: MotionKind, ticks: u32) -> Self {
        Self {
            tile_id,
            kind,
            ticks_remaining: ticks,
            total_ticks: ticks,
        }
    }

    /// Ticks until the tile settles.
    #[must_use]
    pub fn ticks_remaining(&self) -> u32 {
        self.ticks_remaining
    }

    /// Ticks already played.
    #[must_use]
    pub fn ticks_elapsed(&self) -> u32 {
        self.total_ticks - self.ticks_remaining
    }

    /// Fraction of the movement completed, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.ticks_elapsed() as f32 / self.total_ticks as f32
    }
}

/// Controller state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionState {
    /// Nothing moving; placements may be accepted.
    Idle,
    /// A transition is running.
    Transitioning {
        /// Ticks until the transition completes.
        ticks_remaining: u32,
    },
}

/// Something that happened during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionEvent {
    /// The carried tile reached its square and must be adopted by the board.
    TileArrived(Tile),
    /// Queue tiles stopped sliding; slot numbers must be re-derived.
    QueueSettled,
    /// The whole transition is over.
    TransitionComplete,
}

/// Events from a single tick, in the order they happened.
pub type MotionEvents = SmallVec<[MotionEvent; 3]>;

/// Per-tick queue slide, in pixels, for a tile of the given width.
#[must_use]
pub fn queue_shift_per_tick(tile_size: f32, ticks: u32) -> f32 {
    -tile_size / ticks as f32
}

/// Per-tick velocity of a tile travelling linearly from `from` to `to`.
#[must_use]
pub fn placement_velocity(from: (f32, f32), to: (f32, f32), ticks: u32) -> (f32, f32) {
    let n = ticks as f32;
    ((to.0 - from.0) / n, (to.1 - from.1) / n)
}

/// Sequencer for placement transitions.
#[derive(Clone, Debug)]
pub struct MotionController {
    ticks_per_motion: u32,
    state: MotionState,
    in_transit: Option<Tile>,
    motions: SmallVec<[TileMotion; 4]>,
}

impl MotionController {
    /// Create an idle controller whose tiles move for `ticks_per_motion` ticks.
    #[must_use]
    pub fn new(ticks_per_motion: u32) -> Self {
        assert!(ticks_per_motion > 0, "Motion must last at least 1 tick");
        Self {
            ticks_per_motion,
            state: MotionState::Idle,
            in_transit: None,
            motions: SmallVec::new(),
        }
    }

    /// Per-tile animation length (N).
    #[must_use]
    pub fn ticks_per_motion(&self) -> u32 {
        self.ticks_per_motion
    }

    /// Length of a whole transition (N+1).
    #[must_use]
    pub fn transition_ticks(&self) -> u32 {
        self.ticks_per_motion + 1
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> MotionState {
        self.state
    }

    /// Check if no transition is running.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == MotionState::Idle
    }

    /// Tile currently travelling to the board.
    #[must_use]
    pub fn in_transit(&self) -> Option<&Tile> {
        self.in_transit.as_ref()
    }

    /// Active per-tile countdowns.
    #[must_use]
    pub fn motions(&self) -> &[TileMotion] {
        &self.motions
    }

    /// Progress of a tile's movement, if it is moving.
    #[must_use]
    pub fn progress(&self, tile_id: TileId) -> Option<f32> {
        self.motions
            .iter()
            .find(|m| m.tile_id == tile_id)
            .map(TileMotion::progress)
    }

    /// Start a transition carrying the queue's front tile to `destination`.
    ///
    /// Returns the carried tile's ID, or `None` if the queue is empty.
    /// Panics if a transition is already running.
    pub fn begin(&mut self, queue: &mut Queue, destination: Square) -> Option<TileId> {
        assert!(self.is_idle(), "transition started while another is running");

        let mut tile = queue.pop_front()?;
        tile.location = TileLocation::InTransit { destination };

        let n = self.ticks_per_motion;
        self.motions.clear();
        self.motions
            .push(TileMotion::new(tile.id, MotionKind::ToBoard { destination }, n));
        self.motions.extend(
            queue
                .tiles()
                .map(|t| TileMotion::new(t.id, MotionKind::QueueShift, n)),
        );
        self.in_transit = Some(tile);
        self.state = MotionState::Transitioning {
            ticks_remaining: self.transition_ticks(),
        };

        Some(tile.id)
    }

    /// Advance one tick.
    ///
    /// Idle controllers do nothing and return no events.
    pub fn tick(&mut self) -> MotionEvents {
        let mut events = MotionEvents::new();
        let remaining = match self.state {
            MotionState::Idle => return events,
            MotionState::Transitioning { ticks_remaining } => ticks_remaining - 1,
        };

        let mut arrived = false;
        let mut queue_settled = false;
        for motion in &mut self.motions {
            motion.ticks_remaining -= 1;
            if motion.ticks_remaining == 0 {
                match motion.kind {
                    MotionKind::ToBoard { .. } => arrived = true,
                    MotionKind::QueueShift => queue_settled = true,
                }
            }
        }
        self.motions.retain(|m| m.ticks_remaining > 0);

        if arrived {
            if let Some(tile) = self.in_transit.take() {
                events.push(MotionEvent::TileArrived(tile));
            }
        }
        if queue_settled {
            events.push(MotionEvent::QueueSettled);
        }

        if remaining == 0 {
            debug_assert!(self.motions.is_empty(), "tiles still moving at transition end");
            debug_assert!(self.in_transit.is_none(), "carried tile never arrived");
            self.state = MotionState::Idle;
            events.push(MotionEvent::TransitionComplete);
        } else {
            self.state = MotionState::Transitioning { ticks_remaining: remaining };
        }

        events
    }

    /// Abandon any running transition, dropping the carried tile.
    ///
    /// Only used when a whole game is thrown away.
    pub fn reset(&mut self) {
        self.state = MotionState::Idle;
        self.in_transit = None;
        self.motions.clear();
    }
}
