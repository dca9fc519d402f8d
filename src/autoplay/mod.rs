//! Headless play for simulation and soak testing.
//!
//! Runs whole games through the same frame loop a graphical front end
//! would use, choosing a uniformly random legal square each time the
//! session is ready for input.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{Dimensions, GameConfig, GameRng, Square};
use crate::session::{GameSession, SessionEvent, SessionPhase};

/// Configuration for an autoplay run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AutoplayConfig {
    /// Number of games to play.
    pub games: usize,

    /// Base seed; game `i` uses a fork of it.
    pub seed: u64,

    /// Frame limit per game (guards against a stuck loop).
    pub max_steps: usize,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            games: 10,
            seed: 0,
            max_steps: 100_000,
        }
    }
}

impl AutoplayConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of games.
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    /// Set the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the frame limit per game.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
}

/// Picks a random legal square.
#[derive(Clone, Debug)]
pub struct RandomPlacementPolicy {
    rng: GameRng,
}

impl RandomPlacementPolicy {
    /// Create a policy with its own random stream.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Choose one of `squares`, or `None` if there are none.
    pub fn choose(&mut self, squares: &[Square]) -> Option<Square> {
        self.rng.choose(squares).copied()
    }
}

/// Outcome of one autoplayed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Seed the game ran with.
    pub seed: u64,
    /// Final score.
    pub score: u32,
    /// Tiles placed after setup.
    pub placements: usize,
    /// Board upsizes triggered.
    pub upsizes: usize,
    /// Board size at the end.
    pub final_dimensions: Dimensions,
    /// Frames stepped.
    pub steps: usize,
    /// `true` if the game reached game over within the frame limit.
    pub finished: bool,
}

/// Play one game to completion (or the frame limit).
pub fn play_game(config: &GameConfig, seed: u64, max_steps: usize) -> GameSummary {
    let game_config = config.clone().with_seed(seed);
    let tiles = GameRng::new(seed).for_context("tiles");
    let mut policy = RandomPlacementPolicy::new(GameRng::new(seed).for_context("policy"));

    let mut summary = GameSummary {
        seed,
        score: 0,
        placements: 0,
        upsizes: 0,
        final_dimensions: game_config.initial_dimensions,
        steps: 0,
        finished: false,
    };

    let mut session = match GameSession::with_rng(game_config, tiles) {
        Ok(session) => session,
        Err(err) => {
            debug!("autoplay skipped: {}", err);
            return summary;
        }
    };

    while summary.steps < max_steps && !session.is_game_over() {
        let input = match session.phase() {
            SessionPhase::Playing => policy.choose(&session.possible_squares()),
            _ => None,
        };
        session.step(input);
        summary.steps += 1;

        for event in session.drain_events() {
            match event {
                SessionEvent::TilePlaced { .. } => summary.placements += 1,
                SessionEvent::BoardUpsized { .. } => summary.upsizes += 1,
                _ => {}
            }
        }
    }

    summary.score = session.score();
    summary.final_dimensions = session.board().dimensions();
    summary.finished = session.is_game_over();
    debug!(
        "seed {} finished={} score {} after {} placements",
        seed, summary.finished, summary.score, summary.placements
    );
    summary
}

/// Play every game of a run.
pub fn run(autoplay: &AutoplayConfig, config: &GameConfig) -> Vec<GameSummary> {
    let mut seeds = GameRng::new(autoplay.seed);
    (0..autoplay.games)
        .map(|_| play_game(config, seeds.fork().seed(), autoplay.max_steps))
        .collect()
}
