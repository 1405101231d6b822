//! Host-facing game loop
//!
//! The host calls [`GameLoop::tick`] once per animation frame with the time
//! since the previous frame. Logical steps run at a fixed rate regardless of
//! how often the host calls in: frequent calls are coalesced, and a long
//! frame still produces a single step rather than a catch-up burst.

use glam::DVec2;

use super::snapshot::Snapshot;
use super::state::GameState;
use super::tick::{TickInput, tick};
use crate::config::{ConfigError, GameConfig};

/// A running session driven by a host clock
#[derive(Debug, Clone)]
pub struct GameLoop {
    state: GameState,
    input: TickInput,
    /// Milliseconds since the last logical step
    accumulator: f64,
    /// Milliseconds since the session started
    elapsed_ms: f64,
    step_interval_ms: f64,
}

impl GameLoop {
    /// Start a session with obstacles placed from `seed`
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self::from_state(GameState::new(config, seed)?))
    }

    /// Drive an existing state
    pub fn from_state(state: GameState) -> Self {
        let config = &state.config;
        Self {
            input: TickInput::new(config.arena_width * 0.5, config.arena_height * 0.5),
            step_interval_ms: config.step_interval_ms(),
            accumulator: 0.0,
            elapsed_ms: 0.0,
            state,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Point the player at a new target (from mouse/touch)
    pub fn set_target(&mut self, x: f64, y: f64) {
        self.input = TickInput::new(x, y);
    }

    pub fn target(&self) -> DVec2 {
        self.input.target
    }

    /// Advance the host clock, running one step if a step interval has passed
    ///
    /// Returns whether a logical step ran. Negative or non-finite frame times
    /// are treated as zero.
    pub fn tick(&mut self, elapsed_ms: f64) -> bool {
        let dt = if elapsed_ms.is_finite() {
            elapsed_ms.max(0.0)
        } else {
            0.0
        };
        self.elapsed_ms += dt;
        self.accumulator += dt;

        if self.accumulator > self.step_interval_ms {
            tick(&mut self.state, &self.input);
            self.accumulator = 0.0;
            true
        } else {
            false
        }
    }

    /// Whole seconds since the session started
    pub fn running_time_secs(&self) -> u64 {
        (self.elapsed_ms / 1000.0).floor() as u64
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    /// Render view of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.running_time_secs())
    }
}
