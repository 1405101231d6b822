//! Logical simulation step
//!
//! Advances the session by exactly one step, in a fixed phase order:
//! movement and collision correction, lifecycle, spawning, then the
//! registry commit that drops everything marked for removal.

use glam::DVec2;

use super::movement;
use super::state::GameState;

/// Input for a single step (deterministic)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    /// Pointer target the player chases
    pub target: DVec2,
}

impl TickInput {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            target: DVec2::new(x, y),
        }
    }
}

/// Advance the game state by one logical step
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    state.time_ticks += 1;

    movement::update(&mut state.registry, input.target, &state.config);

    let score_before = state.score;
    state.lifecycle.update(
        &mut state.registry,
        &state.config,
        &mut state.rng,
        &mut state.score,
        &mut state.events,
    );
    debug_assert!(state.score >= score_before);

    state
        .spawner
        .update(&mut state.registry, &state.config, &mut state.rng, &mut state.events);

    let (larvae_removed, enemies_removed) = state.registry.commit_removals();
    if larvae_removed + enemies_removed > 0 {
        log::trace!(
            "Tick {}: removed {} larva(e), {} enemy(ies)",
            state.time_ticks,
            larvae_removed,
            enemies_removed
        );
    }
}
