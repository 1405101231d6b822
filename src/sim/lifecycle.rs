//! Egg hatching, larva outcomes and enemy exits
//!
//! Eggs share one incubation clock: whenever it reaches the incubation
//! threshold the oldest egg hatches and the clock restarts, no matter how
//! many eggs are waiting. Larvae and enemies are only marked here; the
//! registry drops them at the end of the step.

use rand::Rng;

use super::collision::check_collision;
use super::registry::EntityRegistry;
use super::state::{EnemyState, GameEvent, LarvaState};
use crate::config::GameConfig;

/// Shared incubation clock
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lifecycle {
    /// Ticks since the last hatch
    incubation_timer: u32,
}

impl Lifecycle {
    pub fn incubation_timer(&self) -> u32 {
        self.incubation_timer
    }

    /// Run the lifecycle phase of one step
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        registry: &mut EntityRegistry,
        config: &GameConfig,
        rng: &mut R,
        score: &mut u64,
        events: &mut Vec<GameEvent>,
    ) {
        self.advance_incubation(registry, config, rng, events);
        resolve_larvae(registry, config, score, events);
        mark_exited_enemies(registry, events);
    }

    /// Tick the shared clock, hatching the oldest egg when it comes due
    pub fn advance_incubation<R: Rng + ?Sized>(
        &mut self,
        registry: &mut EntityRegistry,
        config: &GameConfig,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        self.incubation_timer = self.incubation_timer.saturating_add(1);
        if self.incubation_timer < config.egg_incubation_ticks {
            return;
        }
        self.incubation_timer = 0;

        if let Some(egg) = registry.pop_oldest_egg() {
            let sprite = rng.random_range(0..config.larva_sprite_variants);
            let larva_id = registry.add_larva(&egg, config.larva_radius, sprite);
            log::debug!("Egg {} hatched into larva {}", egg.id, larva_id);
            events.push(GameEvent::EggHatched {
                egg_id: egg.id,
                larva_id,
            });
        }
    }
}

/// Decide the fate of every live larva
///
/// Contact with an enemy is checked before the scoring boundary, so a larva
/// that is caught on the line counts as eaten.
pub fn resolve_larvae(
    registry: &mut EntityRegistry,
    config: &GameConfig,
    score: &mut u64,
    events: &mut Vec<GameEvent>,
) {
    let EntityRegistry {
        larvae, enemies, ..
    } = registry;

    for larva in larvae.iter_mut().filter(|l| l.is_alive()) {
        let caught = enemies
            .iter()
            .filter(|e| e.is_active())
            .any(|enemy| check_collision(enemy, &*larva, 0.0).collided);

        if caught {
            larva.state = LarvaState::Eaten;
            log::debug!("Larva {} eaten", larva.id);
            events.push(GameEvent::LarvaEaten { id: larva.id });
        } else if larva.pos.y < config.larva_score_boundary {
            larva.state = LarvaState::Scored;
            *score += 1;
            log::debug!("Larva {} reached safety, score {}", larva.id, score);
            events.push(GameEvent::LarvaScored { id: larva.id });
        }
    }
}

/// Mark enemies that have crossed the arena
pub fn mark_exited_enemies(registry: &mut EntityRegistry, events: &mut Vec<GameEvent>) {
    for enemy in registry.enemies.iter_mut().filter(|e| e.is_active()) {
        if enemy.has_exited() {
            enemy.state = EnemyState::Exited;
            log::debug!("Enemy {} left the arena", enemy.id);
            events.push(GameEvent::EnemyExited { id: enemy.id });
        }
    }
}
