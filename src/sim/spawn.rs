//! Egg and enemy spawning, and obstacle placement at session start
//!
//! All randomness comes from the generator passed in, so a seeded generator
//! reproduces every spawn position, obstacle type and enemy speed.

use glam::DVec2;
use rand::Rng;

use super::collision::{Circle, check_collision, overlaps_any};
use super::registry::EntityRegistry;
use super::state::{GameEvent, Obstacle, PlacementFrame};
use crate::config::GameConfig;

/// Periodic spawn timers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnScheduler {
    /// Ticks since the last egg spawn attempt
    egg_timer: u32,
    /// Ticks since the last enemy spawn
    enemy_timer: u32,
}

impl SpawnScheduler {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            // First egg attempt comes right after the session starts
            egg_timer: config.egg_spawn_interval,
            enemy_timer: 0,
        }
    }

    pub fn egg_timer(&self) -> u32 {
        self.egg_timer
    }

    pub fn enemy_timer(&self) -> u32 {
        self.enemy_timer
    }

    /// Advance both timers by one step, spawning when they are due
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        registry: &mut EntityRegistry,
        config: &GameConfig,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        self.update_eggs(registry, config, rng, events);
        self.update_enemies(registry, config, rng, events);
    }

    fn update_eggs<R: Rng + ?Sized>(
        &mut self,
        registry: &mut EntityRegistry,
        config: &GameConfig,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        // At capacity the timer keeps running, so the next free slot is filled at once
        if self.egg_timer > config.egg_spawn_interval && registry.eggs().len() < config.max_eggs {
            if let Some(id) = try_spawn_egg(registry, config, rng) {
                events.push(GameEvent::EggSpawned { id });
            }
            self.egg_timer = 0;
        }
        self.egg_timer = self.egg_timer.saturating_add(1);
    }

    fn update_enemies<R: Rng + ?Sized>(
        &mut self,
        registry: &mut EntityRegistry,
        config: &GameConfig,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        if self.enemy_timer >= config.enemy_spawn_interval
            && registry.active_enemy_count() < config.max_enemies
        {
            let id = spawn_enemy(registry, config, rng);
            events.push(GameEvent::EnemySpawned { id });
            self.enemy_timer = 0;
        }
        self.enemy_timer = self.enemy_timer.saturating_add(1);
    }
}

/// Try to drop one egg at a random spot in the egg frame
///
/// The candidate is rejected if it overlaps any obstacle or egg; there is no
/// retry until the next spawn period.
pub fn try_spawn_egg<R: Rng + ?Sized>(
    registry: &mut EntityRegistry,
    config: &GameConfig,
    rng: &mut R,
) -> Option<u32> {
    let frame = PlacementFrame::lower(config, config.egg_radius);
    let candidate = Circle::new(frame.sample(rng), config.egg_radius);

    if overlaps_any(&candidate, registry.obstacles()) || overlaps_any(&candidate, registry.eggs()) {
        log::debug!("Egg spawn at {:?} rejected: overlap", candidate.pos);
        return None;
    }

    let id = registry.add_egg(candidate.pos, candidate.radius);
    log::debug!("Egg {} spawned at {:?}", id, candidate.pos);
    Some(id)
}

/// Send a new enemy across the arena from beyond the right edge
///
/// Enemies may appear on top of each other; steering sorts that out.
pub fn spawn_enemy<R: Rng + ?Sized>(registry: &mut EntityRegistry, config: &GameConfig, rng: &mut R) -> u32 {
    let band = PlacementFrame::lower(config, config.enemy_radius);
    let pos = DVec2::new(config.arena_width + config.enemy_spawn_offset, band.sample_y(rng));
    let target = DVec2::new(-2.0 * config.enemy_radius, band.sample_y(rng));
    let speed = rng.random_range(config.enemy_min_speed..config.enemy_max_speed);
    let sprite = rng.random_range(0..config.enemy_sprite_variants);

    let id = registry.add_enemy(pos, target, config.enemy_radius, speed, sprite);
    log::debug!("Enemy {} spawned at {:?} with speed {:.2}", id, pos, speed);
    id
}

/// Scatter obstacles over the lower arena by bounded brute-force search
///
/// A candidate is accepted only if it keeps `obstacle_spacing` clear of every
/// placed obstacle and its type is not already used. The search stops once
/// `obstacle_count` obstacles are placed or the attempt budget is spent;
/// running out of budget just leaves the arena sparser. Returns the number placed.
pub fn place_obstacles<R: Rng + ?Sized>(
    registry: &mut EntityRegistry,
    config: &GameConfig,
    rng: &mut R,
) -> usize {
    let frame = PlacementFrame::lower(config, config.obstacle_radius);
    let budget = config.obstacle_attempt_budget();
    let mut attempts = 0;
    let mut placed = 0;

    while attempts < budget && placed < config.obstacle_count {
        attempts += 1;

        let pos = frame.sample(rng);
        let cell = (
            rng.random_range(0..config.obstacle_sheet_columns),
            rng.random_range(0..config.obstacle_sheet_rows),
        );
        let candidate = Obstacle::new(0, pos, config.obstacle_radius, cell, config.obstacle_sheet_columns);

        let acceptable = registry.obstacles().iter().all(|existing| {
            !check_collision(existing, &candidate, config.obstacle_spacing).collided
                && existing.obstacle_type != candidate.obstacle_type
        });

        if acceptable {
            let id = registry.next_entity_id();
            registry.add_obstacle(Obstacle { id, ..candidate });
            placed += 1;
        }
    }

    if placed < config.obstacle_count {
        log::warn!(
            "Obstacle placement gave up after {} attempts: {}/{} placed",
            attempts,
            placed,
            config.obstacle_count
        );
    } else {
        log::debug!("Placed {} obstacles in {} attempts", placed, attempts);
    }

    placed
}
