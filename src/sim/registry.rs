//! Authoritative entity collections
//!
//! One typed container per entity kind. Removal is two-phase: the lifecycle
//! pass marks larvae and enemies, and [`EntityRegistry::commit_removals`]
//! compacts the containers once at the end of the step.

use std::collections::VecDeque;

use glam::DVec2;

use super::state::{Egg, Enemy, EnemyState, Larva, Obstacle, Player};

/// Owns every entity in the arena
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    pub(crate) player: Player,
    pub(crate) obstacles: Vec<Obstacle>,
    /// Insertion order is hatch order
    pub(crate) eggs: VecDeque<Egg>,
    pub(crate) larvae: Vec<Larva>,
    pub(crate) enemies: Vec<Enemy>,
    next_id: u32,
}

impl EntityRegistry {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            obstacles: Vec::new(),
            eggs: VecDeque::new(),
            larvae: Vec::new(),
            enemies: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn eggs(&self) -> &VecDeque<Egg> {
        &self.eggs
    }

    pub fn larvae(&self) -> &[Larva] {
        &self.larvae
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Add an obstacle (session init only)
    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Queue a new egg at `pos`, returning its ID
    pub fn add_egg(&mut self, pos: DVec2, radius: f64) -> u32 {
        let id = self.next_entity_id();
        self.eggs.push_back(Egg { id, pos, radius });
        id
    }

    /// Remove the egg that has waited longest
    pub fn pop_oldest_egg(&mut self) -> Option<Egg> {
        self.eggs.pop_front()
    }

    /// Hatch `egg` into a new larva, returning the larva's ID
    pub fn add_larva(&mut self, egg: &Egg, radius: f64, sprite: u32) -> u32 {
        let id = self.next_entity_id();
        self.larvae.push(Larva::hatch(id, egg, radius, sprite));
        id
    }

    /// Add an enemy heading from `pos` to `target`, returning its ID
    pub fn add_enemy(&mut self, pos: DVec2, target: DVec2, radius: f64, speed: f64, sprite: u32) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            pos,
            target,
            radius,
            speed,
            state: EnemyState::Active,
            sprite,
        });
        id
    }

    /// Enemies not yet marked as exited
    pub fn active_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_active()).count()
    }

    /// Drop every larva and enemy that reached a terminal state
    ///
    /// Returns the number of (larvae, enemies) removed.
    pub fn commit_removals(&mut self) -> (usize, usize) {
        let larvae_before = self.larvae.len();
        let enemies_before = self.enemies.len();
        self.larvae.retain(Larva::is_alive);
        self.enemies.retain(Enemy::is_active);
        (
            larvae_before - self.larvae.len(),
            enemies_before - self.enemies.len(),
        )
    }
}
