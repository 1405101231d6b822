//! Read-only views for the renderer
//!
//! Entity lists come out sorted by height so a top-down renderer can paint
//! them in order and get correct overlap.

use serde::{Deserialize, Serialize};

use super::collision::Collidable;
use super::state::GameState;
use crate::facing_row;

/// Entity kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Obstacle,
    Egg,
    Larva,
    Enemy,
}

/// Render view of one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// Entity ID (0 for the player)
    pub id: u32,
    pub kind: EntityKind,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Kind-specific display key: facing row, obstacle type or sprite variant
    pub sprite: u32,
}

impl EntitySnapshot {
    fn of<C: Collidable>(entity: &C, id: u32, kind: EntityKind, sprite: u32) -> Self {
        let pos = entity.position();
        Self {
            id,
            kind,
            x: pos.x,
            y: pos.y,
            radius: entity.radius(),
            sprite,
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: EntitySnapshot,
    /// Player heading in radians, clockwise from screen-up
    pub facing: f64,
    pub obstacles: Vec<EntitySnapshot>,
    pub eggs: Vec<EntitySnapshot>,
    pub larvae: Vec<EntitySnapshot>,
    pub enemies: Vec<EntitySnapshot>,
    pub score: u64,
    pub running_time_secs: u64,
}

fn painter_order(mut entities: Vec<EntitySnapshot>) -> Vec<EntitySnapshot> {
    entities.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.id.cmp(&b.id)));
    entities
}

impl Snapshot {
    /// Capture the current state
    pub fn capture(state: &GameState, running_time_secs: u64) -> Self {
        let registry = &state.registry;
        let player = registry.player();

        Self {
            player: EntitySnapshot::of(player, 0, EntityKind::Player, facing_row(player.facing)),
            facing: player.facing,
            obstacles: painter_order(
                registry
                    .obstacles()
                    .iter()
                    .map(|o| EntitySnapshot::of(o, o.id, EntityKind::Obstacle, o.obstacle_type))
                    .collect(),
            ),
            eggs: painter_order(
                registry
                    .eggs()
                    .iter()
                    .map(|e| EntitySnapshot::of(e, e.id, EntityKind::Egg, 0))
                    .collect(),
            ),
            larvae: painter_order(
                registry
                    .larvae()
                    .iter()
                    .map(|l| EntitySnapshot::of(l, l.id, EntityKind::Larva, l.sprite))
                    .collect(),
            ),
            enemies: painter_order(
                registry
                    .enemies()
                    .iter()
                    .map(|e| EntitySnapshot::of(e, e.id, EntityKind::Enemy, e.sprite))
                    .collect(),
            ),
            score: state.score,
            running_time_secs,
        }
    }

    /// Total number of entities, player included
    pub fn entity_count(&self) -> usize {
        1 + self.obstacles.len() + self.eggs.len() + self.larvae.len() + self.enemies.len()
    }
}
