//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed logical step only
//! - Injected, seeded RNG only
//! - Stable iteration order (insertion order per entity kind)
//! - No rendering or platform dependencies

pub mod collision;
pub mod driver;
pub mod lifecycle;
pub mod movement;
pub mod registry;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Circle, Collidable, CollisionResult, check_collision, resolve_push};
pub use driver::GameLoop;
pub use lifecycle::Lifecycle;
pub use registry::EntityRegistry;
pub use snapshot::{EntityKind, EntitySnapshot, Snapshot};
pub use spawn::{SpawnScheduler, place_obstacles, spawn_enemy, try_spawn_egg};
pub use state::{
    Egg, Enemy, EnemyState, GameEvent, GameState, Larva, LarvaState, Obstacle, PlacementFrame,
    Player, seek_velocity,
};
pub use tick::{TickInput, tick};
