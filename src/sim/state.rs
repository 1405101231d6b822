//! Game state and core simulation types
//!
//! Entity records for every kind in the arena, plus the session-wide state
//! that one logical step mutates.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Collidable;
use super::lifecycle::Lifecycle;
use super::registry::EntityRegistry;
use super::spawn::{SpawnScheduler, place_obstacles};
use crate::config::{ConfigError, GameConfig};
use crate::heading_angle;

/// Velocity for a constant-speed chase with an eased arrival
///
/// Far from the target this is a unit vector; within one step of it the
/// vector is scaled so that `velocity * speed` lands exactly on the target.
#[inline]
pub fn seek_velocity(from: DVec2, to: DVec2, speed: f64) -> DVec2 {
    let offset = to - from;
    let distance = offset.length();
    if distance > speed {
        offset / distance
    } else {
        offset / speed
    }
}

/// Axis-aligned region an entity kind may be placed or corrected within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementFrame {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PlacementFrame {
    /// Lower arena frame for a circle of `radius`: below the top margin,
    /// one radius clear of the sides and bottom
    pub fn lower(config: &GameConfig, radius: f64) -> Self {
        Self {
            x_min: radius,
            x_max: config.arena_width - radius,
            y_min: config.placement_top_margin,
            y_max: config.arena_height - radius,
        }
    }

    /// Frame larvae are corrected within on their way to the scoring boundary
    pub fn larva(config: &GameConfig) -> Self {
        Self {
            y_min: config.larva_score_boundary,
            ..Self::lower(config, config.larva_radius)
        }
    }

    #[inline]
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.x_min && x <= self.x_max
    }

    #[inline]
    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.y_min && y <= self.y_max
    }

    pub fn contains(&self, pos: DVec2) -> bool {
        self.contains_x(pos.x) && self.contains_y(pos.y)
    }

    /// Uniform random point inside the frame
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> DVec2 {
        DVec2::new(
            self.x_min + rng.random::<f64>() * (self.x_max - self.x_min),
            self.y_min + rng.random::<f64>() * (self.y_max - self.y_min),
        )
    }

    /// Random height inside the frame's vertical band
    pub fn sample_y<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.y_min + rng.random::<f64>() * (self.y_max - self.y_min)
    }
}

/// The player-controlled creature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: DVec2,
    pub radius: f64,
    /// Distance covered per step at full speed
    pub speed: f64,
    /// Soft ceiling: the player only moves vertically above it when heading down
    pub upper_limit: f64,
    /// Last steering vector (unit length at full speed)
    pub vel: DVec2,
    /// Heading in radians, clockwise from screen-up
    pub facing: f64,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: DVec2::new(config.arena_width * 0.5, config.arena_height * 0.5),
            radius: config.player_radius,
            speed: config.player_speed,
            upper_limit: config.player_upper_limit,
            vel: DVec2::ZERO,
            // Starts facing down, toward the eggs
            facing: std::f64::consts::PI,
        }
    }

    /// Chase the pointer target for one step
    pub fn steer_toward(&mut self, target: DVec2) {
        self.vel = seek_velocity(self.pos, target, self.speed);
        if self.vel != DVec2::ZERO {
            self.facing = heading_angle(self.vel);
        }

        self.pos.x += self.vel.x * self.speed;
        if self.pos.y > self.upper_limit || self.vel.y > 0.0 {
            self.pos.y += self.vel.y * self.speed;
        }
    }
}

impl Collidable for Player {
    fn position(&self) -> DVec2 {
        self.pos
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

/// A static obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: DVec2,
    pub radius: f64,
    /// Sprite sheet cell (column, row)
    pub sheet_cell: (u32, u32),
    /// 1-based type derived from the sheet cell; unique per session
    pub obstacle_type: u32,
}

impl Obstacle {
    pub fn new(id: u32, pos: DVec2, radius: f64, sheet_cell: (u32, u32), sheet_columns: u32) -> Self {
        let (column, row) = sheet_cell;
        Self {
            id,
            pos,
            radius,
            sheet_cell,
            obstacle_type: row * sheet_columns + column + 1,
        }
    }
}

impl Collidable for Obstacle {
    fn position(&self) -> DVec2 {
        self.pos
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

/// An incubating egg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Egg {
    pub id: u32,
    pub pos: DVec2,
    pub radius: f64,
}

impl Collidable for Egg {
    fn position(&self) -> DVec2 {
        self.pos
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

/// Larva outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LarvaState {
    /// Still drifting toward safety
    Alive,
    /// Crossed the scoring boundary
    Scored,
    /// Caught by an enemy
    Eaten,
}

/// A hatched larva drifting toward the top of the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Larva {
    pub id: u32,
    /// Egg this larva hatched from
    pub egg_id: u32,
    pub pos: DVec2,
    pub radius: f64,
    pub state: LarvaState,
    /// Sprite variant
    pub sprite: u32,
}

impl Larva {
    pub fn hatch(id: u32, egg: &Egg, radius: f64, sprite: u32) -> Self {
        Self {
            id,
            egg_id: egg.id,
            pos: egg.pos,
            radius,
            state: LarvaState::Alive,
            sprite,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state == LarvaState::Alive
    }

    #[inline]
    pub fn eaten(&self) -> bool {
        self.state == LarvaState::Eaten
    }

    /// Float upward by `speed`
    pub fn drift(&mut self, speed: f64) {
        self.pos.y -= speed;
    }
}

impl Collidable for Larva {
    fn position(&self) -> DVec2 {
        self.pos
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

/// Enemy status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    Active,
    /// Crossed the far edge of the arena
    Exited,
}

/// A patrolling enemy crossing the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: DVec2,
    /// Point on the opposite side of the arena it heads for
    pub target: DVec2,
    pub radius: f64,
    /// Distance covered per step, drawn once at spawn
    pub speed: f64,
    pub state: EnemyState,
    /// Sprite variant
    pub sprite: u32,
}

impl Enemy {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == EnemyState::Active
    }

    /// Move one step toward the target
    pub fn advance(&mut self) {
        let vel = seek_velocity(self.pos, self.target, self.speed);
        self.pos += vel * self.speed;
    }

    /// Whether the enemy has crossed the arena's left edge
    #[inline]
    pub fn has_exited(&self) -> bool {
        self.pos.x <= 0.0
    }
}

impl Collidable for Enemy {
    fn position(&self) -> DVec2 {
        self.pos
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

/// Something that happened during the last logical step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    EggSpawned { id: u32 },
    EggHatched { egg_id: u32, larva_id: u32 },
    LarvaScored { id: u32 },
    LarvaEaten { id: u32 },
    EnemySpawned { id: u32 },
    EnemyExited { id: u32 },
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session tuning
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Source of all randomness in the session
    pub rng: Pcg32,
    /// Every entity in the arena
    pub registry: EntityRegistry,
    /// Periodic egg/enemy spawning
    pub spawner: SpawnScheduler,
    /// Shared incubation clock
    pub lifecycle: Lifecycle,
    /// Larvae that reached safety
    pub score: u64,
    /// Logical steps taken
    pub time_ticks: u64,
    /// Events from the most recent step
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a session with obstacles placed from the seeded RNG
    ///
    /// Fails if `config` does not pass [`GameConfig::validate`].
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let mut state = Self::empty(config, seed)?;
        let placed = place_obstacles(&mut state.registry, &state.config, &mut state.rng);
        log::info!(
            "Session started with seed {}: {} obstacle(s) placed",
            seed,
            placed
        );
        Ok(state)
    }

    /// Start a session with an empty arena (player only)
    pub fn empty(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, seed, Pcg32::seed_from_u64(seed))
    }

    /// Start an empty session drawing randomness from `rng`
    pub fn with_rng(config: GameConfig, seed: u64, rng: Pcg32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            registry: EntityRegistry::new(Player::new(&config)),
            spawner: SpawnScheduler::new(&config),
            lifecycle: Lifecycle::default(),
            config,
            seed,
            rng,
            score: 0,
            time_ticks: 0,
            events: Vec::new(),
        })
    }
}
