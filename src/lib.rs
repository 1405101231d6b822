//! Egg Warden - A top-down egg-guarding survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, lifecycle)
//! - `config`: Data-driven session tuning

pub mod config;
pub mod sim;

pub use config::{ConfigError, GameConfig};

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Logical simulation rate (steps per second)
    pub const STEP_RATE_HZ: f64 = 120.0;

    /// Arena dimensions
    pub const ARENA_WIDTH: f64 = 1280.0;
    pub const ARENA_HEIGHT: f64 = 720.0;

    /// Top margin of the placement frames (keeps the player's start area clear)
    pub const PLACEMENT_TOP_MARGIN: f64 = 300.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f64 = 30.0;
    pub const PLAYER_SPEED: f64 = 5.0;
    /// Player can only climb above this line while already heading down
    pub const PLAYER_UPPER_LIMIT: f64 = 270.0;

    /// Obstacle defaults
    pub const OBSTACLE_RADIUS: f64 = 40.0;
    pub const OBSTACLE_COUNT: usize = 10;
    pub const OBSTACLE_SPACING: f64 = 100.0;
    /// Placement attempts allowed per requested obstacle
    pub const OBSTACLE_ATTEMPTS_PER_SLOT: usize = 100;
    /// Obstacle sprite sheet grid (4 x 3 = 12 distinct types)
    pub const OBSTACLE_SHEET_COLUMNS: u32 = 4;
    pub const OBSTACLE_SHEET_ROWS: u32 = 3;

    /// Egg defaults
    pub const EGG_RADIUS: f64 = 45.0;
    pub const MAX_EGGS: usize = 100;
    /// Intervals below are counted in logical steps, not milliseconds
    pub const EGG_SPAWN_INTERVAL: u32 = 100;
    pub const EGG_INCUBATION_TICKS: u32 = 200;

    /// Larva defaults
    pub const LARVA_RADIUS: f64 = 40.0;
    pub const LARVA_DRIFT_SPEED: f64 = 0.5;
    /// Larvae above this line are safe and score
    pub const LARVA_SCORE_BOUNDARY: f64 = 220.0;
    pub const LARVA_SPRITE_VARIANTS: u32 = 2;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f64 = 45.0;
    pub const MAX_ENEMIES: usize = 5;
    /// Logical steps
    pub const ENEMY_SPAWN_INTERVAL: u32 = 300;
    pub const ENEMY_MIN_SPEED: f64 = 1.0;
    pub const ENEMY_MAX_SPEED: f64 = 3.0;
    /// How far past the right edge enemies appear
    pub const ENEMY_SPAWN_OFFSET: f64 = 100.0;
    pub const ENEMY_SPRITE_VARIANTS: u32 = 4;

    /// Gap kept between a pushed entity and the entity it collided with
    pub const PUSH_MARGIN: f64 = 1.0;
}

/// Number of facing directions in the player sprite sheet
pub const FACING_ROWS: u32 = 8;

/// Heading of a screen-space direction, clockwise from screen-up, in [0, 2π)
///
/// Screen coordinates grow downward, so "up" is negative y.
#[inline]
pub fn heading_angle(dir: DVec2) -> f64 {
    dir.x.atan2(-dir.y).rem_euclid(std::f64::consts::TAU)
}

/// Sprite row for a heading (9 sectors over a full turn, the ninth folds back to row 0)
#[inline]
pub fn facing_row(angle: f64) -> u32 {
    let row = (angle * 9.0 / std::f64::consts::TAU).floor() as u32;
    if row < FACING_ROWS { row } else { 0 }
}
