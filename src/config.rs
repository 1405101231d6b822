//! Session tuning
//!
//! Every gameplay constant a session uses, loadable from a (partial) JSON file.
//! Anything left out of the file falls back to the values in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunable session parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Arena ===
    pub arena_width: f64,
    pub arena_height: f64,
    /// Placement frames start this far below the top edge
    pub placement_top_margin: f64,
    /// Logical steps per second; every `*_interval` and `*_ticks` field
    /// counts these steps (120 per second by default)
    pub step_rate_hz: f64,

    // === Player ===
    pub player_radius: f64,
    pub player_speed: f64,
    pub player_upper_limit: f64,

    // === Obstacles ===
    pub obstacle_radius: f64,
    pub obstacle_count: usize,
    /// Extra clearance required between obstacle circles
    pub obstacle_spacing: f64,
    pub obstacle_attempts_per_slot: usize,
    pub obstacle_sheet_columns: u32,
    pub obstacle_sheet_rows: u32,

    // === Eggs ===
    pub egg_radius: f64,
    pub max_eggs: usize,
    /// Logical steps (not milliseconds) between egg spawn attempts
    pub egg_spawn_interval: u32,
    /// Logical steps of the shared incubation clock between hatches
    pub egg_incubation_ticks: u32,

    // === Larvae ===
    pub larva_radius: f64,
    pub larva_drift_speed: f64,
    pub larva_score_boundary: f64,
    pub larva_sprite_variants: u32,

    // === Enemies ===
    pub enemy_radius: f64,
    pub max_enemies: usize,
    /// Logical steps (not milliseconds) between enemy spawns
    pub enemy_spawn_interval: u32,
    pub enemy_min_speed: f64,
    pub enemy_max_speed: f64,
    pub enemy_spawn_offset: f64,
    pub enemy_sprite_variants: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            placement_top_margin: PLACEMENT_TOP_MARGIN,
            step_rate_hz: STEP_RATE_HZ,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            player_upper_limit: PLAYER_UPPER_LIMIT,

            obstacle_radius: OBSTACLE_RADIUS,
            obstacle_count: OBSTACLE_COUNT,
            obstacle_spacing: OBSTACLE_SPACING,
            obstacle_attempts_per_slot: OBSTACLE_ATTEMPTS_PER_SLOT,
            obstacle_sheet_columns: OBSTACLE_SHEET_COLUMNS,
            obstacle_sheet_rows: OBSTACLE_SHEET_ROWS,

            egg_radius: EGG_RADIUS,
            max_eggs: MAX_EGGS,
            egg_spawn_interval: EGG_SPAWN_INTERVAL,
            egg_incubation_ticks: EGG_INCUBATION_TICKS,

            larva_radius: LARVA_RADIUS,
            larva_drift_speed: LARVA_DRIFT_SPEED,
            larva_score_boundary: LARVA_SCORE_BOUNDARY,
            larva_sprite_variants: LARVA_SPRITE_VARIANTS,

            enemy_radius: ENEMY_RADIUS,
            max_enemies: MAX_ENEMIES,
            enemy_spawn_interval: ENEMY_SPAWN_INTERVAL,
            enemy_min_speed: ENEMY_MIN_SPEED,
            enemy_max_speed: ENEMY_MAX_SPEED,
            enemy_spawn_offset: ENEMY_SPAWN_OFFSET,
            enemy_sprite_variants: ENEMY_SPRITE_VARIANTS,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON (e.g. to write out a starting template)
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("step_rate_hz", self.step_rate_hz),
            ("player_radius", self.player_radius),
            ("player_speed", self.player_speed),
            ("obstacle_radius", self.obstacle_radius),
            ("egg_radius", self.egg_radius),
            ("larva_radius", self.larva_radius),
            ("enemy_radius", self.enemy_radius),
            ("enemy_min_speed", self.enemy_min_speed),
            ("larva_drift_speed", self.larva_drift_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        if !(self.enemy_max_speed.is_finite() && self.enemy_max_speed > self.enemy_min_speed) {
            return Err(ConfigError::Invalid(format!(
                "enemy speed range [{}, {}) is empty",
                self.enemy_min_speed, self.enemy_max_speed
            )));
        }

        let lower_frames = [
            ("egg", self.egg_radius),
            ("obstacle", self.obstacle_radius),
            ("enemy", self.enemy_radius),
        ];
        for (kind, radius) in lower_frames {
            if self.placement_top_margin + radius >= self.arena_height
                || 2.0 * radius >= self.arena_width
            {
                return Err(ConfigError::Invalid(format!(
                    "{kind} placement frame does not fit inside the arena"
                )));
            }
        }

        if self.larva_score_boundary + self.larva_radius >= self.arena_height
            || 2.0 * self.larva_radius >= self.arena_width
        {
            return Err(ConfigError::Invalid(
                "larva frame does not fit inside the arena".to_string(),
            ));
        }

        if self.obstacle_sheet_columns == 0
            || self.obstacle_sheet_rows == 0
            || self.larva_sprite_variants == 0
            || self.enemy_sprite_variants == 0
        {
            return Err(ConfigError::Invalid("sprite grids need at least one cell".to_string()));
        }

        Ok(())
    }

    /// Duration of one logical step in milliseconds
    pub fn step_interval_ms(&self) -> f64 {
        1000.0 / self.step_rate_hz
    }

    /// Total obstacle placement attempts allowed at session start
    pub fn obstacle_attempt_budget(&self) -> usize {
        self.obstacle_count * self.obstacle_attempts_per_slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.obstacle_attempt_budget(), 1000);
        assert!((config.step_interval_ms() - 1000.0 / 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_intervals_are_counted_in_steps() {
        let config = GameConfig::default();
        // 100 steps at 120 Hz is well under a second of host time
        let egg_period_ms = f64::from(config.egg_spawn_interval) * config.step_interval_ms();
        assert!((egg_period_ms - 100.0 * 1000.0 / 120.0).abs() < 1e-9);
        let enemy_period_ms = f64::from(config.enemy_spawn_interval) * config.step_interval_ms();
        assert!((enemy_period_ms - 2500.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "max_enemies": 2, "player_speed": 7.5 }"#)
            .expect("partial config should parse");
        assert_eq!(config.max_enemies, 2);
        assert_eq!(config.player_speed, 7.5);
        assert_eq!(config.egg_radius, EGG_RADIUS);
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let err = GameConfig::from_json(r#"{ "egg_radius": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_empty_enemy_speed_range() {
        let err = GameConfig::from_json(r#"{ "enemy_min_speed": 3.0, "enemy_max_speed": 3.0 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_oversized_obstacle() {
        let err = GameConfig::from_json(r#"{ "obstacle_radius": 700.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("obstacle")));
    }

    #[test]
    fn test_rejects_oversized_enemy() {
        let config = GameConfig {
            enemy_radius: 420.0,
            ..GameConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("enemy")));
    }

    #[test]
    fn test_rejects_non_positive_larva_drift() {
        for json in [r#"{ "larva_drift_speed": 0.0 }"#, r#"{ "larva_drift_speed": -0.5 }"#] {
            let err = GameConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)));
        }
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_json_roundtrip_preserves_values() {
        let mut config = GameConfig::default();
        config.obstacle_count = 4;
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }
}
