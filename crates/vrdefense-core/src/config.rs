//! Simulation configuration.
//!
//! Passed explicitly into the engine; nothing here is global. Every field
//! has a default from [`crate::constants`], and partial JSON files only
//! override what they name.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{ClockPolicy, FighterKind};

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Configuration for starting a new session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same spawn layout.
    pub seed: u64,
    /// Number of fighters in the recycled pool.
    pub fighter_count: usize,
    /// Hull used for every fighter in the pool.
    pub fighter_kind: FighterKind,
    /// Whether cooldowns keep running while paused.
    pub clock_policy: ClockPolicy,
    pub tuning: Tuning,
}

/// Gameplay tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub missile_damage: i32,
    pub counter_attack_damage: i32,
    pub player_fire_interval_ms: u64,
    pub player_fire_range: f64,
    pub mothership_attack_interval_ms: u64,
    pub fighter_first_delay_ms: u64,
    pub fighter_delay_step_ms: u64,
    pub fighter_target_offset: f64,
    /// Apply the stored hit vector as a knockback impulse.
    pub fighter_knockback: bool,
    pub score_enemy_hit: i32,
    pub score_enemy_destroyed: i32,
    pub score_mothership_hit: i32,
    pub score_destroyer_hit: i32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            fighter_count: FIGHTER_POOL_SIZE,
            fighter_kind: FighterKind::default(),
            clock_policy: ClockPolicy::default(),
            tuning: Tuning::default(),
        }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            missile_damage: MISSILE_DAMAGE,
            counter_attack_damage: COUNTER_ATTACK_DAMAGE,
            player_fire_interval_ms: PLAYER_FIRE_INTERVAL_MS,
            player_fire_range: PLAYER_FIRE_RANGE,
            mothership_attack_interval_ms: MOTHERSHIP_ATTACK_INTERVAL_MS,
            fighter_first_delay_ms: FIGHTER_FIRST_DELAY_MS,
            fighter_delay_step_ms: FIGHTER_DELAY_STEP_MS,
            fighter_target_offset: FIGHTER_TARGET_OFFSET,
            fighter_knockback: false,
            score_enemy_hit: SCORE_ENEMY_HIT,
            score_enemy_destroyed: SCORE_ENEMY_DESTROYED,
            score_mothership_hit: SCORE_MOTHERSHIP_HIT,
            score_destroyer_hit: SCORE_DESTROYER_HIT,
        }
    }
}

impl SimConfig {
    /// Parse a config from JSON text and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tuning.player_fire_range <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "player_fire_range must be positive, got {}",
                self.tuning.player_fire_range
            )));
        }
        if self.tuning.mothership_attack_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "mothership_attack_interval_ms must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
