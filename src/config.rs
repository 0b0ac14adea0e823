//! Tunable game constants.
//!
//! Everything the rules depend on lives in [`Config`], so balance changes never
//! touch the simulation code. A JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "MAZE_CHASE_CONFIG";

/// Frame rate the tick-counted durations are expressed against.
pub const TARGET_FPS: u32 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Side of one maze cell, in pixels
    pub tile_size: i32,
    /// Pixels per tick
    pub player_speed: i32,
    pub ghost_speed: i32,
    pub starting_lives: u32,

    pub dot_score: u32,
    pub power_score: u32,
    pub ghost_score: u32,

    /// Power mode length in ticks
    pub power_duration_ticks: u32,
    /// Countdown length in seconds, started by the first player move
    pub game_time_secs: u32,

    /// Chance a ghost keeps its heading at a junction
    pub junction_persistence: f64,
    /// Chance a ghost keeps its heading in a corridor
    pub corridor_persistence: f64,

    /// Frightened ghosts cycle through this many ticks...
    pub blink_period: u32,
    /// ...and are drawn for the first this-many of them.
    pub blink_visible_ticks: u32,

    /// Number of decorative power pellet styles
    pub pellet_variants: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tile_size: 24,
            player_speed: 3,
            ghost_speed: 3,
            starting_lives: 3,

            dot_score: 10,
            power_score: 50,
            ghost_score: 200,

            power_duration_ticks: TARGET_FPS * 10,
            game_time_secs: 90,

            junction_persistence: 0.70,
            corridor_persistence: 0.99,

            blink_period: 30,
            blink_visible_ticks: 15,

            pellet_variants: 4,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load from the file named by [`CONFIG_ENV`], or fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::load(path),
            _ => {
                log::info!("Using default config");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size <= 0 {
            return Err(invalid("tile_size", "must be positive"));
        }
        // Spawns may sit on half-tile offsets.
        if self.tile_size % 2 != 0 {
            return Err(invalid("tile_size", "must be even"));
        }
        let half_tile = self.tile_size / 2;
        for (field, speed) in [
            ("player_speed", self.player_speed),
            ("ghost_speed", self.ghost_speed),
        ] {
            if speed <= 0 {
                return Err(invalid(field, "must be positive"));
            }
            // Agents starting on a half tile must still reach cell origins,
            // otherwise junction lookups never match.
            if half_tile % speed != 0 {
                return Err(invalid(
                    field,
                    format!("must divide half of tile_size {}", self.tile_size),
                ));
            }
        }
        for (field, p) in [
            ("junction_persistence", self.junction_persistence),
            ("corridor_persistence", self.corridor_persistence),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(field, format!("{p} is not a probability")));
            }
        }
        if self.power_duration_ticks == 0 {
            return Err(invalid("power_duration_ticks", "must be positive"));
        }
        if self.blink_period == 0 {
            return Err(invalid("blink_period", "must be positive"));
        }
        if self.blink_visible_ticks > self.blink_period {
            return Err(invalid("blink_visible_ticks", "exceeds blink_period"));
        }
        if self.pellet_variants == 0 {
            return Err(invalid("pellet_variants", "must be positive"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
