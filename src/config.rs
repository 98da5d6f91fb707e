//! Runtime configuration loaded from `assets/`.
//!
//! Two documents are read at startup:
//!
//! | File                 | Resource         | Missing file            | Malformed file           |
//! |----------------------|------------------|-------------------------|--------------------------|
//! | `assets/player.toml` | [`PlayerConfig`] | fatal, app exits        | fatal, app exits         |
//! | `assets/game.toml`   | [`GameConfig`]   | compiled defaults       | warning, defaults        |
//!
//! [`GameConfig`] mirrors the tuneable subset of [`crate::constants`]; missing
//! keys fall back to the compile-time defaults, so a minimal TOML can override
//! just the values you care about.  Keep `src/constants.rs` as the
//! **authoritative default** source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{validate_positive, validate_probability, GameError, GameResult};
use bevy::prelude::*;
use serde::Deserialize;
use std::time::Duration;

/// Location of the required player document.
pub const PLAYER_CONFIG_PATH: &str = "assets/player.toml";

/// Location of the optional tuning document.
pub const GAME_CONFIG_PATH: &str = "assets/game.toml";

// ── Player document ───────────────────────────────────────────────────────────

/// Ship dimensions, speed and starting lives.
///
/// Every field is required; there are no defaults for the player document.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerConfig {
    /// Ship width in pixels; also the horizontal clamp margin (`width / 2`).
    pub width: f32,
    /// Ship height in pixels.
    pub height: f32,
    /// Movement per tick while a direction key is held.
    pub speed: f32,
    /// Starting lives.
    pub lives: u32,
}

impl PlayerConfig {
    /// Parse and validate a player document held in memory.
    pub fn from_toml_str(path: &str, contents: &str) -> GameResult<Self> {
        let config: PlayerConfig =
            toml::from_str(contents).map_err(|e| GameError::ConfigParse {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the player document at `path`.
    pub fn from_file(path: &str) -> GameResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(path, &contents)
    }

    pub fn validate(&self) -> GameResult<()> {
        validate_positive("width", self.width)?;
        validate_positive("height", self.height)?;
        validate_positive("speed", self.speed)?;
        if self.lives == 0 {
            return Err(GameError::InvalidConfig {
                field: "lives",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

// ── Tuning document ───────────────────────────────────────────────────────────

/// Runtime-tunable spawn rates and probabilities.
///
/// Intervals are stored in milliseconds so the TOML stays flat; use the
/// `Duration` accessors in systems.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Arena ─────────────────────────────────────────────────────────────────
    pub arena_width: f32,
    pub arena_height: f32,

    // ── Spawner ───────────────────────────────────────────────────────────────
    pub enemy_spawn_interval_ms: u64,
    pub rock_spawn_interval_ms: u64,
    pub powerup_spawn_interval_ms: u64,
    pub boss_spawn_delay_ms: u64,

    // ── Behaviour ─────────────────────────────────────────────────────────────
    /// Per-tick probability that a single enemy fires.
    pub enemy_fire_chance: f64,
    /// Per-tick probability that the boss starts its laser (phase 2+).
    pub laser_start_chance: f64,
    /// Lifetime of timed power-up effects.
    pub powerup_duration_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            enemy_spawn_interval_ms: ENEMY_SPAWN_INTERVAL.as_millis() as u64,
            rock_spawn_interval_ms: ROCK_SPAWN_INTERVAL.as_millis() as u64,
            powerup_spawn_interval_ms: POWERUP_SPAWN_INTERVAL.as_millis() as u64,
            boss_spawn_delay_ms: BOSS_SPAWN_DELAY.as_millis() as u64,
            enemy_fire_chance: ENEMY_FIRE_CHANCE,
            laser_start_chance: BOSS_LASER_CHANCE,
            powerup_duration_ms: POWERUP_DURATION.as_millis() as u64,
        }
    }
}

impl GameConfig {
    pub fn enemy_spawn_interval(&self) -> Duration {
        Duration::from_millis(self.enemy_spawn_interval_ms)
    }

    pub fn rock_spawn_interval(&self) -> Duration {
        Duration::from_millis(self.rock_spawn_interval_ms)
    }

    pub fn powerup_spawn_interval(&self) -> Duration {
        Duration::from_millis(self.powerup_spawn_interval_ms)
    }

    pub fn boss_spawn_delay(&self) -> Duration {
        Duration::from_millis(self.boss_spawn_delay_ms)
    }

    pub fn powerup_duration(&self) -> Duration {
        Duration::from_millis(self.powerup_duration_ms)
    }

    /// Reject values that would stall or break the simulation.
    pub fn validate(&self) -> GameResult<()> {
        validate_positive("arena_width", self.arena_width)?;
        validate_positive("arena_height", self.arena_height)?;
        validate_probability("enemy_fire_chance", self.enemy_fire_chance)?;
        validate_probability("laser_start_chance", self.laser_start_chance)?;
        for (field, ms) in [
            ("enemy_spawn_interval_ms", self.enemy_spawn_interval_ms),
            ("rock_spawn_interval_ms", self.rock_spawn_interval_ms),
            ("powerup_spawn_interval_ms", self.powerup_spawn_interval_ms),
        ] {
            if ms == 0 {
                return Err(GameError::InvalidConfig {
                    field,
                    reason: "repeating intervals must be at least 1 ms",
                });
            }
        }
        Ok(())
    }
}

// ── Startup systems ───────────────────────────────────────────────────────────

/// Startup system: load the required player document.
///
/// On failure the error is logged and [`AppExit::error`] is requested; the
/// start screen never accepts Enter without a [`PlayerConfig`] resource.
pub fn load_player_config(mut commands: Commands, mut exit: MessageWriter<AppExit>) {
    match PlayerConfig::from_file(PLAYER_CONFIG_PATH) {
        Ok(config) => {
            info!(
                "Loaded player config from {PLAYER_CONFIG_PATH}: {}x{} speed {} lives {}",
                config.width, config.height, config.speed, config.lives
            );
            commands.insert_resource(config);
        }
        Err(e) => {
            error!("{e}");
            exit.write(AppExit::error());
        }
    }
}

/// Startup system: overwrite the [`GameConfig`] resource with any values
/// present in `assets/game.toml`.
///
/// A missing file is not an error (defaults are already in place from
/// `insert_resource`).  Parse or validation errors are logged and the
/// defaults kept.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = GAME_CONFIG_PATH;
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
            Ok(loaded) => match loaded.validate() {
                Ok(()) => {
                    *config = loaded;
                    info!("Loaded game config from {path}");
                }
                Err(e) => warn!("{e}; using defaults"),
            },
            Err(e) => warn!("Failed to parse {path}: {e}; using defaults"),
        },
        Err(_) => info!("No {path} found; using compiled defaults"),
    }
}
