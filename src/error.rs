//! Game-level error types.
//!
//! Gameplay outcomes (a lost life, defeat, victory) are state transitions and
//! never errors.  The only hard failures are configuration problems detected
//! at startup, which are reported through [`GameError`] and end the app.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use space_vibes::error::GameResult;
//!
//! fn load() -> GameResult<PlayerConfig> {
//!     let config = PlayerConfig::from_file("assets/player.toml")?;
//!     config.validate()?;
//!     Ok(config)
//! }
//! ```

use std::fmt;

/// Top-level error enum for Space Vibes.
#[derive(Debug)]
pub enum GameError {
    /// A configuration file could not be read from disk.
    ConfigRead {
        /// Path that was attempted.
        path: String,
        source: std::io::Error,
    },

    /// A configuration file was read but is not valid TOML for its schema.
    ConfigParse {
        path: String,
        /// Parser message, including line and column.
        message: String,
    },

    /// A configuration value parsed but is outside its usable range.
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable description of the accepted range.
        reason: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::ConfigRead { path, source } => {
                write!(f, "could not read config '{}': {}", path, source)
            }
            GameError::ConfigParse { path, message } => {
                write!(f, "malformed config '{}': {}", path, message)
            }
            GameError::InvalidConfig { field, reason } => {
                write!(f, "invalid config value '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::ConfigRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn validate_positive(field: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            field,
            reason: "must be a finite number greater than 0",
        })
    }
}

/// Returns an error if a probability lies outside `[0, 1]`.
pub fn validate_probability(field: &'static str, value: f64) -> GameResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            field,
            reason: "must lie within [0, 1]",
        })
    }
}
