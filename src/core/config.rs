//! Session configuration.
//!
//! Hosts configure a session at creation time by providing a
//! [`SessionConfig`]. Defaults reproduce the classic client: 1000 ms before a
//! forfeited turn passes, 600 ms before the seat advances after a move, a
//! five-line log, and no win detection.
//!
//! Configs can be built in code:
//!
//! ```
//! use ludo_engine::core::{SessionConfig, WinRule};
//!
//! let config = SessionConfig::default()
//!     .with_seed(7)
//!     .with_win_rule(WinRule::AllTokensHome);
//! assert_eq!(config.seed, 7);
//! ```
//!
//! or parsed from TOML, where every key is optional:
//!
//! ```
//! use ludo_engine::core::SessionConfig;
//!
//! let config = SessionConfig::from_toml_str("log_capacity = 8").unwrap();
//! assert_eq!(config.log_capacity, 8);
//! assert_eq!(config.advance_delay_ms, 600);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name shown for seats nobody occupies.
pub const DEFAULT_PLACEHOLDER: &str = "Waiting...";

/// What ends a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinRule {
    /// Matches never end; finished tokens simply stop moving.
    #[default]
    Never,
    /// The first seat with all four tokens on the terminal cell wins.
    AllTokensHome,
}

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse session config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("log_capacity must be at least 1")]
    ZeroLogCapacity,

    #[error("placeholder_name must not be empty")]
    EmptyPlaceholder,
}

/// Session configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed for the dice RNG.
    /// Same seed produces the same rolls.
    pub seed: u64,

    /// Delay before a turn with no legal move passes to the next seat.
    pub forfeit_delay_ms: u64,

    /// Delay before the seat advances after a non-six move.
    pub advance_delay_ms: u64,

    /// Maximum number of lines kept in the log feed.
    pub log_capacity: usize,

    /// Name given to unoccupied seats.
    pub placeholder_name: String,

    /// Pass over placeholder seats when advancing the turn.
    pub skip_unattended_seats: bool,

    /// Match-ending rule.
    pub win_rule: WinRule,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            forfeit_delay_ms: 1000,
            advance_delay_ms: 600,
            log_capacity: 5,
            placeholder_name: DEFAULT_PLACEHOLDER.to_string(),
            skip_unattended_seats: false,
            win_rule: WinRule::Never,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the type system cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_capacity == 0 {
            return Err(ConfigError::ZeroLogCapacity);
        }
        if self.placeholder_name.is_empty() {
            return Err(ConfigError::EmptyPlaceholder);
        }
        Ok(())
    }

    /// Set the dice seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the forfeit and seat-advance delays.
    #[must_use]
    pub fn with_delays(mut self, forfeit_ms: u64, advance_ms: u64) -> Self {
        self.forfeit_delay_ms = forfeit_ms;
        self.advance_delay_ms = advance_ms;
        self
    }

    /// Set the log capacity. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity.max(1);
        self
    }

    /// Set the placeholder seat name.
    #[must_use]
    pub fn with_placeholder(mut self, name: impl Into<String>) -> Self {
        self.placeholder_name = name.into();
        self
    }

    /// Pass over placeholder seats when advancing the turn.
    #[must_use]
    pub fn skipping_unattended_seats(mut self, skip: bool) -> Self {
        self.skip_unattended_seats = skip;
        self
    }

    /// Set the match-ending rule.
    #[must_use]
    pub fn with_win_rule(mut self, rule: WinRule) -> Self {
        self.win_rule = rule;
        self
    }
}
