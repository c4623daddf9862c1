//! Core engine types: seats, players, tokens, RNG, configuration.
//!
//! These are the building blocks the rules and session layers operate on.
//! Nothing here knows about turns or dice legality.

pub mod player;
pub mod token;
pub mod rng;
pub mod config;

pub use player::{Color, Player, SeatMap, SEAT_COUNT, TOKENS_PER_SEAT};
pub use token::{Token, TokenId, TokenState, TokenStatus, HOME_TERMINAL_OFFSET};
pub use rng::{GameRng, GameRngState};
pub use config::{ConfigError, SessionConfig, WinRule, DEFAULT_PLACEHOLDER};
