//! # ludo-engine
//!
//! Rules engine for four-seat Ludo.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: every rule change goes through
//!    [`session::reduce`], which maps a session and an operation to a new
//!    session plus events. Hosts own dice, clocks, and timers.
//!
//! 2. **Typed positions**: a token's coordinate lives inside its lifecycle
//!    variant ([`TokenState`]), so a ring index can never be read as a
//!    home-stretch offset.
//!
//! 3. **Deterministic by default**: seeded ChaCha dice and a steppable
//!    clock make whole matches reproducible in tests.
//!
//! ## Modules
//!
//! - `core`: Seats, players, tokens, RNG, configuration
//! - `board`: Ring and home-stretch topology
//! - `rules`: Dice and movement legality
//! - `session`: Session aggregate, reducer, timers, subscribers, host

pub mod core;
pub mod board;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Color, Player, SeatMap,
    Token, TokenId, TokenState, TokenStatus,
    GameRng, GameRngState,
    SessionConfig, WinRule, ConfigError,
};

pub use crate::board::{BoardTopology, Cell};

pub use crate::rules::{Dice, DiceValue, LoadedDice, MoveKind, MoveOutcome};

pub use crate::session::{
    GameSession, SessionStatus, SessionEvent, SessionError, EventLog,
    Operation, Transition, LudoGame, RollOutcome, SavedGame, create_session,
    Clock, ManualClock, SystemClock, DeferredTimer, SubscriptionId,
};
