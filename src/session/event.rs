//! Session events and the bounded log feed.
//!
//! Every transition reports what happened as a list of [`SessionEvent`]s.
//! Most events also render a human-readable line for the log feed; the
//! line is always rendered against the session the transition produced, so
//! names and seats never lag a turn behind.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::state::{GameSession, RESET_LINE};
use crate::core::{Color, TokenId};
use crate::rules::DiceValue;

/// Something that happened during a transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The active seat rolled the dice.
    Rolled { seat: Color, value: DiceValue },

    /// The roll left no legal move; the seat will pass.
    TurnForfeited { seat: Color, value: DiceValue },

    /// A token left base and entered the ring.
    TokenDeployed { seat: Color, token: TokenId },

    /// A token moved along the ring or the home stretch.
    TokenAdvanced { seat: Color, token: TokenId },

    /// A token left the ring for the home stretch.
    EnteredHomeStretch { seat: Color, token: TokenId, offset: u8 },

    /// A token reached the terminal home-stretch cell.
    TokenFinished { seat: Color, token: TokenId },

    /// The roll was a six; the same seat rolls again.
    ExtraTurn { seat: Color },

    /// The turn passed to another seat.
    SeatAdvanced { from: Color, to: Color },

    /// A participant took a placeholder seat.
    PlayerJoined { seat: Color, name: String },

    /// A seat met the configured win rule.
    SessionWon { seat: Color },

    /// A selection named a token that cannot move; nothing changed.
    SelectionIgnored { token: TokenId },

    /// The session was replaced with a fresh one.
    SessionReset,
}

impl SessionEvent {
    /// Line shown in the log feed, or `None` for events the feed omits.
    #[must_use]
    pub fn log_line(&self, session: &GameSession) -> Option<String> {
        let name = |seat: Color| session.players[seat].name.as_str();
        match self {
            SessionEvent::Rolled { seat, value } => Some(format!("{} rolled a {}!", name(*seat), value)),
            SessionEvent::TurnForfeited { seat, .. } => Some(format!("{} has no legal move.", name(*seat))),
            SessionEvent::TokenDeployed { seat, .. } => Some(format!("{} deployed a token!", name(*seat))),
            SessionEvent::EnteredHomeStretch { seat, .. } => {
                Some(format!("{} is on the home stretch!", name(*seat)))
            }
            SessionEvent::TokenFinished { seat, .. } => Some(format!("{} finished a token!", name(*seat))),
            SessionEvent::PlayerJoined { name, .. } => Some(format!("{name} has joined!")),
            SessionEvent::SessionWon { seat } => Some(format!("{} wins!", name(*seat))),
            SessionEvent::SessionReset => Some(RESET_LINE.to_string()),
            SessionEvent::TokenAdvanced { .. }
            | SessionEvent::ExtraTurn { .. }
            | SessionEvent::SeatAdvanced { .. }
            | SessionEvent::SelectionIgnored { .. } => None,
        }
    }
}

/// Bounded log feed, most recent line first.
///
/// Pushing past capacity silently drops the oldest line.
///
/// ```
/// use ludo_engine::session::EventLog;
///
/// let mut log = EventLog::new(2);
/// log.push("a");
/// log.push("b");
/// log.push("c");
/// assert_eq!(log.lines().collect::<Vec<_>>(), vec!["c", "b"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vector<String>,
    capacity: usize,
}

impl EventLog {
    /// Create an empty log. Capacity is at least 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vector::new(),
            capacity: capacity.max(1),
        }
    }

    /// Create a log holding a single line.
    #[must_use]
    pub fn with_line(capacity: usize, line: impl Into<String>) -> Self {
        let mut log = Self::new(capacity);
        log.push(line);
        log
    }

    /// Add a line at the front, dropping the oldest beyond capacity.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push_front(line.into());
        if self.entries.len() > self.capacity {
            self.entries.truncate(self.capacity);
        }
    }

    /// Lines, most recent first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Most recent line.
    #[must_use]
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// Number of lines held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of lines kept.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lines as owned strings, most recent first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}
