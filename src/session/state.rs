//! The game session: the aggregate every collaborator observes.
//!
//! A session is a plain value. Transitions never patch it in place; the
//! reducer clones it, edits the clone, and hands back the whole new value.
//! The log is an `im` vector, so that clone is cheap.

use serde::{Deserialize, Serialize};

use super::event::EventLog;
use crate::core::{Color, Player, SeatMap, SessionConfig, Token, TokenId};
use crate::rules::DiceValue;

/// Line the log starts with in a brand-new session.
pub const WELCOME_LINE: &str = "Welcome to Ludo!";

/// Line the log starts with after a reset.
pub const RESET_LINE: &str = "Game reset. Waiting for players...";

/// Where the turn state machine stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionStatus {
    /// Waiting for the active seat to roll.
    #[default]
    Rolling,
    /// Rolled; waiting for the active seat to pick a token.
    Moving,
    /// A win rule fired. Only reached when one is configured.
    Finished,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionStatus::Rolling => "ROLLING",
            SessionStatus::Moving => "MOVING",
            SessionStatus::Finished => "FINISHED",
        };
        f.write_str(name)
    }
}

/// Why the turn is about to pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdvanceReason {
    /// The roll left no legal move.
    Forfeit,
    /// A non-six move completed.
    EndOfTurn,
}

/// A seat advance that has been scheduled but has not fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingAdvance {
    pub reason: AdvanceReason,
    pub delay_ms: u64,
}

impl PendingAdvance {
    /// Pending advance for `reason`, with the delay `config` assigns to it.
    #[must_use]
    pub fn for_reason(reason: AdvanceReason, config: &SessionConfig) -> Self {
        let delay_ms = match reason {
            AdvanceReason::Forfeit => config.forfeit_delay_ms,
            AdvanceReason::EndOfTurn => config.advance_delay_ms,
        };
        Self { reason, delay_ms }
    }
}

/// Complete, observable match state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// The four seats in fixed order.
    pub players: SeatMap<Player>,

    /// Whose turn it is.
    pub current: Color,

    /// Last rolled value. Starts at 1.
    pub dice_value: DiceValue,

    /// Turn state machine position.
    pub status: SessionStatus,

    /// Set only when a win rule fires.
    pub winner: Option<Color>,

    /// Bounded log feed, most recent first.
    pub log: EventLog,

    /// Seat advance scheduled by the last transition, if any.
    pub pending: Option<PendingAdvance>,

    /// Number of seat advances so far.
    pub turn: u32,
}

impl GameSession {
    /// Create a session with every token in base and RED to roll.
    ///
    /// Seats without a name get the configured placeholder.
    #[must_use]
    pub fn new(config: &SessionConfig, seat_names: &[Option<String>; 4]) -> Self {
        Self::with_first_line(config, seat_names, WELCOME_LINE)
    }

    /// Same as [`GameSession::new`] but with a custom first log line.
    #[must_use]
    pub fn with_first_line(
        config: &SessionConfig,
        seat_names: &[Option<String>; 4],
        first_line: impl Into<String>,
    ) -> Self {
        let players = SeatMap::new(|color| {
            let name = seat_names[color.index()]
                .clone()
                .unwrap_or_else(|| config.placeholder_name.clone());
            Player::new(color, name)
        });

        Self {
            players,
            current: Color::Red,
            dice_value: DiceValue::ONE,
            status: SessionStatus::Rolling,
            winner: None,
            log: EventLog::with_line(config.log_capacity, first_line),
            pending: None,
            turn: 0,
        }
    }

    /// Seat index of the active seat (0..=3).
    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.current.index()
    }

    /// The active seat's player.
    #[must_use]
    pub fn active_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// Look up any token by id.
    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.players[id.owner()].token(id)
    }

    /// All 16 tokens in seat order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.players.values().flat_map(|p| p.tokens.iter())
    }

    /// Whether a seat advance is waiting to fire.
    #[must_use]
    pub fn is_advance_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The seat that plays after the active one.
    ///
    /// Follows the fixed RED→GREEN→YELLOW→BLUE cycle. With
    /// `skip_unattended_seats`, placeholder seats are passed over; if every
    /// seat is a placeholder the plain successor is used.
    #[must_use]
    pub fn next_seat(&self, config: &SessionConfig) -> Color {
        let successor = self.current.next();
        if !config.skip_unattended_seats {
            return successor;
        }

        let mut seat = successor;
        for _ in 0..Color::ALL.len() {
            if !self.players[seat].is_placeholder(&config.placeholder_name) {
                return seat;
            }
            seat = seat.next();
        }
        successor
    }

    /// First seat still showing the placeholder name.
    #[must_use]
    pub fn first_open_seat(&self, config: &SessionConfig) -> Option<Color> {
        self.players
            .iter()
            .find(|(_, p)| p.is_placeholder(&config.placeholder_name))
            .map(|(color, _)| color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TokenState;

    fn names(list: [Option<&str>; 4]) -> [Option<String>; 4] {
        list.map(|n| n.map(str::to_string))
    }

    #[test]
    fn test_new_session() {
        let config = SessionConfig::default();
        let session = GameSession::new(&config, &names([Some("Ada"), None, None, None]));

        assert_eq!(session.current, Color::Red);
        assert_eq!(session.current_player_index(), 0);
        assert_eq!(session.status, SessionStatus::Rolling);
        assert_eq!(session.dice_value, DiceValue::ONE);
        assert_eq!(session.winner, None);
        assert!(!session.is_advance_pending());
        assert_eq!(session.log.to_vec(), vec![WELCOME_LINE.to_string()]);
        assert_eq!(session.tokens().count(), 16);
        assert!(session.tokens().all(|t| t.state == TokenState::Base));
        assert_eq!(session.players[Color::Red].name, "Ada");
        assert_eq!(session.players[Color::Blue].name, "Waiting...");
    }

    #[test]
    fn test_token_lookup() {
        let session = GameSession::new(&SessionConfig::default(), &Default::default());

        assert_eq!(session.token(TokenId::new(14)).map(|t| t.color()), Some(Color::Blue));
    }

    #[test]
    fn test_next_seat_fixed_cycle() {
        let config = SessionConfig::default();
        let mut session = GameSession::new(&config, &Default::default());

        session.current = Color::Blue;
        assert_eq!(session.next_seat(&config), Color::Red);
    }

    #[test]
    fn test_next_seat_skips_placeholders() {
        let config = SessionConfig::default().skipping_unattended_seats(true);
        let session = GameSession::new(&config, &names([Some("Ada"), None, Some("Cy"), None]));

        assert_eq!(session.next_seat(&config), Color::Yellow);

        let mut at_yellow = session.clone();
        at_yellow.current = Color::Yellow;
        assert_eq!(at_yellow.next_seat(&config), Color::Red);
    }

    #[test]
    fn test_next_seat_all_placeholders() {
        let config = SessionConfig::default().skipping_unattended_seats(true);
        let session = GameSession::new(&config, &Default::default());

        assert_eq!(session.next_seat(&config), Color::Green);
    }

    #[test]
    fn test_next_seat_lone_player_keeps_turn() {
        let config = SessionConfig::default().skipping_unattended_seats(true);
        let session = GameSession::new(&config, &names([Some("Ada"), None, None, None]));

        assert_eq!(session.next_seat(&config), Color::Red);
    }

    #[test]
    fn test_first_open_seat() {
        let config = SessionConfig::default();
        let session = GameSession::new(&config, &names([Some("Ada"), Some("Bo"), None, None]));
        assert_eq!(session.first_open_seat(&config), Some(Color::Yellow));

        let full = GameSession::new(&config, &names([Some("A"), Some("B"), Some("C"), Some("D")]));
        assert_eq!(full.first_open_seat(&config), None);
    }

    #[test]
    fn test_session_serialization() {
        let session = GameSession::new(&SessionConfig::default(), &names([Some("Ada"), None, None, None]));
        let json = serde_json::to_string(&session).unwrap();
        let deserialized: GameSession = serde_json::from_str(&json).unwrap();
        assert_eq!(session, deserialized);
    }
}
