//! Token identity and lifecycle.
//!
//! Every session holds 16 tokens, four per seat. Ids are partitioned by
//! color: RED owns 0..=3, GREEN 4..=7, YELLOW 8..=11, BLUE 12..=15.
//!
//! ## Position encoding
//!
//! A token's position only has meaning relative to its lifecycle stage, so
//! the stage and the coordinate travel together in [`TokenState`]:
//!
//! - `Base`: no coordinate.
//! - `OnRing { index }`: absolute ring index 0..=51, shared by all colors.
//! - `OnHomeStretch { offset }`: color-relative offset 0..=5, 5 is terminal.
//!
//! Collaborators that want the flat `status` + `position` pair use
//! [`TokenState::status`] and [`TokenState::legacy_position`].
//!
//! ```
//! use ludo_engine::core::{Color, TokenId};
//!
//! let id = TokenId::for_seat(Color::Green, 2);
//! assert_eq!(id.raw(), 6);
//! assert_eq!(id.owner(), Color::Green);
//! ```

use serde::{de, Deserialize, Deserializer, Serialize};

use super::player::{Color, TOKENS_PER_SEAT};
use crate::board::RING_LENGTH;

/// Last home-stretch offset. A token resting here has finished.
pub const HOME_TERMINAL_OFFSET: u8 = 5;

/// Stable token identity, unique within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u8);

impl TokenId {
    /// Create a token ID from its raw value.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Id of the `slot`-th token (0..=3) of a seat.
    #[must_use]
    pub const fn for_seat(color: Color, slot: u8) -> Self {
        Self(color.index() as u8 * TOKENS_PER_SEAT as u8 + slot)
    }

    /// Seat that owns this token.
    ///
    /// Ids beyond 15 wrap; callers validate ownership against the player.
    #[must_use]
    pub const fn owner(self) -> Color {
        Color::from_index(self.0 as usize / TOKENS_PER_SEAT)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token({})", self.0)
    }
}

/// Flat lifecycle tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenStatus {
    Base,
    Path,
    Home,
}

/// Lifecycle stage together with the coordinate meaningful for that stage.
///
/// Deserializing rejects coordinates off the board, so a loaded snapshot
/// holds the same ranges the movement rules produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum TokenState {
    /// Waiting in the seat's yard.
    #[default]
    Base,
    /// On the shared ring at an absolute index.
    OnRing { index: u8 },
    /// On the seat's private home stretch at a relative offset.
    OnHomeStretch { offset: u8 },
}

impl TokenState {
    /// Whether the coordinate lies on the board: ring index below 52,
    /// home-stretch offset at most 5.
    #[must_use]
    pub const fn is_on_board(self) -> bool {
        match self {
            TokenState::Base => true,
            TokenState::OnRing { index } => (index as usize) < RING_LENGTH,
            TokenState::OnHomeStretch { offset } => offset <= HOME_TERMINAL_OFFSET,
        }
    }

    /// Flat lifecycle tag.
    #[must_use]
    pub const fn status(self) -> TokenStatus {
        match self {
            TokenState::Base => TokenStatus::Base,
            TokenState::OnRing { .. } => TokenStatus::Path,
            TokenState::OnHomeStretch { .. } => TokenStatus::Home,
        }
    }

    /// Single-integer position: -1 in base, ring index on the path,
    /// home-stretch offset at home.
    #[must_use]
    pub const fn legacy_position(self) -> i32 {
        match self {
            TokenState::Base => -1,
            TokenState::OnRing { index } => index as i32,
            TokenState::OnHomeStretch { offset } => offset as i32,
        }
    }
}

impl<'de> Deserialize<'de> for TokenState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        enum Raw {
            Base,
            OnRing { index: u8 },
            OnHomeStretch { offset: u8 },
        }

        let state = match Raw::deserialize(deserializer)? {
            Raw::Base => TokenState::Base,
            Raw::OnRing { index } => TokenState::OnRing { index },
            Raw::OnHomeStretch { offset } => TokenState::OnHomeStretch { offset },
        };
        if state.is_on_board() {
            Ok(state)
        } else {
            Err(de::Error::custom(format!("token state {state:?} is off the board")))
        }
    }
}

/// The smallest mutable unit of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Stable identity.
    pub id: TokenId,

    /// Lifecycle stage and coordinate.
    pub state: TokenState,
}

impl Token {
    /// Create a token in base.
    #[must_use]
    pub const fn new(id: TokenId) -> Self {
        Self {
            id,
            state: TokenState::Base,
        }
    }

    /// Owning seat.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.id.owner()
    }

    /// Whether the token rests on its terminal home-stretch cell.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state
            == TokenState::OnHomeStretch {
                offset: HOME_TERMINAL_OFFSET,
            }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_id_partition() {
        for color in Color::ALL {
            for slot in 0..4 {
                let id = TokenId::for_seat(color, slot);
                assert_eq!(id.raw() as usize, color.index() * 4 + slot as usize);
                assert_eq!(id.owner(), color);
            }
        }
    }

    #[test]
    fn test_token_id_display() {
        assert_eq!(format!("{}", TokenId::new(13)), "Token(13)");
    }

    #[test]
    fn test_status_and_legacy_position() {
        assert_eq!(TokenState::Base.status(), TokenStatus::Base);
        assert_eq!(TokenState::Base.legacy_position(), -1);

        let ring = TokenState::OnRing { index: 51 };
        assert_eq!(ring.status(), TokenStatus::Path);
        assert_eq!(ring.legacy_position(), 51);

        let home = TokenState::OnHomeStretch { offset: 3 };
        assert_eq!(home.status(), TokenStatus::Home);
        assert_eq!(home.legacy_position(), 3);
    }

    #[test]
    fn test_is_finished() {
        let mut token = Token::new(TokenId::new(0));
        assert!(!token.is_finished());

        token.state = TokenState::OnHomeStretch { offset: 4 };
        assert!(!token.is_finished());

        token.state = TokenState::OnHomeStretch { offset: 5 };
        assert!(token.is_finished());
    }

    #[test]
    fn test_token_serialization() {
        let token = Token {
            id: TokenId::new(9),
            state: TokenState::OnRing { index: 30 },
        };
        let json = serde_json::to_string(&token).unwrap();
        let deserialized: Token = serde_json::from_str(&json).unwrap();

        assert_eq!(token, deserialized);
        assert_eq!(deserialized.color(), Color::Yellow);
    }

    #[test]
    fn test_off_board_state_rejected() {
        assert!(serde_json::from_str::<TokenState>(r#"{"OnHomeStretch":{"offset":253}}"#).is_err());
        assert!(serde_json::from_str::<TokenState>(r#"{"OnHomeStretch":{"offset":6}}"#).is_err());
        assert!(serde_json::from_str::<TokenState>(r#"{"OnRing":{"index":52}}"#).is_err());

        let edge: TokenState = serde_json::from_str(r#"{"OnRing":{"index":51}}"#).unwrap();
        assert_eq!(edge, TokenState::OnRing { index: 51 });
        let base: TokenState = serde_json::from_str(r#""Base""#).unwrap();
        assert_eq!(base, TokenState::Base);
    }

    #[test]
    fn test_is_on_board() {
        assert!(TokenState::Base.is_on_board());
        assert!(TokenState::OnRing { index: 51 }.is_on_board());
        assert!(!TokenState::OnRing { index: 52 }.is_on_board());
        assert!(TokenState::OnHomeStretch { offset: 5 }.is_on_board());
        assert!(!TokenState::OnHomeStretch { offset: 6 }.is_on_board());
    }
}
