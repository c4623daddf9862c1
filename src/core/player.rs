//! Seat colors, per-seat storage, and players.
//!
//! ## Color
//!
//! The four fixed seats. Seat order is always RED, GREEN, YELLOW, BLUE.
//!
//! ## SeatMap
//!
//! Exactly-four-entry storage indexed by `Color`, backed by an array for
//! O(1) access and iteration in seat order.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::token::{Token, TokenId};

/// Number of seats in every session.
pub const SEAT_COUNT: usize = 4;

/// Number of tokens each seat owns.
pub const TOKENS_PER_SEAT: usize = 4;

/// Seat color. Doubles as the seat identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    /// All colors in seat order.
    pub const ALL: [Color; SEAT_COUNT] = [Color::Red, Color::Green, Color::Yellow, Color::Blue];

    /// Seat index (0-based, RED = 0).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Green => 1,
            Color::Yellow => 2,
            Color::Blue => 3,
        }
    }

    /// Color for a seat index. Indices wrap modulo 4.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % SEAT_COUNT]
    }

    /// The seat that plays after this one.
    ///
    /// ```
    /// use ludo_engine::core::Color;
    ///
    /// assert_eq!(Color::Red.next(), Color::Green);
    /// assert_eq!(Color::Blue.next(), Color::Red);
    /// ```
    #[must_use]
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Uppercase name, as shown in the log feed.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Green => "GREEN",
            Color::Yellow => "YELLOW",
            Color::Blue => "BLUE",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use ludo_engine::core::{Color, SeatMap};
///
/// let mut scores: SeatMap<u32> = SeatMap::new(|_| 0);
/// scores[Color::Yellow] = 3;
///
/// assert_eq!(scores[Color::Yellow], 3);
/// assert_eq!(scores[Color::Red], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: [T; SEAT_COUNT],
}

impl<T> SeatMap<T> {
    /// Create a SeatMap with values from a factory function.
    pub fn new(factory: impl Fn(Color) -> T) -> Self {
        Self {
            data: Color::ALL.map(factory),
        }
    }

    /// Create a SeatMap with every entry set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, color: Color) -> &T {
        &self.data[color.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, color: Color) -> &mut T {
        &mut self.data[color.index()]
    }

    /// Iterate over (Color, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        Color::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Color, &mut T) pairs in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Color, &mut T)> {
        Color::ALL.into_iter().zip(self.data.iter_mut())
    }

    /// Iterate over the values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<Color> for SeatMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        self.get(color)
    }
}

impl<T> IndexMut<Color> for SeatMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        self.get_mut(color)
    }
}

/// A seat occupant and the four tokens it owns.
///
/// Tokens are never shared: the only way to reach a token is through its
/// owning player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat color.
    pub color: Color,

    /// Display name. Unoccupied seats carry the placeholder name.
    pub name: String,

    /// Whether a computer participant controls this seat.
    pub is_ai: bool,

    /// Owned tokens, ids `color.index() * 4 ..= color.index() * 4 + 3`.
    pub tokens: [Token; TOKENS_PER_SEAT],
}

impl Player {
    /// Create a player with all four tokens in base.
    pub fn new(color: Color, name: impl Into<String>) -> Self {
        let tokens = std::array::from_fn(|slot| Token::new(TokenId::for_seat(color, slot as u8)));
        Self {
            color,
            name: name.into(),
            is_ai: false,
            tokens,
        }
    }

    /// Mark this seat as computer-controlled.
    #[must_use]
    pub fn with_ai(mut self, is_ai: bool) -> Self {
        self.is_ai = is_ai;
        self
    }

    /// Check whether this seat still shows the placeholder name.
    #[must_use]
    pub fn is_placeholder(&self, placeholder: &str) -> bool {
        self.name == placeholder
    }

    /// Find an owned token by id.
    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }

    /// Find an owned token by id, mutably.
    pub fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.tokens.iter_mut().find(|t| t.id == id)
    }

    /// Number of tokens resting on the terminal home-stretch cell.
    #[must_use]
    pub fn finished_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_finished()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::token::TokenState;

    #[test]
    fn test_color_order() {
        assert_eq!(Color::ALL.map(Color::index), [0, 1, 2, 3]);
        assert_eq!(Color::from_index(2), Color::Yellow);
        assert_eq!(Color::from_index(5), Color::Green);
        assert_eq!(format!("{}", Color::Blue), "BLUE");
    }

    #[test]
    fn test_color_next_cycles() {
        let mut color = Color::Red;
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(color);
            color = color.next();
        }
        assert_eq!(seen, vec![Color::Red, Color::Green, Color::Yellow, Color::Blue, Color::Red]);
    }

    #[test]
    fn test_seat_map_new_and_index() {
        let map: SeatMap<usize> = SeatMap::new(|c| c.index() * 10);

        assert_eq!(map[Color::Red], 0);
        assert_eq!(map[Color::Green], 10);
        assert_eq!(map[Color::Yellow], 20);
        assert_eq!(map[Color::Blue], 30);
    }

    #[test]
    fn test_seat_map_mutation() {
        let mut map: SeatMap<i32> = SeatMap::with_value(0);
        map[Color::Green] = 7;
        *map.get_mut(Color::Blue) += 2;

        let pairs: Vec<_> = map.iter().map(|(c, v)| (c, *v)).collect();
        assert_eq!(
            pairs,
            vec![(Color::Red, 0), (Color::Green, 7), (Color::Yellow, 0), (Color::Blue, 2)]
        );
    }

    #[test]
    fn test_player_token_partition() {
        let player = Player::new(Color::Yellow, "Ada");
        let ids: Vec<u8> = player.tokens.iter().map(|t| t.id.raw()).collect();

        assert_eq!(ids, vec![8, 9, 10, 11]);
        assert!(player.tokens.iter().all(|t| t.state == TokenState::Base));
        assert!(player.tokens.iter().all(|t| t.id.owner() == Color::Yellow));
    }

    #[test]
    fn test_player_token_lookup() {
        let mut player = Player::new(Color::Red, "Ada");

        assert!(player.token(TokenId::new(3)).is_some());
        assert!(player.token(TokenId::new(4)).is_none());

        if let Some(token) = player.token_mut(TokenId::new(1)) {
            token.state = TokenState::OnHomeStretch { offset: 5 };
        }
        assert_eq!(player.finished_count(), 1);
    }

    #[test]
    fn test_placeholder() {
        let player = Player::new(Color::Green, "Waiting...");
        assert!(player.is_placeholder("Waiting..."));
        assert!(!player.clone().with_ai(true).is_placeholder("Ada"));
    }

    #[test]
    fn test_seat_map_serialization() {
        let map: SeatMap<u8> = SeatMap::new(|c| c.index() as u8);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: SeatMap<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
