//! Dice values and dice sources.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::GameRng;

/// A face of a six-sided die. Always 1..=6.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DiceValue(u8);

impl DiceValue {
    /// The lowest face. Sessions start showing this value.
    pub const ONE: DiceValue = DiceValue(1);

    /// The face that deploys tokens and grants an extra turn.
    pub const SIX: DiceValue = DiceValue(6);

    /// Create a dice value, rejecting anything outside 1..=6.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 6 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Face value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Whether this roll grants an extra turn.
    #[must_use]
    pub const fn is_six(self) -> bool {
        self.0 == 6
    }
}

impl TryFrom<u8> for DiceValue {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("dice value {value} outside 1..=6"))
    }
}

impl From<DiceValue> for u8 {
    fn from(value: DiceValue) -> Self {
        value.0
    }
}

impl std::fmt::Display for DiceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of dice rolls.
pub trait Dice {
    /// Produce the next roll.
    fn roll(&mut self) -> DiceValue;
}

impl Dice for GameRng {
    fn roll(&mut self) -> DiceValue {
        DiceValue(self.roll_die())
    }
}

/// Scripted dice for tests and replays.
///
/// Yields the given faces in order, then starts over.
///
/// ```
/// use ludo_engine::rules::{Dice, LoadedDice};
///
/// let mut dice = LoadedDice::new([6, 2]).unwrap();
/// assert_eq!(dice.roll().get(), 6);
/// assert_eq!(dice.roll().get(), 2);
/// assert_eq!(dice.roll().get(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct LoadedDice {
    script: Vec<DiceValue>,
    queue: VecDeque<DiceValue>,
}

impl LoadedDice {
    /// Build from raw faces. Returns `None` if the script is empty or any
    /// face is outside 1..=6.
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Option<Self> {
        let script = faces
            .into_iter()
            .map(DiceValue::new)
            .collect::<Option<Vec<_>>>()?;
        if script.is_empty() {
            return None;
        }
        Some(Self {
            queue: script.iter().copied().collect(),
            script,
        })
    }

    /// Queue additional faces ahead of the cycling script.
    pub fn push(&mut self, value: DiceValue) {
        self.queue.push_back(value);
    }
}

impl Dice for LoadedDice {
    fn roll(&mut self) -> DiceValue {
        if self.queue.is_empty() {
            self.queue.extend(self.script.iter().copied());
        }
        self.queue.pop_front().unwrap_or(DiceValue::ONE)
    }
}

impl<D: Dice + ?Sized> Dice for Box<D> {
    fn roll(&mut self) -> DiceValue {
        (**self).roll()
    }
}
