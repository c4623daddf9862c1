//! Game rules: dice and movement legality.
//!
//! Everything here is a pure function of tokens and a dice value. Turn
//! order and scheduling live in [`crate::session`].

pub mod dice;
pub mod movement;

pub use dice::{Dice, DiceValue, LoadedDice};
pub use movement::{
    apply_move, can_move, distance_travelled, has_any_legal_move, legal_tokens, plan_move, MoveKind,
    MoveOutcome,
};
