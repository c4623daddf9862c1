//! Operations the reducer accepts.
//!
//! Operations carry everything the reducer needs, including the dice value,
//! so applying one is a pure function of the session and the operation.

use serde::{Deserialize, Serialize};

use crate::core::{Color, TokenId};
use crate::rules::DiceValue;

/// A request to change the session.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// The active seat rolled `value`.
    Roll { seat: Color, value: DiceValue },

    /// The active seat picked a token to move.
    SelectToken { token: TokenId },

    /// A scheduled seat advance fired.
    AdvanceSeat,

    /// A participant takes the first placeholder seat.
    JoinSeat { name: String },
}

impl Operation {
    /// Short verb phrase used in error messages and traces.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Operation::Roll { .. } => "roll",
            Operation::SelectToken { .. } => "select a token",
            Operation::AdvanceSeat => "advance the seat",
            Operation::JoinSeat { .. } => "join a seat",
        }
    }
}
