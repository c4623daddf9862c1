//! Errors raised by session operations.
//!
//! A rejected operation never touches the session.

use thiserror::Error;

use super::state::SessionStatus;
use crate::core::Color;

/// Errors that can occur when applying an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot {operation} while the session is {status}")]
    IllegalState {
        operation: &'static str,
        status: SessionStatus,
    },

    #[error("{seat} cannot act: it is {active}'s turn")]
    NotYourTurn { seat: Color, active: Color },

    #[error("a seat advance is still pending")]
    AdvancePending,

    #[error("every seat is occupied")]
    NoOpenSeat,

    #[error("the match is over")]
    SessionFinished,
}

impl SessionError {
    /// Whether this error means "not allowed right now".
    ///
    /// True for every variant raised because of the session's turn state,
    /// as opposed to a full table.
    #[must_use]
    pub fn is_illegal_state(&self) -> bool {
        matches!(
            self,
            SessionError::IllegalState { .. }
                | SessionError::NotYourTurn { .. }
                | SessionError::AdvancePending
                | SessionError::SessionFinished
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SessionError::IllegalState {
            operation: "roll",
            status: SessionStatus::Moving,
        };
        assert_eq!(err.to_string(), "cannot roll while the session is MOVING");

        let err = SessionError::NotYourTurn {
            seat: Color::Blue,
            active: Color::Red,
        };
        assert_eq!(err.to_string(), "BLUE cannot act: it is RED's turn");
    }

    #[test]
    fn test_illegal_state_class() {
        assert!(SessionError::AdvancePending.is_illegal_state());
        assert!(SessionError::SessionFinished.is_illegal_state());
        assert!(!SessionError::NoOpenSeat.is_illegal_state());
    }
}
