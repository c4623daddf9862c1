//! The pure turn reducer.
//!
//! `reduce(session, operation, config)` returns the next session, the events
//! it produced, and the seat advance to schedule, if any. It never mutates
//! its input and never touches a clock; the host arms timers from
//! [`Transition::schedule`] and later applies [`Operation::AdvanceSeat`].
//!
//! ## State machine
//!
//! ```text
//! ROLLING --Roll(legal)----> MOVING
//! ROLLING --Roll(no move)--> ROLLING + pending(Forfeit)
//! MOVING  --Select(six)----> ROLLING, same seat
//! MOVING  --Select(other)--> ROLLING + pending(EndOfTurn)
//! pending --AdvanceSeat----> ROLLING, next seat
//! ```

use smallvec::{smallvec, SmallVec};
use tracing::{debug, trace};

use super::error::SessionError;
use super::event::SessionEvent;
use super::operation::Operation;
use super::state::{AdvanceReason, GameSession, PendingAdvance, SessionStatus};
use crate::core::{Color, SessionConfig, TokenId, TokenState, WinRule, HOME_TERMINAL_OFFSET, TOKENS_PER_SEAT};
use crate::rules::{apply_move, has_any_legal_move, DiceValue, MoveKind};

/// Events produced by one transition.
pub type Events = SmallVec<[SessionEvent; 4]>;

/// Result of applying one operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// The session after the operation.
    pub session: GameSession,
    /// What happened, in order.
    pub events: Events,
    /// Seat advance the host must schedule.
    pub schedule: Option<PendingAdvance>,
}

impl Transition {
    fn unchanged(session: &GameSession, events: Events) -> Self {
        Self {
            session: session.clone(),
            events,
            schedule: None,
        }
    }
}

/// Apply `operation` to `session`.
pub fn reduce(
    session: &GameSession,
    operation: &Operation,
    config: &SessionConfig,
) -> Result<Transition, SessionError> {
    trace!(operation = operation.describe(), status = %session.status, seat = %session.current, "reduce");
    match operation {
        Operation::Roll { seat, value } => roll(session, *seat, *value, config),
        Operation::SelectToken { token } => select_token(session, *token, config),
        Operation::AdvanceSeat => advance_seat(session, config),
        Operation::JoinSeat { name } => join_seat(session, name, config),
    }
}

/// Check that `seat` may roll now, without rolling.
///
/// Hosts call this before drawing from their dice so a rejected roll does
/// not consume randomness.
pub fn ensure_can_roll(session: &GameSession, seat: Color) -> Result<(), SessionError> {
    if session.status == SessionStatus::Finished {
        return Err(SessionError::SessionFinished);
    }
    if session.is_advance_pending() {
        return Err(SessionError::AdvancePending);
    }
    if session.status != SessionStatus::Rolling {
        return Err(SessionError::IllegalState {
            operation: "roll",
            status: session.status,
        });
    }
    if seat != session.current {
        return Err(SessionError::NotYourTurn {
            seat,
            active: session.current,
        });
    }
    Ok(())
}

fn roll(
    session: &GameSession,
    seat: Color,
    value: DiceValue,
    config: &SessionConfig,
) -> Result<Transition, SessionError> {
    ensure_can_roll(session, seat)?;

    let mut next = session.clone();
    next.dice_value = value;

    let mut events: Events = smallvec![SessionEvent::Rolled { seat, value }];
    let schedule = if has_any_legal_move(next.active_player(), value) {
        next.status = SessionStatus::Moving;
        None
    } else {
        events.push(SessionEvent::TurnForfeited { seat, value });
        Some(PendingAdvance::for_reason(AdvanceReason::Forfeit, config))
    };
    next.pending = schedule;

    debug!(seat = %seat, dice = value.get(), status = %next.status, forfeited = schedule.is_some(), "rolled");
    Ok(finish(next, events, schedule))
}

fn select_token(
    session: &GameSession,
    token: TokenId,
    config: &SessionConfig,
) -> Result<Transition, SessionError> {
    if session.status == SessionStatus::Finished {
        return Err(SessionError::SessionFinished);
    }
    if session.status != SessionStatus::Moving {
        return Err(SessionError::IllegalState {
            operation: "select a token",
            status: session.status,
        });
    }

    let seat = session.current;
    let dice = session.dice_value;
    let mut next = session.clone();

    let Some(outcome) = apply_move(&mut next.players[seat], token, dice) else {
        debug!(seat = %seat, token = %token, dice = dice.get(), "selection ignored");
        return Ok(Transition::unchanged(
            session,
            smallvec![SessionEvent::SelectionIgnored { token }],
        ));
    };

    let mut events = Events::new();
    match (outcome.kind, outcome.to) {
        (MoveKind::Deployed, _) => events.push(SessionEvent::TokenDeployed { seat, token }),
        (MoveKind::Advanced, _) => events.push(SessionEvent::TokenAdvanced { seat, token }),
        (MoveKind::EnteredHomeStretch, TokenState::OnHomeStretch { offset }) => {
            events.push(SessionEvent::EnteredHomeStretch { seat, token, offset });
        }
        (MoveKind::EnteredHomeStretch, _) => {}
        (MoveKind::Finished, _) => {
            if let TokenState::OnRing { .. } = outcome.from {
                events.push(SessionEvent::EnteredHomeStretch {
                    seat,
                    token,
                    offset: HOME_TERMINAL_OFFSET,
                });
            }
            events.push(SessionEvent::TokenFinished { seat, token });
        }
    }
    next.status = SessionStatus::Rolling;

    let schedule = if has_won(&next, seat, config) {
        next.status = SessionStatus::Finished;
        next.winner = Some(seat);
        events.push(SessionEvent::SessionWon { seat });
        None
    } else if dice.is_six() {
        events.push(SessionEvent::ExtraTurn { seat });
        None
    } else {
        Some(PendingAdvance::for_reason(AdvanceReason::EndOfTurn, config))
    };
    next.pending = schedule;

    debug!(
        seat = %seat,
        token = %token,
        dice = dice.get(),
        from = ?outcome.from,
        to = ?outcome.to,
        status = %next.status,
        "token moved"
    );
    Ok(finish(next, events, schedule))
}

fn has_won(session: &GameSession, seat: Color, config: &SessionConfig) -> bool {
    match config.win_rule {
        WinRule::Never => false,
        WinRule::AllTokensHome => session.players[seat].finished_count() == TOKENS_PER_SEAT,
    }
}

fn advance_seat(session: &GameSession, config: &SessionConfig) -> Result<Transition, SessionError> {
    if session.pending.is_none() {
        return Err(SessionError::IllegalState {
            operation: "advance the seat",
            status: session.status,
        });
    }

    let from = session.current;
    let to = session.next_seat(config);

    let mut next = session.clone();
    next.current = to;
    next.status = SessionStatus::Rolling;
    next.pending = None;
    next.turn += 1;

    debug!(from = %from, to = %to, turn = next.turn, "seat advanced");
    Ok(finish(next, smallvec![SessionEvent::SeatAdvanced { from, to }], None))
}

fn join_seat(session: &GameSession, name: &str, config: &SessionConfig) -> Result<Transition, SessionError> {
    if session.status == SessionStatus::Finished {
        return Err(SessionError::SessionFinished);
    }
    let seat = session.first_open_seat(config).ok_or(SessionError::NoOpenSeat)?;

    let mut next = session.clone();
    next.players[seat].name = name.to_string();

    debug!(seat = %seat, name, "seat joined");
    Ok(finish(
        next,
        smallvec![SessionEvent::PlayerJoined {
            seat,
            name: name.to_string(),
        }],
        None,
    ))
}

/// Render log lines from the finished session, then package the transition.
fn finish(mut session: GameSession, events: Events, schedule: Option<PendingAdvance>) -> Transition {
    let lines: Vec<String> = events.iter().filter_map(|e| e.log_line(&session)).collect();
    for line in lines {
        session.log.push(line);
    }
    Transition {
        session,
        events,
        schedule,
    }
}
