//! Game session and turn sequencing.
//!
//! ## Layers
//!
//! - [`GameSession`]: the observable aggregate (seats, active seat, dice,
//!   status, winner, bounded log).
//! - [`reduce`]: the pure `(session, operation) -> transition` function that
//!   implements the ROLLING/MOVING cycle, extra turns on six, and forfeits.
//! - [`DeferredTimer`] and [`Clock`]: the cancellable seat-advance timer and
//!   the time source it is polled against.
//! - [`LudoGame`]: the host that wires dice, clock, timer, and subscribers
//!   around the reducer.
//!
//! Hosts drive a match by calling the operations on [`LudoGame`] and
//! calling [`LudoGame::poll`] whenever [`LudoGame::next_deadline`] passes.

mod clock;
mod error;
mod event;
mod game;
mod observer;
mod operation;
mod reducer;
mod state;
mod timer;

pub use clock::{Clock, ManualClock, Millis, SystemClock};
pub use error::SessionError;
pub use event::{EventLog, SessionEvent};
pub use game::{create_session, LudoGame, RollOutcome, SavedGame};
pub use observer::{Listener, Subscribers, SubscriptionId};
pub use operation::Operation;
pub use reducer::{ensure_can_roll, reduce, Events, Transition};
pub use state::{AdvanceReason, GameSession, PendingAdvance, SessionStatus, RESET_LINE, WELCOME_LINE};
pub use timer::DeferredTimer;
