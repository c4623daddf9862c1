//! The session host.
//!
//! [`LudoGame`] owns the current [`GameSession`] and everything impure around
//! the reducer: the dice, the clock, the deferred seat-advance timer, and the
//! subscribers. Every public operation runs one reducer step, swaps in the
//! whole new session, arms or cancels the timer, and notifies subscribers.
//!
//! ## Example
//!
//! ```
//! use ludo_engine::core::{Color, SessionConfig, TokenId};
//! use ludo_engine::rules::LoadedDice;
//! use ludo_engine::session::{LudoGame, ManualClock, SessionStatus};
//!
//! let clock = ManualClock::new();
//! let dice = LoadedDice::new([6, 3]).unwrap();
//! let mut game = LudoGame::with_dice_and_clock(
//!     SessionConfig::default(),
//!     [Some("Ada".into()), None, None, None],
//!     dice,
//!     clock.clone(),
//! );
//!
//! game.roll(Color::Red).unwrap();
//! game.select_token(TokenId::new(0)).unwrap();
//! assert_eq!(game.session().current, Color::Red); // six: extra turn
//!
//! game.roll(Color::Red).unwrap();
//! game.select_token(TokenId::new(0)).unwrap();
//! clock.advance(600);
//! game.poll();
//! assert_eq!(game.session().current, Color::Green);
//! assert_eq!(game.session().status, SessionStatus::Rolling);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::smallvec;
use tracing::{debug, info, warn};

use super::clock::{Clock, Millis, SystemClock};
use super::error::SessionError;
use super::event::SessionEvent;
use super::observer::{Subscribers, SubscriptionId};
use super::operation::Operation;
use super::reducer::{ensure_can_roll, reduce, Events, Transition};
use super::state::{GameSession, PendingAdvance, SessionStatus, RESET_LINE};
use super::timer::DeferredTimer;
use crate::core::{Color, ConfigError, GameRng, GameRngState, SessionConfig, TokenId};
use crate::rules::{Dice, DiceValue};

/// Result of a successful roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollOutcome {
    /// The rolled value.
    pub dice: DiceValue,
    /// Session status after the roll.
    pub status: SessionStatus,
    /// Whether the roll left no legal move.
    pub forfeited: bool,
}

/// Everything needed to resume a match with the same upcoming rolls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub config: SessionConfig,
    pub seat_names: [Option<String>; 4],
    pub session: GameSession,
    /// Position of the dice stream.
    pub dice: GameRngState,
}

/// Create a session host with seeded dice and the system clock.
#[must_use]
pub fn create_session(config: SessionConfig, seat_names: [Option<String>; 4]) -> LudoGame {
    LudoGame::new(config, seat_names)
}

/// Hosts one match: session, dice, clock, timer, subscribers.
pub struct LudoGame<D = GameRng, C = SystemClock> {
    config: SessionConfig,
    seat_names: [Option<String>; 4],
    session: GameSession,
    last_events: Events,
    dice: D,
    clock: C,
    timer: DeferredTimer<PendingAdvance>,
    subscribers: Subscribers,
}

impl LudoGame<GameRng, SystemClock> {
    /// Create a session with dice seeded from `config.seed`.
    #[must_use]
    pub fn new(config: SessionConfig, seat_names: [Option<String>; 4]) -> Self {
        let dice = GameRng::new(config.seed).for_context("dice");
        Self::with_dice_and_clock(config, seat_names, dice, SystemClock::new())
    }
}

impl<C: Clock> LudoGame<GameRng, C> {
    /// Capture the session and the dice position.
    #[must_use]
    pub fn save(&self) -> SavedGame {
        SavedGame {
            config: self.config.clone(),
            seat_names: self.seat_names.clone(),
            session: self.session.clone(),
            dice: self.dice.state(),
        }
    }

    /// Resume a saved match on `clock`.
    ///
    /// A seat advance that was pending when the match was saved is armed
    /// again with its full delay.
    pub fn restore(saved: SavedGame, clock: C) -> Result<Self, ConfigError> {
        saved.config.validate()?;
        let dice = GameRng::from_state(&saved.dice);
        let mut game = Self::with_dice_and_clock(saved.config, saved.seat_names, dice, clock);
        game.session = saved.session;
        if let Some(pending) = game.session.pending {
            game.timer.arm(game.clock.now(), pending.delay_ms, pending);
        }
        info!(seat = %game.session.current, turn = game.session.turn, "session restored");
        Ok(game)
    }
}

impl<D: Dice, C: Clock> LudoGame<D, C> {
    /// Create a session with explicit dice and clock.
    pub fn with_dice_and_clock(config: SessionConfig, seat_names: [Option<String>; 4], dice: D, clock: C) -> Self {
        let session = GameSession::new(&config, &seat_names);
        info!(
            seats = ?session.players.values().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            "session created"
        );
        Self {
            config,
            seat_names,
            session,
            last_events: Events::new(),
            dice,
            clock,
            timer: DeferredTimer::new(),
            subscribers: Subscribers::new(),
        }
    }

    /// Current session snapshot.
    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Configuration the session was created with.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Events produced by the last successful operation.
    #[must_use]
    pub fn last_events(&self) -> &[SessionEvent] {
        &self.last_events
    }

    /// When the pending seat advance fires, if one is armed.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timer.deadline()
    }

    /// Roll for `seat`.
    ///
    /// Fails with an illegal-state error unless `seat` is active, the session
    /// is rolling, and no seat advance is pending. A rejected roll does not
    /// consume a dice value.
    pub fn roll(&mut self, seat: Color) -> Result<RollOutcome, SessionError> {
        if let Err(err) = ensure_can_roll(&self.session, seat) {
            warn!(seat = %seat, error = %err, "roll rejected");
            return Err(err);
        }

        let value = self.dice.roll();
        let transition = reduce(&self.session, &Operation::Roll { seat, value }, &self.config)?;
        let forfeited = transition.schedule.is_some();
        self.commit(transition);

        Ok(RollOutcome {
            dice: value,
            status: self.session.status,
            forfeited,
        })
    }

    /// Move one of the active seat's tokens by the rolled value.
    ///
    /// Naming a token that cannot move is not an error: the session is left
    /// as it was and [`SessionEvent::SelectionIgnored`] is reported.
    pub fn select_token(&mut self, token: TokenId) -> Result<&GameSession, SessionError> {
        self.apply(Operation::SelectToken { token })?;
        Ok(&self.session)
    }

    /// Seat `name` in the first placeholder seat.
    pub fn join_seat(&mut self, name: impl Into<String>) -> Result<Color, SessionError> {
        let name = name.into();
        self.apply(Operation::JoinSeat { name: name.clone() })?;
        let seat = self
            .last_events
            .iter()
            .find_map(|e| match e {
                SessionEvent::PlayerJoined { seat, .. } => Some(*seat),
                _ => None,
            })
            .ok_or(SessionError::NoOpenSeat)?;
        info!(seat = %seat, name = %name, "player joined");
        Ok(seat)
    }

    /// Replace the session with a fresh one.
    ///
    /// Any pending seat advance is cancelled first, so nothing scheduled
    /// against the old session can fire against the new one.
    pub fn reset_session(&mut self) -> &GameSession {
        if self.timer.cancel().is_some() {
            debug!("pending seat advance cancelled by reset");
        }

        info!("session reset");
        self.session = GameSession::with_first_line(&self.config, &self.seat_names, RESET_LINE);
        self.last_events = smallvec![SessionEvent::SessionReset];
        self.subscribers.notify(&self.session, &self.last_events);
        &self.session
    }

    /// Fire the pending seat advance if it is due.
    ///
    /// Returns the new session when something fired. The advance is applied
    /// to the session as it is now, not as it was when scheduled.
    pub fn poll(&mut self) -> Option<&GameSession> {
        let now = self.clock.now();
        let pending = self.timer.take_due(now)?;
        debug!(reason = ?pending.reason, now, "deferred seat advance fired");

        match self.apply(Operation::AdvanceSeat) {
            Ok(()) => Some(&self.session),
            Err(err) => {
                warn!(error = %err, "deferred seat advance found nothing to do");
                None
            }
        }
    }

    /// Register a listener for every future transition.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&GameSession, &[SessionEvent]) + 'static,
    ) -> SubscriptionId {
        let id = self.subscribers.subscribe(listener);
        debug!(subscription = %id, "subscribed");
        id
    }

    /// Remove a listener. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn apply(&mut self, operation: Operation) -> Result<(), SessionError> {
        match reduce(&self.session, &operation, &self.config) {
            Ok(transition) => {
                self.commit(transition);
                Ok(())
            }
            Err(err) => {
                warn!(operation = operation.describe(), error = %err, "operation rejected");
                Err(err)
            }
        }
    }

    fn commit(&mut self, transition: Transition) {
        let Transition {
            session,
            events,
            schedule,
        } = transition;

        match schedule {
            Some(pending) => {
                self.timer.arm(self.clock.now(), pending.delay_ms, pending);
            }
            None if session.pending.is_none() => {
                self.timer.cancel();
            }
            None => {}
        }

        self.session = session;
        self.last_events = events;
        self.subscribers.notify(&self.session, &self.last_events);
    }
}

impl<D, C> std::fmt::Debug for LudoGame<D, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LudoGame")
            .field("session", &self.session)
            .field("timer", &self.timer)
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}
