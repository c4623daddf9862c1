//! Single-slot cancellable timer.
//!
//! The host arms the timer when a transition schedules a follow-up and
//! polls it with the current time. Arming again replaces the previous
//! action; cancelling drops it. Nothing runs in the background.

use tracing::trace;

use super::clock::Millis;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Armed<T> {
    due_at: Millis,
    action: T,
}

/// A one-shot deferred action.
///
/// ```
/// use ludo_engine::session::DeferredTimer;
///
/// let mut timer = DeferredTimer::new();
/// timer.arm(0, 600, "advance");
///
/// assert_eq!(timer.take_due(599), None);
/// assert_eq!(timer.take_due(600), Some("advance"));
/// assert_eq!(timer.take_due(900), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeferredTimer<T> {
    armed: Option<Armed<T>>,
    generation: u64,
}

impl<T> Default for DeferredTimer<T> {
    fn default() -> Self {
        Self {
            armed: None,
            generation: 0,
        }
    }
}

impl<T> DeferredTimer<T> {
    /// Create a disarmed timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire `delay` ms after `now`, replacing any
    /// armed action. Returns the new generation.
    pub fn arm(&mut self, now: Millis, delay: Millis, action: T) -> u64 {
        self.generation += 1;
        let due_at = now.saturating_add(delay);
        trace!(generation = self.generation, due_at, "timer armed");
        self.armed = Some(Armed { due_at, action });
        self.generation
    }

    /// Drop the armed action, returning it if there was one.
    pub fn cancel(&mut self) -> Option<T> {
        let armed = self.armed.take()?;
        self.generation += 1;
        trace!(generation = self.generation, "timer cancelled");
        Some(armed.action)
    }

    /// When the armed action fires.
    #[must_use]
    pub fn deadline(&self) -> Option<Millis> {
        self.armed.as_ref().map(|a| a.due_at)
    }

    /// Whether an action is armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Counter bumped on every arm and cancel.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Remove and return the armed action if it is due at `now`.
    pub fn take_due(&mut self, now: Millis) -> Option<T> {
        match &self.armed {
            Some(armed) if armed.due_at <= now => self.armed.take().map(|a| a.action),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rearm_replaces() {
        let mut timer = DeferredTimer::new();
        let first = timer.arm(0, 1000, 1);
        let second = timer.arm(100, 600, 2);

        assert!(second > first);
        assert_eq!(timer.deadline(), Some(700));
        assert_eq!(timer.take_due(700), Some(2));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_cancel() {
        let mut timer = DeferredTimer::new();
        timer.arm(0, 10, "x");
        let before = timer.generation();

        assert_eq!(timer.cancel(), Some("x"));
        assert!(timer.generation() > before);
        assert_eq!(timer.take_due(1_000), None);
        assert_eq!(timer.cancel(), None);
    }

    #[test]
    fn test_saturating_deadline() {
        let mut timer = DeferredTimer::new();
        timer.arm(u64::MAX - 1, 10, ());
        assert_eq!(timer.deadline(), Some(u64::MAX));
    }
}
