//! Subscriber registry.
//!
//! Collaborators (renderers, commentary, lobby) register listeners and get
//! the new session plus the transition's events after every change. This is
//! the only channel through which they observe the engine.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::event::SessionEvent;
use super::state::GameSession;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscription({})", self.0)
    }
}

/// Callback invoked after each transition.
pub type Listener = Box<dyn FnMut(&GameSession, &[SessionEvent])>;

/// Registered listeners, notified in subscription order.
#[derive(Default)]
pub struct Subscribers {
    listeners: FxHashMap<SubscriptionId, Listener>,
    next_id: u64,
}

impl Subscribers {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameSession, &[SessionEvent]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Remove a listener. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver a transition to every listener.
    pub fn notify(&mut self, session: &GameSession, events: &[SessionEvent]) {
        let mut ids: Vec<SubscriptionId> = self.listeners.keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            if let Some(listener) = self.listeners.get_mut(&id) {
                listener(session, events);
            }
        }
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
