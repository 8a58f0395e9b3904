//! Synchronous publish/subscribe.
//!
//! Components that need to hear about each other's changes subscribe to an
//! `EventBus` instead of listening on ambient global events. Delivery is
//! synchronous and in registration order; a publish returns only after every
//! listener has run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SubscriptionId(u64);

type Listener<E> = Box<dyn FnMut(&E) + Send>;

/// A list of listeners for events of type `E`. `E` may be unsized, so a bus
/// can carry slices such as `[Rule]`.
pub struct EventBus<E: ?Sized> {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener<E>)>,
}

impl<E: ?Sized> Default for EventBus<E> {
    fn default() -> Self {
        EventBus { next_id: 0, listeners: Vec::new() }
    }
}

impl<E: ?Sized> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus").field("listeners", &self.listeners.len()).finish()
    }
}

impl<E: ?Sized> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&E) + Send + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Deliver `event` to every listener; returns how many were called.
    pub fn publish(&mut self, event: &E) -> usize {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
        self.listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Free,
    Pro,
    Enterprise,
}

/// Application-wide notifications between independently owned components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// The signed-in user's plan changed.
    UserPlanUpdated { plan: Plan },
    OpenBillingModal,
    /// Switch the billing view to the named tab.
    SetBillingTab { tab: String },
}
