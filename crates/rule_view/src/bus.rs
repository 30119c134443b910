//! In-process broadcast bus for rule-view notifications.
//!
//! Delivery is synchronous: `publish` calls every handler registered on the
//! channel at the moment of publishing, then returns. Nothing is queued for
//! listeners that subscribe later.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};

use shared::protocol::{BusChannel, RuleNotification};
use tracing::debug;

type Handler = Arc<dyn Fn(&RuleNotification) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_listener_id: u64,
    listeners: HashMap<BusChannel, Vec<(u64, Handler)>>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Default)]
pub struct RuleEventBus {
    registry: Arc<Mutex<Registry>>,
}

impl RuleEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, channel: BusChannel, handler: F) -> Subscription
    where
        F: Fn(&RuleNotification) + Send + Sync + 'static,
    {
        let mut registry = lock(&self.registry);
        let listener_id = registry.next_listener_id;
        registry.next_listener_id += 1;
        registry
            .listeners
            .entry(channel)
            .or_default()
            .push((listener_id, Arc::new(handler)));
        debug!(channel = channel.as_str(), listener_id, "subscribed");

        Subscription {
            registry: Arc::downgrade(&self.registry),
            channel,
            listener_id,
        }
    }

    /// Returns the number of handlers the notification was delivered to.
    pub fn publish(&self, channel: BusChannel, notification: &RuleNotification) -> usize {
        // Handlers run without the registry lock so they may publish or
        // (un)subscribe themselves.
        let handlers: Vec<Handler> = lock(&self.registry)
            .listeners
            .get(&channel)
            .map(|entries| entries.iter().map(|(_, h)| Arc::clone(h)).collect())
            .unwrap_or_default();

        debug!(
            channel = channel.as_str(),
            rule_id = %notification.id,
            listeners = handlers.len(),
            "publishing rule notification"
        );
        for handler in &handlers {
            handler(notification);
        }
        handlers.len()
    }

    pub fn listener_count(&self, channel: BusChannel) -> usize {
        lock(&self.registry)
            .listeners
            .get(&channel)
            .map_or(0, Vec::len)
    }
}

/// Registration of one handler. Dropping it unsubscribes the handler.
#[must_use = "dropping a Subscription unsubscribes its handler immediately"]
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    channel: BusChannel,
    listener_id: u64,
}

impl Subscription {
    pub fn channel(&self) -> BusChannel {
        self.channel
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(shared) = self.registry.upgrade() else {
            return;
        };
        let mut registry = lock(&shared);
        if let Some(entries) = registry.listeners.get_mut(&self.channel) {
            entries.retain(|(id, _)| *id != self.listener_id);
            if entries.is_empty() {
                registry.listeners.remove(&self.channel);
            }
        }
        debug!(
            channel = self.channel.as_str(),
            listener_id = self.listener_id,
            "unsubscribed"
        );
    }
}

#[cfg(test)]
#[path = "tests/bus_tests.rs"]
mod tests;
