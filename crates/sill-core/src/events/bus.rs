use tracing::debug;

use super::types::{EventKind, PlayspaceEvent};

type Listener = Box<dyn FnMut(&PlayspaceEvent)>;

/// Token returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    filter: Option<EventKind>,
    listener: Listener,
}

/// Synchronous observer registry.
///
/// Listeners run on the publishing thread, inside the tick that produced the
/// event, in the order they subscribed.
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive every event.
    pub fn subscribe(&mut self, listener: impl FnMut(&PlayspaceEvent) + 'static) -> SubscriptionId {
        self.add(None, Box::new(listener))
    }

    /// Receive only events of `kind`.
    pub fn subscribe_to(
        &mut self,
        kind: EventKind,
        listener: impl FnMut(&PlayspaceEvent) + 'static,
    ) -> SubscriptionId {
        self.add(Some(kind), Box::new(listener))
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Deliver `event` to matching listeners. Returns how many received it.
    pub fn publish(&mut self, event: &PlayspaceEvent) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        for subscription in &mut self.subscriptions {
            if subscription.filter.is_some_and(|filter| filter != kind) {
                continue;
            }
            (subscription.listener)(event);
            delivered += 1;
        }
        debug!(
            event = "core.events.published",
            kind = ?kind,
            delivered = delivered
        );
        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }

    fn add(&mut self, filter: Option<EventKind>, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            filter,
            listener,
        });
        id
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.subscriptions.len())
            .finish()
    }
}
