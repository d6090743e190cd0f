//! Subscription management for container events.
//!
//! This module provides subscription IDs and a manager for tracking the
//! direct listeners of a single container's local events. Owner-level
//! propagation is separate (see `cascade_core::NotifyHandle`); these are the
//! subscribers that want the event payload itself.

use alloc::rc::Rc;
use alloc::vec::Vec;
use hashbrown::HashMap;

/// Unique identifier for a subscription.
pub type SubscriptionId = u64;

/// Callback type for event notifications.
///
/// `Rc` so a dispatching container can snapshot the callbacks and invoke
/// them with no registry borrow held.
pub type EventCallback<E> = Rc<dyn Fn(&E)>;

/// A subscription to a container's local events.
pub struct Subscription<E: 'static> {
    /// Unique identifier
    id: SubscriptionId,
    /// Callback to invoke on events
    callback: EventCallback<E>,
    /// Whether this subscription is active
    active: bool,
}

impl<E: 'static> Subscription<E> {
    /// Creates a new subscription.
    pub fn new<F>(id: SubscriptionId, callback: F) -> Self
    where
        F: Fn(&E) + 'static,
    {
        Self {
            id,
            callback: Rc::new(callback),
            active: true,
        }
    }

    /// Returns the subscription ID.
    #[inline]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Returns whether this subscription is active.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Deactivates this subscription.
    #[inline]
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Notifies this subscription of an event.
    pub fn notify(&self, event: &E) {
        if self.active {
            (*self.callback)(event);
        }
    }
}

/// Manages subscriptions for one container.
pub struct SubscriptionManager<E: 'static> {
    /// Active subscriptions
    subscriptions: HashMap<SubscriptionId, Subscription<E>>,
    /// Next subscription ID to assign
    next_id: SubscriptionId,
}

impl<E: 'static> Default for SubscriptionManager<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> SubscriptionManager<E> {
    /// Creates a new subscription manager.
    pub fn new() -> Self {
        Self {
            subscriptions: HashMap::new(),
            next_id: 1,
        }
    }

    /// Subscribes to events with the given callback.
    ///
    /// Returns the subscription ID that can be used to unsubscribe.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&E) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;

        let subscription = Subscription::new(id, callback);
        self.subscriptions.insert(id, subscription);

        id
    }

    /// Unsubscribes by ID.
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.remove(&id).is_some()
    }

    /// Notifies a specific subscription of an event.
    pub fn notify(&self, id: SubscriptionId, event: &E) {
        if let Some(sub) = self.subscriptions.get(&id) {
            sub.notify(event);
        }
    }

    /// Notifies all active subscriptions of an event.
    pub fn notify_all(&self, event: &E) {
        for sub in self.subscriptions.values() {
            sub.notify(event);
        }
    }

    /// Returns the active callbacks, cloned out of the registry.
    ///
    /// Containers dispatch from this snapshot so a callback may subscribe or
    /// unsubscribe on the same container without invalidating the iteration.
    pub fn snapshot(&self) -> Vec<EventCallback<E>> {
        self.subscriptions
            .values()
            .filter(|sub| sub.is_active())
            .map(|sub| sub.callback.clone())
            .collect()
    }

    /// Returns the number of active subscriptions.
    #[inline]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Returns true if there are no subscriptions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Returns all subscription IDs.
    pub fn subscription_ids(&self) -> Vec<SubscriptionId> {
        self.subscriptions.keys().copied().collect()
    }

    /// Clears all subscriptions.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}
