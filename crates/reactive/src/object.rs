//! Observable leaf object.
//!
//! `ObservableObject` is the embeddable base for model types with named
//! fields: it carries the node's `NotifyHandle` and the direct listeners of
//! its field-changed events. Model types keep their fields in `RefCell`s and
//! write `&self` setters through `set_field`; generated property accessors
//! call the same entry point.

use crate::event::FieldChanged;
use crate::subscription::{SubscriptionId, SubscriptionManager};
use alloc::rc::Rc;
use cascade_core::{Notifiable, NotifyHandle, Observe};
use core::cell::RefCell;
use core::fmt;

/// The leaf node of a containment graph: named fields, equality-gated
/// assignment, field-changed events, owner propagation.
///
/// On a successful assignment the field-changed event fires to direct
/// listeners first, then every registered owner is notified, so an observer
/// attached to the object itself sees the change before any ancestor does.
///
/// # Example
///
/// ```
/// use cascade_reactive::ObservableObject;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// struct Track {
///     base: ObservableObject,
///     title: RefCell<String>,
/// }
///
/// impl Track {
///     fn set_title(&self, title: String) -> bool {
///         self.base.set_field(&self.title, title, "title")
///     }
/// }
///
/// let track = Track {
///     base: ObservableObject::new(),
///     title: RefCell::new(String::from("untitled")),
/// };
///
/// let seen = Rc::new(RefCell::new(None));
/// let seen_clone = seen.clone();
/// track.base.subscribe(move |event| {
///     *seen_clone.borrow_mut() = Some(event.field);
/// });
///
/// assert!(track.set_title(String::from("one")));
/// assert_eq!(*seen.borrow(), Some("title"));
///
/// // Equal value: no assignment, no event.
/// assert!(!track.set_title(String::from("one")));
/// ```
pub struct ObservableObject {
    /// This node's identity and owner registry
    handle: Rc<NotifyHandle>,
    /// Direct listeners of field-changed events
    listeners: RefCell<SubscriptionManager<FieldChanged>>,
}

impl Default for ObservableObject {
    fn default() -> Self {
        Self::new()
    }
}

impl ObservableObject {
    /// Creates a leaf object with no listeners and no owners.
    pub fn new() -> Self {
        Self {
            handle: Rc::new(NotifyHandle::new()),
            listeners: RefCell::new(SubscriptionManager::new()),
        }
    }

    /// Subscribes to field-changed events.
    ///
    /// Returns a subscription ID that can be used to unsubscribe.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&FieldChanged) + 'static,
    {
        self.listeners.borrow_mut().subscribe(callback)
    }

    /// Unsubscribes by ID.
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.borrow_mut().unsubscribe(id)
    }

    /// Returns the number of field-changed listeners.
    #[inline]
    pub fn subscription_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Equality-gated field assignment.
    ///
    /// Compares the slot's current value to `value`; when equal this is a
    /// no-op returning false. Otherwise assigns (the slot borrow is released
    /// before any event fires), raises the field-changed event, notifies
    /// owners, and returns true.
    pub fn set_field<T: PartialEq>(&self, slot: &RefCell<T>, value: T, field: &'static str) -> bool {
        if *slot.borrow() == value {
            return false;
        }
        *slot.borrow_mut() = value;
        self.field_changed(field);
        true
    }

    /// Raises the field-changed event, then notifies owners.
    ///
    /// For hand-written setters with storage `set_field` cannot reach (a
    /// `Cell`, a computed field). Callbacks are dispatched from a snapshot,
    /// so they may subscribe or unsubscribe on this object.
    pub fn field_changed(&self, field: &'static str) {
        let event = FieldChanged::new(field);
        let snapshot = self.listeners.borrow().snapshot();
        for callback in snapshot {
            (*callback)(&event);
        }
        self.handle.notify_owners();
    }
}

impl Notifiable for ObservableObject {
    fn notify_handle(&self) -> &NotifyHandle {
        &self.handle
    }
}

impl Observe for ObservableObject {
    fn as_notifiable(&self) -> Option<&dyn Notifiable> {
        Some(self)
    }
}

impl fmt::Debug for ObservableObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableObject")
            .field("handle", &self.handle)
            .field("subscription_count", &self.subscription_count())
            .finish()
    }
}
