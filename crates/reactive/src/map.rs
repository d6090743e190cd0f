//! Observable map.
//!
//! A key-unique collection with the same structural-event and
//! value-subscription behavior as the observable list, with the
//! multiplicity-safety invariant evaluated over the value set: a value's
//! subscription is retained as long as some key still maps to an equal
//! value.

use crate::event::MapEvent;
use crate::subscription::{SubscriptionId, SubscriptionManager};
use alloc::rc::Rc;
use alloc::vec::Vec;
use cascade_core::{Error, Notifiable, NotifyHandle, Observe, Result};
use core::cell::RefCell;
use core::fmt;
use core::hash::Hash;
use hashbrown::HashMap;

/// A key-unique mapping of observable or plain values.
///
/// All methods take `&self`; state lives behind `RefCell`s so an owner or
/// subscriber callback may reenter the same map. Every mutation releases its
/// borrow before the structural event fires, and every event is dispatched
/// to direct subscribers before owners are notified.
///
/// # Example
///
/// ```
/// use cascade_reactive::{MapEvent, ObservableMap};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let map = ObservableMap::new();
///
/// let events = Rc::new(RefCell::new(Vec::new()));
/// let events_clone = events.clone();
/// map.subscribe(move |event: &MapEvent<&str, i64>| {
///     events_clone.borrow_mut().push(event.clone());
/// });
///
/// map.insert("answer", 42);
/// assert_eq!(
///     events.borrow()[0],
///     MapEvent::Add { key: "answer", value: 42 }
/// );
/// ```
pub struct ObservableMap<K: 'static, V: 'static> {
    /// Backing storage
    entries: RefCell<HashMap<K, V>>,
    /// This map's identity and owner registry
    handle: Rc<NotifyHandle>,
    /// Direct listeners of structural events
    subscribers: RefCell<SubscriptionManager<MapEvent<K, V>>>,
}

impl<K, V> Default for ObservableMap<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug + 'static,
    V: Observe + Clone + PartialEq + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ObservableMap<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug + 'static,
    V: Observe + Clone + PartialEq + 'static,
{
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            handle: Rc::new(NotifyHandle::new()),
            subscribers: RefCell::new(SubscriptionManager::new()),
        }
    }

    /// Creates an empty map with at least the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RefCell::new(HashMap::with_capacity(capacity)),
            handle: Rc::new(NotifyHandle::new()),
            subscribers: RefCell::new(SubscriptionManager::new()),
        }
    }

    // ---- reads ----

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// Returns a clone of the value under `key`, failing when absent.
    pub fn get(&self, key: &K) -> Result<V> {
        self.entries
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| Error::key_not_found(key))
    }

    /// Returns a clone of the value under `key`, or None when absent.
    pub fn try_get(&self, key: &K) -> Option<V> {
        self.entries.borrow().get(key).cloned()
    }

    /// Returns the keys, in no particular order.
    pub fn keys(&self) -> Vec<K> {
        self.entries.borrow().keys().cloned().collect()
    }

    /// Returns the values, in no particular order.
    pub fn values(&self) -> Vec<V> {
        self.entries.borrow().values().cloned().collect()
    }

    /// Returns the entries, in no particular order.
    pub fn entries(&self) -> Vec<(K, V)> {
        self.entries
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    // ---- mutations ----

    /// Upserts `value` under `key`, returning the displaced value if any.
    ///
    /// An absent key fires one Add event; a present key fires one Replace
    /// event carrying old and new. A displaced value is unregistered only if
    /// no other key still maps to an equal value; the new value is then
    /// registered.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        let old = {
            let mut entries = self.entries.borrow_mut();
            entries.insert(key.clone(), value.clone())
        };
        match old {
            Some(old) => {
                self.unregister_if_gone(&old);
                self.register_value(&value);
                self.emit(MapEvent::Replace {
                    key,
                    old: old.clone(),
                    new: value,
                });
                Some(old)
            }
            None => {
                self.register_value(&value);
                self.emit(MapEvent::Add { key, value });
                None
            }
        }
    }

    /// Inserts `value` under an absent `key`, failing on a duplicate.
    ///
    /// Fires one Add event on success; a present key is a fault and fires
    /// nothing.
    pub fn add(&self, key: K, value: V) -> Result<()> {
        {
            let mut entries = self.entries.borrow_mut();
            if entries.contains_key(&key) {
                return Err(Error::duplicate_key(&key));
            }
            entries.insert(key.clone(), value.clone());
        }
        self.register_value(&value);
        self.emit(MapEvent::Add { key, value });
        Ok(())
    }

    /// Inserts only if `key` is absent.
    ///
    /// A present key is a normal false outcome, not a fault, and fires
    /// nothing. Fires one Add event on success.
    pub fn try_add(&self, key: K, value: V) -> bool {
        {
            let mut entries = self.entries.borrow_mut();
            if entries.contains_key(&key) {
                return false;
            }
            entries.insert(key.clone(), value.clone());
        }
        self.register_value(&value);
        self.emit(MapEvent::Add { key, value });
        true
    }

    /// Removes the entry under `key`, returning its value.
    ///
    /// An absent key is a normal None outcome and fires nothing. Fires one
    /// Remove event carrying the removed pair; the value is unregistered
    /// only if no remaining key maps to an equal value.
    pub fn remove(&self, key: &K) -> Option<V> {
        let removed = self.entries.borrow_mut().remove(key)?;
        self.unregister_if_gone(&removed);
        self.emit(MapEvent::Remove {
            key: key.clone(),
            value: removed.clone(),
        });
        Some(removed)
    }

    /// Removes every entry. Fires one Reset event.
    ///
    /// Unsubscription is collapsed to one attempt per distinct value, since
    /// after clearing nothing in the map can still reference it.
    pub fn clear(&self) {
        let drained: Vec<(K, V)> = self.entries.borrow_mut().drain().collect();
        let mut seen: Vec<&V> = Vec::new();
        for (_, value) in &drained {
            if seen.contains(&value) {
                continue;
            }
            seen.push(value);
            self.unregister_value(value);
        }
        self.emit(MapEvent::Reset);
    }

    // ---- subscriptions ----

    /// Subscribes to structural events.
    ///
    /// Returns a subscription ID that can be used to unsubscribe.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&MapEvent<K, V>) + 'static,
    {
        self.subscribers.borrow_mut().subscribe(callback)
    }

    /// Unsubscribes by ID.
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.borrow_mut().unsubscribe(id)
    }

    /// Returns the number of structural-event subscribers.
    #[inline]
    pub fn subscription_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    // ---- propagation plumbing ----

    fn emit(&self, event: MapEvent<K, V>) {
        let snapshot = self.subscribers.borrow().snapshot();
        for callback in snapshot {
            (*callback)(&event);
        }
        self.handle.notify_owners();
    }

    fn register_value(&self, value: &V) {
        if let Some(node) = value.as_notifiable() {
            node.register_owner(self.handle.id(), self.handle.forwarder());
        }
    }

    fn unregister_value(&self, value: &V) {
        if let Some(node) = value.as_notifiable() {
            node.unregister_owner(self.handle.id());
        }
    }

    /// Unregisters a removed or displaced value only when no remaining key
    /// maps to an equal value.
    fn unregister_if_gone(&self, value: &V) {
        let gone = !self.entries.borrow().values().any(|v| v == value);
        if gone {
            self.unregister_value(value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ObservableMap<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug + 'static,
    V: Observe + Clone + PartialEq + 'static,
{
    /// Builds a map from key/value pairs; later pairs win on duplicate keys.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries: HashMap<K, V> = iter.into_iter().collect();
        let map = Self::new();
        for value in entries.values() {
            map.register_value(value);
        }
        *map.entries.borrow_mut() = entries;
        map
    }
}

impl<K: 'static, V: 'static> Notifiable for ObservableMap<K, V> {
    fn notify_handle(&self) -> &NotifyHandle {
        &self.handle
    }
}

impl<K: 'static, V: 'static> Observe for ObservableMap<K, V> {
    fn as_notifiable(&self) -> Option<&dyn Notifiable> {
        Some(self)
    }
}

impl<K: Eq + Hash + 'static, V: PartialEq + 'static> PartialEq for ObservableMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        *self.entries.borrow() == *other.entries.borrow()
    }
}

impl<K: fmt::Debug + 'static, V: fmt::Debug + 'static> fmt::Debug for ObservableMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.borrow().iter()).finish()
    }
}
