//! Observable list.
//!
//! An ordered, duplicate-permitting collection that raises one structural
//! event per mutation and registers itself as owner of every observable item
//! it holds, so mutations *inside* an item propagate outward exactly like
//! structural changes of the list itself.
//!
//! Subscription bookkeeping is multiplicity-safe: an item's subscription is
//! torn down only when no equal occurrence of it remains anywhere in the
//! list. The containment check is by value equality, matching `contains`.

use crate::event::ListEvent;
use crate::subscription::{SubscriptionId, SubscriptionManager};
use alloc::rc::Rc;
use alloc::vec::Vec;
use cascade_core::{Error, Notifiable, NotifyHandle, Observe, Result};
use core::cell::RefCell;
use core::cmp::Ordering;
use core::fmt;

/// An ordered collection of observable or plain items.
///
/// All methods take `&self`; state lives behind `RefCell`s so an owner or
/// subscriber callback may reenter the same list. Every mutation releases
/// its borrow before the structural event fires, and every event is
/// dispatched to direct subscribers before owners are notified.
///
/// Observable items are expected to be `Rc`-shared, so clones stored in
/// several containers alias one owner registry.
///
/// # Example
///
/// ```
/// use cascade_reactive::{ListEvent, ObservableList};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let list = ObservableList::new();
///
/// let events = Rc::new(RefCell::new(Vec::new()));
/// let events_clone = events.clone();
/// list.subscribe(move |event: &ListEvent<i64>| {
///     events_clone.borrow_mut().push(event.clone());
/// });
///
/// list.push(7);
/// assert_eq!(events.borrow()[0], ListEvent::Add { index: 0, item: 7 });
/// ```
pub struct ObservableList<T: 'static> {
    /// Backing storage
    items: RefCell<Vec<T>>,
    /// This list's identity and owner registry
    handle: Rc<NotifyHandle>,
    /// Direct listeners of structural events
    subscribers: RefCell<SubscriptionManager<ListEvent<T>>>,
}

impl<T: Observe + Clone + PartialEq + 'static> Default for ObservableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Observe + Clone + PartialEq + 'static> ObservableList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            items: RefCell::new(Vec::new()),
            handle: Rc::new(NotifyHandle::new()),
            subscribers: RefCell::new(SubscriptionManager::new()),
        }
    }

    /// Creates an empty list with at least the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: RefCell::new(Vec::with_capacity(capacity)),
            handle: Rc::new(NotifyHandle::new()),
            subscribers: RefCell::new(SubscriptionManager::new()),
        }
    }

    // ---- reads ----

    /// Returns the number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Returns true if the list holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Returns the current backing capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.borrow().capacity()
    }

    /// Returns true if an equal item is present.
    pub fn contains(&self, item: &T) -> bool {
        self.items.borrow().contains(item)
    }

    /// Returns the index of the first equal item.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.borrow().iter().position(|x| x == item)
    }

    /// Returns a clone of the item at `index`.
    pub fn get(&self, index: usize) -> Result<T> {
        let items = self.items.borrow();
        items
            .get(index)
            .cloned()
            .ok_or_else(|| Error::index_out_of_range(index, items.len()))
    }

    /// Returns a clone of the first item.
    pub fn first(&self) -> Option<T> {
        self.items.borrow().first().cloned()
    }

    /// Returns a clone of the last item.
    pub fn last(&self) -> Option<T> {
        self.items.borrow().last().cloned()
    }

    /// Returns clones of `count` items starting at `index`.
    pub fn get_range(&self, index: usize, count: usize) -> Result<Vec<T>> {
        let items = self.items.borrow();
        if index > items.len() {
            return Err(Error::index_out_of_range(index, items.len()));
        }
        if count > items.len() - index {
            return Err(Error::invalid_argument(
                "range count overruns the available items",
            ));
        }
        Ok(items[index..index + count].to_vec())
    }

    /// Returns a clone of the first item matching the predicate.
    ///
    /// The predicate runs while the list is borrowed and must not touch it.
    pub fn find<F>(&self, pred: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.items.borrow().iter().find(|item| pred(item)).cloned()
    }

    /// Returns true if any item matches the predicate.
    ///
    /// The predicate runs while the list is borrowed and must not touch it.
    pub fn any<F>(&self, pred: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        self.items.borrow().iter().any(|item| pred(item))
    }

    /// Returns a snapshot of the current items.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    /// Calls `f` on each item in order.
    ///
    /// `f` runs while the list is borrowed and must not touch it.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&T),
    {
        for item in self.items.borrow().iter() {
            f(item);
        }
    }

    // ---- mutations ----

    /// Appends an item. Fires one Add event.
    pub fn push(&self, item: T) {
        let index = {
            let mut items = self.items.borrow_mut();
            items.push(item.clone());
            items.len() - 1
        };
        self.register_value(&item);
        self.emit(ListEvent::Add { index, item });
    }

    /// Inserts an item at `index`. Fires one Add event.
    pub fn insert(&self, index: usize, item: T) -> Result<()> {
        {
            let mut items = self.items.borrow_mut();
            if index > items.len() {
                return Err(Error::index_out_of_range(index, items.len()));
            }
            items.insert(index, item.clone());
        }
        self.register_value(&item);
        self.emit(ListEvent::Add { index, item });
        Ok(())
    }

    /// Overwrites the item at `index`, returning the displaced item.
    ///
    /// Fires one Replace event carrying old, new, and index. The displaced
    /// item is unregistered only if no equal occurrence remains; the new
    /// item is registered.
    pub fn set(&self, index: usize, item: T) -> Result<T> {
        let old = {
            let mut items = self.items.borrow_mut();
            if index >= items.len() {
                return Err(Error::index_out_of_range(index, items.len()));
            }
            core::mem::replace(&mut items[index], item.clone())
        };
        self.unregister_if_gone(&old);
        self.register_value(&item);
        self.emit(ListEvent::Replace {
            index,
            old: old.clone(),
            new: item,
        });
        Ok(old)
    }

    /// Removes the first equal occurrence of `item`.
    ///
    /// Returns false (firing nothing) if no equal item is present. Fires one
    /// Remove event otherwise.
    pub fn remove(&self, item: &T) -> bool {
        let removed = {
            let mut items = self.items.borrow_mut();
            match items.iter().position(|x| x == item) {
                Some(index) => Some((index, items.remove(index))),
                None => None,
            }
        };
        match removed {
            Some((index, item)) => {
                self.unregister_if_gone(&item);
                self.emit(ListEvent::Remove { index, item });
                true
            }
            None => false,
        }
    }

    /// Removes and returns the item at `index`. Fires one Remove event.
    pub fn remove_at(&self, index: usize) -> Result<T> {
        let item = {
            let mut items = self.items.borrow_mut();
            if index >= items.len() {
                return Err(Error::index_out_of_range(index, items.len()));
            }
            items.remove(index)
        };
        self.unregister_if_gone(&item);
        self.emit(ListEvent::Remove {
            index,
            item: item.clone(),
        });
        Ok(item)
    }

    /// Appends every item from `items`. Fires one Reset event.
    pub fn extend<I>(&self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let added: Vec<T> = items.into_iter().collect();
        let start = {
            let mut inner = self.items.borrow_mut();
            let start = inner.len();
            inner.extend(added);
            start
        };
        {
            let inner = self.items.borrow();
            for item in &inner[start..] {
                self.register_value(item);
            }
        }
        self.emit(ListEvent::Reset);
    }

    /// Inserts every item from `items` at `index`. Fires one Reset event.
    pub fn insert_all<I>(&self, index: usize, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let added: Vec<T> = items.into_iter().collect();
        let count = added.len();
        {
            let mut inner = self.items.borrow_mut();
            if index > inner.len() {
                return Err(Error::index_out_of_range(index, inner.len()));
            }
            inner.splice(index..index, added);
        }
        {
            let inner = self.items.borrow();
            for item in &inner[index..index + count] {
                self.register_value(item);
            }
        }
        self.emit(ListEvent::Reset);
        Ok(())
    }

    /// Removes every item matching the predicate, returning the count.
    ///
    /// Fires one Reset event when anything was removed; nothing otherwise.
    /// The predicate runs while the list is borrowed and must not touch it.
    pub fn remove_all<F>(&self, pred: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        let removed: Vec<T> = {
            let mut inner = self.items.borrow_mut();
            let mut kept = Vec::with_capacity(inner.len());
            let mut removed = Vec::new();
            for item in inner.drain(..) {
                if pred(&item) {
                    removed.push(item);
                } else {
                    kept.push(item);
                }
            }
            *inner = kept;
            removed
        };
        if removed.is_empty() {
            return 0;
        }
        for item in &removed {
            self.unregister_if_gone(item);
        }
        self.emit(ListEvent::Reset);
        removed.len()
    }

    /// Removes `count` items starting at `index`. Fires one Reset event.
    pub fn remove_range(&self, index: usize, count: usize) -> Result<()> {
        let removed: Vec<T> = {
            let mut inner = self.items.borrow_mut();
            if index > inner.len() {
                return Err(Error::index_out_of_range(index, inner.len()));
            }
            if count > inner.len() - index {
                return Err(Error::invalid_argument(
                    "range count overruns the available items",
                ));
            }
            inner.drain(index..index + count).collect()
        };
        for item in &removed {
            self.unregister_if_gone(item);
        }
        self.emit(ListEvent::Reset);
        Ok(())
    }

    /// Removes every item. Fires one Reset event.
    pub fn clear(&self) {
        let removed: Vec<T> = self.items.borrow_mut().drain(..).collect();
        for item in &removed {
            self.unregister_value(item);
        }
        self.emit(ListEvent::Reset);
    }

    /// Sorts the list. Fires one Reset event.
    pub fn sort(&self)
    where
        T: Ord,
    {
        self.items.borrow_mut().sort();
        self.emit(ListEvent::Reset);
    }

    /// Sorts the list with a comparator. Fires one Reset event.
    ///
    /// The comparator runs while the list is borrowed and must not touch it.
    pub fn sort_by<F>(&self, cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items.borrow_mut().sort_by(cmp);
        self.emit(ListEvent::Reset);
    }

    /// Reverses the list in place. Fires one Reset event.
    pub fn reverse(&self) {
        self.items.borrow_mut().reverse();
        self.emit(ListEvent::Reset);
    }

    // ---- subscriptions ----

    /// Subscribes to structural events.
    ///
    /// Returns a subscription ID that can be used to unsubscribe.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ListEvent<T>) + 'static,
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

    fn emit(&self, event: ListEvent<T>) {
        let snapshot = self.subscribers.borrow().snapshot();
        for callback in snapshot {
            (*callback)(&event);
        }
        self.handle.notify_owners();
    }

    fn register_value(&self, item: &T) {
        if let Some(node) = item.as_notifiable() {
            node.register_owner(self.handle.id(), self.handle.forwarder());
        }
    }

    fn unregister_value(&self, item: &T) {
        if let Some(node) = item.as_notifiable() {
            node.unregister_owner(self.handle.id());
        }
    }

    /// Unregisters a removed or displaced item only when no equal occurrence
    /// of it remains in the list.
    fn unregister_if_gone(&self, item: &T) {
        if !self.contains(item) {
            self.unregister_value(item);
        }
    }
}

impl<T: Observe + Clone + PartialEq + 'static> FromIterator<T> for ObservableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: Vec<T> = iter.into_iter().collect();
        let list = Self::new();
        for item in &items {
            list.register_value(item);
        }
        *list.items.borrow_mut() = items;
        list
    }
}

impl<T: Observe + Clone + PartialEq + 'static> From<Vec<T>> for ObservableList<T> {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

impl<T: 'static> Notifiable for ObservableList<T> {
    fn notify_handle(&self) -> &NotifyHandle {
        &self.handle
    }
}

impl<T: 'static> Observe for ObservableList<T> {
    fn as_notifiable(&self) -> Option<&dyn Notifiable> {
        Some(self)
    }
}

impl<T: PartialEq + 'static> PartialEq for ObservableList<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.items.borrow() == *other.items.borrow()
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for ObservableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.borrow().iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObservableObject;
    use alloc::rc::Rc;
    use alloc::vec;

    struct Probe {
        base: ObservableObject,
        tag: i32,
    }

    impl Probe {
        fn new(tag: i32) -> Rc<Self> {
            Rc::new(Self {
                base: ObservableObject::new(),
                tag,
            })
        }

        fn touch(&self) {
            self.base.field_changed("tag");
        }
    }

    impl PartialEq for Probe {
        fn eq(&self, other: &Self) -> bool {
            self.tag == other.tag
        }
    }

    impl Notifiable for Probe {
        fn notify_handle(&self) -> &NotifyHandle {
            self.base.notify_handle()
        }
    }

    impl Observe for Probe {
        fn as_notifiable(&self) -> Option<&dyn Notifiable> {
            Some(self)
        }
    }

    fn event_log<T: Observe + Clone + PartialEq + 'static>(
        list: &ObservableList<T>,
    ) -> Rc<RefCell<Vec<ListEvent<T>>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let events_clone = events.clone();
        list.subscribe(move |event: &ListEvent<T>| {
            events_clone.borrow_mut().push(event.clone());
        });
        events
    }

    #[test]
    fn test_push_fires_add() {
        let list = ObservableList::new();
        let events = event_log(&list);

        list.push(10);
        list.push(20);

        assert_eq!(list.to_vec(), vec![10, 20]);
        assert_eq!(
            &*events.borrow(),
            &[
                ListEvent::Add { index: 0, item: 10 },
                ListEvent::Add { index: 1, item: 20 },
            ]
        );
    }

    #[test]
    fn test_insert_fires_add_at_index() {
        let list: ObservableList<i32> = vec![1, 3].into();
        let events = event_log(&list);

        list.insert(1, 2).unwrap();

        assert_eq!(list.to_vec(), vec![1, 2, 3]);
        assert_eq!(&*events.borrow(), &[ListEvent::Add { index: 1, item: 2 }]);
    }

    #[test]
    fn test_insert_out_of_range() {
        let list: ObservableList<i32> = vec![1].into();
        assert_eq!(
            list.insert(5, 9),
            Err(Error::index_out_of_range(5, 1))
        );
    }

    #[test]
    fn test_set_fires_replace_and_returns_old() {
        let list: ObservableList<i32> = vec![1, 2].into();
        let events = event_log(&list);

        assert_eq!(list.set(1, 9).unwrap(), 2);
        assert_eq!(list.to_vec(), vec![1, 9]);
        assert_eq!(
            &*events.borrow(),
            &[ListEvent::Replace {
                index: 1,
                old: 2,
                new: 9
            }]
        );

        assert!(list.set(5, 0).is_err());
    }

    #[test]
    fn test_remove_first_occurrence_only() {
        let list: ObservableList<i32> = vec![1, 2, 1].into();
        let events = event_log(&list);

        assert!(list.remove(&1));
        assert_eq!(list.to_vec(), vec![2, 1]);
        assert_eq!(
            &*events.borrow(),
            &[ListEvent::Remove { index: 0, item: 1 }]
        );
    }

    #[test]
    fn test_remove_absent_fires_nothing() {
        let list: ObservableList<i32> = vec![1].into();
        let events = event_log(&list);

        assert!(!list.remove(&7));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_remove_at() {
        let list: ObservableList<i32> = vec![5, 6, 7].into();
        let events = event_log(&list);

        assert_eq!(list.remove_at(1).unwrap(), 6);
        assert_eq!(list.to_vec(), vec![5, 7]);
        assert_eq!(
            &*events.borrow(),
            &[ListEvent::Remove { index: 1, item: 6 }]
        );

        assert_eq!(list.remove_at(9), Err(Error::index_out_of_range(9, 2)));
    }

    #[test]
    fn test_bulk_operations_fire_single_reset() {
        let list: ObservableList<i32> = vec![3, 1, 2].into();
        let events = event_log(&list);

        list.extend(vec![4, 5]);
        list.insert_all(0, vec![0, 0]).unwrap();
        list.remove_range(0, 2).unwrap();
        list.sort();
        list.reverse();
        list.clear();

        let events = events.borrow();
        assert_eq!(events.len(), 6);
        assert!(events.iter().all(|event| event.is_reset()));
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_all_resets_only_when_matched() {
        let list: ObservableList<i32> = vec![1, 2, 3, 4].into();
        let events = event_log(&list);

        assert_eq!(list.remove_all(|x| x % 2 == 0), 2);
        assert_eq!(list.to_vec(), vec![1, 3]);
        assert_eq!(events.borrow().len(), 1);
        assert!(events.borrow()[0].is_reset());

        assert_eq!(list.remove_all(|x| *x > 100), 0);
        assert_eq!(events.borrow().len(), 1); // No event for an empty match
    }

    #[test]
    fn test_range_errors() {
        let list: ObservableList<i32> = vec![1, 2, 3].into();

        assert!(list.get_range(1, 2).is_ok());
        assert_eq!(
            list.get_range(4, 0),
            Err(Error::index_out_of_range(4, 3))
        );
        assert!(matches!(
            list.get_range(1, 5),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            list.remove_range(0, 4),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_reads() {
        let list: ObservableList<i32> = vec![4, 5, 6, 5].into();

        assert_eq!(list.len(), 4);
        assert!(!list.is_empty());
        assert!(list.contains(&5));
        assert_eq!(list.index_of(&5), Some(1));
        assert_eq!(list.get(2).unwrap(), 6);
        assert_eq!(list.first(), Some(4));
        assert_eq!(list.last(), Some(5));
        assert_eq!(list.find(|x| *x > 4), Some(5));
        assert!(list.any(|x| *x == 6));
        assert_eq!(list.get_range(1, 2).unwrap(), vec![5, 6]);

        let mut sum = 0;
        list.for_each(|x| sum += x);
        assert_eq!(sum, 20);
    }

    // ---- subscription maintenance ----

    #[test]
    fn test_push_registers_observable_item() {
        let list: ObservableList<Rc<Probe>> = ObservableList::new();
        let probe = Probe::new(1);

        list.push(probe.clone());
        assert!(probe.notify_handle().has_owner(list.notify_handle().id()));
    }

    #[test]
    fn test_from_iter_registers_items() {
        let probe = Probe::new(1);
        let list: ObservableList<Rc<Probe>> = vec![probe.clone()].into();

        assert!(probe.notify_handle().has_owner(list.notify_handle().id()));
    }

    #[test]
    fn test_remove_round_trips_registry_state() {
        let list: ObservableList<Rc<Probe>> = ObservableList::new();
        let probe = Probe::new(1);
        assert_eq!(probe.notify_handle().owner_count(), 0);

        list.push(probe.clone());
        assert_eq!(probe.notify_handle().owner_count(), 1);

        assert!(list.remove(&probe));
        assert_eq!(probe.notify_handle().owner_count(), 0);
    }

    #[test]
    fn test_duplicate_occurrences_keep_subscription() {
        let list: ObservableList<Rc<Probe>> = ObservableList::new();
        let probe = Probe::new(1);

        list.push(probe.clone());
        list.push(probe.clone());

        // One subscription, not two.
        assert_eq!(probe.notify_handle().owner_count(), 1);

        list.remove(&probe);
        assert!(probe.notify_handle().has_owner(list.notify_handle().id()));

        list.remove(&probe);
        assert!(!probe.notify_handle().has_owner(list.notify_handle().id()));
    }

    #[test]
    fn test_set_swaps_subscriptions() {
        let old = Probe::new(1);
        let new = Probe::new(2);
        let list: ObservableList<Rc<Probe>> = vec![old.clone()].into();

        list.set(0, new.clone()).unwrap();

        let owner = list.notify_handle().id();
        assert!(!old.notify_handle().has_owner(owner));
        assert!(new.notify_handle().has_owner(owner));
    }

    #[test]
    fn test_set_keeps_subscription_for_duplicate_old() {
        let probe = Probe::new(1);
        let list: ObservableList<Rc<Probe>> = vec![probe.clone(), probe.clone()].into();

        list.set(0, Probe::new(2)).unwrap();

        // The displaced value still occurs at index 1.
        assert!(probe.notify_handle().has_owner(list.notify_handle().id()));
    }

    #[test]
    fn test_clear_drops_all_subscriptions() {
        let a = Probe::new(1);
        let b = Probe::new(2);
        let list: ObservableList<Rc<Probe>> = vec![a.clone(), b.clone(), a.clone()].into();

        list.clear();

        assert_eq!(a.notify_handle().owner_count(), 0);
        assert_eq!(b.notify_handle().owner_count(), 0);
    }

    #[test]
    fn test_remove_all_unregisters_gone_items() {
        let a = Probe::new(1);
        let b = Probe::new(2);
        let list: ObservableList<Rc<Probe>> = vec![a.clone(), b.clone(), a.clone()].into();

        assert_eq!(list.remove_all(|probe| probe.tag == 1), 2);

        assert_eq!(a.notify_handle().owner_count(), 0);
        assert_eq!(b.notify_handle().owner_count(), 1);
    }

    #[test]
    fn test_child_change_reaches_list_owners_without_structural_event() {
        let probe = Probe::new(1);
        let list: ObservableList<Rc<Probe>> = vec![probe.clone()].into();
        let events = event_log(&list);

        let count = Rc::new(RefCell::new(0));
        let count_clone = count.clone();
        list.register_owner(
            cascade_core::OwnerId::fresh(),
            Rc::new(move || *count_clone.borrow_mut() += 1),
        );

        probe.touch();

        // The list's owner heard about it; the list itself fired no
        // structural event.
        assert_eq!(*count.borrow(), 1);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_removed_item_no_longer_propagates() {
        let probe = Probe::new(1);
        let list: ObservableList<Rc<Probe>> = vec![probe.clone()].into();

        let count = Rc::new(RefCell::new(0));
        let count_clone = count.clone();
        list.register_owner(
            cascade_core::OwnerId::fresh(),
            Rc::new(move || *count_clone.borrow_mut() += 1),
        );

        list.remove(&probe); // Fires the remove event itself: +1
        assert_eq!(*count.borrow(), 1);

        probe.touch();
        assert_eq!(*count.borrow(), 1); // Detached
    }

    #[test]
    fn test_reentrant_subscriber_may_mutate_list() {
        let list: Rc<ObservableList<i32>> = Rc::new(ObservableList::new());

        let weak = Rc::downgrade(&list);
        list.subscribe(move |event: &ListEvent<i32>| {
            if let (Some(list), ListEvent::Add { item, .. }) = (weak.upgrade(), event) {
                if *item < 3 {
                    list.push(item + 1);
                }
            }
        });

        list.push(1);

        // Depth-first: each push completes its cascade before returning.
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_unsubscribe_stops_events() {
        let list: ObservableList<i32> = ObservableList::new();

        let count = Rc::new(RefCell::new(0));
        let count_clone = count.clone();
        let id = list.subscribe(move |_| *count_clone.borrow_mut() += 1);

        list.push(1);
        assert_eq!(*count.borrow(), 1);

        assert!(list.unsubscribe(id));
        assert!(!list.unsubscribe(id));

        list.push(2);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_list_equality_by_contents() {
        let a: ObservableList<i32> = vec![1, 2].into();
        let b: ObservableList<i32> = vec![1, 2].into();
        let c: ObservableList<i32> = vec![2, 1].into();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
