//! Change events raised by the observable containers.
//!
//! Structural events describe one mutation each. `Reset` is the deliberate
//! exception: bulk operations (range insert/remove, sort, reverse, bulk
//! append, clear) collapse to a single detail-free event, bounding event
//! volume for large batches. Consumers that need per-element detail diff
//! snapshots taken around the call.

/// Raised by an observable object when a named field changes value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldChanged {
    /// Name of the field that changed.
    pub field: &'static str,
}

impl FieldChanged {
    /// Creates a field-changed event.
    #[inline]
    pub fn new(field: &'static str) -> Self {
        Self { field }
    }
}

/// A structural change to an observable list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListEvent<T> {
    /// `item` was inserted at `index`.
    Add { index: usize, item: T },
    /// `item` was removed from `index`.
    Remove { index: usize, item: T },
    /// The item at `index` was overwritten.
    Replace { index: usize, old: T, new: T },
    /// A bulk operation changed the list without itemized detail.
    Reset,
}

impl<T> ListEvent<T> {
    /// Returns true for an add event.
    #[inline]
    pub fn is_add(&self) -> bool {
        matches!(self, ListEvent::Add { .. })
    }

    /// Returns true for a remove event.
    #[inline]
    pub fn is_remove(&self) -> bool {
        matches!(self, ListEvent::Remove { .. })
    }

    /// Returns true for a replace event.
    #[inline]
    pub fn is_replace(&self) -> bool {
        matches!(self, ListEvent::Replace { .. })
    }

    /// Returns true for a reset event.
    #[inline]
    pub fn is_reset(&self) -> bool {
        matches!(self, ListEvent::Reset)
    }
}

/// A structural change to an observable map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapEvent<K, V> {
    /// `key` was bound to `value` for the first time.
    Add { key: K, value: V },
    /// `key` and its `value` were removed.
    Remove { key: K, value: V },
    /// The value under `key` was overwritten.
    Replace { key: K, old: V, new: V },
    /// A bulk operation changed the map without itemized detail.
    Reset,
}

impl<K, V> MapEvent<K, V> {
    /// Returns true for an add event.
    #[inline]
    pub fn is_add(&self) -> bool {
        matches!(self, MapEvent::Add { .. })
    }

    /// Returns true for a remove event.
    #[inline]
    pub fn is_remove(&self) -> bool {
        matches!(self, MapEvent::Remove { .. })
    }

    /// Returns true for a replace event.
    #[inline]
    pub fn is_replace(&self) -> bool {
        matches!(self, MapEvent::Replace { .. })
    }

    /// Returns true for a reset event.
    #[inline]
    pub fn is_reset(&self) -> bool {
        matches!(self, MapEvent::Reset)
    }
}
