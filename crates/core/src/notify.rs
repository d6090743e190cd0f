//! Owner registry and fan-in notification.
//!
//! This module provides `NotifyHandle`, the per-node registry that lets any
//! number of owning containers converge change notifications toward the
//! roots of a containment graph, plus the `Notifiable`/`Observe` traits that
//! containers use to discover and subscribe to observable values they hold.

use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use hashbrown::HashMap;

/// Callback invoked when a node a container owns has changed.
///
/// `Rc` rather than `Box` so the registry can be snapshotted by cloning
/// before invocation; a callback is then free to mutate the registry it was
/// dispatched from.
pub type OwnerCallback = Rc<dyn Fn()>;

static NEXT_OWNER_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity handle for an owner in a containment graph.
///
/// Identity is the id value itself, never payload equality: two containers
/// with equal contents are still distinct owners. Containers allocate one at
/// construction; a root observer (a UI binding, a test probe) allocates a
/// synthetic one with [`OwnerId::fresh`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OwnerId(u64);

impl OwnerId {
    /// Allocates a fresh, process-unique owner id.
    pub fn fresh() -> Self {
        OwnerId(NEXT_OWNER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A node's attachment point in the containment graph.
///
/// Bundles the node's own identity (used when it registers as an owner of
/// its children) with the registry of owners observing the node. The
/// registry maps owner identity to a single zero-argument callback;
/// re-registering an owner replaces its callback, so at most one
/// subscription per (node, owner) pair ever exists.
///
/// # Example
///
/// ```ignore
/// let handle = Rc::new(NotifyHandle::new());
/// child.register_owner(handle.id(), handle.forwarder());
/// // A change inside `child` now reaches this node's own owners.
/// ```
pub struct NotifyHandle {
    /// Identity this node presents when owning others
    id: OwnerId,
    /// Owner identity -> callback to run when this node changes
    owners: RefCell<HashMap<OwnerId, OwnerCallback>>,
}

impl Default for NotifyHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifyHandle {
    /// Creates a handle with a fresh identity and no owners.
    pub fn new() -> Self {
        Self {
            id: OwnerId::fresh(),
            owners: RefCell::new(HashMap::new()),
        }
    }

    /// Returns the identity this node uses when registering as an owner.
    #[inline]
    pub fn id(&self) -> OwnerId {
        self.id
    }

    /// Registers `callback` under `owner`, replacing any prior callback for
    /// that owner. Always succeeds.
    pub fn register(&self, owner: OwnerId, callback: OwnerCallback) {
        self.owners.borrow_mut().insert(owner, callback);
    }

    /// Removes the entry for `owner`.
    ///
    /// Returns false if the owner was not registered; that is a normal
    /// outcome, not a fault, and unregistering twice is safe.
    pub fn unregister(&self, owner: OwnerId) -> bool {
        self.owners.borrow_mut().remove(&owner).is_some()
    }

    /// Invokes every registered owner callback.
    ///
    /// The callback set is snapshotted before any invocation, so a callback
    /// that mutates the registry mid-notification (including unregistering
    /// itself) neither corrupts the iteration nor skips or duplicates other
    /// callbacks. Invocation order is unspecified. A panicking callback
    /// unwinds immediately; the remaining callbacks in the round are not
    /// attempted.
    pub fn notify_owners(&self) {
        let snapshot: Vec<OwnerCallback> = self.owners.borrow().values().cloned().collect();
        for callback in snapshot {
            (*callback)();
        }
    }

    /// Builds the standard owner callback a container registers on its
    /// children: forward the child's change to this handle's own owners.
    ///
    /// Holds only a `Weak` reference, so a child outliving its former parent
    /// degrades to a no-op rather than keeping the parent alive.
    pub fn forwarder(self: &Rc<Self>) -> OwnerCallback {
        let weak: Weak<NotifyHandle> = Rc::downgrade(self);
        Rc::new(move || {
            if let Some(handle) = weak.upgrade() {
                handle.notify_owners();
            }
        })
    }

    /// Returns the number of registered owners.
    #[inline]
    pub fn owner_count(&self) -> usize {
        self.owners.borrow().len()
    }

    /// Returns true if at least one owner is registered.
    #[inline]
    pub fn is_observed(&self) -> bool {
        !self.owners.borrow().is_empty()
    }

    /// Returns true if `owner` is currently registered.
    pub fn has_owner(&self, owner: OwnerId) -> bool {
        self.owners.borrow().contains_key(&owner)
    }
}

impl fmt::Debug for NotifyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyHandle")
            .field("id", &self.id)
            .field("owner_count", &self.owner_count())
            .finish()
    }
}

/// The capability of being a node in a containment graph.
///
/// A node exposes its [`NotifyHandle`]; owners are managed exclusively
/// through `register_owner`/`unregister_owner`, never by reaching into the
/// registry of another node.
pub trait Notifiable {
    /// The handle carrying this node's identity and owner registry.
    fn notify_handle(&self) -> &NotifyHandle;

    /// Stores `callback` under `owner`, replacing any prior callback.
    fn register_owner(&self, owner: OwnerId, callback: OwnerCallback) {
        self.notify_handle().register(owner, callback);
    }

    /// Removes the callback for `owner`; false if none was registered.
    fn unregister_owner(&self, owner: OwnerId) -> bool {
        self.notify_handle().unregister(owner)
    }
}

/// Polymorphic capability query: is this value itself observable?
///
/// Containers call `as_notifiable` on every value they store and only
/// maintain child subscriptions for values that answer `Some`. Plain data
/// types implement the trait with the default body; observable types
/// override it:
///
/// ```ignore
/// impl Observe for Temperature {
///     fn as_notifiable(&self) -> Option<&dyn Notifiable> {
///         Some(self)
///     }
/// }
/// ```
pub trait Observe {
    /// Returns the notifiable view of this value, if it has one.
    fn as_notifiable(&self) -> Option<&dyn Notifiable> {
        None
    }
}

macro_rules! plain_observe {
    ($($ty:ty),* $(,)?) => {
        $(impl Observe for $ty {})*
    };
}

plain_observe!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
);

impl<T: Observe + ?Sized> Observe for Rc<T> {
    fn as_notifiable(&self) -> Option<&dyn Notifiable> {
        (**self).as_notifiable()
    }
}

impl<T: Observe> Observe for Option<T> {
    fn as_notifiable(&self) -> Option<&dyn Notifiable> {
        self.as_ref().and_then(Observe::as_notifiable)
    }
}
