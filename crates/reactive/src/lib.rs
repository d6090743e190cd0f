//! Cascade Reactive - observable containers with fan-in change propagation.
//!
//! This crate implements a set of observable containers that emit
//! fine-grained mutation events and propagate every change upward through an
//! arbitrary containment graph: a container registers itself as an owner of
//! each observable value it holds, so a change to a deeply nested leaf is
//! observable from every ancestor that (transitively) holds it.
//!
//! # Core Concepts
//!
//! - `ObservableObject`: leaf node with named fields and equality-gated
//!   assignment
//! - `ObservableList`: ordered, duplicate-permitting collection with
//!   structural events
//! - `ObservableMap`: key-unique collection with the same value-subscription
//!   behavior
//! - `SubscriptionManager`: per-container bookkeeping of direct listeners
//! - `FieldChanged` / `ListEvent` / `MapEvent`: the local events
//!
//! # Key Features
//!
//! - One structural event per mutation; bulk operations collapse to a single
//!   `Reset`
//! - Multiplicity-safe child subscriptions: a duplicated value stays
//!   subscribed until its last equal occurrence is gone
//! - Synchronous depth-first propagation: the full upward cascade completes
//!   before a mutating call returns
//! - Reentrant-safe dispatch: callbacks are invoked from snapshots and may
//!   mutate the container that is notifying them
//!
//! # Example
//!
//! ```ignore
//! use cascade_core::OwnerId;
//! use cascade_reactive::{Notifiable, ObservableList, ObservableMap};
//! use std::rc::Rc;
//!
//! // tracks: "fleet" -> [truck], where truck is an ObservableObject model.
//! let trucks: Rc<ObservableList<Rc<Truck>>> = Rc::new(ObservableList::new());
//! trucks.push(truck.clone());
//!
//! let fleets = ObservableMap::new();
//! fleets.insert("fleet", trucks.clone());
//!
//! // A root observer at the top of the graph.
//! fleets.register_owner(OwnerId::fresh(), Rc::new(|| redraw()));
//!
//! // Notifies the list, the map, and the root before returning.
//! truck.set_heading(90);
//! ```

#![no_std]

extern crate alloc;

pub mod event;
pub mod list;
pub mod map;
pub mod object;
pub mod subscription;

pub use event::{FieldChanged, ListEvent, MapEvent};
pub use list::ObservableList;
pub use map::ObservableMap;
pub use object::ObservableObject;
pub use subscription::{EventCallback, Subscription, SubscriptionId, SubscriptionManager};

// Re-export commonly used types from dependencies
pub use cascade_core::{Error, Notifiable, NotifyHandle, Observe, OwnerCallback, OwnerId, Result};
