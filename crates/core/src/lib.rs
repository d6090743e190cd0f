//! Cascade Core - notification contract and error types for Cascade containers.
//!
//! This crate provides the foundational pieces every Cascade container builds on:
//!
//! - `NotifyHandle`: a node's owner registry and fan-in notification point
//! - `OwnerId`: stable identity handle for containers and root observers
//! - `Notifiable`: the capability of being a node in a containment graph
//! - `Observe`: the polymorphic query "is this value itself observable?"
//! - `Error`: error types for container operations
//!
//! # Example
//!
//! ```rust
//! use cascade_core::{NotifyHandle, OwnerId};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let handle = NotifyHandle::new();
//! let fired = Rc::new(RefCell::new(0));
//!
//! let owner = OwnerId::fresh();
//! let fired_clone = fired.clone();
//! handle.register(owner, Rc::new(move || *fired_clone.borrow_mut() += 1));
//!
//! handle.notify_owners();
//! assert_eq!(*fired.borrow(), 1);
//!
//! handle.unregister(owner);
//! handle.notify_owners();
//! assert_eq!(*fired.borrow(), 1);
//! ```

#![no_std]

extern crate alloc;

mod error;
mod notify;

pub use error::{Error, Result};
pub use notify::{Notifiable, NotifyHandle, Observe, OwnerCallback, OwnerId};
