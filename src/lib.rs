//! # Mango Store
//!
//! A minimal reactive state container for propagating UI state between
//! independent components.
//!
//! - [`Store<T>`] owns a single [`ReactiveValue<T>`] and an ordered list of
//!   subscribers.
//! - Setting the value (through the store or the value itself) synchronously
//!   calls every subscriber's callback, in subscription order, bound to the
//!   subscriber that registered it.
//! - Subscribers implement [`Subscriber`], which is checked when they register.
//!
//! Everything runs on one thread: stores are `!Send` and callbacks may get,
//! set or subscribe to stores, including the one notifying them. The only
//! re-entry that panics is setting a store from inside its own
//! [`Store::read`] closure.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use mango_store::{Store, Subscriber};
//!
//! struct CartBadge {
//!     shown: Cell<u32>,
//! }
//!
//! impl Subscriber for CartBadge {}
//!
//! let store = Store::new(0u32);
//! let badge = Rc::new(CartBadge { shown: Cell::new(0) });
//!
//! store
//!     .subscribe(|badge: &CartBadge, count: &u32| badge.shown.set(*count), &badge)
//!     .unwrap();
//! store.set(3).unwrap();
//!
//! assert_eq!(badge.shown.get(), 3);
//! assert_eq!(store.get(), Some(3));
//! ```

pub mod error;
pub mod store;

// Re-export main types for convenience
pub use error::{CallbackError, Result, StoreError};
pub use store::{CallbackReturn, ReactiveValue, Store, Subscriber};
