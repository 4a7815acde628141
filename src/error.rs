//! Error types for stores and their subscribers.

use std::result;

use thiserror::Error;

/// Boxed error produced by a failing subscriber callback.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while registering subscribers or publishing values.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The subscriber cannot receive notifications and was not registered
    #[error("subscriber '{subscriber}' cannot receive notifications")]
    InvalidSubscriber {
        /// Name reported by the rejected subscriber
        subscriber: String,
    },

    /// A subscriber callback failed and the rest of the fan-out was skipped
    #[error("callback #{index} for subscriber '{subscriber}' failed: {source}")]
    CallbackFailed {
        /// Registration index of the failing subscription
        index: usize,
        /// Name of the subscriber the callback was bound to
        subscriber: String,
        /// Error returned by the callback
        source: CallbackError,
    },

    /// The value slot was empty when a read-modify-write needed it.
    ///
    /// The slot is only empty inside `set`, between clearing the old value and
    /// assigning the new one, so this needs an `update` issued while the old
    /// value is being dropped.
    #[error("reactive value has no current value")]
    Vacant,

    /// The value outlived the store that owns it.
    ///
    /// A value is only reachable through its store, so the public API never
    /// returns this; it replaces a panic on the failed back-reference upgrade.
    #[error("reactive value is no longer attached to a store")]
    Detached,
}

/// Result alias used throughout the crate.
pub type Result<T> = result::Result<T, StoreError>;
