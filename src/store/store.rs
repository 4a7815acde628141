use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, debug_span, trace, warn};

use super::subscriber::{CallbackReturn, Subscriber, Subscription};
use super::value::ReactiveValue;
use crate::error::{Result, StoreError};

/// Shared state behind every clone of a [`Store`].
pub(crate) struct StoreInner<T: 'static> {
    label: Option<String>,
    value: ReactiveValue<T>,
    subscribers: RefCell<Vec<Rc<Subscription<T>>>>,
}

impl<T: 'static> StoreInner<T> {
    fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("unlabelled")
    }

    /// Fan `value` out to every subscription registered when the call starts.
    pub(crate) fn publish(&self, value: &T) -> Result<()> {
        // Snapshot so callbacks can subscribe or set without holding a borrow.
        let subscribers: Vec<_> = self.subscribers.borrow().clone();

        let span = debug_span!("publish", store = self.label(), subscribers = subscribers.len());
        let _enter = span.enter();

        for (index, subscription) in subscribers.iter().enumerate() {
            trace!(index, subscriber = subscription.subscriber(), "delivering value");
            if let Err(source) = subscription.deliver(value) {
                warn!(
                    index,
                    subscriber = subscription.subscriber(),
                    error = %source,
                    "subscriber callback failed, skipping remaining subscribers"
                );
                return Err(StoreError::CallbackFailed {
                    index,
                    subscriber: subscription.subscriber().to_string(),
                    source,
                });
            }
        }

        Ok(())
    }
}

/// A single-threaded publish-subscribe store.
///
/// A store owns one [`ReactiveValue`] and an ordered list of subscriptions.
/// Setting the value synchronously calls every subscriber's callback, in the
/// order they subscribed, with the subscriber passed as the receiver.
///
/// Subscriptions are permanent: there is no way to remove one, and the store
/// keeps each receiver alive for as long as the store lives.
///
/// Cloning a store yields another handle to the same value and registry.
pub struct Store<T: 'static> {
    inner: Rc<StoreInner<T>>,
}

impl<T: 'static> Store<T> {
    /// Create a new store with the given initial value.
    pub fn new(initial: T) -> Self {
        Self::build(None, initial)
    }

    /// Create a new store whose label shows up in log output and `Debug`.
    pub fn with_label(label: impl Into<String>, initial: T) -> Self {
        Self::build(Some(label.into()), initial)
    }

    fn build(label: Option<String>, initial: T) -> Self {
        let inner = Rc::new_cyclic(|store| StoreInner {
            label,
            value: ReactiveValue::new(initial, store.clone()),
            subscribers: RefCell::new(Vec::new()),
        });
        debug!(store = inner.label(), "store created");
        Self { inner }
    }

    /// The value owned by this store.
    pub fn value(&self) -> &ReactiveValue<T> {
        &self.inner.value
    }

    /// The label given at construction, if any.
    pub fn label(&self) -> Option<&str> {
        self.inner.label.as_deref()
    }

    /// Number of registered subscriptions, duplicates included.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// Register `callback` to be called with every published value.
    ///
    /// The callback receives `subscriber` as its receiver. Registering the same
    /// subscriber (or the same callback) more than once is allowed and results
    /// in one call per registration. A subscription added while a publish is
    /// running is only called from the next publish onward.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidSubscriber`] without registering anything
    /// when [`Subscriber::is_receivable`] is false.
    pub fn subscribe<S, F, R>(&self, callback: F, subscriber: &Rc<S>) -> Result<()>
    where
        S: Subscriber + ?Sized,
        F: Fn(&S, &T) -> R + 'static,
        R: CallbackReturn<T>,
    {
        if !subscriber.is_receivable() {
            let name = subscriber.name();
            warn!(store = self.inner.label(), subscriber = %name, "rejected subscriber");
            return Err(StoreError::InvalidSubscriber { subscriber: name });
        }

        let subscription = Subscription::new(callback, Rc::clone(subscriber));
        debug!(
            store = self.inner.label(),
            subscriber = subscription.subscriber(),
            "subscribed"
        );
        self.inner.subscribers.borrow_mut().push(Rc::new(subscription));
        Ok(())
    }

    /// Call every registered callback with `value`, in registration order.
    ///
    /// Callback return values are discarded.
    ///
    /// # Errors
    ///
    /// The first failing callback stops the fan-out; subscribers after it are
    /// not called for this value. Its error is returned as
    /// [`StoreError::CallbackFailed`].
    pub fn publish(&self, value: &T) -> Result<()> {
        self.inner.publish(value)
    }

    /// Read the current value with a function without cloning.
    ///
    /// # Panics
    ///
    /// Panics if `f` sets or updates this same store, since the value stays
    /// borrowed while `f` runs. See [`ReactiveValue::with`].
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(Option<&T>) -> R,
    {
        self.inner.value.with(f)
    }
}

impl<T: Clone + 'static> Store<T> {
    /// Get a clone of the current value.
    pub fn get(&self) -> Option<T> {
        self.inner.value.get()
    }

    /// Set a new value and publish it. See [`ReactiveValue::set`].
    pub fn set(&self, value: T) -> Result<T> {
        self.inner.value.set(value)
    }

    /// Update the value using a function. See [`ReactiveValue::update`].
    pub fn update<F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut T),
    {
        self.inner.value.update(f)
    }
}

impl<T: 'static> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("label", &self.inner.label)
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}
