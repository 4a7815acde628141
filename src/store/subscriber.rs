use std::fmt;
use std::rc::Rc;

use crate::error::CallbackError;

/// A receiver that store callbacks are bound to.
///
/// This is the only capability a store asks of its subscribers. Anything that
/// can stand in for a UI element (a component handle, a widget id, a test
/// probe) can implement it; both methods have defaults.
pub trait Subscriber: 'static {
    /// Name used in log output and error messages.
    fn name(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }

    /// Whether this receiver can currently accept notifications.
    ///
    /// Checked once, when the subscription is registered. Returning `false`
    /// makes [`Store::subscribe`](crate::Store::subscribe) fail with
    /// [`StoreError::InvalidSubscriber`](crate::StoreError::InvalidSubscriber).
    fn is_receivable(&self) -> bool {
        true
    }
}

/// Values a subscriber callback may return.
///
/// Callbacks return either nothing, an optional value, or a `Result` of
/// either. Returned values are discarded by the store; only errors matter.
pub trait CallbackReturn<T> {
    /// Normalise the callback's return value.
    fn into_outcome(self) -> Result<Option<T>, CallbackError>;
}

impl<T> CallbackReturn<T> for () {
    fn into_outcome(self) -> Result<Option<T>, CallbackError> {
        Ok(None)
    }
}

impl<T> CallbackReturn<T> for Option<T> {
    fn into_outcome(self) -> Result<Option<T>, CallbackError> {
        Ok(self)
    }
}

impl<T, R, E> CallbackReturn<T> for Result<R, E>
where
    R: CallbackReturn<T>,
    E: Into<CallbackError>,
{
    fn into_outcome(self) -> Result<Option<T>, CallbackError> {
        self.map_err(Into::into)?.into_outcome()
    }
}

type BoundCallback<T> = Box<dyn Fn(&T) -> Result<Option<T>, CallbackError>>;

/// One registered (callback, receiver) pair. Immutable once created.
pub(crate) struct Subscription<T> {
    subscriber: String,
    callback: BoundCallback<T>,
}

impl<T: 'static> Subscription<T> {
    pub(crate) fn new<S, F, R>(callback: F, receiver: Rc<S>) -> Self
    where
        S: Subscriber + ?Sized,
        F: Fn(&S, &T) -> R + 'static,
        R: CallbackReturn<T>,
    {
        Self {
            subscriber: receiver.name(),
            callback: Box::new(move |value: &T| callback(&*receiver, value).into_outcome()),
        }
    }

    pub(crate) fn subscriber(&self) -> &str {
        &self.subscriber
    }

    /// Invoke the callback bound to its receiver, discarding any returned value.
    pub(crate) fn deliver(&self, value: &T) -> Result<(), CallbackError> {
        (self.callback)(value).map(|_| ())
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("subscriber", &self.subscriber)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Probe {
        seen: RefCell<Vec<i32>>,
    }

    impl Subscriber for Probe {
        fn name(&self) -> String {
            "probe".to_string()
        }
    }

    #[test]
    fn deliver_binds_receiver() {
        let probe = Rc::new(Probe {
            seen: RefCell::new(Vec::new()),
        });
        let subscription = Subscription::new(
            |probe: &Probe, value: &i32| probe.seen.borrow_mut().push(*value),
            Rc::clone(&probe),
        );

        subscription.deliver(&3).unwrap();
        subscription.deliver(&4).unwrap();

        assert_eq!(subscription.subscriber(), "probe");
        assert_eq!(*probe.seen.borrow(), vec![3, 4]);
    }

    #[test]
    fn returned_values_are_discarded() {
        let probe = Rc::new(Probe {
            seen: RefCell::new(Vec::new()),
        });
        let subscription = Subscription::new(|_: &Probe, value: &i32| Some(value * 2), probe);

        assert!(subscription.deliver(&21).is_ok());
    }

    #[test]
    fn callback_errors_are_surfaced() {
        let probe = Rc::new(Probe {
            seen: RefCell::new(Vec::new()),
        });
        let subscription = Subscription::new(
            |_: &Probe, _: &i32| -> Result<(), CallbackError> { Err("render failed".into()) },
            probe,
        );

        let err = subscription.deliver(&1).unwrap_err();
        assert_eq!(err.to_string(), "render failed");
    }

    #[test]
    fn default_name_is_type_name() {
        struct Badge;
        impl Subscriber for Badge {}

        assert!(Badge.name().ends_with("Badge"));
        assert!(Badge.is_receivable());
    }
}
