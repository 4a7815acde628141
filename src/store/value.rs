use std::cell::RefCell;
use std::fmt;
use std::rc::Weak;

use super::StoreInner;
use crate::error::{Result, StoreError};

/// The value slot owned by a [`Store`](crate::Store).
///
/// Every replacement goes through [`set`](ReactiveValue::set), which asks the
/// owning store to publish the new value to its subscribers.
pub struct ReactiveValue<T: 'static> {
    slot: RefCell<Option<T>>,
    store: Weak<StoreInner<T>>,
}

impl<T: 'static> ReactiveValue<T> {
    pub(crate) fn new(initial: T, store: Weak<StoreInner<T>>) -> Self {
        Self {
            slot: RefCell::new(Some(initial)),
            store,
        }
    }

    /// Read the current value with a function without cloning.
    ///
    /// The slot stays borrowed while `f` runs.
    ///
    /// # Panics
    ///
    /// Panics if `f` calls [`set`](ReactiveValue::set) or
    /// [`update`](ReactiveValue::update) on this same value. Read with
    /// [`get`](ReactiveValue::get) first when the new value depends on the old.
    pub fn with<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        let slot = self.slot.borrow();
        f(slot.as_ref())
    }

    /// Whether the slot currently holds a value.
    pub fn is_set(&self) -> bool {
        self.slot.borrow().is_some()
    }
}

impl<T: Clone + 'static> ReactiveValue<T> {
    /// Get a clone of the current value.
    ///
    /// Returns `None` only while the slot is being replaced.
    pub fn get(&self) -> Option<T> {
        self.slot.borrow().clone()
    }

    /// Replace the value and publish it to the owning store's subscribers.
    ///
    /// The old value is cleared before the new one is assigned. Subscribers
    /// are notified before this returns; the first failing callback ends the
    /// fan-out and its error is returned, with the new value already in place.
    pub fn set(&self, value: T) -> Result<T> {
        let store = self.store.upgrade().ok_or(StoreError::Detached)?;

        // Clear, then assign. The old value is dropped with the slot unborrowed.
        drop(self.slot.replace(None));
        *self.slot.borrow_mut() = Some(value.clone());

        store.publish(&value)?;
        Ok(value)
    }

    /// Modify a copy of the current value in place, then [`set`](ReactiveValue::set) it.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> Result<T> {
        let mut next = self.get().ok_or(StoreError::Vacant)?;
        f(&mut next);
        self.set(next)
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for ReactiveValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.try_borrow() {
            Ok(slot) => f.debug_tuple("ReactiveValue").field(&*slot).finish(),
            Err(_) => f.write_str("ReactiveValue(<borrowed>)"),
        }
    }
}
