//! Publish-subscribe stores.
//!
//! A [`Store`] owns one [`ReactiveValue`] and a permanent, ordered registry of
//! subscribers. Replacing the value publishes it synchronously to every
//! subscriber, each callback receiving its own [`Subscriber`] as receiver.

mod store;
mod subscriber;
mod value;

pub(crate) use store::StoreInner;
pub use store::Store;
pub use subscriber::{CallbackReturn, Subscriber};
pub use value::ReactiveValue;
