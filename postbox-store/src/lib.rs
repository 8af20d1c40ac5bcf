//! Observable application state for single-threaded UI event loops.
//!
//! The crate provides the small set of building blocks a view layer needs
//! to stay in sync with shared state without owning it:
//! - [`Store`], a holder of immutable state snapshots updated only by
//!   dispatched actions run through a reducer, with effects reacting to
//!   actions after they were reduced;
//! - [`Select`], a projection pipeline over the store with change
//!   detection operators (`distinct_until_changed`,
//!   `distinct_until_key_changed`) and `take`;
//! - [`Subject`], a multicast emitter for streams that do not live in the
//!   store (for example form value changes);
//! - [`Subscription`] and [`SubscriptionBag`], disposable handles that are
//!   released explicitly or when dropped.
//!
//! Everything here is `Rc`-based and `!Send`: state lives on
//! the UI thread and is never shared across threads.

mod registry;
mod select;
mod store;
mod subject;
mod subscription;

pub use select::Select;
pub use store::{Effect, Store};
pub use subject::Subject;
pub use subscription::{Subscription, SubscriptionBag};
