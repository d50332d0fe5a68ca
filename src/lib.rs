//! # rxkata: reactive sequences with lifecycle-scoped subscriptions
//!
//! A small implementation of [Reactive Extensions](http://reactivex.io/)
//! built around three pieces: cold wrappers for blocking calls, a registry
//! that lets a component release every subscription it owns in one call, and
//! `lift` for plugging custom per-element transforms into a chain.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxkata::prelude::*;
//! use std::{io, time::Duration};
//!
//! let pool = worker_pool(2).unwrap();
//! let main = EventLoop::new();
//! let mut subscriptions = SubscriptionRegistry::new();
//!
//! let handle = observable::fetch(|| Ok::<_, io::Error>("octocat"))
//!   .lift(|login: &str| Ok::<_, RxError>(format!("owner: {login}")))
//!   .subscribe_on(pool)
//!   .observe_on(main.handle())
//!   .subscribe_with(log_observer("gist"));
//! subscriptions.add(handle);
//!
//! main.run_until_idle(Duration::from_millis(200));
//! subscriptions.clear();
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | A cold description of a sequence; subscribing runs it |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` signals |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`SubscriptionRegistry`] | Owns the subscriptions of one component |
//! | [`Scheduler`] | Where subscription or delivery happens |
//!
//! ## Feature Flags
//!
//! - **`futures-scheduler`** (default): [`worker_pool`], a
//!   `futures::executor::ThreadPool` used as a scheduler
//! - **`tokio-scheduler`**: use a `tokio::runtime::Handle` as a scheduler
//! - **`timer`** (default): time sources such as `observable::interval`
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`SubscriptionRegistry`]: subscription::SubscriptionRegistry
//! [`Scheduler`]: scheduler::Scheduler
//! [`worker_pool`]: scheduler::worker_pool
#[cfg(test)]
#[macro_use]
extern crate bencher;

pub mod error;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod scheduler;
pub mod subject;
pub mod subscriber;
pub mod subscription;
pub mod type_hint;

// Re-export the prelude module
pub use prelude::*;
