//! Subscription trait and handles
//!
//! A subscription is the cancellation side of an attachment between an
//! observer and a sequence. `unsubscribe` consumes the subscription, so a
//! cancelled handle cannot be reused.

use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

mod boxed;
mod registry;
mod tuple;

pub use boxed::*;
#[cfg(test)]
pub(crate) use boxed::mock;
pub use registry::*;
pub use tuple::*;

/// Subscription returned by `Observable::actual_subscribe` to allow
/// unsubscribing.
pub trait Subscription {
  /// Deregisters the observer before the sequence has delivered all its
  /// signals. Unsubscribing an already closed subscription is a no-op.
  fn unsubscribe(self);

  fn is_closed(&self) -> bool;
}

/// Subscription of a source that finished its work inside `actual_subscribe`.
impl Subscription for () {
  #[inline]
  fn unsubscribe(self) {}

  #[inline]
  fn is_closed(&self) -> bool { true }
}

impl<T: Subscription> Subscription for Option<T> {
  #[inline]
  fn unsubscribe(self) {
    if let Some(inner) = self {
      inner.unsubscribe()
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.as_ref().map_or(true, Subscription::is_closed) }
}

/// Closed state shared between a [`SubscriptionHandle`] and the observer it
/// guards.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionFlag(Arc<AtomicBool>);

impl SubscriptionFlag {
  /// Closes the flag. Returns `true` for the call that actually closed it.
  #[inline]
  pub fn close(&self) -> bool { !self.0.swap(true, Ordering::AcqRel) }

  #[inline]
  pub fn is_closed(&self) -> bool { self.0.load(Ordering::Acquire) }
}

/// What `subscribe*` hands back: the only right to cancel one consumer
/// attachment.
///
/// The handle closes when the sequence delivers its terminal signal or when
/// it is unsubscribed, whichever happens first. Signals that arrive after
/// that are dropped.
pub struct SubscriptionHandle<U> {
  flag: SubscriptionFlag,
  upstream: U,
}

impl<U> SubscriptionHandle<U> {
  pub(crate) fn new(flag: SubscriptionFlag, upstream: U) -> Self {
    SubscriptionHandle { flag, upstream }
  }
}

impl<U: Subscription> Subscription for SubscriptionHandle<U> {
  fn unsubscribe(self) {
    if self.flag.close() {
      tracing::trace!("subscription cancelled");
    }
    self.upstream.unsubscribe();
  }

  #[inline]
  fn is_closed(&self) -> bool { self.flag.is_closed() }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn flag_closes_once() {
    let flag = SubscriptionFlag::default();
    let c_flag = flag.clone();
    assert!(!flag.is_closed());
    assert!(c_flag.close());
    assert!(!flag.close());
    assert!(flag.is_closed());
  }

  #[test]
  fn handle_reports_cancellation() {
    let flag = SubscriptionFlag::default();
    let handle = SubscriptionHandle::new(flag.clone(), ());
    assert!(!handle.is_closed());
    handle.unsubscribe();
    assert!(flag.is_closed());
  }

  #[test]
  fn unit_and_option_subscriptions() {
    assert!(().is_closed());
    let none: Option<()> = None;
    assert!(none.is_closed());
    none.unsubscribe();
  }
}
