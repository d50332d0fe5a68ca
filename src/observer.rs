//! Observer trait and implementations
//!
//! The Observer trait defines the consumer of data in the reactive pattern.
//! It provides three methods: next (for values), error (for errors), and
//! complete (for stream completion).

use std::convert::Infallible;

use crate::rc::MutArc;

pub mod logging;

// ============================================================================
// Observer Trait
// ============================================================================

/// Observer trait: The consumer of data in reactive programming
///
/// An Observer receives values, errors, and completion notifications from
/// an Observable.
pub trait Observer<Item, Err> {
  /// Receive the next value from the observable
  fn next(&mut self, value: Item);

  /// Handle an error from the observable
  ///
  /// This consumes the observer, as no more values can be emitted after an
  /// error
  fn error(self, err: Err);

  /// Handle completion of the observable
  ///
  /// This consumes the observer, as no more values can be emitted after
  /// completion
  fn complete(self);

  /// Returns `true` if the observer is closed and will not accept more values.
  ///
  /// Synchronous sources poll this to stop emitting early, for example once
  /// a `take` downstream has seen enough values.
  fn is_closed(&self) -> bool;
}

/// The producer-facing side of [`create`](crate::observable::create).
///
/// Unlike [`Observer`], every method takes `&mut self` so the emitter can be
/// used as a trait object. Signals after the first terminal one are ignored.
pub trait Emitter<Item, Err> {
  fn next(&mut self, value: Item);
  fn error(&mut self, err: Err);
  fn complete(&mut self);

  /// `true` once a terminal signal was sent or the consumer went away.
  fn is_closed(&self) -> bool;
}

// ============================================================================
// DynObserver Trait - Object-safe Observer
// ============================================================================

/// Helper trait to enable object-safe Observers (`Box<dyn Observer>`)
///
/// Standard Observer trait is not object-safe because the terminal methods
/// take `self` by value. DynObserver mirrors the interface for vtables.
pub trait DynObserver<Item, Err> {
  fn box_next(&mut self, value: Item);
  fn box_error(self: Box<Self>, err: Err);
  fn box_complete(self: Box<Self>);
  fn box_is_closed(&self) -> bool;
}

impl<T, Item, Err> DynObserver<Item, Err> for T
where
  T: Observer<Item, Err>,
{
  fn box_next(&mut self, value: Item) { self.next(value); }
  fn box_error(self: Box<Self>, err: Err) { self.error(err); }
  fn box_complete(self: Box<Self>) { self.complete(); }
  fn box_is_closed(&self) -> bool { self.is_closed() }
}

/// Boxed observer that can be handed to another thread.
pub type BoxedObserver<Item, Err> = Box<dyn DynObserver<Item, Err> + Send>;

impl<Item, Err> Observer<Item, Err> for BoxedObserver<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { (**self).box_next(value) }

  #[inline]
  fn error(self, err: Err) { self.box_error(err) }

  #[inline]
  fn complete(self) { self.box_complete() }

  #[inline]
  fn is_closed(&self) -> bool { (**self).box_is_closed() }
}

// ============================================================================
// Closure adapters
// ============================================================================

/// Observer for sequences that cannot fail: the closure handles `next` and
/// completion is ignored.
#[derive(Clone)]
pub struct FnMutObserver<F>(pub F);

impl<F, Item> Observer<Item, Infallible> for FnMutObserver<F>
where
  F: FnMut(Item),
{
  #[inline]
  fn next(&mut self, v: Item) { (self.0)(v); }

  #[inline]
  fn error(self, err: Infallible) { match err {} }

  #[inline]
  fn complete(self) {}

  #[inline]
  fn is_closed(&self) -> bool { false }
}

/// The full consumer triple: one closure per signal.
///
/// `error` and `complete` are `FnOnce` because at most one terminal signal is
/// ever delivered.
#[derive(Clone)]
pub struct ObserverAll<N, E, C> {
  pub next: N,
  pub error: E,
  pub complete: C,
}

impl<N, E, C> ObserverAll<N, E, C> {
  pub fn new(next: N, error: E, complete: C) -> Self { ObserverAll { next, error, complete } }
}

impl<Item, Err, N, E, C> Observer<Item, Err> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnOnce(Err),
  C: FnOnce(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value) }

  #[inline]
  fn error(self, err: Err) { (self.error)(err) }

  #[inline]
  fn complete(self) { (self.complete)() }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

// ============================================================================
// Observer implementations for Option and shared Option wrappers
// ============================================================================

/// Option observer - None ignores all events, Some delegates to inner
impl<O, Item, Err> Observer<Item, Err> for Option<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if let Some(inner) = self {
      inner.next(value);
    }
  }

  fn error(self, err: Err) {
    if let Some(inner) = self {
      inner.error(err);
    }
  }

  fn complete(self) {
    if let Some(inner) = self {
      inner.complete();
    }
  }

  fn is_closed(&self) -> bool { self.as_ref().map_or(true, Observer::is_closed) }
}

/// MutArc<Option<O>> - shared ownership observer, used when delivery happens
/// from scheduled tasks. Terminal signals `take()` the inner observer so only
/// the first one gets through.
impl<O, Item, Err> Observer<Item, Err> for MutArc<Option<O>>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if let Some(inner) = self.rc_deref_mut().as_mut() {
      inner.next(value);
    }
  }

  fn error(self, err: Err) {
    let inner = self.rc_deref_mut().take();
    if let Some(inner) = inner {
      inner.error(err);
    }
  }

  fn complete(self) {
    let inner = self.rc_deref_mut().take();
    if let Some(inner) = inner {
      inner.complete();
    }
  }

  fn is_closed(&self) -> bool { self.rc_deref_mut().as_ref().map_or(true, Observer::is_closed) }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
  use super::*;

  struct TestObserver {
    values: Vec<i32>,
  }

  impl Observer<i32, ()> for TestObserver {
    fn next(&mut self, value: i32) { self.values.push(value); }

    fn error(self, _: ()) {}

    fn complete(self) {}

    fn is_closed(&self) -> bool { false }
  }

  #[test]
  fn test_observer_trait() {
    let mut obs = TestObserver { values: vec![] };
    obs.next(1);
    obs.next(2);
    assert_eq!(obs.values, vec![1, 2]);
    assert!(!obs.is_closed());
  }

  #[test]
  fn test_closure_as_observer() {
    let mut count = 0;
    let mut closure_obs = FnMutObserver(|v: i32| {
      count += v;
    });

    closure_obs.next(10);
    closure_obs.next(20);
    assert_eq!(count, 30);
  }

  #[test]
  fn observer_all_routes_each_signal() {
    let mut values = vec![];
    let mut err = None;
    let mut obs = ObserverAll::new(|v: i32| values.push(v), |e: String| err = Some(e), || {});
    obs.next(1);
    obs.next(2);
    obs.error("boom".to_owned());
    assert_eq!(values, vec![1, 2]);
    assert_eq!(err.as_deref(), Some("boom"));
  }

  #[test]
  fn shared_option_delivers_one_terminal() {
    let completes = MutArc::own(0);
    let c_completes = completes.clone();
    let shared = MutArc::own(Some(ObserverAll::new(
      |_: i32| {},
      |_: ()| {},
      move || *c_completes.rc_deref_mut() += 1,
    )));

    Observer::<i32, ()>::complete(shared.clone());
    Observer::<i32, ()>::complete(shared.clone());
    assert_eq!(*completes.rc_deref_mut(), 1);
    assert!(Observer::<i32, ()>::is_closed(&shared));
  }

  #[test]
  fn boxed_observer_forwards() {
    let values = MutArc::own(vec![]);
    let c_values = values.clone();
    let mut boxed: BoxedObserver<i32, ()> = Box::new(ObserverAll::new(
      move |v| c_values.rc_deref_mut().push(v),
      |_: ()| {},
      || {},
    ));
    boxed.next(3);
    boxed.complete();
    assert_eq!(*values.rc_deref_mut(), vec![3]);
  }
}
