//! Observable trait, operator chaining and creation functions
//!
//! An observable is a value describing a sequence. Subscribing consumes it;
//! to subscribe again, clone it first. Cold sources redo their work for every
//! subscription:
//!
//! ```rust
//! use rxkata::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! let seen = Arc::new(Mutex::new(vec![]));
//! let c_seen = seen.clone();
//!
//! observable::from_iter(["Hello", "World"])
//!   .map(str::len)
//!   .subscribe(move |len| c_seen.lock().unwrap().push(len));
//!
//! assert_eq!(*seen.lock().unwrap(), vec![5, 5]);
//! ```

use std::{convert::Infallible, hash::Hash};

use crate::{
  error::TransformPanic,
  observer::{FnMutObserver, Observer, ObserverAll},
  ops::{
    buffer_count::BufferCountOp,
    distinct::DistinctOp,
    filter::FilterOp,
    lift::LiftOp,
    map::MapOp,
    observe_on::ObserveOnOp,
    reduce::{count_one, push_one, CountOp, ReduceFn, ReduceInitialFn, ReduceOp, ToListOp},
    scan::ScanOp,
    skip::SkipOp,
    subscribe_on::SubscribeOnOp,
    take::TakeOp,
  },
  scheduler::Scheduler,
  subscriber::Subscriber,
  subscription::{Subscription, SubscriptionFlag, SubscriptionHandle},
  type_hint::TypeHint,
};

mod create;
mod defer;
mod fetch;
mod from_iter;
#[cfg(feature = "timer")]
mod interval;
mod of;
#[cfg(feature = "timer")]
mod timer;
mod trivial;

pub use create::*;
pub use defer::*;
pub use fetch::*;
pub use from_iter::*;
#[cfg(feature = "timer")]
pub use interval::*;
pub use of::*;
#[cfg(feature = "timer")]
pub use timer::*;
pub use trivial::*;

/// A representation of any set of values over any amount of time.
///
/// Implementors describe how to attach an observer; the chaining and
/// subscribing methods live on [`ObservableExt`].
pub trait Observable: Sized {
  type Item;
  type Err;
  type Unsub: Subscription;

  /// Attaches `observer` and starts the sequence. Observers are `Send` so
  /// a sequence can be moved to another execution context by
  /// [`subscribe_on`](ObservableExt::subscribe_on).
  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Self::Item, Self::Err> + Send + 'static;
}

pub trait ObservableExt: Observable {
  /// Creates a new stream which calls a closure on each element and uses
  /// its return as the value.
  fn map<B, F>(self, f: F) -> MapOp<Self, F>
  where
    F: FnMut(Self::Item) -> B,
  {
    MapOp { source: self, func: f }
  }

  /// Injects a custom per-element transform into the chain.
  ///
  /// The transform may fail. An `Err` returned by it, or a panic raised from
  /// it, becomes the error signal of the downstream sequence and ends it.
  /// Upstream errors are converted with `E::from` and forwarded untouched
  /// otherwise.
  ///
  /// ```rust
  /// use rxkata::prelude::*;
  /// use std::sync::{Arc, Mutex};
  ///
  /// let lengths = Arc::new(Mutex::new(vec![]));
  /// let c_lengths = lengths.clone();
  /// observable::from_iter(["Wahib", "ul", "Haq"])
  ///   .lift(|word: &str| Ok::<_, RxError>(word.len()))
  ///   .subscribe_all(
  ///     move |len| c_lengths.lock().unwrap().push(len),
  ///     |err| panic!("unexpected {err}"),
  ///     || {},
  ///   );
  /// assert_eq!(*lengths.lock().unwrap(), vec![5, 2, 3]);
  /// ```
  fn lift<R, E, F>(self, f: F) -> LiftOp<Self, F, E>
  where
    F: FnMut(Self::Item) -> Result<R, E>,
    E: From<Self::Err> + From<TransformPanic>,
  {
    LiftOp { source: self, func: f, _hint: TypeHint::new() }
  }

  /// Emits only the values for which `filter` returns `true`.
  fn filter<F>(self, filter: F) -> FilterOp<Self, F>
  where
    F: FnMut(&Self::Item) -> bool,
  {
    FilterOp { source: self, filter }
  }

  /// Emits the first `count` values, then completes and stops the source.
  fn take(self, count: usize) -> TakeOp<Self> { TakeOp { source: self, count } }

  /// Drops the first `count` values.
  fn skip(self, count: usize) -> SkipOp<Self> { SkipOp { source: self, count } }

  /// Suppresses values already seen earlier in the sequence.
  fn distinct(self) -> DistinctOp<Self>
  where
    Self::Item: Eq + Hash + Clone,
  {
    DistinctOp { source: self }
  }

  /// Groups values into buffers of `count` items, opening a new buffer every
  /// `skip` items. `skip < count` gives overlapping windows, `skip == count`
  /// consecutive chunks, `skip > count` drops the values in between.
  /// Buffers still open at completion are emitted before completing.
  ///
  /// # Panics
  ///
  /// If `count` or `skip` is zero.
  fn buffer_count(self, count: usize, skip: usize) -> BufferCountOp<Self> {
    assert!(count > 0, "buffer_count: count must be greater than zero");
    assert!(skip > 0, "buffer_count: skip must be greater than zero");
    BufferCountOp { source: self, count, skip }
  }

  /// Emits each successive accumulation of `f(acc, value)`, starting from
  /// `initial`. The seed itself is not emitted.
  ///
  /// ```
  /// use rxkata::prelude::*;
  ///
  /// observable::from_iter(vec![1, 1, 1])
  ///   .scan_initial(100, |acc, v| acc + v)
  ///   .subscribe(|v| println!("{}", v));
  /// // print log:
  /// // 101
  /// // 102
  /// // 103
  /// ```
  fn scan_initial<Acc, F>(self, initial: Acc, f: F) -> ScanOp<Self, F, Acc>
  where
    F: FnMut(Acc, Self::Item) -> Acc,
  {
    ScanOp { source: self, func: f, initial }
  }

  /// Works like [`scan_initial`](Self::scan_initial), starting from
  /// `Acc::default()`.
  fn scan<Acc, F>(self, f: F) -> ScanOp<Self, F, Acc>
  where
    F: FnMut(Acc, Self::Item) -> Acc,
    Acc: Default,
  {
    self.scan_initial(Acc::default(), f)
  }

  /// Folds the values with `f`, the first value being the seed, and emits the
  /// result when the source completes. An empty source emits nothing.
  fn reduce<F>(self, f: F) -> ReduceOp<Self, ReduceFn<F>, Self::Item>
  where
    F: FnMut(Self::Item, Self::Item) -> Self::Item,
  {
    ReduceOp { source: self, strategy: ReduceFn(f), initial: None }
  }

  /// Folds the values into `initial` and emits the result when the source
  /// completes; an empty source emits `initial`.
  fn reduce_initial<Acc, F>(self, initial: Acc, f: F) -> ReduceOp<Self, ReduceInitialFn<F>, Acc>
  where
    F: FnMut(Acc, Self::Item) -> Acc,
  {
    ReduceOp { source: self, strategy: ReduceInitialFn(f), initial: Some(initial) }
  }

  /// Emits the number of values once the source completes.
  fn count(self) -> CountOp<Self, Self::Item> {
    self.reduce_initial(0, count_one as fn(usize, Self::Item) -> usize)
  }

  /// Emits all values as one `Vec` once the source completes.
  fn to_list(self) -> ToListOp<Self, Self::Item> {
    self.reduce_initial(Vec::new(), push_one as fn(Vec<Self::Item>, Self::Item) -> Vec<Self::Item>)
  }

  /// Runs the subscription, and therefore the source's work, on `scheduler`.
  fn subscribe_on<SD: Scheduler>(self, scheduler: SD) -> SubscribeOnOp<Self, SD> {
    SubscribeOnOp { source: self, scheduler }
  }

  /// Delivers every signal to the downstream observer through `scheduler`.
  fn observe_on<SD: Scheduler>(self, scheduler: SD) -> ObserveOnOp<Self, SD> {
    ObserveOnOp { source: self, scheduler }
  }

  /// Subscribes an observer and returns the handle that can cancel it.
  fn subscribe_with<O>(self, observer: O) -> SubscriptionHandle<Self::Unsub>
  where
    O: Observer<Self::Item, Self::Err> + Send + 'static,
  {
    let flag = SubscriptionFlag::default();
    let upstream = self.actual_subscribe(Subscriber::new(observer, flag.clone()));
    SubscriptionHandle::new(flag, upstream)
  }

  /// Subscribes with a `next` closure. Only available on sequences that
  /// cannot fail; use [`subscribe_all`](Self::subscribe_all) otherwise.
  fn subscribe<N>(self, next: N) -> SubscriptionHandle<Self::Unsub>
  where
    Self: Observable<Err = Infallible>,
    N: FnMut(Self::Item) + Send + 'static,
  {
    self.subscribe_with(FnMutObserver(next))
  }

  /// Subscribes with one closure per signal.
  fn subscribe_all<N, E, C>(self, next: N, error: E, complete: C) -> SubscriptionHandle<Self::Unsub>
  where
    N: FnMut(Self::Item) + Send + 'static,
    E: FnOnce(Self::Err) + Send + 'static,
    C: FnOnce() + Send + 'static,
  {
    self.subscribe_with(ObserverAll::new(next, error, complete))
  }
}

impl<T: Observable> ObservableExt for T {}
