//! Hot sequences that are observer and observable at once.
//!
//! Values pushed into a [`Subject`] are multicast to the observers attached
//! at that moment. Nothing is replayed except the terminal signal: an
//! observer that subscribes after the subject completed or failed gets that
//! signal right away. [`ReplaySubject`] and [`BehaviorSubject`] also keep
//! past values for late subscribers.

use std::collections::VecDeque;

use crate::{
  observable::Observable,
  observer::{BoxedObserver, Observer},
  rc::MutArc,
  subscription::{Subscription, SubscriptionFlag},
};

/// Forwards the subject surface of a newtype around [`Subject`].
macro_rules! impl_subject_wrapper {
  ($name:ident) => {
    impl<Item, Err> Clone for $name<Item, Err> {
      fn clone(&self) -> Self { $name(self.0.clone()) }
    }

    impl<Item, Err> $name<Item, Err> {
      /// Number of observers still attached.
      pub fn subscriber_count(&self) -> usize { self.0.subscriber_count() }

      /// `true` once the subject completed or failed.
      pub fn is_stopped(&self) -> bool { self.0.is_stopped() }
    }

    impl<Item: Clone, Err: Clone> $crate::observer::Observer<Item, Err> for $name<Item, Err> {
      #[inline]
      fn next(&mut self, value: Item) { $crate::observer::Observer::next(&mut self.0, value) }

      #[inline]
      fn error(self, err: Err) { $crate::observer::Observer::error(self.0, err) }

      #[inline]
      fn complete(self) { $crate::observer::Observer::<Item, Err>::complete(self.0) }

      #[inline]
      fn is_closed(&self) -> bool { self.0.is_stopped() }
    }

    impl<Item: Clone, Err: Clone> $crate::observable::Observable for $name<Item, Err> {
      type Item = Item;
      type Err = Err;
      type Unsub = $crate::subject::SubjectSubscription<Item, Err>;

      fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
      where
        O: $crate::observer::Observer<Item, Err> + Send + 'static,
      {
        $crate::observable::Observable::actual_subscribe(self.0, observer)
      }
    }
  };
}

mod behavior_subject;
mod replay_subject;
mod subscribers;

pub use behavior_subject::BehaviorSubject;
pub use replay_subject::ReplaySubject;
use subscribers::Subscribers;

#[derive(Clone)]
enum Terminal<Err> {
  Error(Err),
  Completed,
}

/// Values kept for observers that subscribe later.
struct History<Item> {
  values: VecDeque<Item>,
  capacity: usize,
  replay_after_stop: bool,
}

impl<Item> History<Item> {
  fn replay(capacity: usize) -> Self {
    History { values: VecDeque::new(), capacity, replay_after_stop: true }
  }

  fn current(initial: Item) -> Self {
    History { values: VecDeque::from([initial]), capacity: 1, replay_after_stop: false }
  }

  fn record(&mut self, value: Item) {
    if self.capacity == 0 {
      return;
    }
    while self.values.len() >= self.capacity {
      self.values.pop_front();
    }
    self.values.push_back(value);
  }
}

struct SubjectCore<Item, Err> {
  observers: Subscribers<BoxedObserver<Item, Err>>,
  terminal: Option<Terminal<Err>>,
  history: Option<History<Item>>,
}

impl<Item: Clone, Err> SubjectCore<Item, Err> {
  fn replay_to<O: Observer<Item, Err>>(&self, observer: &mut O) {
    let Some(history) = &self.history else {
      return;
    };
    if self.terminal.is_some() && !history.replay_after_stop {
      return;
    }
    for value in &history.values {
      if observer.is_closed() {
        break;
      }
      observer.next(value.clone());
    }
  }
}

/// Publish subject.
///
/// Clones share the same observers. Observer callbacks run while the subject
/// is locked, so a callback must not push into the same subject; it may
/// unsubscribe, though.
///
/// ```rust
/// use rxkata::prelude::*;
/// use std::{convert::Infallible, sync::{Arc, Mutex}};
///
/// let seen = Arc::new(Mutex::new(vec![]));
/// let mut subject = Subject::<i32, Infallible>::default();
/// subject.next(1);
///
/// let c_seen = seen.clone();
/// subject.clone().subscribe_all(move |v| c_seen.lock().unwrap().push(v), |_| {}, || {});
/// subject.next(2);
/// subject.complete();
///
/// assert_eq!(*seen.lock().unwrap(), vec![2]);
/// ```
pub struct Subject<Item, Err> {
  core: MutArc<SubjectCore<Item, Err>>,
}

impl<Item, Err> Default for Subject<Item, Err> {
  fn default() -> Self { Self::with_history(None) }
}

impl<Item, Err> Clone for Subject<Item, Err> {
  fn clone(&self) -> Self { Subject { core: self.core.clone() } }
}

impl<Item, Err> Subject<Item, Err> {
  pub fn new() -> Self { Self::default() }

  fn with_history(history: Option<History<Item>>) -> Self {
    let core = SubjectCore { observers: Subscribers::default(), terminal: None, history };
    Subject { core: MutArc::own(core) }
  }

  /// Number of observers still attached.
  pub fn subscriber_count(&self) -> usize {
    self.core.rc_deref_mut().observers.len::<Item, Err>()
  }

  /// `true` once the subject completed or failed.
  pub fn is_stopped(&self) -> bool { self.core.rc_deref_mut().terminal.is_some() }
}

impl<Item: Clone, Err> Subject<Item, Err> {
  /// Most recent recorded value while the subject is running.
  fn latest(&self) -> Option<Item> {
    let core = self.core.rc_deref_mut();
    if core.terminal.is_some() {
      return None;
    }
    core.history.as_ref().and_then(|h| h.values.back().cloned())
  }
}

impl<Item, Err> Observer<Item, Err> for Subject<Item, Err>
where
  Item: Clone,
  Err: Clone,
{
  fn next(&mut self, value: Item) {
    let mut core = self.core.rc_deref_mut();
    if core.terminal.is_some() {
      tracing::trace!("value pushed into a stopped subject dropped");
      return;
    }
    if let Some(history) = core.history.as_mut() {
      history.record(value.clone());
    }
    core.observers.broadcast_value::<Item, Err>(value);
  }

  fn error(self, err: Err) {
    let observers: Vec<_> = {
      let mut core = self.core.rc_deref_mut();
      if core.terminal.is_some() {
        return;
      }
      core.terminal = Some(Terminal::Error(err.clone()));
      core.observers.drain().collect()
    };
    for observer in observers {
      observer.error(err.clone());
    }
  }

  fn complete(self) {
    let observers: Vec<_> = {
      let mut core = self.core.rc_deref_mut();
      if core.terminal.is_some() {
        return;
      }
      core.terminal = Some(Terminal::Completed);
      core.observers.drain().collect()
    };
    for observer in observers {
      observer.complete();
    }
  }

  fn is_closed(&self) -> bool { self.is_stopped() }
}

impl<Item, Err> Observable for Subject<Item, Err>
where
  Item: Clone,
  Err: Clone,
{
  type Item = Item;
  type Err = Err;
  type Unsub = SubjectSubscription<Item, Err>;

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    let mut core = self.core.rc_deref_mut();
    core.replay_to(&mut observer);
    let Some(terminal) = core.terminal.clone() else {
      if observer.is_closed() {
        drop(core);
        return SubjectSubscription::closed(self.core);
      }
      let (id, cancelled) = core.observers.add(Box::new(observer));
      drop(core);
      return SubjectSubscription { core: self.core, id, cancelled };
    };
    drop(core);
    match terminal {
      Terminal::Error(err) => observer.error(err),
      Terminal::Completed => observer.complete(),
    }
    SubjectSubscription::closed(self.core)
  }
}

/// Detaches one observer from a [`Subject`].
pub struct SubjectSubscription<Item, Err> {
  core: MutArc<SubjectCore<Item, Err>>,
  id: usize,
  cancelled: SubscriptionFlag,
}

impl<Item, Err> SubjectSubscription<Item, Err> {
  fn closed(core: MutArc<SubjectCore<Item, Err>>) -> Self {
    let cancelled = SubscriptionFlag::default();
    cancelled.close();
    SubjectSubscription { core, id: usize::MAX, cancelled }
  }
}

impl<Item, Err> Subscription for SubjectSubscription<Item, Err> {
  fn unsubscribe(self) {
    if !self.cancelled.close() {
      return;
    }
    // Locked by a broadcast on this thread: the closed flag makes that
    // broadcast skip the entry and prune it.
    if let Some(mut core) = self.core.try_rc_deref_mut() {
      core.observers.remove(self.id);
    }
  }

  fn is_closed(&self) -> bool {
    self.cancelled.is_closed() || !self.core.rc_deref_mut().observers.contains(self.id)
  }
}
