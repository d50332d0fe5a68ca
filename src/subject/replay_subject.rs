use super::{History, Subject};

/// Subject that records the values pushed into it and replays them to every
/// new subscriber before the live ones.
///
/// A subscriber arriving after the subject stopped gets the recorded values
/// followed by the terminal signal.
///
/// ```rust
/// use rxkata::prelude::*;
/// use std::{convert::Infallible, sync::{Arc, Mutex}};
///
/// let seen = Arc::new(Mutex::new(vec![]));
/// let mut subject = ReplaySubject::<i32, Infallible>::new();
/// subject.next(1);
/// subject.next(2);
///
/// let c_seen = seen.clone();
/// subject.clone().subscribe(move |v| c_seen.lock().unwrap().push(v));
/// subject.next(3);
///
/// assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
/// ```
pub struct ReplaySubject<Item, Err>(Subject<Item, Err>);

impl_subject_wrapper!(ReplaySubject);

impl<Item, Err> Default for ReplaySubject<Item, Err> {
  fn default() -> Self { Self::new() }
}

impl<Item, Err> ReplaySubject<Item, Err> {
  /// Replays the whole history.
  pub fn new() -> Self { Self::with_capacity(usize::MAX) }

  /// Replays at most the last `capacity` values.
  pub fn with_capacity(capacity: usize) -> Self {
    ReplaySubject(Subject::with_history(Some(History::replay(capacity))))
  }
}
