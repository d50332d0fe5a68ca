use std::{collections::HashSet, hash::Hash};

use crate::prelude::*;

/// Emits every value the first time it appears. Remembers all values seen,
/// so memory grows with the number of distinct values.
#[derive(Clone)]
pub struct DistinctOp<S> {
  pub(crate) source: S,
}

impl<S> Observable for DistinctOp<S>
where
  S: Observable,
  S::Item: Eq + Hash + Clone + Send + 'static,
{
  type Item = S::Item;
  type Err = S::Err;
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<S::Item, S::Err> + Send + 'static,
  {
    self.source.actual_subscribe(DistinctObserver { observer, seen: HashSet::new() })
  }
}

pub struct DistinctObserver<O, Item> {
  observer: O,
  seen: HashSet<Item>,
}

impl<Item, Err, O> Observer<Item, Err> for DistinctObserver<O, Item>
where
  O: Observer<Item, Err>,
  Item: Eq + Hash + Clone,
{
  fn next(&mut self, value: Item) {
    if self.seen.insert(value.clone()) {
      self.observer.next(value);
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::sync::{Arc, Mutex};

  #[test]
  fn repeated_values_are_dropped() {
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    observable::from_iter(vec![1, 1, 2, 3, 2, 1, 4])
      .distinct()
      .subscribe(move |v| c_values.lock().unwrap().push(v));
    assert_eq!(*values.lock().unwrap(), vec![1, 2, 3, 4]);
  }

  #[test]
  fn strings() {
    let values = Arc::new(Mutex::new(vec![]));
    let c_values = values.clone();
    observable::from_iter(["First", "Second", "Third", "Fourth", "Fifth"])
      .map(|s| s.chars().next())
      .distinct()
      .subscribe(move |v| c_values.lock().unwrap().push(v));
    assert_eq!(*values.lock().unwrap(), vec![Some('F'), Some('S'), Some('T')]);
  }
}
