use crate::prelude::*;

/// Emits every intermediate accumulation of the source values.
///
/// Created by [`scan`](ObservableExt::scan) and
/// [`scan_initial`](ObservableExt::scan_initial).
#[derive(Clone)]
pub struct ScanOp<S, F, Acc> {
  pub(crate) source: S,
  pub(crate) func: F,
  pub(crate) initial: Acc,
}

impl<S, F, Acc> Observable for ScanOp<S, F, Acc>
where
  S: Observable,
  F: FnMut(Acc, S::Item) -> Acc + Send + 'static,
  Acc: Clone + Send + 'static,
{
  type Item = Acc;
  type Err = S::Err;
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Acc, S::Err> + Send + 'static,
  {
    let ScanOp { source, func, initial } = self;
    source.actual_subscribe(ScanObserver { observer, func, acc: Some(initial) })
  }
}

pub struct ScanObserver<O, F, Acc> {
  observer: O,
  func: F,
  acc: Option<Acc>,
}

impl<Item, Err, O, F, Acc> Observer<Item, Err> for ScanObserver<O, F, Acc>
where
  O: Observer<Acc, Err>,
  F: FnMut(Acc, Item) -> Acc,
  Acc: Clone,
{
  fn next(&mut self, value: Item) {
    if let Some(acc) = self.acc.take() {
      let acc = (self.func)(acc, value);
      self.acc = Some(acc.clone());
      self.observer.next(acc);
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
  fn scan_initial() {
    let emitted = Arc::new(Mutex::new(vec![]));
    let c_emitted = emitted.clone();
    observable::from_iter(vec![1, 1, 1, 1, 1])
      .scan_initial(100, |acc, v| acc + v)
      .subscribe(move |v| c_emitted.lock().unwrap().push(v));

    assert_eq!(*emitted.lock().unwrap(), vec![101, 102, 103, 104, 105]);
  }

  #[test]
  fn scan_with_default() {
    let emitted = Arc::new(Mutex::new(vec![]));
    let c_emitted = emitted.clone();
    observable::from_iter(["a", "bb", "ccc"])
      .scan(|acc: usize, v| acc + v.len())
      .subscribe(move |v| c_emitted.lock().unwrap().push(v));

    assert_eq!(*emitted.lock().unwrap(), vec![1, 3, 6]);
  }

  #[test]
  fn running_average() {
    #[derive(Clone, Default)]
    struct Average {
      sum: i32,
      count: i32,
    }

    let emitted = Arc::new(Mutex::new(vec![]));
    let c_emitted = emitted.clone();
    observable::from_iter([2, 4, 9])
      .scan(|acc: Average, v| Average { sum: acc.sum + v, count: acc.count + 1 })
      .map(|a| a.sum / a.count)
      .subscribe(move |v| c_emitted.lock().unwrap().push(v));

    assert_eq!(*emitted.lock().unwrap(), vec![2, 3, 5]);
  }

  #[test]
  fn errors_pass_through() {
    let errors = Arc::new(Mutex::new(vec![]));
    let c_errors = errors.clone();
    observable::throw_err::<i32, _>("boom")
      .scan_initial(0, |acc, v| acc + v)
      .subscribe_all(
        |_| panic!("no value expected"),
        move |e| c_errors.lock().unwrap().push(e),
        || {},
      );
    assert_eq!(*errors.lock().unwrap(), vec!["boom"]);
  }
}
