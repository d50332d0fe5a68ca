use crate::prelude::*;

/// Emits only the first `count` values emitted by the source Observable.
///
/// If the source emits fewer than `count` values then all of its values are
/// emitted. After that, it completes, regardless if the source completes.
///
/// ```rust
/// use rxkata::prelude::*;
///
/// observable::range(0, 10).take(5).subscribe(|v| println!("{}", v));
/// // print logs:
/// // 0
/// // 1
/// // 2
/// // 3
/// // 4
/// ```
#[derive(Clone)]
pub struct TakeOp<S> {
  pub(crate) source: S,
  pub(crate) count: usize,
}

impl<S: Observable> Observable for TakeOp<S> {
  type Item = S::Item;
  type Err = S::Err;
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<S::Item, S::Err> + Send + 'static,
  {
    let mut observer = Some(observer);
    if self.count == 0 {
      if let Some(observer) = observer.take() {
        observer.complete();
      }
    }
    self.source.actual_subscribe(TakeObserver { observer, count: self.count, hits: 0 })
  }
}

pub struct TakeObserver<O> {
  observer: Option<O>,
  count: usize,
  hits: usize,
}

impl<Item, Err, O> Observer<Item, Err> for TakeObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    let Some(observer) = self.observer.as_mut() else {
      return;
    };
    self.hits += 1;
    observer.next(value);
    if self.hits >= self.count {
      if let Some(observer) = self.observer.take() {
        observer.complete();
      }
    }
  }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
