use std::{
  convert::Infallible,
  time::{Duration, Instant},
};

use crate::prelude::*;

/// Returns an observable which will emit a single `item` once after a given
/// `dur` using a given `scheduler`, then complete.
///
/// The wait occupies one task of `scheduler`; use a worker pool or
/// [`NewThread`], not an [`EventLoop`].
///
/// ```rust
/// use rxkata::prelude::*;
/// use std::{sync::mpsc::channel, time::Duration};
///
/// let (tx, rx) = channel();
/// observable::timer("ready", Duration::from_millis(5), NewThread)
///   .subscribe(move |v| tx.send(v).unwrap());
/// assert_eq!(rx.recv().unwrap(), "ready");
/// ```
pub fn timer<Item, SD>(item: Item, dur: Duration, scheduler: SD) -> TimerObservable<Item, SD> {
  TimerObservable { item, dur, scheduler }
}

/// Like [`timer`], but fires at `at`. An instant in the past fires right away.
pub fn timer_at<Item, SD>(item: Item, at: Instant, scheduler: SD) -> TimerObservable<Item, SD> {
  timer(item, until(at), scheduler)
}

/// Time left until `instant`, zero when it already passed.
pub(crate) fn until(instant: Instant) -> Duration {
  instant.saturating_duration_since(Instant::now())
}

/// Blocks the current task for `dur`.
pub(crate) fn wait(dur: Duration) {
  if dur.is_zero() {
    return;
  }
  futures::executor::block_on(futures_time::task::sleep(dur.into()));
}

#[derive(Clone)]
pub struct TimerObservable<Item, SD> {
  item: Item,
  dur: Duration,
  scheduler: SD,
}

impl<Item, SD> Observable for TimerObservable<Item, SD>
where
  Item: Send + 'static,
  SD: Scheduler,
{
  type Item = Item;
  type Err = Infallible;
  type Unsub = TaskHandle;

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Item, Infallible> + Send + 'static,
  {
    let Self { item, dur, scheduler } = self;
    scheduler.schedule(move || {
      wait(dur);
      if observer.is_closed() {
        tracing::trace!("timer fired after its consumer closed");
        return;
      }
      observer.next(item);
      observer.complete();
    })
  }
}
