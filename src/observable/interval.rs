use std::{
  convert::Infallible,
  time::{Duration, Instant},
};

use super::timer::{until, wait};
use crate::prelude::*;

/// Creates an observable which will fire at `dur` time into the future,
/// and will repeat every `dur` interval after.
///
/// Emits `0, 1, 2, ...` and never completes on its own. The ticking runs as
/// one long task of `scheduler` that ends once the consumer is closed.
///
/// ```rust
/// use rxkata::prelude::*;
/// use std::{sync::mpsc::channel, time::Duration};
///
/// let (tx, rx) = channel();
/// observable::interval(Duration::from_millis(1), NewThread)
///   .take(3)
///   .subscribe(move |v| tx.send(v).unwrap());
/// assert_eq!(rx.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
/// ```
pub fn interval<SD>(dur: Duration, scheduler: SD) -> IntervalObservable<SD> {
  IntervalObservable { dur, delay: None, scheduler }
}

/// Creates an observable which will fire at the time specified by `at`,
/// and then will repeat every `dur` interval after
pub fn interval_at<SD>(at: Instant, dur: Duration, scheduler: SD) -> IntervalObservable<SD> {
  IntervalObservable { dur, delay: Some(until(at)), scheduler }
}

#[derive(Clone)]
pub struct IntervalObservable<SD> {
  dur: Duration,
  delay: Option<Duration>,
  scheduler: SD,
}

impl<SD: Scheduler> Observable for IntervalObservable<SD> {
  type Item = usize;
  type Err = Infallible;
  type Unsub = TaskHandle;

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<usize, Infallible> + Send + 'static,
  {
    let Self { dur, delay, scheduler } = self;
    scheduler.schedule(move || {
      let mut pause = delay.unwrap_or(dur);
      for seq in 0.. {
        wait(pause);
        if observer.is_closed() {
          break;
        }
        observer.next(seq);
        pause = dur;
      }
      tracing::trace!("interval stopped");
    })
  }
}
