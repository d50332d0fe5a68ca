use crate::{
  prelude::*,
  rc::MutArc,
  scheduler::{Scheduler, TaskHandle},
};

/// Moves the subscription, and with it the source's work, onto `scheduler`.
///
/// Only where the subscription happens changes; a source that emits
/// synchronously then emits from the scheduler's context.
#[derive(Clone)]
pub struct SubscribeOnOp<S, SD> {
  pub(crate) source: S,
  pub(crate) scheduler: SD,
}

impl<S, SD> Observable for SubscribeOnOp<S, SD>
where
  S: Observable + Send + 'static,
  S::Unsub: Send + 'static,
  SD: Scheduler,
{
  type Item = S::Item;
  type Err = S::Err;
  type Unsub = TupleSubscription<TaskHandle, UpstreamSubscription<S::Unsub>>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<S::Item, S::Err> + Send + 'static,
  {
    let upstream = UpstreamSubscription(MutArc::own(UpstreamSlot { cancelled: false, unsub: None }));
    let c_upstream = upstream.clone();
    let source = self.source;
    let task = self.scheduler.schedule(move || {
      let unsub = source.actual_subscribe(observer);
      c_upstream.attach(unsub);
    });
    TupleSubscription::new(task, upstream)
  }
}

struct UpstreamSlot<U> {
  cancelled: bool,
  unsub: Option<U>,
}

/// The subscription the source returns once the scheduled task ran.
pub struct UpstreamSubscription<U>(MutArc<UpstreamSlot<U>>);

impl<U> Clone for UpstreamSubscription<U> {
  fn clone(&self) -> Self { UpstreamSubscription(self.0.clone()) }
}

impl<U: Subscription> UpstreamSubscription<U> {
  fn attach(&self, unsub: U) {
    let mut slot = self.0.rc_deref_mut();
    if slot.cancelled {
      drop(slot);
      unsub.unsubscribe();
    } else {
      slot.unsub = Some(unsub);
    }
  }
}

impl<U: Subscription> Subscription for UpstreamSubscription<U> {
  fn unsubscribe(self) {
    let unsub = {
      let mut slot = self.0.rc_deref_mut();
      slot.cancelled = true;
      slot.unsub.take()
    };
    unsub.unsubscribe();
  }

  /// Open until the source has been subscribed and its subscription closed.
  fn is_closed(&self) -> bool {
    let slot = self.0.rc_deref_mut();
    slot.cancelled || slot.unsub.as_ref().is_some_and(Subscription::is_closed)
  }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{
    sync::{
      atomic::{AtomicUsize, Ordering},
      mpsc::channel,
      Arc,
    },
    thread,
    time::Duration,
  };

  #[test]
  fn thread_pool() {
    let pool = worker_pool(2).unwrap();
    let (tx, rx) = channel();
    observable::from_iter(1..5).subscribe_on(pool).subscribe_all(
      move |v| tx.send((v, thread::current().id())).unwrap(),
      |_| {},
      || {},
    );

    let received: Vec<_> = rx.iter().take(4).collect();
    assert_eq!(received.iter().map(|(v, _)| *v).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    assert!(received.iter().all(|(_, id)| *id != thread::current().id()));
  }

  #[test]
  fn cancel_before_the_task_runs() {
    let event_loop = EventLoop::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let c_calls = calls.clone();

    let handle = observable::fetch(move || {
      c_calls.fetch_add(1, Ordering::SeqCst);
      Ok::<_, RxError>(1)
    })
    .subscribe_on(event_loop.handle())
    .subscribe_all(|_| {}, |_| {}, || {});

    handle.unsubscribe();
    event_loop.run_pending();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
  }

  #[test]
  fn blocking_call_is_not_interrupted_but_its_value_is_dropped() {
    let pool = worker_pool(1).unwrap();
    let (started_tx, started_rx) = channel();
    let (release_tx, release_rx) = channel::<()>();
    let (finished_tx, finished_rx) = channel();
    let values = Arc::new(AtomicUsize::new(0));
    let c_values = values.clone();

    let handle = observable::fetch(move || {
      started_tx.send(()).unwrap();
      release_rx.recv().unwrap();
      finished_tx.send(()).unwrap();
      Ok::<_, RxError>(7)
    })
    .subscribe_on(pool)
    .subscribe_all(
      move |_| {
        c_values.fetch_add(1, Ordering::SeqCst);
      },
      |_| {},
      || {},
    );

    started_rx.recv().unwrap();
    handle.unsubscribe();
    release_tx.send(()).unwrap();
    finished_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    thread::sleep(Duration::from_millis(20));

    assert_eq!(values.load(Ordering::SeqCst), 0);
  }
}
