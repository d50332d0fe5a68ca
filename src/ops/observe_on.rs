use crate::{prelude::*, rc::MutArc, scheduler::Scheduler};

/// Re-emits every signal of the source through `scheduler`.
///
/// Element order is kept when the scheduler runs tasks in order, as
/// [`EventLoop`](crate::scheduler::EventLoop) does. Signals still queued when
/// the subscription is cancelled are dropped on delivery.
#[derive(Clone)]
pub struct ObserveOnOp<S, SD> {
  pub(crate) source: S,
  pub(crate) scheduler: SD,
}

impl<S, SD> Observable for ObserveOnOp<S, SD>
where
  S: Observable,
  S::Item: Send + 'static,
  S::Err: Send + 'static,
  SD: Scheduler,
{
  type Item = S::Item;
  type Err = S::Err;
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<S::Item, S::Err> + Send + 'static,
  {
    self.source.actual_subscribe(ObserveOnObserver {
      observer: MutArc::own(Some(observer)),
      scheduler: self.scheduler,
    })
  }
}

pub struct ObserveOnObserver<O, SD> {
  observer: MutArc<Option<O>>,
  scheduler: SD,
}

impl<Item, Err, O, SD> Observer<Item, Err> for ObserveOnObserver<O, SD>
where
  O: Observer<Item, Err> + Send + 'static,
  Item: Send + 'static,
  Err: Send + 'static,
  SD: Scheduler,
{
  fn next(&mut self, value: Item) {
    let mut observer = self.observer.clone();
    self.scheduler.schedule(move || observer.next(value));
  }

  fn error(self, err: Err) {
    let observer = self.observer;
    self.scheduler.schedule(move || observer.error(err));
  }

  fn complete(self) {
    let observer = self.observer;
    self.scheduler.schedule(move || observer.complete());
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{
    sync::{Arc, Mutex},
    thread,
    time::Duration,
  };

  #[test]
  fn smoke() {
    let v = Arc::new(Mutex::new(0));
    let v_c = v.clone();
    let main = EventLoop::new();
    observable::of(1).observe_on(main.handle()).subscribe(move |i| *v_c.lock().unwrap() = i);
    assert_eq!(*v.lock().unwrap(), 0);

    main.run_pending();
    assert_eq!(*v.lock().unwrap(), 1);
  }

  #[test]
  fn switch_thread() {
    let main = EventLoop::new();
    let pool = worker_pool(2).unwrap();
    let seen = Arc::new(Mutex::new(vec![]));
    let emit_thread = Arc::new(Mutex::new(None));
    let (c_seen, c_emit_thread) = (seen.clone(), emit_thread.clone());

    observable::create(move |emitter: &mut dyn Emitter<i32, RxError>| {
      *c_emit_thread.lock().unwrap() = Some(thread::current().id());
      emitter.next(1);
      emitter.next(2);
      emitter.complete();
    })
    .subscribe_on(pool)
    .observe_on(main.handle())
    .subscribe_all(
      move |v| c_seen.lock().unwrap().push((v, thread::current().id())),
      |_| {},
      || {},
    );

    main.run_until_idle(Duration::from_millis(200));
    let main_id = thread::current().id();
    let seen = seen.lock().unwrap();
    assert_eq!(*seen, vec![(1, main_id), (2, main_id)]);
    assert_ne!(emit_thread.lock().unwrap().unwrap(), main_id);
  }

  #[test]
  fn queued_signals_are_dropped_after_unsubscribe() {
    let main = EventLoop::new();
    let seen = Arc::new(Mutex::new(vec![]));
    let c_seen = seen.clone();

    let handle = observable::from_iter(vec![1, 2, 3])
      .observe_on(main.handle())
      .subscribe(move |v| c_seen.lock().unwrap().push(v));
    handle.unsubscribe();

    assert_eq!(main.run_pending(), 4);
    assert!(seen.lock().unwrap().is_empty());
  }

  #[test]
  fn error_is_delivered_on_the_loop() {
    let main = EventLoop::new();
    let err = Arc::new(Mutex::new(None));
    let c_err = err.clone();
    observable::throw_err::<i32, _>("offline")
      .observe_on(main.handle())
      .subscribe_all(|_| {}, move |e| *c_err.lock().unwrap() = Some(e), || {});

    assert!(err.lock().unwrap().is_none());
    main.run_pending();
    assert_eq!(*err.lock().unwrap(), Some("offline"));
  }
}
