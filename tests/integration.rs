//! Integration tests: whole pipelines driven the way a screen component uses
//! them, with a worker pool for the fetch and an event loop as main context.

use std::{
  convert::Infallible,
  io,
  sync::{
    atomic::{AtomicUsize, Ordering},
    mpsc::channel,
    Arc, Mutex,
  },
  thread,
  time::Duration,
};

use rxkata::prelude::*;

const IDLE: Duration = Duration::from_millis(300);

/// A component owning its subscriptions and the text it renders.
struct Screen {
  subscriptions: SubscriptionRegistry,
  rendered: Arc<Mutex<Vec<String>>>,
  errors: Arc<Mutex<Vec<String>>>,
}

impl Screen {
  fn new() -> Self {
    Screen {
      subscriptions: SubscriptionRegistry::new(),
      rendered: Arc::new(Mutex::new(vec![])),
      errors: Arc::new(Mutex::new(vec![])),
    }
  }

  fn load<F>(&mut self, call: F, worker: impl Scheduler, main: &EventLoop)
  where
    F: Fn() -> io::Result<Vec<(String, u64)>> + Send + 'static,
  {
    let (rendered, errors) = (self.rendered.clone(), self.errors.clone());
    let handle = observable::fetch(call)
      .lift(|files: Vec<(String, u64)>| {
        let sizes: Vec<_> = files.iter().map(|(name, size)| format!("{name}={size}")).collect();
        Ok::<_, RxError>(sizes.join(","))
      })
      .subscribe_on(worker)
      .observe_on(main.handle())
      .subscribe_all(
        move |text| rendered.lock().unwrap().push(text),
        move |err| errors.lock().unwrap().push(err.to_string()),
        || {},
      );
    self.subscriptions.add(handle);
  }

  fn on_destroy(&mut self) { self.subscriptions.clear(); }
}

#[test]
fn fetch_transform_and_render_on_main() {
  let pool = worker_pool(2).unwrap();
  let main = EventLoop::new();
  let mut screen = Screen::new();

  screen.load(|| Ok(vec![("a.rs".to_owned(), 10), ("b.rs".to_owned(), 32)]), pool, &main);
  main.run_until_idle(IDLE);

  assert_eq!(*screen.rendered.lock().unwrap(), vec!["a.rs=10,b.rs=32".to_owned()]);
  assert!(screen.errors.lock().unwrap().is_empty());
  assert!(screen.subscriptions.all_closed());
  screen.on_destroy();
  assert!(screen.subscriptions.is_empty());
}

#[test]
fn fetch_failure_reaches_the_error_callback() {
  let pool = worker_pool(1).unwrap();
  let main = EventLoop::new();
  let mut screen = Screen::new();

  screen.load(
    || Err(io::Error::new(io::ErrorKind::TimedOut, "gist request timed out")),
    pool,
    &main,
  );
  main.run_until_idle(IDLE);

  assert!(screen.rendered.lock().unwrap().is_empty());
  assert_eq!(*screen.errors.lock().unwrap(), vec!["gist request timed out".to_owned()]);
}

#[test]
fn teardown_before_delivery_drops_the_result() {
  let pool = worker_pool(1).unwrap();
  let main = EventLoop::new();
  let mut screen = Screen::new();
  let (fetched_tx, fetched_rx) = channel();

  screen.load(
    move || {
      let files = vec![("late.rs".to_owned(), 1)];
      fetched_tx.send(()).unwrap();
      Ok(files)
    },
    pool,
    &main,
  );
  fetched_rx.recv_timeout(Duration::from_secs(5)).unwrap();
  thread::sleep(Duration::from_millis(20));

  screen.on_destroy();
  main.run_until_idle(IDLE);

  assert!(screen.rendered.lock().unwrap().is_empty());
  assert!(screen.subscriptions.is_empty());
}

#[test]
fn teardown_before_subscription_skips_the_fetch() {
  let worker = EventLoop::new();
  let main = EventLoop::new();
  let calls = Arc::new(AtomicUsize::new(0));
  let c_calls = calls.clone();
  let mut screen = Screen::new();

  screen.load(
    move || {
      c_calls.fetch_add(1, Ordering::SeqCst);
      Ok(vec![])
    },
    worker.handle(),
    &main,
  );
  screen.on_destroy();
  worker.run_pending();
  main.run_pending();

  assert_eq!(calls.load(Ordering::SeqCst), 0);
  assert!(screen.rendered.lock().unwrap().is_empty());
}

#[test]
fn several_handles_released_together() {
  let mut registry = SubscriptionRegistry::new();
  let mut subject = Subject::<i32, Infallible>::new();
  let seen = Arc::new(Mutex::new(vec![]));

  for _ in 0..3 {
    let c_seen = seen.clone();
    registry.add(subject.clone().subscribe(move |v| c_seen.lock().unwrap().push(v)));
  }
  registry.add(observable::never::<i32>().subscribe(|_| {}));

  subject.next(1);
  assert_eq!(registry.len(), 4);
  registry.clear();
  registry.clear();
  subject.next(2);

  assert_eq!(*seen.lock().unwrap(), vec![1, 1, 1]);
  assert_eq!(subject.subscriber_count(), 0);
  assert!(registry.is_empty());
}

#[test]
fn sliding_windows_of_words() {
  let windows = Arc::new(Mutex::new(vec![]));
  let c_windows = windows.clone();
  observable::from_iter(["Wahib", "ul", "Haq", "is", "here"])
    .buffer_count(3, 1)
    .map(|w| w.join(" "))
    .subscribe(move |w| c_windows.lock().unwrap().push(w));

  assert_eq!(
    *windows.lock().unwrap(),
    vec!["Wahib ul Haq", "ul Haq is", "Haq is here", "is here", "here"]
  );
}

#[test]
fn new_thread_and_distinct_pipeline() {
  let (tx, rx) = channel();
  let main_id = thread::current().id();
  observable::from_iter(vec![3, 1, 3, 2, 1, 4])
    .distinct()
    .skip(1)
    .take(2)
    .subscribe_on(NewThread)
    .subscribe_all(
      move |v| tx.send((v, thread::current().id())).unwrap(),
      |_| {},
      || {},
    );

  let received: Vec<_> = rx.iter().collect();
  assert_eq!(received.iter().map(|(v, _)| *v).collect::<Vec<_>>(), vec![1, 2]);
  assert!(received.iter().all(|(_, id)| *id != main_id));
}

#[cfg(feature = "timer")]
#[test]
fn ticking_totals_rendered_on_main() {
  let pool = worker_pool(1).unwrap();
  let main = EventLoop::new();
  let mut registry = SubscriptionRegistry::new();
  let rendered = Arc::new(Mutex::new(vec![]));
  let c_rendered = rendered.clone();

  registry.add(
    observable::interval(Duration::from_millis(2), pool)
      .take(4)
      .scan(|total: usize, tick| total + tick)
      .observe_on(main.handle())
      .subscribe(move |total| c_rendered.lock().unwrap().push(total)),
  );
  main.run_until_idle(IDLE);

  assert_eq!(*rendered.lock().unwrap(), vec![0, 1, 3, 6]);
  assert!(registry.all_closed());
}

#[test]
fn replayed_history_reaches_a_late_screen() {
  let mut history = ReplaySubject::<String, Infallible>::with_capacity(2);
  for line in ["boot", "login", "fetch"] {
    history.next(line.to_owned());
  }

  let seen = Arc::new(Mutex::new(vec![]));
  let c_seen = seen.clone();
  let mut registry = SubscriptionRegistry::new();
  registry.add(history.clone().subscribe(move |line| c_seen.lock().unwrap().push(line)));
  history.next("render".to_owned());
  registry.clear();
  history.next("ignored".to_owned());

  assert_eq!(*seen.lock().unwrap(), vec!["login", "fetch", "render"]);
  assert_eq!(history.subscriber_count(), 0);
}
