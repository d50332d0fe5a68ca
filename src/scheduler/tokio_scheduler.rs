use tokio::runtime::Handle;

use super::{Scheduler, TaskHandle};

/// Tasks run on tokio's blocking pool: the fetches this crate schedules are
/// synchronous calls.
impl Scheduler for Handle {
  fn schedule<T>(&self, task: T) -> TaskHandle
  where
    T: FnOnce() + Send + 'static,
  {
    let handle = TaskHandle::default();
    drop(self.spawn_blocking(handle.guard(task)));
    handle
  }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  };

  #[tokio::test(flavor = "multi_thread")]
  async fn fetch_on_blocking_pool() {
    let calls = Arc::new(AtomicUsize::new(0));
    let c_calls = calls.clone();
    let (tx, rx) = tokio::sync::oneshot::channel();
    let mut tx = Some(tx);

    observable::fetch(move || {
      c_calls.fetch_add(1, Ordering::SeqCst);
      Ok::<_, RxError>(42)
    })
    .subscribe_on(tokio::runtime::Handle::current())
    .subscribe_all(
      move |v| {
        if let Some(tx) = tx.take() {
          let _ = tx.send(v);
        }
      },
      |_| {},
      || {},
    );

    assert_eq!(rx.await.unwrap(), 42);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }
}
