use std::io;

use futures::executor::ThreadPool;

use super::{Scheduler, TaskHandle};

/// Builds the worker context for blocking fetches: a thread pool whose
/// threads are named `rxkata-worker-N`.
pub fn worker_pool(size: usize) -> io::Result<ThreadPool> {
  ThreadPool::builder().pool_size(size).name_prefix("rxkata-worker-").create()
}

impl Scheduler for ThreadPool {
  fn schedule<T>(&self, task: T) -> TaskHandle
  where
    T: FnOnce() + Send + 'static,
  {
    let handle = TaskHandle::default();
    let task = handle.guard(task);
    self.spawn_ok(async move { task() });
    handle
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use std::{sync::mpsc::channel, thread};

  #[test]
  fn runs_on_named_worker() {
    let pool = worker_pool(1).unwrap();
    let (tx, rx) = channel();
    pool.schedule(move || {
      tx.send(thread::current().name().map(str::to_owned)).unwrap();
    });
    let name = rx.recv().unwrap().unwrap();
    assert!(name.starts_with("rxkata-worker-"), "{name}");
    assert_ne!(Some(name.as_str()), thread::current().name());
  }
}
