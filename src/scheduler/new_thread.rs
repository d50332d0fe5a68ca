use std::thread;

use super::{Scheduler, TaskHandle};

/// Returns a Scheduler instance that creates a new thread for each unit of
/// work.
#[derive(Clone, Copy, Debug, Default)]
pub struct NewThread;

impl Scheduler for NewThread {
  fn schedule<T>(&self, task: T) -> TaskHandle
  where
    T: FnOnce() + Send + 'static,
  {
    let handle = TaskHandle::default();
    let spawned = thread::Builder::new().name("rxkata-new-thread".into()).spawn(handle.guard(task));
    if let Err(err) = spawned {
      tracing::error!(%err, "failed to spawn scheduler thread");
      handle.abandon();
    }
    handle
  }
}
