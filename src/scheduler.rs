//! Execution contexts for `subscribe_on` and `observe_on`.
//!
//! A [`Scheduler`] runs a task somewhere and hands back a [`TaskHandle`] that
//! can cancel it before it starts. The usual pairing is a worker pool for the
//! blocking side and an [`EventLoop`] drained by the thread that owns the
//! consumers:
//!
//! ```rust
//! use rxkata::prelude::*;
//! use std::{sync::{Arc, Mutex}, time::Duration};
//!
//! let pool = worker_pool(2).unwrap();
//! let main = EventLoop::new();
//! let text = Arc::new(Mutex::new(String::new()));
//! let c_text = text.clone();
//!
//! observable::fetch(|| Ok::<_, RxError>("payload"))
//!   .subscribe_on(pool)
//!   .observe_on(main.handle())
//!   .subscribe_all(move |v| *c_text.lock().unwrap() = v.to_owned(), |_| {}, || {});
//!
//! main.run_until_idle(Duration::from_millis(200));
//! assert_eq!(*text.lock().unwrap(), "payload");
//! ```

use crate::subscription::{Subscription, SubscriptionFlag};

mod event_loop;
mod new_thread;
#[cfg(feature = "futures-scheduler")]
mod thread_pool;
#[cfg(feature = "tokio-scheduler")]
mod tokio_scheduler;

pub use event_loop::{EventLoop, EventLoopHandle};
pub use new_thread::NewThread;
#[cfg(feature = "futures-scheduler")]
pub use thread_pool::worker_pool;

/// A Scheduler is an object to order task and schedule their execution.
///
/// Schedulers are cheap handles: cloning one refers to the same execution
/// context.
pub trait Scheduler: Clone + Send + 'static {
  fn schedule<T>(&self, task: T) -> TaskHandle
  where
    T: FnOnce() + Send + 'static;
}

/// Cancellation handle of one scheduled task.
///
/// Cancelling a task that has not started prevents it from running. A task
/// that is already running is not interrupted.
#[derive(Clone, Debug, Default)]
pub struct TaskHandle(SubscriptionFlag);

impl TaskHandle {
  /// Wraps `task` so it only runs while this handle is open, and closes the
  /// handle once it has run.
  pub fn guard<T>(&self, task: T) -> impl FnOnce() + Send + 'static
  where
    T: FnOnce() + Send + 'static,
  {
    let flag = self.0.clone();
    move || {
      if flag.is_closed() {
        tracing::trace!("cancelled task skipped");
        return;
      }
      task();
      flag.close();
    }
  }

  /// Closes the handle without running anything, for tasks that could not be
  /// queued.
  pub(crate) fn abandon(&self) { self.0.close(); }
}

impl Subscription for TaskHandle {
  fn unsubscribe(self) { self.0.close(); }

  fn is_closed(&self) -> bool { self.0.is_closed() }
}
