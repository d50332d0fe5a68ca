use std::{
  sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError},
  time::Duration,
};

use super::{Scheduler, TaskHandle};

type Job = Box<dyn FnOnce() + Send>;

/// A single-threaded run loop standing in for a UI main thread.
///
/// Tasks scheduled through an [`EventLoopHandle`] from any thread are queued
/// and run, in the order they were scheduled, by whichever thread drains the
/// loop with [`run_pending`](Self::run_pending) or
/// [`run_until_idle`](Self::run_until_idle). Keep the loop on the thread that
/// owns the consumers.
pub struct EventLoop {
  sender: Sender<Job>,
  receiver: Receiver<Job>,
}

/// Sending side of an [`EventLoop`]; this is the [`Scheduler`] given to
/// `observe_on`.
#[derive(Clone)]
pub struct EventLoopHandle {
  sender: Sender<Job>,
}

impl Default for EventLoop {
  fn default() -> Self { Self::new() }
}

impl EventLoop {
  pub fn new() -> Self {
    let (sender, receiver) = channel();
    EventLoop { sender, receiver }
  }

  pub fn handle(&self) -> EventLoopHandle { EventLoopHandle { sender: self.sender.clone() } }

  /// Runs the tasks already queued, without waiting. Returns how many ran.
  pub fn run_pending(&self) -> usize {
    let mut ran = 0;
    loop {
      match self.receiver.try_recv() {
        Ok(job) => {
          job();
          ran += 1;
        }
        Err(TryRecvError::Empty | TryRecvError::Disconnected) => return ran,
      }
    }
  }

  /// Runs tasks as they arrive until none shows up for `idle`. Returns how
  /// many ran.
  pub fn run_until_idle(&self, idle: Duration) -> usize {
    let mut ran = 0;
    loop {
      match self.receiver.recv_timeout(idle) {
        Ok(job) => {
          job();
          ran += 1;
        }
        Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return ran,
      }
    }
  }
}

impl Scheduler for EventLoopHandle {
  fn schedule<T>(&self, task: T) -> TaskHandle
  where
    T: FnOnce() + Send + 'static,
  {
    let handle = TaskHandle::default();
    if self.sender.send(Box::new(handle.guard(task))).is_err() {
      tracing::debug!("event loop is gone, task dropped");
      handle.abandon();
    }
    handle
  }
}
