//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Error types
pub use crate::error::{RxError, TransformPanic};
// Core traits and creation functions
pub use crate::observable::{self, Observable, ObservableExt};
// Observers
pub use crate::observer::{
  logging::{log_consumer, log_observer, LogObserver},
  Emitter, FnMutObserver, Observer, ObserverAll,
};
// Schedulers
#[cfg(feature = "futures-scheduler")]
pub use crate::scheduler::worker_pool;
pub use crate::scheduler::{EventLoop, EventLoopHandle, NewThread, Scheduler, TaskHandle};
// Subject
pub use crate::subject::{BehaviorSubject, ReplaySubject, Subject, SubjectSubscription};
// Subscription
pub use crate::subscription::*;
