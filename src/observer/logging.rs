//! Ready-made observers that only write diagnostic log events.
//!
//! Handy as the terminal consumer of an exercise pipeline when the point is to
//! watch the signals go by:
//!
//! ```rust
//! use rxkata::prelude::*;
//!
//! observable::from_iter(["a", "b"]).subscribe_with(log_observer("letters"));
//! // INFO letters: onNext: "a"
//! // INFO letters: onNext: "b"
//! // INFO letters: onComplete
//! ```

use std::{borrow::Cow, fmt::Debug};

use super::Observer;

/// Observer that logs every signal at `INFO` under a tag and does nothing
/// else.
#[derive(Clone, Debug)]
pub struct LogObserver {
  tag: Cow<'static, str>,
}

impl LogObserver {
  pub fn new(tag: impl Into<Cow<'static, str>>) -> Self { LogObserver { tag: tag.into() } }

  pub fn tag(&self) -> &str { &self.tag }
}

/// Shorthand for [`LogObserver::new`].
pub fn log_observer(tag: impl Into<Cow<'static, str>>) -> LogObserver { LogObserver::new(tag) }

/// Next-only variant of [`log_observer`], for `subscribe` on sequences that
/// cannot fail.
pub fn log_consumer<Item: Debug>(
  tag: impl Into<Cow<'static, str>>,
) -> impl FnMut(Item) + Clone + Send + 'static {
  let tag = tag.into();
  move |value| tracing::info!(tag = %tag, "onNext: {value:?}")
}

impl<Item, Err> Observer<Item, Err> for LogObserver
where
  Item: Debug,
  Err: Debug,
{
  fn next(&mut self, value: Item) {
    tracing::info!(tag = %self.tag, "onNext: {value:?}");
  }

  fn error(self, err: Err) {
    tracing::info!(tag = %self.tag, "onError: {err:?}");
  }

  fn complete(self) {
    tracing::info!(tag = %self.tag, "onComplete");
  }

  fn is_closed(&self) -> bool { false }
}
