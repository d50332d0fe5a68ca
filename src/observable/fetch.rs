//! Cold wrapper around a blocking, fallible call such as an HTTP request.
//!
//! ```rust
//! use rxkata::prelude::*;
//! use std::io;
//!
//! let owner = observable::fetch(|| Ok::<_, io::Error>("octocat".to_owned()));
//! owner.subscribe_all(
//!   |login| println!("owner: {login}"),
//!   |err| println!("fetch failed: {err}"),
//!   || {},
//! );
//! ```

use crate::prelude::*;

/// Wraps `call` into an observable that runs it once per subscription.
///
/// Building the observable runs nothing. On subscription `call` runs in the
/// subscribing context, which is the worker when composed with
/// [`subscribe_on`](ObservableExt::subscribe_on). `Ok(v)` emits `v` and
/// completes; `Err(e)` is delivered as the error signal and nothing is
/// emitted. A failure is never replaced by a default value. If the observer
/// is already closed when the subscription runs, `call` is not made.
pub fn fetch<F, T, E>(call: F) -> Fetch<F>
where
  F: Fn() -> Result<T, E>,
{
  Fetch(call)
}

#[derive(Clone)]
pub struct Fetch<F>(F);

impl<F, T, E> Observable for Fetch<F>
where
  F: Fn() -> Result<T, E>,
{
  type Item = T;
  type Err = E;
  type Unsub = ();

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<T, E> + Send + 'static,
  {
    if observer.is_closed() {
      tracing::trace!("fetch skipped: consumer already closed");
      return;
    }
    let call = self.0;
    observable::defer(move || {
      tracing::debug!("fetch started");
      let result = call();
      if result.is_err() {
        tracing::debug!("fetch failed");
      }
      observable::from_result(result)
    })
    .actual_subscribe(observer)
  }
}
