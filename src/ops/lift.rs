//! The operator adapter behind [`ObservableExt::lift`].
//!
//! Subscribing walks the chain backwards: the downstream observer of `R` is
//! wrapped into an upstream observer of `T`, and that observer is what the
//! source gets. The wrapper applies the transform to each value in order,
//! without buffering, and forwards terminal signals unchanged.

use std::panic::{self, AssertUnwindSafe};

use crate::{error::TransformPanic, prelude::*, type_hint::TypeHint};

pub struct LiftOp<S, F, E> {
  pub(crate) source: S,
  pub(crate) func: F,
  pub(crate) _hint: TypeHint<E>,
}

impl<S: Clone, F: Clone, E> Clone for LiftOp<S, F, E> {
  fn clone(&self) -> Self {
    LiftOp { source: self.source.clone(), func: self.func.clone(), _hint: TypeHint::new() }
  }
}

impl<S, F, R, E> Observable for LiftOp<S, F, E>
where
  S: Observable,
  F: FnMut(S::Item) -> Result<R, E> + Send + 'static,
  E: From<S::Err> + From<TransformPanic>,
{
  type Item = R;
  type Err = E;
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<R, E> + Send + 'static,
  {
    self.source.actual_subscribe(LiftObserver { observer: Some(observer), func: self.func })
  }
}

/// Upstream-facing observer built around the downstream one.
///
/// `observer` becomes `None` once the transform failed; the adapter then
/// reports itself closed and ignores whatever the source still sends.
pub struct LiftObserver<O, F> {
  observer: Option<O>,
  func: F,
}

impl<Item, Err, R, E, O, F> Observer<Item, Err> for LiftObserver<O, F>
where
  O: Observer<R, E>,
  F: FnMut(Item) -> Result<R, E>,
  E: From<Err> + From<TransformPanic>,
{
  fn next(&mut self, value: Item) {
    if self.observer.is_none() {
      return;
    }
    let func = &mut self.func;
    let failure = match panic::catch_unwind(AssertUnwindSafe(|| func(value))) {
      Ok(Ok(mapped)) => {
        if let Some(observer) = self.observer.as_mut() {
          observer.next(mapped);
        }
        return;
      }
      Ok(Err(err)) => err,
      Err(payload) => {
        let panic = TransformPanic::from_payload(payload);
        tracing::warn!(message = %panic.message, "transform panicked, terminating sequence");
        E::from(panic)
      }
    };
    if let Some(observer) = self.observer.take() {
      observer.error(failure);
    }
  }

  fn error(self, err: Err) {
    if let Some(observer) = self.observer {
      observer.error(E::from(err));
    }
  }

  fn complete(self) {
    if let Some(observer) = self.observer {
      observer.complete();
    }
  }

  fn is_closed(&self) -> bool { self.observer.as_ref().map_or(true, Observer::is_closed) }
}
