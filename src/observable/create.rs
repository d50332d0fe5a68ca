use crate::{
  observer::{Emitter, Observer},
  prelude::*,
  type_hint::TypeHint,
};

/// Creates an observable from a producer function.
///
/// The function runs once per subscription, receives an [`Emitter`] and
/// returns the subscription that tears its resources down; return `()` when
/// there is nothing to release.
///
/// ```rust
/// use rxkata::prelude::*;
///
/// observable::create(|emitter: &mut dyn Emitter<i32, RxError>| {
///   emitter.next(1);
///   emitter.next(2);
///   emitter.complete();
/// })
/// .subscribe_all(|v| println!("{}", v), |e| println!("{}", e), || {});
/// ```
pub fn create<F, Item, Err, U>(f: F) -> Create<F, Item, Err>
where
  F: FnOnce(&mut dyn Emitter<Item, Err>) -> U,
  U: Subscription,
{
  Create { f, _hint: TypeHint::new() }
}

pub struct Create<F, Item, Err> {
  f: F,
  _hint: TypeHint<(Item, Err)>,
}

impl<F: Clone, Item, Err> Clone for Create<F, Item, Err> {
  fn clone(&self) -> Self { Create { f: self.f.clone(), _hint: TypeHint::new() } }
}

struct CreateEmitter<O>(Option<O>);

impl<O, Item, Err> Emitter<Item, Err> for CreateEmitter<O>
where
  O: Observer<Item, Err>,
{
  #[inline]
  fn next(&mut self, value: Item) {
    if let Some(observer) = &mut self.0 {
      observer.next(value);
    }
  }

  #[inline]
  fn error(&mut self, err: Err) {
    if let Some(observer) = self.0.take() {
      observer.error(err);
    }
  }

  #[inline]
  fn complete(&mut self) {
    if let Some(observer) = self.0.take() {
      observer.complete();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.as_ref().map_or(true, Observer::is_closed) }
}

impl<F, Item, Err, U> Observable for Create<F, Item, Err>
where
  F: FnOnce(&mut dyn Emitter<Item, Err>) -> U,
  U: Subscription,
{
  type Item = Item;
  type Err = Err;
  type Unsub = U;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    let mut emitter = CreateEmitter(Some(observer));
    (self.f)(&mut emitter)
  }
}

#[cfg(test)]
mod tests {
  use crate::{prelude::*, subscription::mock::MockSubscription};
  use std::sync::{atomic::Ordering, Arc, Mutex};

  #[test]
  fn next_then_complete() {
    let emitted = Arc::new(Mutex::new(vec![]));
    let c_emitted = emitted.clone();

    observable::create(|emitter: &mut dyn Emitter<i32, RxError>| {
      emitter.next(1);
      emitter.next(2);
      emitter.complete();
      emitter.next(3);
    })
    .subscribe_all(move |v| c_emitted.lock().unwrap().push(v), |_| {}, || {});

    assert_eq!(*emitted.lock().unwrap(), vec![1, 2]);
  }

  #[test]
  fn error_closes_the_emitter() {
    let error = Arc::new(Mutex::new(None));
    let c_error = error.clone();

    observable::create(|emitter: &mut dyn Emitter<(), &'static str>| {
      assert!(!emitter.is_closed());
      emitter.error("oops");
      assert!(emitter.is_closed());
    })
    .subscribe_all(|_| {}, move |e| *c_error.lock().unwrap() = Some(e), || {});

    assert_eq!(*error.lock().unwrap(), Some("oops"));
  }

  #[test]
  fn returned_teardown_is_unsubscribed() {
    let (teardown, unsubscribed) = MockSubscription::new();
    let subscription = observable::create(move |emitter: &mut dyn Emitter<i32, RxError>| {
      emitter.next(1);
      teardown
    })
    .subscribe_all(|_| {}, |_| {}, || {});

    assert_eq!(unsubscribed.load(Ordering::SeqCst), 0);
    subscription.unsubscribe();
    assert_eq!(unsubscribed.load(Ordering::SeqCst), 1);
  }
}
