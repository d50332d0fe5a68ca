use std::convert::Infallible;

use crate::{prelude::*, type_hint::TypeHint};

/// Creates an observable that emits no items, just terminates with an error.
pub fn throw_err<Item, Err>(e: Err) -> ThrowErr<Item, Err> { ThrowErr(e, TypeHint::new()) }

pub struct ThrowErr<Item, Err>(Err, TypeHint<Item>);

impl<Item, Err: Clone> Clone for ThrowErr<Item, Err> {
  fn clone(&self) -> Self { ThrowErr(self.0.clone(), TypeHint::new()) }
}

impl<Item, Err> Observable for ThrowErr<Item, Err> {
  type Item = Item;
  type Err = Err;
  type Unsub = ();

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    if !observer.is_closed() {
      observer.error(self.0);
    }
  }
}

/// Creates an observable that produces no values and completes immediately.
pub fn empty<Item>() -> Empty<Item> { Empty(TypeHint::new()) }

pub struct Empty<Item>(TypeHint<Item>);

impl<Item> Clone for Empty<Item> {
  fn clone(&self) -> Self { empty() }
}

impl<Item> Observable for Empty<Item> {
  type Item = Item;
  type Err = Infallible;
  type Unsub = ();

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item, Infallible> + Send + 'static,
  {
    if !observer.is_closed() {
      observer.complete();
    }
  }
}

/// Creates an observable that never emits anything, not even a terminal
/// signal.
pub fn never<Item>() -> Never<Item> { Never(TypeHint::new()) }

pub struct Never<Item>(TypeHint<Item>);

impl<Item> Clone for Never<Item> {
  fn clone(&self) -> Self { never() }
}

impl<Item> Observable for Never<Item> {
  type Item = Item;
  type Err = Infallible;
  type Unsub = ();

  #[inline]
  fn actual_subscribe<O>(self, _: O) -> Self::Unsub
  where
    O: Observer<Item, Infallible> + Send + 'static,
  {
  }
}
