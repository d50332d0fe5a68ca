use std::convert::Infallible;

use crate::prelude::*;

/// Creates an observable producing a single value.
///
/// Completes immediately after emitting the value given. Never emits an error.
///
/// ```
/// use rxkata::prelude::*;
///
/// observable::of(123).subscribe(|v| println!("{},", v));
/// ```
pub fn of<Item>(v: Item) -> Of<Item> { Of(v) }

#[derive(Clone)]
pub struct Of<Item>(Item);

impl<Item> Observable for Of<Item> {
  type Item = Item;
  type Err = Infallible;
  type Unsub = ();

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Item, Infallible> + Send + 'static,
  {
    if !observer.is_closed() {
      observer.next(self.0);
      observer.complete();
    }
  }
}

/// Converts a `Result` into an observable: `Ok` emits the value and
/// completes, `Err` emits the error.
///
/// ```
/// use rxkata::prelude::*;
///
/// observable::from_result(Ok::<_, RxError>(1)).subscribe_all(
///   |v| println!("{}", v),
///   |e| println!("{}", e),
///   || println!("done"),
/// );
/// ```
pub fn from_result<Item, Err>(r: Result<Item, Err>) -> FromResult<Item, Err> { FromResult(r) }

#[derive(Clone)]
pub struct FromResult<Item, Err>(Result<Item, Err>);

impl<Item, Err> Observable for FromResult<Item, Err> {
  type Item = Item;
  type Err = Err;
  type Unsub = ();

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    if observer.is_closed() {
      return;
    }
    match self.0 {
      Ok(v) => {
        observer.next(v);
        observer.complete();
      }
      Err(e) => observer.error(e),
    }
  }
}
