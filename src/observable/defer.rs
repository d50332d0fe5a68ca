use crate::prelude::*;

/// Creates an observable that will on subscription defer to another observable
/// that is supplied by a supplier-function which will be run once at each
/// subscription
///
/// Nothing runs when the deferred observable is built. Each subscription to
/// a clone of it calls the supplier again, so the work is redone per
/// subscriber.
///
/// ```rust
/// use rxkata::prelude::*;
///
/// observable::defer(|| {
///   println!("Hi!");
///   observable::of("Hello!")
/// })
/// .subscribe(move |v| {
///   println!("{}", v);
/// });
/// // Prints: Hi!\nHello!\n
/// ```
pub fn defer<F, S>(observable_supplier: F) -> Defer<F>
where
  F: FnOnce() -> S,
  S: Observable,
{
  Defer(observable_supplier)
}

#[derive(Clone)]
pub struct Defer<F>(F);

impl<F, S> Observable for Defer<F>
where
  F: FnOnce() -> S,
  S: Observable,
{
  type Item = S::Item;
  type Err = S::Err;
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<S::Item, S::Err> + Send + 'static,
  {
    (self.0)().actual_subscribe(observer)
  }
}
