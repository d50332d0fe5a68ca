use std::{convert::Infallible, iter, ops::RangeInclusive};

use crate::prelude::*;

/// Creates an observable that produces values from an iterator.
///
/// Completes when all elements have been emitted. Never emits an error. The
/// iterator is pulled one element at a time and not at all once the
/// downstream is closed, so an unbounded iterator is fine behind a `take`.
///
/// ```
/// use rxkata::prelude::*;
///
/// observable::from_iter(vec![0, 1, 2, 3]).subscribe(|v| println!("{},", v));
/// ```
pub fn from_iter<Iter>(iter: Iter) -> FromIter<Iter>
where
  Iter: IntoIterator,
{
  FromIter(iter)
}

/// Emits `count` consecutive integers starting at `start`, stopping early at
/// `i64::MAX`.
///
/// ```
/// use rxkata::prelude::*;
///
/// observable::range(1, 3).subscribe(|v| println!("{}", v));
/// // prints 1, 2, 3
/// ```
pub fn range(start: i64, count: usize) -> FromIter<iter::Take<RangeInclusive<i64>>> {
  FromIter((start..=i64::MAX).take(count))
}

#[derive(Clone)]
pub struct FromIter<Iter>(Iter);

impl<Iter> Observable for FromIter<Iter>
where
  Iter: IntoIterator,
{
  type Item = Iter::Item;
  type Err = Infallible;
  type Unsub = ();

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Iter::Item, Infallible> + Send + 'static,
  {
    let mut iter = self.0.into_iter();
    while !observer.is_closed() {
      match iter.next() {
        Some(v) => observer.next(v),
        None => {
          observer.complete();
          return;
        }
      }
    }
  }
}
