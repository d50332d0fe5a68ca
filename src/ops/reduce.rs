//! Reduce operator implementation
//!
//! Folds the whole source into one value emitted when the source completes.
//! `count` and `to_list` are reductions with a fixed fold function.

use crate::prelude::*;

/// How a value is folded into the accumulator.
pub trait ReduceStrategy<Acc, Item> {
  /// `acc` is `None` only before the first value of an unseeded reduction.
  fn apply(&mut self, acc: Option<Acc>, value: Item) -> Option<Acc>;
}

/// Unseeded: the first value becomes the accumulator.
#[derive(Clone)]
pub struct ReduceFn<F>(pub F);

impl<F, Item> ReduceStrategy<Item, Item> for ReduceFn<F>
where
  F: FnMut(Item, Item) -> Item,
{
  fn apply(&mut self, acc: Option<Item>, value: Item) -> Option<Item> {
    match acc {
      Some(acc) => Some((self.0)(acc, value)),
      None => Some(value),
    }
  }
}

/// Seeded: starts from an explicit initial value.
#[derive(Clone)]
pub struct ReduceInitialFn<F>(pub F);

impl<F, Acc, Item> ReduceStrategy<Acc, Item> for ReduceInitialFn<F>
where
  F: FnMut(Acc, Item) -> Acc,
{
  fn apply(&mut self, acc: Option<Acc>, value: Item) -> Option<Acc> {
    acc.map(|a| (self.0)(a, value))
  }
}

pub type CountOp<S, Item> = ReduceOp<S, ReduceInitialFn<fn(usize, Item) -> usize>, usize>;

pub type ToListOp<S, Item> =
  ReduceOp<S, ReduceInitialFn<fn(Vec<Item>, Item) -> Vec<Item>>, Vec<Item>>;

pub(crate) fn count_one<Item>(acc: usize, _: Item) -> usize { acc + 1 }

pub(crate) fn push_one<Item>(mut acc: Vec<Item>, value: Item) -> Vec<Item> {
  acc.push(value);
  acc
}

#[derive(Clone)]
pub struct ReduceOp<S, Strategy, Acc> {
  pub(crate) source: S,
  pub(crate) strategy: Strategy,
  pub(crate) initial: Option<Acc>,
}

impl<S, Strategy, Acc> Observable for ReduceOp<S, Strategy, Acc>
where
  S: Observable,
  Strategy: ReduceStrategy<Acc, S::Item> + Send + 'static,
  Acc: Send + 'static,
{
  type Item = Acc;
  type Err = S::Err;
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Acc, S::Err> + Send + 'static,
  {
    let ReduceOp { source, strategy, initial } = self;
    source.actual_subscribe(ReduceObserver { observer, strategy, acc: initial })
  }
}

pub struct ReduceObserver<O, Strategy, Acc> {
  observer: O,
  strategy: Strategy,
  acc: Option<Acc>,
}

impl<O, Strategy, Acc, Item, Err> Observer<Item, Err> for ReduceObserver<O, Strategy, Acc>
where
  O: Observer<Acc, Err>,
  Strategy: ReduceStrategy<Acc, Item>,
{
  fn next(&mut self, value: Item) { self.acc = self.strategy.apply(self.acc.take(), value); }

  fn error(self, err: Err) { self.observer.error(err); }

  fn complete(mut self) {
    if let Some(acc) = self.acc.take() {
      self.observer.next(acc);
    }
    self.observer.complete();
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
