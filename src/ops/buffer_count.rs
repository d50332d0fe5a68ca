use std::collections::VecDeque;

use crate::prelude::*;

#[derive(Clone)]
pub struct BufferCountOp<S> {
  pub(crate) source: S,
  pub(crate) count: usize,
  pub(crate) skip: usize,
}

impl<S> Observable for BufferCountOp<S>
where
  S: Observable,
  S::Item: Clone + Send + 'static,
{
  type Item = Vec<S::Item>;
  type Err = S::Err;
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Vec<S::Item>, S::Err> + Send + 'static,
  {
    self.source.actual_subscribe(BufferCountObserver {
      observer,
      count: self.count,
      skip: self.skip,
      index: 0,
      buffers: VecDeque::new(),
    })
  }
}

pub struct BufferCountObserver<O, Item> {
  observer: O,
  count: usize,
  skip: usize,
  index: usize,
  buffers: VecDeque<Vec<Item>>,
}

impl<Item, Err, O> Observer<Item, Err> for BufferCountObserver<O, Item>
where
  O: Observer<Vec<Item>, Err>,
  Item: Clone,
{
  fn next(&mut self, value: Item) {
    if self.index % self.skip == 0 {
      self.buffers.push_back(Vec::with_capacity(self.count));
    }
    self.index += 1;

    for buffer in self.buffers.iter_mut() {
      buffer.push(value.clone());
    }
    // Buffers fill in the order they were opened.
    while self.buffers.front().is_some_and(|b| b.len() >= self.count) {
      if let Some(full) = self.buffers.pop_front() {
        self.observer.next(full);
      }
    }
  }

  /// Open buffers are discarded.
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(mut self) {
    for buffer in self.buffers.drain(..) {
      if !buffer.is_empty() {
        self.observer.next(buffer);
      }
    }
    self.observer.complete()
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
