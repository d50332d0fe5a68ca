use smallvec::SmallVec;

use crate::{observer::Observer, subscription::SubscriptionFlag};

struct Entry<Ob> {
  id: usize,
  cancelled: SubscriptionFlag,
  observer: Ob,
}

/// The observers currently attached to a subject.
///
/// Every entry carries the flag of its subscription. An entry whose flag is
/// closed is skipped and dropped at the next broadcast, so unsubscribing never
/// has to wait for a broadcast in progress.
pub(crate) struct Subscribers<Ob> {
  next_id: usize,
  entries: SmallVec<[Entry<Ob>; 2]>,
}

impl<Ob> Default for Subscribers<Ob> {
  fn default() -> Self { Self { next_id: 0, entries: SmallVec::new() } }
}

impl<Ob> Subscribers<Ob> {
  pub(crate) fn add(&mut self, observer: Ob) -> (usize, SubscriptionFlag) {
    let id = self.next_id;
    self.next_id += 1;
    let cancelled = SubscriptionFlag::default();
    self.entries.push(Entry { id, cancelled: cancelled.clone(), observer });
    (id, cancelled)
  }

  pub(crate) fn remove(&mut self, id: usize) -> Option<Ob> {
    let pos = self.entries.iter().position(|e| e.id == id)?;
    Some(self.entries.remove(pos).observer)
  }

  pub(crate) fn contains(&self, id: usize) -> bool { self.entries.iter().any(|e| e.id == id) }

  /// Removes every live observer, leaving the container empty.
  pub(crate) fn drain(&mut self) -> impl Iterator<Item = Ob> + '_ {
    self.entries.drain(..).filter(|e| !e.cancelled.is_closed()).map(|e| e.observer)
  }
}

impl<Ob> Subscribers<Ob> {
  /// Entries neither cancelled nor closed by their own observer, such as a
  /// `take` that has seen enough.
  pub(crate) fn len<Item, Err>(&self) -> usize
  where
    Ob: Observer<Item, Err>,
  {
    self.entries.iter().filter(|e| Self::is_live::<Item, Err>(e)).count()
  }

  fn is_live<Item, Err>(entry: &Entry<Ob>) -> bool
  where
    Ob: Observer<Item, Err>,
  {
    !entry.cancelled.is_closed() && !entry.observer.is_closed()
  }

  /// Sends `value` to every live observer, cloning it for all but the last.
  pub(crate) fn broadcast_value<Item, Err>(&mut self, value: Item)
  where
    Ob: Observer<Item, Err>,
    Item: Clone,
  {
    self.entries.retain(|e| Self::is_live::<Item, Err>(e));
    let mut iter = self.entries.iter_mut().peekable();
    while let Some(entry) = iter.next() {
      if iter.peek().is_some() {
        entry.observer.next(value.clone());
      } else {
        entry.observer.next(value);
        break;
      }
    }
  }
}

#[cfg(test)]
mod test {
  use std::convert::Infallible;

  use super::*;
  use crate::{
    observer::{BoxedObserver, FnMutObserver},
    rc::MutArc,
  };

  #[test]
  fn cancelled_entries_are_skipped() {
    let seen = MutArc::own(vec![]);
    let mut subscribers: Subscribers<BoxedObserver<i32, Infallible>> = Subscribers::default();
    let (c_a, c_b) = (seen.clone(), seen.clone());
    let (_, a) = subscribers.add(Box::new(FnMutObserver(move |v: i32| c_a.rc_deref_mut().push(("a", v)))));
    subscribers.add(Box::new(FnMutObserver(move |v: i32| c_b.rc_deref_mut().push(("b", v)))));

    subscribers.broadcast_value::<_, Infallible>(1);
    a.close();
    assert_eq!(subscribers.len::<i32, Infallible>(), 1);
    subscribers.broadcast_value::<_, Infallible>(2);

    assert_eq!(*seen.rc_deref_mut(), vec![("a", 1), ("b", 1), ("b", 2)]);
    assert_eq!(subscribers.drain().count(), 1);
    assert_eq!(subscribers.len::<i32, Infallible>(), 0);
  }
}
