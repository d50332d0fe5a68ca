use crate::{observer::Observer, subscription::SubscriptionFlag};

/// The outermost observer of every subscription.
///
/// Wraps the user's observer together with the flag shared with the
/// [`SubscriptionHandle`](crate::subscription::SubscriptionHandle). Once the
/// flag is closed, by a terminal signal or by `unsubscribe`, every later
/// signal is dropped, so a cancelled handle never reaches the consumer again.
pub struct Subscriber<O> {
  observer: O,
  flag: SubscriptionFlag,
}

impl<O> Subscriber<O> {
  pub(crate) fn new(observer: O, flag: SubscriptionFlag) -> Self { Subscriber { observer, flag } }
}

impl<Item, Err, O> Observer<Item, Err> for Subscriber<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if self.flag.is_closed() {
      tracing::trace!("value dropped: subscription closed");
      return;
    }
    self.observer.next(value);
  }

  fn error(self, err: Err) {
    if self.flag.close() {
      self.observer.error(err);
    } else {
      tracing::trace!("error dropped: subscription closed");
    }
  }

  fn complete(self) {
    if self.flag.close() {
      self.observer.complete();
    }
  }

  fn is_closed(&self) -> bool { self.flag.is_closed() || self.observer.is_closed() }
}
