use smallvec::SmallVec;

use super::{BoxedSubscription, Subscription};

/// Identifies one entry of a [`SubscriptionRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

/// The set of live subscriptions owned by one component.
///
/// A component keeps a registry as a field, adds every handle it creates, and
/// clears the registry when it is torn down. The registry takes ownership of
/// each handle, so the only ways to cancel it are through the registry:
/// [`remove`](Self::remove) for one entry, [`clear`](Self::clear) for all, or
/// dropping the registry.
///
/// All mutating methods take `&mut self`: the registry has a single writer,
/// the thread of the component that owns it. It does no locking of its own.
///
/// # Examples
///
/// ```rust
/// use rxkata::prelude::*;
///
/// struct Screen {
///   subscriptions: SubscriptionRegistry,
/// }
///
/// let mut screen = Screen { subscriptions: SubscriptionRegistry::new() };
/// let id = screen.subscriptions.add(observable::never::<i32>().subscribe(|_| {}));
/// screen.subscriptions.add(observable::of(1).subscribe(|_| {}));
/// assert_eq!(screen.subscriptions.len(), 2);
///
/// assert!(screen.subscriptions.remove(id));
/// screen.subscriptions.clear();
/// assert!(screen.subscriptions.is_empty());
/// ```
#[derive(Default)]
pub struct SubscriptionRegistry {
  next_id: usize,
  items: SmallVec<[(SubscriptionId, BoxedSubscription); 2]>,
}

impl SubscriptionRegistry {
  #[inline]
  pub fn new() -> Self { Self::default() }

  /// Takes ownership of `subscription` and returns the id to cancel it early.
  pub fn add(&mut self, subscription: impl Subscription + Send + 'static) -> SubscriptionId {
    let id = SubscriptionId(self.next_id);
    self.next_id += 1;
    self.items.push((id, BoxedSubscription::new(subscription)));
    id
  }

  /// Cancels and forgets one subscription. Returns `false` if `id` is not
  /// (or no longer) registered.
  pub fn remove(&mut self, id: SubscriptionId) -> bool {
    match self.items.iter().position(|(i, _)| *i == id) {
      Some(pos) => {
        let (_, subscription) = self.items.remove(pos);
        subscription.unsubscribe();
        true
      }
      None => false,
    }
  }

  #[inline]
  pub fn contains(&self, id: SubscriptionId) -> bool { self.items.iter().any(|(i, _)| *i == id) }

  #[inline]
  pub fn len(&self) -> usize { self.items.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  /// Check if all registered subscriptions are closed.
  #[inline]
  pub fn all_closed(&self) -> bool { self.items.iter().all(|(_, item)| item.is_closed()) }

  /// Forgets the subscriptions whose sequences already terminated, so a
  /// long-lived component does not accumulate finished handles. Returns how
  /// many entries were released.
  pub fn prune_closed(&mut self) -> usize {
    let before = self.items.len();
    let mut kept = SmallVec::with_capacity(before);
    for (id, item) in self.items.drain(..) {
      if item.is_closed() {
        item.unsubscribe();
      } else {
        kept.push((id, item));
      }
    }
    self.items = kept;
    before - self.items.len()
  }

  /// Cancels every registered subscription and empties the registry.
  /// Calling it on an empty registry does nothing.
  pub fn clear(&mut self) {
    if self.items.is_empty() {
      return;
    }
    let count = self.items.len();
    for (_, item) in self.items.drain(..) {
      item.unsubscribe();
    }
    tracing::debug!(count, "subscription registry cleared");
  }
}

impl Drop for SubscriptionRegistry {
  fn drop(&mut self) { self.clear(); }
}

impl std::fmt::Debug for SubscriptionRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SubscriptionRegistry").field("len", &self.items.len()).finish()
  }
}
