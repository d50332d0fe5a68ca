use super::{History, Subject};

/// Subject holding a current value.
///
/// A new subscriber receives the current value right away, then every value
/// pushed after it. Once the subject stopped, a late subscriber only gets the
/// terminal signal.
pub struct BehaviorSubject<Item, Err>(Subject<Item, Err>);

impl_subject_wrapper!(BehaviorSubject);

impl<Item, Err> BehaviorSubject<Item, Err> {
  pub fn new(initial: Item) -> Self {
    BehaviorSubject(Subject::with_history(Some(History::current(initial))))
  }
}

impl<Item: Clone, Err> BehaviorSubject<Item, Err> {
  /// The current value, `None` once the subject completed or failed.
  pub fn value(&self) -> Option<Item> { self.0.latest() }
}
