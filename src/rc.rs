use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

/// Shared mutable cell for state that crosses scheduler threads.
#[derive(Default)]
pub struct MutArc<T>(Arc<Mutex<T>>);

impl<T> MutArc<T> {
  pub fn own(t: T) -> Self { Self(Arc::new(Mutex::new(t))) }

  /// Locks the cell. A lock poisoned by a panicking callback is recovered so
  /// the remaining signals of a stream can still be delivered.
  #[inline]
  pub fn rc_deref_mut(&self) -> MutexGuard<'_, T> {
    self.0.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Like [`rc_deref_mut`](Self::rc_deref_mut), but gives up instead of
  /// waiting when the cell is locked, including by the current thread.
  pub fn try_rc_deref_mut(&self) -> Option<MutexGuard<'_, T>> {
    match self.0.try_lock() {
      Ok(guard) => Some(guard),
      Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
      Err(TryLockError::WouldBlock) => None,
    }
  }
}

impl<T> Clone for MutArc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}
