use std::marker::PhantomData;

/// Zero-sized marker carrying a type parameter without owning a value.
///
/// `fn() -> T` keeps the hint `Send + Sync` and `Clone` whatever `T` is.
pub struct TypeHint<T>(PhantomData<fn() -> T>);

impl<T> TypeHint<T> {
  #[inline]
  pub fn new() -> Self { Self::default() }
}

impl<T> Default for TypeHint<T> {
  fn default() -> Self { TypeHint(PhantomData) }
}

impl<T> Clone for TypeHint<T> {
  #[inline]
  fn clone(&self) -> Self { Self::new() }
}
