//! Error types shared by the sources and operators of this crate.
//!
//! Operators stay generic over the error type of a sequence. `RxError` is the
//! ready-made choice when a pipeline mixes I/O failures from a fetch with
//! failures raised by a transform stage.

use std::{any::Any, convert::Infallible, io};

use thiserror::Error;

/// A transform stage panicked while processing a value.
///
/// [`lift`](crate::observable::ObservableExt::lift) catches the unwind at the
/// adapter boundary and converts it into this error so it travels downstream
/// as an ordinary error signal.
#[derive(Debug, Error)]
#[error("transform panicked: {message}")]
pub struct TransformPanic {
  pub message: String,
}

impl TransformPanic {
  pub(crate) fn from_payload(payload: Box<dyn Any + Send>) -> Self {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
      (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
      s.clone()
    } else {
      "non-string panic payload".to_owned()
    };
    TransformPanic { message }
  }
}

#[derive(Debug, Error)]
pub enum RxError {
  #[error(transparent)]
  Io(#[from] io::Error),

  #[error("transform failed: {0}")]
  Transform(String),

  #[error(transparent)]
  TransformPanicked(#[from] TransformPanic),
}

impl From<Infallible> for RxError {
  fn from(never: Infallible) -> Self { match never {} }
}

#[cfg(test)]
mod test {
  use super::*;
  use std::panic;

  #[test]
  fn panic_payloads_keep_their_message() {
    let payload = panic::catch_unwind(|| panic!("static message")).unwrap_err();
    assert_eq!(TransformPanic::from_payload(payload).message, "static message");

    let payload = panic::catch_unwind(|| panic!("formatted {}", 42)).unwrap_err();
    assert_eq!(TransformPanic::from_payload(payload).message, "formatted 42");

    let payload = panic::catch_unwind(|| panic::panic_any(7_u8)).unwrap_err();
    assert_eq!(TransformPanic::from_payload(payload).message, "non-string panic payload");
  }

  #[test]
  fn io_errors_convert_and_display_transparently() {
    let err: RxError = io::Error::new(io::ErrorKind::TimedOut, "gist request timed out").into();
    assert!(matches!(err, RxError::Io(_)));
    assert_eq!(err.to_string(), "gist request timed out");
  }
}
