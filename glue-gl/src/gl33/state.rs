//! Per-thread backend ownership.

use std::cell::RefCell;
use std::error;
use std::fmt;

use gl::types::*;

// TLS synchronization barrier for `GL33`.
thread_local!(static TLS_ACQUIRE_GFX_STATE: RefCell<Option<()>> = RefCell::new(Some(())));

pub(crate) fn acquire() -> Result<(), StateQueryError> {
  TLS_ACQUIRE_GFX_STATE.with(|rc| {
    rc.borrow_mut()
      .take()
      .ok_or(StateQueryError::UnavailableGLState)
  })
}

pub(crate) fn release() {
  TLS_ACQUIRE_GFX_STATE.with(|rc| {
    *rc.borrow_mut() = Some(());
  })
}

/// An error that might happen when the backend is created.
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq)]
pub enum StateQueryError {
  /// The backend is unavailable.
  ///
  /// That occurs when a [`GL33`](super::GL33) is already alive on the current thread.
  UnavailableGLState,
  /// The current context is older than OpenGL 3.3.
  UnsupportedVersion(GLint, GLint),
}

impl fmt::Display for StateQueryError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      StateQueryError::UnavailableGLState => write!(f, "unavailable graphics state"),
      StateQueryError::UnsupportedVersion(major, minor) => write!(
        f,
        "unsupported OpenGL version {}.{}; at least 3.3 is required",
        major, minor
      ),
    }
  }
}

impl error::Error for StateQueryError {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn one_per_thread() {
    assert_eq!(acquire(), Ok(()));
    assert_eq!(acquire(), Err(StateQueryError::UnavailableGLState));

    release();
    assert_eq!(acquire(), Ok(()));
    release();
  }

  #[test]
  fn display() {
    assert_eq!(
      StateQueryError::UnsupportedVersion(2, 1).to_string(),
      "unsupported OpenGL version 2.1; at least 3.3 is required"
    );
  }
}
