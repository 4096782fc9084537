//! OpenGL 3.3 backend.
//!
//! This module implements an OpenGL 3.3 backend for glue. The backend type is [`GL33`].

mod buffer;
mod framebuffer;
mod query;
mod shader;
mod state;
mod texture;
mod vertex_array;

pub use self::state::StateQueryError;

use gl::types::*;
use std::marker::PhantomData;

use glue::backend::State;

/// An OpenGL 3.3 backend.
///
/// Only one [`GL33`] can be alive per thread, as the OpenGL context it talks to is the thread’s
/// current one.
#[derive(Debug)]
pub struct GL33 {
  _a: PhantomData<*const ()>, // !Send and !Sync
}

impl GL33 {
  /// Create a new OpenGL 3.3 backend.
  ///
  /// The current context must report at least version 3.3.
  pub fn new() -> Result<Self, StateQueryError> {
    state::acquire()?;

    // construct before checking the version so that the thread slot is given back on failure
    let backend = GL33 { _a: PhantomData };
    let (major, minor) = backend.version();

    if (major, minor) < (3, 3) {
      return Err(StateQueryError::UnsupportedVersion(major, minor));
    }

    unsafe {
      // texel transfers are always tightly packed
      gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
      gl::PixelStorei(gl::PACK_ALIGNMENT, 1);
    }

    Ok(backend)
  }

  /// Version of the current context, as `(major, minor)`.
  pub fn version(&self) -> (GLint, GLint) {
    let mut major = 0;
    let mut minor = 0;

    unsafe {
      gl::GetIntegerv(gl::MAJOR_VERSION, &mut major);
      gl::GetIntegerv(gl::MINOR_VERSION, &mut minor);
    }

    (major, minor)
  }
}

impl Drop for GL33 {
  fn drop(&mut self) {
    state::release();
  }
}

unsafe impl State for GL33 {
  unsafe fn get_error(&mut self) -> GLenum {
    gl::GetError()
  }

  unsafe fn get_integer(&mut self, pname: GLenum) -> GLint {
    let mut value = 0;
    gl::GetIntegerv(pname, &mut value);
    value
  }
}
