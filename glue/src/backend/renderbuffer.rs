//! Renderbuffer backend interface.

use gl::types::*;

use crate::backend::NativeHandle;

/// Renderbuffer backend.
pub unsafe trait RenderBuffer {
  /// Create a new renderbuffer object.
  unsafe fn gen_renderbuffer(&mut self) -> NativeHandle;

  /// Delete a renderbuffer object.
  unsafe fn delete_renderbuffer(&mut self, handle: NativeHandle);

  /// Bind a renderbuffer (`0` unbinds).
  unsafe fn bind_renderbuffer(&mut self, handle: NativeHandle);

  /// Allocate storage for the bound renderbuffer.
  unsafe fn renderbuffer_storage(&mut self, internal_format: GLenum, width: u32, height: u32);
}
