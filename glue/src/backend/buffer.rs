//! Buffer backend interface.

use gl::types::*;

use crate::backend::NativeHandle;

/// Buffer backend.
pub unsafe trait Buffer {
  /// Create a new buffer object.
  unsafe fn gen_buffer(&mut self) -> NativeHandle;

  /// Delete a buffer object.
  unsafe fn delete_buffer(&mut self, handle: NativeHandle);

  /// Bind a buffer to a target (`0` unbinds).
  unsafe fn bind_buffer(&mut self, target: GLenum, handle: NativeHandle);

  /// Replace the whole storage of the buffer bound to `target`.
  ///
  /// When `data` is provided, it holds exactly `size` bytes.
  unsafe fn buffer_data(&mut self, target: GLenum, size: usize, data: Option<&[u8]>, usage: GLenum);

  /// Overwrite a region of the buffer bound to `target`.
  unsafe fn buffer_sub_data(&mut self, target: GLenum, offset: usize, data: &[u8]);

  /// Read a region of the buffer bound to `target` back into `out`.
  unsafe fn get_buffer_sub_data(&mut self, target: GLenum, offset: usize, out: &mut [u8]);
}
