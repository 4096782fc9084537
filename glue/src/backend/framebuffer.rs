//! Framebuffer backend interface.

use gl::types::*;

use crate::backend::NativeHandle;

/// Framebuffer backend.
pub unsafe trait Framebuffer {
  /// Create a new framebuffer object.
  unsafe fn gen_framebuffer(&mut self) -> NativeHandle;

  /// Delete a framebuffer object.
  unsafe fn delete_framebuffer(&mut self, handle: NativeHandle);

  /// Bind a framebuffer to `target` (`0` binds the default framebuffer).
  unsafe fn bind_framebuffer(&mut self, target: GLenum, handle: NativeHandle);

  /// Attach a level of a 1D or 2D texture (dispatched on `tex_target`) to the framebuffer bound
  /// to `target`. A `0` texture detaches.
  unsafe fn framebuffer_texture(
    &mut self,
    target: GLenum,
    attachment: GLenum,
    tex_target: GLenum,
    texture: NativeHandle,
    level: GLint,
  );

  /// Attach a renderbuffer to the framebuffer bound to `target`.
  unsafe fn framebuffer_renderbuffer(
    &mut self,
    target: GLenum,
    attachment: GLenum,
    renderbuffer: NativeHandle,
  );

  /// Select the color buffers written by fragment outputs, for the bound draw framebuffer.
  ///
  /// An empty list disables every color output.
  unsafe fn draw_buffers(&mut self, buffers: &[GLenum]);

  /// Check the completeness of the framebuffer bound to `target`.
  unsafe fn check_framebuffer_status(&mut self, target: GLenum) -> GLenum;
}
