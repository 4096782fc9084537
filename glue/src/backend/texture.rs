//! Texture backend interface.

use gl::types::*;

use crate::backend::NativeHandle;

/// Texture backend.
pub unsafe trait Texture {
  /// Create a new texture object.
  unsafe fn gen_texture(&mut self) -> NativeHandle;

  /// Delete a texture object.
  unsafe fn delete_texture(&mut self, handle: NativeHandle);

  /// Select the active texture unit (`0`-based, not `TEXTURE0`-based).
  unsafe fn active_texture(&mut self, unit: GLuint);

  /// Bind a texture to `target` on the active texture unit (`0` unbinds).
  unsafe fn bind_texture(&mut self, target: GLenum, handle: NativeHandle);

  /// Allocate storage for the texture bound to `target`, optionally uploading tightly packed
  /// texels.
  ///
  /// `size` is read according to `target`: one, two or three dimensions; unused components
  /// are `1`.
  unsafe fn tex_image(
    &mut self,
    target: GLenum,
    level: GLint,
    internal_format: GLenum,
    size: [u32; 3],
    format: GLenum,
    ty: GLenum,
    data: Option<&[u8]>,
  );

  /// Set an integer parameter on the texture bound to `target`.
  unsafe fn tex_parameter_i(&mut self, target: GLenum, pname: GLenum, param: GLint);

  /// Read the texels of the texture bound to `target`, tightly packed, into `out`.
  unsafe fn get_tex_image(
    &mut self,
    target: GLenum,
    level: GLint,
    format: GLenum,
    ty: GLenum,
    out: &mut [u8],
  );
}
