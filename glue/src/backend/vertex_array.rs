//! Vertex array backend interface.

use gl::types::*;

use crate::backend::NativeHandle;

/// Vertex array backend.
pub unsafe trait VertexArray {
  /// Create a new vertex array object.
  unsafe fn gen_vertex_array(&mut self) -> NativeHandle;

  /// Delete a vertex array object.
  unsafe fn delete_vertex_array(&mut self, handle: NativeHandle);

  /// Bind a vertex array (`0` unbinds).
  unsafe fn bind_vertex_array(&mut self, handle: NativeHandle);

  /// Describe the layout of an attribute, sourced from the buffer bound to `ARRAY_BUFFER`.
  unsafe fn vertex_attrib_pointer(
    &mut self,
    index: GLuint,
    size: GLint,
    ty: GLenum,
    normalized: bool,
    stride: usize,
    offset: usize,
  );

  /// Enable an attribute slot of the bound vertex array.
  unsafe fn enable_vertex_attrib_array(&mut self, index: GLuint);

  /// Disable an attribute slot of the bound vertex array.
  unsafe fn disable_vertex_attrib_array(&mut self, index: GLuint);

  /// Non-indexed draw.
  unsafe fn draw_arrays(&mut self, mode: GLenum, first: usize, count: usize);

  /// Indexed draw, reading indices from the element buffer of the bound vertex array.
  unsafe fn draw_elements(&mut self, mode: GLenum, count: usize, ty: GLenum, offset: usize);
}
