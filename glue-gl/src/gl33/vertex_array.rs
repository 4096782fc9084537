use gl::types::*;

use glue::backend::vertex_array::VertexArray as VertexArrayBackend;
use glue::backend::NativeHandle;

use crate::gl33::GL33;

unsafe impl VertexArrayBackend for GL33 {
  unsafe fn gen_vertex_array(&mut self) -> NativeHandle {
    let mut handle: GLuint = 0;
    gl::GenVertexArrays(1, &mut handle);
    handle
  }

  unsafe fn delete_vertex_array(&mut self, handle: NativeHandle) {
    gl::DeleteVertexArrays(1, &handle);
  }

  unsafe fn bind_vertex_array(&mut self, handle: NativeHandle) {
    gl::BindVertexArray(handle);
  }

  unsafe fn vertex_attrib_pointer(
    &mut self,
    index: GLuint,
    size: GLint,
    ty: GLenum,
    normalized: bool,
    stride: usize,
    offset: usize,
  ) {
    // integer components are converted to floats, normalized or not
    gl::VertexAttribPointer(
      index,
      size,
      ty,
      if normalized { gl::TRUE } else { gl::FALSE },
      stride as GLsizei,
      offset as *const _,
    );
  }

  unsafe fn enable_vertex_attrib_array(&mut self, index: GLuint) {
    gl::EnableVertexAttribArray(index);
  }

  unsafe fn disable_vertex_attrib_array(&mut self, index: GLuint) {
    gl::DisableVertexAttribArray(index);
  }

  unsafe fn draw_arrays(&mut self, mode: GLenum, first: usize, count: usize) {
    gl::DrawArrays(mode, first as GLint, count as GLsizei);
  }

  unsafe fn draw_elements(&mut self, mode: GLenum, count: usize, ty: GLenum, offset: usize) {
    gl::DrawElements(mode, count as GLsizei, ty, offset as *const _);
  }
}
