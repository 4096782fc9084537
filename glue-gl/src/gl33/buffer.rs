use gl::types::*;
use std::ptr;

use glue::backend::buffer::Buffer as BufferBackend;
use glue::backend::NativeHandle;

use crate::gl33::GL33;

unsafe impl BufferBackend for GL33 {
  unsafe fn gen_buffer(&mut self) -> NativeHandle {
    let mut handle: GLuint = 0;
    gl::GenBuffers(1, &mut handle);
    handle
  }

  unsafe fn delete_buffer(&mut self, handle: NativeHandle) {
    gl::DeleteBuffers(1, &handle);
  }

  unsafe fn bind_buffer(&mut self, target: GLenum, handle: NativeHandle) {
    gl::BindBuffer(target, handle);
  }

  unsafe fn buffer_data(
    &mut self,
    target: GLenum,
    size: usize,
    data: Option<&[u8]>,
    usage: GLenum,
  ) {
    let ptr = data.map_or(ptr::null(), |data| data.as_ptr() as *const _);
    gl::BufferData(target, size as GLsizeiptr, ptr, usage);
  }

  unsafe fn buffer_sub_data(&mut self, target: GLenum, offset: usize, data: &[u8]) {
    gl::BufferSubData(
      target,
      offset as GLintptr,
      data.len() as GLsizeiptr,
      data.as_ptr() as *const _,
    );
  }

  unsafe fn get_buffer_sub_data(&mut self, target: GLenum, offset: usize, out: &mut [u8]) {
    gl::GetBufferSubData(
      target,
      offset as GLintptr,
      out.len() as GLsizeiptr,
      out.as_mut_ptr() as *mut _,
    );
  }
}
