use gl::types::*;

use glue::backend::buffer::Buffer as BufferBackend;
use glue::backend::NativeHandle;

use crate::Headless;

#[derive(Debug, Default)]
pub(crate) struct BufferObject {
  pub(crate) data: Vec<u8>,
  pub(crate) usage: GLenum,
}

fn is_usage(usage: GLenum) -> bool {
  matches!(
    usage,
    gl::STREAM_DRAW
      | gl::STREAM_READ
      | gl::STREAM_COPY
      | gl::STATIC_DRAW
      | gl::STATIC_READ
      | gl::STATIC_COPY
      | gl::DYNAMIC_DRAW
      | gl::DYNAMIC_READ
      | gl::DYNAMIC_COPY
  )
}

impl Headless {
  /// Content of a buffer.
  pub fn buffer_content(&self, handle: NativeHandle) -> Option<&[u8]> {
    self.buffers.get(&handle).map(|buffer| buffer.data.as_slice())
  }

  /// Usage hint a buffer was last allocated with; `0` before the first allocation.
  pub fn buffer_usage(&self, handle: NativeHandle) -> Option<GLenum> {
    self.buffers.get(&handle).map(|buffer| buffer.usage)
  }

  // handle of the buffer bound to target, if any; raises on invalid targets and empty slots
  fn bound_buffer(&mut self, target: GLenum) -> Option<NativeHandle> {
    let handle = match target {
      gl::ARRAY_BUFFER => self.array_buffer,
      gl::ELEMENT_ARRAY_BUFFER => self.element_buffer(self.vertex_array).unwrap_or(0),

      _ => {
        self.raise(gl::INVALID_ENUM);
        return None;
      }
    };

    if handle == 0 {
      self.raise(gl::INVALID_OPERATION);
      None
    } else {
      Some(handle)
    }
  }

  fn check_range(&mut self, handle: NativeHandle, offset: usize, len: usize) -> bool {
    let size = self.buffers.get(&handle).map_or(0, |buffer| buffer.data.len());

    match offset.checked_add(len) {
      Some(end) if end <= size => true,

      _ => {
        self.raise(gl::INVALID_VALUE);
        false
      }
    }
  }
}

unsafe impl BufferBackend for Headless {
  unsafe fn gen_buffer(&mut self) -> NativeHandle {
    let handle = self.gen_buffer_name();
    self.buffers.insert(handle, BufferObject::default());
    handle
  }

  unsafe fn delete_buffer(&mut self, handle: NativeHandle) {
    if self.buffers.remove(&handle).is_none() {
      return;
    }

    if self.array_buffer == handle {
      self.array_buffer = 0;
    }

    // only the bound vertex array loses its element buffer; the others keep a dangling name
    if let Some(vao) = self.vertex_arrays.get_mut(&self.vertex_array) {
      if vao.element_buffer == handle {
        vao.element_buffer = 0;
      }
    }
  }

  unsafe fn bind_buffer(&mut self, target: GLenum, handle: NativeHandle) {
    if handle != 0 && !self.buffers.contains_key(&handle) {
      self.raise(gl::INVALID_OPERATION);
      return;
    }

    match target {
      gl::ARRAY_BUFFER => self.array_buffer = handle,

      gl::ELEMENT_ARRAY_BUFFER => {
        if let Some(vao) = self.vertex_arrays.get_mut(&self.vertex_array) {
          vao.element_buffer = handle;
        }
      }

      _ => self.raise(gl::INVALID_ENUM),
    }
  }

  unsafe fn buffer_data(
    &mut self,
    target: GLenum,
    size: usize,
    data: Option<&[u8]>,
    usage: GLenum,
  ) {
    if !is_usage(usage) {
      self.raise(gl::INVALID_ENUM);
      return;
    }

    let handle = match self.bound_buffer(target) {
      Some(handle) => handle,
      None => return,
    };

    let mut content = vec![0; size];

    if let Some(data) = data {
      let len = data.len().min(size);
      content[..len].copy_from_slice(&data[..len]);
    }

    if let Some(buffer) = self.buffers.get_mut(&handle) {
      buffer.data = content;
      buffer.usage = usage;
    }
  }

  unsafe fn buffer_sub_data(&mut self, target: GLenum, offset: usize, data: &[u8]) {
    let handle = match self.bound_buffer(target) {
      Some(handle) => handle,
      None => return,
    };

    if !self.check_range(handle, offset, data.len()) {
      return;
    }

    if let Some(buffer) = self.buffers.get_mut(&handle) {
      buffer.data[offset..offset + data.len()].copy_from_slice(data);
    }
  }

  unsafe fn get_buffer_sub_data(&mut self, target: GLenum, offset: usize, out: &mut [u8]) {
    let handle = match self.bound_buffer(target) {
      Some(handle) => handle,
      None => return,
    };

    if !self.check_range(handle, offset, out.len()) {
      return;
    }

    if let Some(buffer) = self.buffers.get(&handle) {
      out.copy_from_slice(&buffer.data[offset..offset + out.len()]);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use glue::backend::State;

  #[test]
  fn data_round_trip() {
    let mut backend = Headless::new();

    unsafe {
      let buffer = backend.gen_buffer();
      backend.bind_buffer(gl::ARRAY_BUFFER, buffer);
      backend.buffer_data(gl::ARRAY_BUFFER, 4, Some(&[1, 2, 3, 4][..]), gl::STATIC_DRAW);
      backend.buffer_sub_data(gl::ARRAY_BUFFER, 1, &[9, 9]);

      let mut out = [0; 3];
      backend.get_buffer_sub_data(gl::ARRAY_BUFFER, 1, &mut out);

      assert_eq!(out, [9, 9, 4]);
      assert_eq!(backend.buffer_content(buffer), Some(&[1, 9, 9, 4][..]));
      assert_eq!(backend.buffer_usage(buffer), Some(gl::STATIC_DRAW));
    }

    assert!(backend.raised_errors().is_empty());
  }

  #[test]
  fn allocation_without_data_is_zeroed() {
    let mut backend = Headless::new();

    unsafe {
      let buffer = backend.gen_buffer();
      backend.bind_buffer(gl::ARRAY_BUFFER, buffer);
      backend.buffer_data(gl::ARRAY_BUFFER, 3, None, gl::DYNAMIC_DRAW);

      assert_eq!(backend.buffer_content(buffer), Some(&[0, 0, 0][..]));
    }
  }

  #[test]
  fn out_of_range_update() {
    let mut backend = Headless::new();

    unsafe {
      let buffer = backend.gen_buffer();
      backend.bind_buffer(gl::ARRAY_BUFFER, buffer);
      backend.buffer_data(gl::ARRAY_BUFFER, 2, None, gl::STATIC_DRAW);
      backend.buffer_sub_data(gl::ARRAY_BUFFER, 1, &[1, 2]);
    }

    assert_eq!(backend.raised_errors(), &[gl::INVALID_VALUE]);
  }

  #[test]
  fn nothing_bound() {
    let mut backend = Headless::new();

    unsafe {
      backend.buffer_data(gl::ARRAY_BUFFER, 2, None, gl::STATIC_DRAW);
      backend.bind_buffer(gl::ARRAY_BUFFER, 42);
      backend.bind_buffer(gl::TEXTURE_2D, 0);
    }

    assert_eq!(
      backend.raised_errors(),
      &[gl::INVALID_OPERATION, gl::INVALID_OPERATION, gl::INVALID_ENUM]
    );
  }

  #[test]
  fn deleting_unbinds() {
    let mut backend = Headless::new();

    unsafe {
      let buffer = backend.gen_buffer();
      backend.bind_buffer(gl::ARRAY_BUFFER, buffer);
      backend.delete_buffer(buffer);

      assert_eq!(backend.get_integer(gl::ARRAY_BUFFER_BINDING), 0);
    }

    assert_eq!(backend.live_objects(), 0);
  }
}
