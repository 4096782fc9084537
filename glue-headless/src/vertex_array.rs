use gl::types::*;
use std::collections::BTreeMap;

use glue::backend::vertex_array::VertexArray as VertexArrayBackend;
use glue::backend::NativeHandle;

use crate::{Headless, MAX_VERTEX_ATTRIBS};

/// Layout of a vertex attribute slot, as recorded by a vertex array.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VertexAttrib {
  /// Buffer the attribute is sourced from.
  pub buffer: NativeHandle,
  /// Number of components.
  pub size: GLint,
  /// Component type.
  pub ty: GLenum,
  /// Whether integer components are normalized.
  pub normalized: bool,
  /// Bytes between two consecutive vertices; `0` when tightly packed.
  pub stride: usize,
  /// Byte offset of the first component in `buffer`.
  pub offset: usize,
  /// Whether the slot is enabled.
  pub enabled: bool,
}

/// A recorded draw call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DrawCall {
  /// Primitive mode.
  pub mode: GLenum,
  /// First vertex; `0` for indexed draws.
  pub first: usize,
  /// Number of vertices or indices.
  pub count: usize,
  /// Index type for indexed draws.
  pub index_type: Option<GLenum>,
  /// Vertex array bound at draw time.
  pub vertex_array: NativeHandle,
  /// Program in use at draw time.
  pub program: NativeHandle,
}

#[derive(Debug, Default)]
pub(crate) struct VertexArrayObject {
  pub(crate) element_buffer: NativeHandle,
  attribs: BTreeMap<GLuint, VertexAttrib>,
}

fn is_primitive(mode: GLenum) -> bool {
  matches!(
    mode,
    gl::POINTS
      | gl::LINES
      | gl::LINE_STRIP
      | gl::LINE_LOOP
      | gl::TRIANGLES
      | gl::TRIANGLE_STRIP
      | gl::TRIANGLE_FAN
  )
}

fn is_attrib_type(ty: GLenum) -> bool {
  matches!(
    ty,
    gl::BYTE
      | gl::UNSIGNED_BYTE
      | gl::SHORT
      | gl::UNSIGNED_SHORT
      | gl::INT
      | gl::UNSIGNED_INT
      | gl::FLOAT
  )
}

impl Headless {
  /// Layout of the attribute slot `index` of a vertex array.
  pub fn vertex_attrib(&self, vertex_array: NativeHandle, index: GLuint) -> Option<&VertexAttrib> {
    self.vertex_arrays.get(&vertex_array)?.attribs.get(&index)
  }

  /// Element buffer bound to a vertex array.
  ///
  /// `None` when the vertex array does not exist; `Some(0)` when it has no element buffer.
  pub fn element_buffer(&self, vertex_array: NativeHandle) -> Option<NativeHandle> {
    self.vertex_arrays.get(&vertex_array).map(|vao| vao.element_buffer)
  }

  // the bound vertex array, if it is a real object; raises otherwise
  fn bound_vertex_array(&mut self) -> Option<&mut VertexArrayObject> {
    if self.vertex_array == 0 {
      self.raise(gl::INVALID_OPERATION);
      return None;
    }

    self.vertex_arrays.get_mut(&self.vertex_array)
  }

  fn record_draw(&mut self, call: DrawCall) {
    self.clock_ns += 1000 + 10 * call.count as u64;
    self.draw_calls.push(call);
  }

  fn check_attrib_index(&mut self, index: GLuint) -> bool {
    if index >= MAX_VERTEX_ATTRIBS {
      self.raise(gl::INVALID_VALUE);
      false
    } else {
      true
    }
  }

  fn set_attrib_enabled(&mut self, index: GLuint, enabled: bool) {
    if !self.check_attrib_index(index) {
      return;
    }

    if let Some(vao) = self.bound_vertex_array() {
      let attrib = vao.attribs.entry(index).or_insert(VertexAttrib {
        buffer: 0,
        size: 4,
        ty: gl::FLOAT,
        normalized: false,
        stride: 0,
        offset: 0,
        enabled,
      });

      attrib.enabled = enabled;
    }
  }
}

unsafe impl VertexArrayBackend for Headless {
  unsafe fn gen_vertex_array(&mut self) -> NativeHandle {
    let handle = self.gen_vertex_array_name();
    self.vertex_arrays.insert(handle, VertexArrayObject::default());
    handle
  }

  unsafe fn delete_vertex_array(&mut self, handle: NativeHandle) {
    if handle == 0 || self.vertex_arrays.remove(&handle).is_none() {
      return;
    }

    if self.vertex_array == handle {
      self.vertex_array = 0;
    }
  }

  unsafe fn bind_vertex_array(&mut self, handle: NativeHandle) {
    if !self.vertex_arrays.contains_key(&handle) {
      self.raise(gl::INVALID_OPERATION);
      return;
    }

    self.vertex_array = handle;
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
    if !self.check_attrib_index(index) {
      return;
    }

    if !(1..=4).contains(&size) {
      self.raise(gl::INVALID_VALUE);
      return;
    }

    if !is_attrib_type(ty) {
      self.raise(gl::INVALID_ENUM);
      return;
    }

    let buffer = self.array_buffer;

    // an offset into no buffer would be a client-side pointer
    if buffer == 0 && offset != 0 {
      self.raise(gl::INVALID_OPERATION);
      return;
    }

    if let Some(vao) = self.bound_vertex_array() {
      let enabled = vao.attribs.get(&index).map_or(false, |attrib| attrib.enabled);

      vao.attribs.insert(
        index,
        VertexAttrib {
          buffer,
          size,
          ty,
          normalized,
          stride,
          offset,
          enabled,
        },
      );
    }
  }

  unsafe fn enable_vertex_attrib_array(&mut self, index: GLuint) {
    self.set_attrib_enabled(index, true);
  }

  unsafe fn disable_vertex_attrib_array(&mut self, index: GLuint) {
    self.set_attrib_enabled(index, false);
  }

  unsafe fn draw_arrays(&mut self, mode: GLenum, first: usize, count: usize) {
    if !is_primitive(mode) {
      self.raise(gl::INVALID_ENUM);
      return;
    }

    if self.bound_vertex_array().is_none() {
      return;
    }

    self.record_draw(DrawCall {
      mode,
      first,
      count,
      index_type: None,
      vertex_array: self.vertex_array,
      program: self.program,
    });
  }

  unsafe fn draw_elements(&mut self, mode: GLenum, count: usize, ty: GLenum, offset: usize) {
    let is_index_type = matches!(ty, gl::UNSIGNED_BYTE | gl::UNSIGNED_SHORT | gl::UNSIGNED_INT);

    if !is_primitive(mode) || !is_index_type {
      self.raise(gl::INVALID_ENUM);
      return;
    }

    let element_buffer = match self.bound_vertex_array() {
      Some(vao) => vao.element_buffer,
      None => return,
    };

    // nothing is read when there is nothing to draw
    if element_buffer == 0 && count > 0 {
      self.raise(gl::INVALID_OPERATION);
      return;
    }

    self.record_draw(DrawCall {
      mode,
      first: offset,
      count,
      index_type: Some(ty),
      vertex_array: self.vertex_array,
      program: self.program,
    });
  }
}
