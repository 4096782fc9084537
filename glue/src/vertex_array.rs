//! Vertex arrays.
//!
//! A [`VertexArray`] records where vertex attributes are read from and which index buffer is used.
//! That association is established once, while everything is bound, by
//! [`VertexArray::set_vertex_source`] and [`VertexArray::set_index_source`]; drawing only needs
//! the vertex array to be bound.
//!
//! The vertex array does not own the buffers it reads from: they must outlive it, or at least
//! outlive its last draw.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::backend::{Backend, NativeHandle};
use crate::bind::Bindable;
use crate::context::Context;
use crate::index_buffer::{IndexBuffer, IndexType};
use crate::native::{attrib_type_to_glenum, index_type_to_glenum, primitive_to_glenum};
use crate::state::State;
use crate::vertex_buffer::VertexBuffer;

/// Kind of primitives vertices are assembled into.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Primitive {
  /// Isolated points.
  Points,
  /// Connected lines.
  LineStrip,
  /// Connected lines, the last vertex connecting back to the first one.
  LineLoop,
  /// Isolated lines, two vertices each.
  Lines,
  /// Triangles sharing an edge with the previous one.
  TriangleStrip,
  /// Triangles sharing the first vertex.
  TriangleFan,
  /// Isolated triangles, three vertices each.
  Triangles,
}

/// Vertex array.
pub struct VertexArray<B>
where
  B: Backend,
{
  handle: NativeHandle,
  auto_enable_attributes: bool,
  vertex_source: Option<NativeHandle>,
  index_source: Option<NativeHandle>,
  num_vertices: usize,
  num_indices: usize,
  index_type: IndexType,
  state: Rc<RefCell<State<B>>>,
}

impl<B> VertexArray<B>
where
  B: Backend,
{
  /// Create a new vertex array.
  ///
  /// When `auto_enable_attributes` is set, every attribute of a vertex source is enabled as soon
  /// as it is described; otherwise use [`VertexArray::enable_attribute`].
  pub fn new(ctx: &mut Context<B>, auto_enable_attributes: bool) -> Self {
    let handle = native!(ctx.state.borrow_mut(), gen_vertex_array());

    VertexArray {
      handle,
      auto_enable_attributes,
      vertex_source: None,
      index_source: None,
      num_vertices: 0,
      num_indices: 0,
      index_type: IndexType::UnsignedByte,
      state: ctx.state.clone(),
    }
  }

  /// Native handle.
  pub fn handle(&self) -> NativeHandle {
    self.handle
  }

  /// Bind the vertex array.
  ///
  /// The element array slot follows: it now holds the index buffer of this vertex array.
  pub fn bind(&self) {
    self.state.borrow_mut().bind_vertex_array(self.handle);
  }

  /// Unbind any vertex array.
  pub fn release(&self) {
    self.state.borrow_mut().bind_vertex_array(0);
  }

  /// Whether the vertex array is bound.
  pub fn is_bound(&self) -> bool {
    self.state.borrow().vertex_array_binding() == self.handle
  }

  /// Read vertex attributes from `vertices`.
  ///
  /// `vertices` gets bound, and each of its attributes is described to the vertex array (and
  /// enabled when auto-enabling is on). The vertex array must be bound.
  pub fn set_vertex_source(&mut self, vertices: &VertexBuffer<B>) {
    self.warn_if_unbound("set_vertex_source");

    vertices.bind();

    for attribute in vertices.attributes() {
      let ty = attrib_type_to_glenum(attribute.comp_type);
      native!(
        self.state.borrow_mut(),
        vertex_attrib_pointer(
          attribute.index,
          attribute.components,
          ty,
          attribute.normalized,
          attribute.stride,
          attribute.pointer,
        )
      );

      if self.auto_enable_attributes {
        self.enable_attribute(attribute.index);
      }
    }

    self.vertex_source = Some(vertices.handle());
    self.num_vertices = vertices.num_vertices();
  }

  /// Read indices from `indices`.
  ///
  /// `indices` gets bound, which associates it to this vertex array. The vertex array must be
  /// bound.
  pub fn set_index_source(&mut self, indices: &IndexBuffer<B>) {
    self.warn_if_unbound("set_index_source");

    indices.bind();

    self.index_source = Some(indices.handle());
    self.num_indices = indices.num_indices();
    self.index_type = indices.index_type();
  }

  /// Enable an attribute slot. The vertex array must be bound.
  pub fn enable_attribute(&self, index: u32) {
    self.warn_if_unbound("enable_attribute");
    native!(self.state.borrow_mut(), enable_vertex_attrib_array(index));
  }

  /// Disable an attribute slot. The vertex array must be bound.
  pub fn disable_attribute(&self, index: u32) {
    self.warn_if_unbound("disable_attribute");
    native!(self.state.borrow_mut(), disable_vertex_attrib_array(index));
  }

  /// Draw every vertex of the vertex source. The vertex array must be bound.
  pub fn draw(&self, mode: Primitive) {
    self.warn_if_unbound("draw");

    let mode = primitive_to_glenum(mode);
    native!(
      self.state.borrow_mut(),
      draw_arrays(mode, 0, self.num_vertices)
    );
  }

  /// Draw every index of the index source. The vertex array must be bound.
  ///
  /// Without an index source, nothing is drawn.
  pub fn draw_indexed(&self, mode: Primitive) {
    self.warn_if_unbound("draw_indexed");

    let mode = primitive_to_glenum(mode);
    let ty = index_type_to_glenum(self.index_type);
    native!(
      self.state.borrow_mut(),
      draw_elements(mode, self.num_indices, ty, 0)
    );
  }

  /// Handle of the vertex buffer last given to [`VertexArray::set_vertex_source`].
  pub fn vertex_source(&self) -> Option<NativeHandle> {
    self.vertex_source
  }

  /// Handle of the index buffer last given to [`VertexArray::set_index_source`].
  pub fn index_source(&self) -> Option<NativeHandle> {
    self.index_source
  }

  /// Number of vertices of the vertex source.
  pub fn num_vertices(&self) -> usize {
    self.num_vertices
  }

  /// Number of indices of the index source.
  pub fn num_indices(&self) -> usize {
    self.num_indices
  }

  /// Type of the indices of the index source.
  pub fn index_type(&self) -> IndexType {
    self.index_type
  }

  fn warn_if_unbound(&self, op: &str) {
    let state = self.state.borrow();

    if state.warn_unbound() && state.vertex_array_binding() != self.handle {
      log::warn!("{} on vertex array {} while it is not bound", op, self.handle);
    }
  }
}

impl<B> Drop for VertexArray<B>
where
  B: Backend,
{
  fn drop(&mut self) {
    let mut state = self.state.borrow_mut();
    state.forget_vertex_array(self.handle);
    native!(state, delete_vertex_array(self.handle));
  }
}

impl<B> Bindable for VertexArray<B>
where
  B: Backend,
{
  fn bind(&self) {
    VertexArray::bind(self);
  }

  fn release(&self) {
    VertexArray::release(self);
  }

  fn is_bound(&self) -> bool {
    VertexArray::is_bound(self)
  }
}

impl<B> fmt::Debug for VertexArray<B>
where
  B: Backend,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("VertexArray")
      .field("handle", &self.handle)
      .field("auto_enable_attributes", &self.auto_enable_attributes)
      .field("num_vertices", &self.num_vertices)
      .field("num_indices", &self.num_indices)
      .field("index_type", &self.index_type)
      .finish()
  }
}
