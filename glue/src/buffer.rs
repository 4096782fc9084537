//! GPU buffers.
//!
//! A [`Buffer`] is a linear region of GPU memory bound to a [`Target`]. Its storage is replaced as
//! a whole with [`Buffer::set_data`] and partially overwritten with [`Buffer::set_sub_data`]. Both
//! operate on the buffer currently bound to the target, so the buffer must be bound first.
//!
//! [`IndexBuffer`](crate::index_buffer::IndexBuffer) and
//! [`VertexBuffer`](crate::vertex_buffer::VertexBuffer) build on top of it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::backend::{Backend, NativeHandle};
use crate::bind::Bindable;
use crate::context::Context;
use crate::native::{buffer_target_to_glenum, usage_to_glenum};
use crate::state::State;

/// Binding target of a buffer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Target {
  /// Vertex data.
  Array,
  /// Index data.
  ElementArray,
}

/// Hint about how the storage of a buffer is going to be accessed.
///
/// The hint is used by the driver to place the storage; it has no effect on correctness.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Usage {
  /// Modified once, used a few times, written by the GPU, read by the GPU.
  StreamCopy,
  /// Modified once, used a few times, written by the application, read by the GPU.
  StreamDraw,
  /// Modified once, used a few times, written by the GPU, read by the application.
  StreamRead,
  /// Modified once, used many times, written by the GPU, read by the GPU.
  StaticCopy,
  /// Modified once, used many times, written by the application, read by the GPU.
  StaticDraw,
  /// Modified once, used many times, written by the GPU, read by the application.
  StaticRead,
  /// Modified repeatedly, used many times, written by the GPU, read by the GPU.
  DynamicCopy,
  /// Modified repeatedly, used many times, written by the application, read by the GPU.
  DynamicDraw,
  /// Modified repeatedly, used many times, written by the GPU, read by the application.
  DynamicRead,
}

/// GPU buffer.
pub struct Buffer<B>
where
  B: Backend,
{
  handle: NativeHandle,
  target: Target,
  size: usize,
  usage: Usage,
  state: Rc<RefCell<State<B>>>,
}

impl<B> Buffer<B>
where
  B: Backend,
{
  /// Create a new, empty buffer for `target`.
  pub fn new(ctx: &mut Context<B>, target: Target) -> Self {
    let handle = native!(ctx.state.borrow_mut(), gen_buffer());

    Buffer {
      handle,
      target,
      size: 0,
      usage: Usage::StaticDraw,
      state: ctx.state.clone(),
    }
  }

  /// Native handle.
  pub fn handle(&self) -> NativeHandle {
    self.handle
  }

  /// Target the buffer binds to.
  pub fn target(&self) -> Target {
    self.target
  }

  /// Size in bytes of the storage, as set by the last [`Buffer::set_data`].
  pub fn size(&self) -> usize {
    self.size
  }

  /// Usage hint given to the last [`Buffer::set_data`].
  pub fn usage(&self) -> Usage {
    self.usage
  }

  /// Bind the buffer to its target.
  pub fn bind(&self) {
    self.state.borrow_mut().bind_buffer(self.target, self.handle);
  }

  /// Unbind any buffer from the target of this buffer.
  pub fn release(&self) {
    self.state.borrow_mut().bind_buffer(self.target, 0);
  }

  /// Whether the buffer occupies its target slot.
  pub fn is_bound(&self) -> bool {
    self.state.borrow().buffer_binding(self.target) == self.handle
  }

  /// Replace the storage of the buffer with `size` bytes.
  ///
  /// When `data` is provided, it is copied into the new storage right away and must hold exactly
  /// `size` bytes; otherwise the content of the storage is undefined.
  ///
  /// # Panics
  ///
  /// Panics if `data` is provided with a length different from `size`.
  pub fn set_data(&mut self, usage: Usage, data: Option<&[u8]>, size: usize) {
    if let Some(data) = data {
      assert_eq!(
        data.len(),
        size,
        "buffer data of {} bytes given for a {} bytes storage",
        data.len(),
        size
      );
    }

    self.warn_if_unbound("set_data");

    let target = buffer_target_to_glenum(self.target);
    let gl_usage = usage_to_glenum(usage);
    native!(
      self.state.borrow_mut(),
      buffer_data(target, size, data, gl_usage)
    );

    self.size = size;
    self.usage = usage;
  }

  /// Overwrite `data.len()` bytes of the storage, starting at `offset`.
  ///
  /// # Panics
  ///
  /// Panics if the region does not fit in the storage.
  pub fn set_sub_data(&mut self, data: &[u8], offset: usize) {
    self.assert_in_range(offset, data.len());
    self.warn_if_unbound("set_sub_data");

    let target = buffer_target_to_glenum(self.target);
    native!(self.state.borrow_mut(), buffer_sub_data(target, offset, data));
  }

  /// Read `out.len()` bytes of the storage, starting at `offset`.
  ///
  /// # Panics
  ///
  /// Panics if the region does not fit in the storage.
  pub fn get_sub_data(&self, offset: usize, out: &mut [u8]) {
    self.assert_in_range(offset, out.len());
    self.warn_if_unbound("get_sub_data");

    let target = buffer_target_to_glenum(self.target);
    native!(
      self.state.borrow_mut(),
      get_buffer_sub_data(target, offset, out)
    );
  }

  fn assert_in_range(&self, offset: usize, len: usize) {
    let end = offset.checked_add(len);

    assert!(
      end.map_or(false, |end| end <= self.size),
      "buffer region [{}; +{}] out of range (buffer size: {})",
      offset,
      len,
      self.size
    );
  }

  fn warn_if_unbound(&self, op: &str) {
    let state = self.state.borrow();

    if state.warn_unbound() && state.buffer_binding(self.target) != self.handle {
      log::warn!(
        "{} on buffer {} while it is not bound to {:?}",
        op,
        self.handle,
        self.target
      );
    }
  }
}

impl<B> Drop for Buffer<B>
where
  B: Backend,
{
  fn drop(&mut self) {
    let mut state = self.state.borrow_mut();
    state.forget_buffer(self.handle);
    native!(state, delete_buffer(self.handle));
  }
}

impl<B> Bindable for Buffer<B>
where
  B: Backend,
{
  fn bind(&self) {
    Buffer::bind(self);
  }

  fn release(&self) {
    Buffer::release(self);
  }

  fn is_bound(&self) -> bool {
    Buffer::is_bound(self)
  }
}

impl<B> fmt::Debug for Buffer<B>
where
  B: Backend,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Buffer")
      .field("handle", &self.handle)
      .field("target", &self.target)
      .field("size", &self.size)
      .field("usage", &self.usage)
      .finish()
  }
}
