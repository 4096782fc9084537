//! Renderbuffers.
//!
//! A renderbuffer is write-only image storage: it can only be attached to a framebuffer and
//! rendered to. It is never sampled and its content is never uploaded from the host.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::backend::{Backend, NativeHandle};
use crate::bind::Bindable;
use crate::context::Context;
use crate::native::internal_format_to_glenum;
use crate::pixel::InternalFormat;
use crate::state::State;

/// Renderbuffer.
pub struct RenderBuffer<B>
where
  B: Backend,
{
  handle: NativeHandle,
  format: InternalFormat,
  size: [u32; 2],
  state: Rc<RefCell<State<B>>>,
}

impl<B> RenderBuffer<B>
where
  B: Backend,
{
  /// Create a new renderbuffer without storage.
  pub fn new(ctx: &mut Context<B>) -> Self {
    let handle = native!(ctx.state.borrow_mut(), gen_renderbuffer());

    RenderBuffer {
      handle,
      format: InternalFormat::Invalid,
      size: [0, 0],
      state: ctx.state.clone(),
    }
  }

  /// Native handle.
  pub fn handle(&self) -> NativeHandle {
    self.handle
  }

  /// Format of the storage.
  pub fn format(&self) -> InternalFormat {
    self.format
  }

  /// Whether the storage has a depth format.
  pub fn has_depth_format(&self) -> bool {
    self.format.is_depth()
  }

  /// Size of the storage.
  pub fn size(&self) -> [u32; 2] {
    self.size
  }

  /// Width of the storage.
  pub fn width(&self) -> u32 {
    self.size[0]
  }

  /// Height of the storage.
  pub fn height(&self) -> u32 {
    self.size[1]
  }

  /// Bind the renderbuffer.
  pub fn bind(&self) {
    self.state.borrow_mut().bind_renderbuffer(self.handle);
  }

  /// Unbind any renderbuffer.
  pub fn release(&self) {
    self.state.borrow_mut().bind_renderbuffer(0);
  }

  /// Whether the renderbuffer is bound.
  pub fn is_bound(&self) -> bool {
    self.state.borrow().renderbuffer_binding() == self.handle
  }

  /// Reallocate the storage. The renderbuffer must be bound.
  ///
  /// # Panics
  ///
  /// Panics if `format` is [`InternalFormat::Invalid`].
  pub fn resize(&mut self, format: InternalFormat, size: [u32; 2]) {
    assert!(
      format != InternalFormat::Invalid,
      "cannot allocate renderbuffer storage with an invalid format"
    );

    {
      let mut state = self.state.borrow_mut();

      if state.warn_unbound() && state.renderbuffer_binding() != self.handle {
        log::warn!("resize on renderbuffer {} while it is not bound", self.handle);
      }

      let internal_format = internal_format_to_glenum(format);
      native!(
        state,
        renderbuffer_storage(internal_format, size[0], size[1])
      );
    }

    self.format = format;
    self.size = size;
  }
}

impl<B> Drop for RenderBuffer<B>
where
  B: Backend,
{
  fn drop(&mut self) {
    let mut state = self.state.borrow_mut();
    state.forget_renderbuffer(self.handle);
    native!(state, delete_renderbuffer(self.handle));
  }
}

impl<B> Bindable for RenderBuffer<B>
where
  B: Backend,
{
  fn bind(&self) {
    RenderBuffer::bind(self);
  }

  fn release(&self) {
    RenderBuffer::release(self);
  }

  fn is_bound(&self) -> bool {
    RenderBuffer::is_bound(self)
  }
}

impl<B> fmt::Debug for RenderBuffer<B>
where
  B: Backend,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("RenderBuffer")
      .field("handle", &self.handle)
      .field("format", &self.format)
      .field("size", &self.size)
      .finish()
  }
}
