//! Framebuffers.
//!
//! A [`FrameBuffer`] collects images (textures and renderbuffers) at attachment points. Color
//! attachments are tracked in a list mirroring slot occupancy, so that
//! [`FrameBuffer::assign_draw_buffers`] can tell the driver which color slots fragment outputs
//! write to. Draw buffers are not derived from attachments by the driver: call
//! [`FrameBuffer::assign_draw_buffers`] after every change of color attachments.

use gl::types::*;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::backend::{Backend, NativeHandle};
use crate::bind::Bindable;
use crate::context::Context;
use crate::native::{attachment_to_glenum, framebuffer_target_to_glenum};
use crate::renderbuffer::RenderBuffer;
use crate::state::State;
use crate::texture::{Dim1, Dim2, Texture};

/// Framebuffer binding target.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FramebufferTarget {
  /// Source of read operations (pixel reads, blits).
  Read,
  /// Destination of draw operations.
  Draw,
  /// Both.
  DrawRead,
}

/// Attachment point of a framebuffer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Attachment {
  /// Color slot 0.
  Color0,
  /// Color slot 1.
  Color1,
  /// Color slot 2.
  Color2,
  /// Color slot 3.
  Color3,
  /// Color slot 4.
  Color4,
  /// Color slot 5.
  Color5,
  /// Color slot 6.
  Color6,
  /// Color slot 7.
  Color7,
  /// Color slot 8.
  Color8,
  /// Depth.
  Depth,
  /// Stencil.
  Stencil,
}

impl Attachment {
  /// Number of the color slot, `None` for depth and stencil.
  pub fn color_index(self) -> Option<usize> {
    match self {
      Attachment::Color0 => Some(0),
      Attachment::Color1 => Some(1),
      Attachment::Color2 => Some(2),
      Attachment::Color3 => Some(3),
      Attachment::Color4 => Some(4),
      Attachment::Color5 => Some(5),
      Attachment::Color6 => Some(6),
      Attachment::Color7 => Some(7),
      Attachment::Color8 => Some(8),
      Attachment::Depth | Attachment::Stencil => None,
    }
  }
}

/// Reason a framebuffer is incomplete.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IncompleteReason {
  /// The default framebuffer does not exist.
  Undefined,
  /// An attachment is not usable (no storage, deleted image, wrong format for its slot).
  IncompleteAttachment,
  /// No image is attached at all.
  MissingAttachment,
  /// A draw buffer names a slot without image.
  IncompleteDrawBuffer,
  /// The read buffer names a slot without image.
  IncompleteReadBuffer,
  /// The combination of formats is not supported.
  Unsupported,
  /// Attachments disagree on their sample count.
  IncompleteMultisample,
  /// Attachments disagree on being layered.
  IncompleteLayerTargets,
  /// Any other status.
  Unknown(GLenum),
}

impl IncompleteReason {
  /// Classify a framebuffer status. `None` is returned for `gl::FRAMEBUFFER_COMPLETE`.
  pub fn from_status(status: GLenum) -> Option<Self> {
    match status {
      gl::FRAMEBUFFER_COMPLETE => None,
      gl::FRAMEBUFFER_UNDEFINED => Some(IncompleteReason::Undefined),
      gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => Some(IncompleteReason::IncompleteAttachment),
      gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => Some(IncompleteReason::MissingAttachment),
      gl::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER => Some(IncompleteReason::IncompleteDrawBuffer),
      gl::FRAMEBUFFER_INCOMPLETE_READ_BUFFER => Some(IncompleteReason::IncompleteReadBuffer),
      gl::FRAMEBUFFER_UNSUPPORTED => Some(IncompleteReason::Unsupported),
      gl::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE => Some(IncompleteReason::IncompleteMultisample),
      gl::FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS => Some(IncompleteReason::IncompleteLayerTargets),
      _ => Some(IncompleteReason::Unknown(status)),
    }
  }
}

impl fmt::Display for IncompleteReason {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      IncompleteReason::Undefined => f.write_str("undefined framebuffer"),
      IncompleteReason::IncompleteAttachment => f.write_str("incomplete attachment"),
      IncompleteReason::MissingAttachment => f.write_str("missing attachment"),
      IncompleteReason::IncompleteDrawBuffer => f.write_str("incomplete draw buffer"),
      IncompleteReason::IncompleteReadBuffer => f.write_str("incomplete read buffer"),
      IncompleteReason::Unsupported => f.write_str("unsupported"),
      IncompleteReason::IncompleteMultisample => f.write_str("incomplete multisample"),
      IncompleteReason::IncompleteLayerTargets => f.write_str("incomplete layer targets"),
      IncompleteReason::Unknown(status) => write!(f, "unknown status 0x{:04X}", status),
    }
  }
}

/// Image that can be attached to a framebuffer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AttachmentImage {
  /// A 1D texture.
  Texture1D(NativeHandle),
  /// A 2D texture.
  Texture2D(NativeHandle),
  /// A renderbuffer.
  RenderBuffer(NativeHandle),
}

/// Resources that can be attached to a framebuffer.
pub trait Attachable {
  /// Image to attach.
  fn attachment_image(&self) -> AttachmentImage;

  /// Whether the image has a depth format.
  fn has_depth_format(&self) -> bool;
}

impl<B> Attachable for Texture<B, Dim1>
where
  B: Backend,
{
  fn attachment_image(&self) -> AttachmentImage {
    AttachmentImage::Texture1D(self.handle())
  }

  fn has_depth_format(&self) -> bool {
    Texture::has_depth_format(self)
  }
}

impl<B> Attachable for Texture<B, Dim2>
where
  B: Backend,
{
  fn attachment_image(&self) -> AttachmentImage {
    AttachmentImage::Texture2D(self.handle())
  }

  fn has_depth_format(&self) -> bool {
    Texture::has_depth_format(self)
  }
}

impl<B> Attachable for RenderBuffer<B>
where
  B: Backend,
{
  fn attachment_image(&self) -> AttachmentImage {
    AttachmentImage::RenderBuffer(self.handle())
  }

  fn has_depth_format(&self) -> bool {
    RenderBuffer::has_depth_format(self)
  }
}

/// Framebuffer.
pub struct FrameBuffer<B>
where
  B: Backend,
{
  handle: NativeHandle,
  // color slot i holds COLOR_ATTACHMENTi or NONE; no trailing NONE
  draw_buffers: Vec<GLenum>,
  state: Rc<RefCell<State<B>>>,
}

impl<B> FrameBuffer<B>
where
  B: Backend,
{
  /// Create a new framebuffer without any attachment.
  pub fn new(ctx: &mut Context<B>) -> Self {
    let handle = native!(ctx.state.borrow_mut(), gen_framebuffer());

    FrameBuffer {
      handle,
      draw_buffers: Vec::new(),
      state: ctx.state.clone(),
    }
  }

  /// Native handle.
  pub fn handle(&self) -> NativeHandle {
    self.handle
  }

  /// Bind the framebuffer to `target`.
  pub fn bind(&self, target: FramebufferTarget) {
    self.state.borrow_mut().bind_framebuffer(target, self.handle);
  }

  /// Bind the default framebuffer to `target`.
  pub fn release(&self, target: FramebufferTarget) {
    self.state.borrow_mut().bind_framebuffer(target, 0);
  }

  /// Whether the framebuffer is bound for drawing or reading.
  pub fn is_bound(&self) -> bool {
    let state = self.state.borrow();

    state.framebuffer_binding(FramebufferTarget::Draw) == self.handle
      || state.framebuffer_binding(FramebufferTarget::Read) == self.handle
  }

  /// Attach the base level of an image at `position`. The framebuffer must be bound.
  pub fn attach<A>(&mut self, image: &A, position: Attachment)
  where
    A: Attachable + ?Sized,
  {
    self.attach_level(image, position, 0);
  }

  /// Attach a level of an image at `position`; renderbuffers ignore `level`. The framebuffer
  /// must be bound.
  pub fn attach_level<A>(&mut self, image: &A, position: Attachment, level: u32)
  where
    A: Attachable + ?Sized,
  {
    self.warn_if_unbound("attach");

    if self.state.borrow().warn_unbound() {
      let depth_slot = position == Attachment::Depth;

      if image.has_depth_format() && !depth_slot {
        log::warn!(
          "attaching a depth image to {:?} of framebuffer {}",
          position,
          self.handle
        );
      } else if !image.has_depth_format() && depth_slot {
        log::warn!(
          "attaching a non-depth image to {:?} of framebuffer {}",
          position,
          self.handle
        );
      }
    }

    let target = framebuffer_target_to_glenum(FramebufferTarget::DrawRead);
    let attachment = attachment_to_glenum(position);

    {
      let mut state = self.state.borrow_mut();

      match image.attachment_image() {
        AttachmentImage::Texture1D(texture) => native!(
          state,
          framebuffer_texture(target, attachment, gl::TEXTURE_1D, texture, level as GLint)
        ),

        AttachmentImage::Texture2D(texture) => native!(
          state,
          framebuffer_texture(target, attachment, gl::TEXTURE_2D, texture, level as GLint)
        ),

        AttachmentImage::RenderBuffer(renderbuffer) => native!(
          state,
          framebuffer_renderbuffer(target, attachment, renderbuffer)
        ),
      }
    }

    if let Some(index) = position.color_index() {
      if self.draw_buffers.len() <= index {
        self.draw_buffers.resize(index + 1, gl::NONE);
      }

      self.draw_buffers[index] = attachment;
    }
  }

  /// Detach the image at `position`. The framebuffer must be bound.
  pub fn detach(&mut self, position: Attachment) {
    self.warn_if_unbound("detach");

    let target = framebuffer_target_to_glenum(FramebufferTarget::DrawRead);
    let attachment = attachment_to_glenum(position);
    native!(
      self.state.borrow_mut(),
      framebuffer_texture(target, attachment, gl::TEXTURE_2D, 0, 0)
    );

    if let Some(index) = position.color_index() {
      if let Some(slot) = self.draw_buffers.get_mut(index) {
        *slot = gl::NONE;
      }

      while self.draw_buffers.last() == Some(&gl::NONE) {
        self.draw_buffers.pop();
      }
    }
  }

  /// Color slots, as passed to the driver by [`FrameBuffer::assign_draw_buffers`]: slot `i`
  /// holds `COLOR_ATTACHMENTi` when an image is attached there, `NONE` otherwise.
  pub fn draw_buffers(&self) -> &[GLenum] {
    &self.draw_buffers
  }

  /// Have fragment outputs written to the attached color slots. The framebuffer must be bound.
  pub fn assign_draw_buffers(&self) {
    self.warn_if_unbound("assign_draw_buffers");
    native!(self.state.borrow_mut(), draw_buffers(&self.draw_buffers));
  }

  /// Whether the framebuffer bound to `target` is complete. This framebuffer should be the one
  /// bound.
  pub fn is_complete(&self, target: FramebufferTarget) -> bool {
    self.warn_if_unbound("is_complete");

    let gl_target = framebuffer_target_to_glenum(target);
    let status = native!(self.state.borrow_mut(), check_framebuffer_status(gl_target));

    match IncompleteReason::from_status(status) {
      None => true,
      Some(reason) => {
        log::debug!("framebuffer {} is incomplete: {}", self.handle, reason);
        false
      }
    }
  }

  fn warn_if_unbound(&self, op: &str) {
    if self.state.borrow().warn_unbound() && !self.is_bound() {
      log::warn!("{} on framebuffer {} while it is not bound", op, self.handle);
    }
  }
}

impl<B> Drop for FrameBuffer<B>
where
  B: Backend,
{
  fn drop(&mut self) {
    let mut state = self.state.borrow_mut();
    state.forget_framebuffer(self.handle);
    native!(state, delete_framebuffer(self.handle));
  }
}

impl<B> Bindable for FrameBuffer<B>
where
  B: Backend,
{
  fn bind(&self) {
    FrameBuffer::bind(self, FramebufferTarget::DrawRead);
  }

  fn release(&self) {
    FrameBuffer::release(self, FramebufferTarget::DrawRead);
  }

  fn is_bound(&self) -> bool {
    FrameBuffer::is_bound(self)
  }
}

impl<B> fmt::Debug for FrameBuffer<B>
where
  B: Backend,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("FrameBuffer")
      .field("handle", &self.handle)
      .field("draw_buffers", &self.draw_buffers)
      .finish()
  }
}
