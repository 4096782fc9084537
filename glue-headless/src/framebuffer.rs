use gl::types::*;
use std::collections::BTreeMap;

use glue::backend::framebuffer::Framebuffer as FramebufferBackend;
use glue::backend::renderbuffer::RenderBuffer as RenderBufferBackend;
use glue::backend::NativeHandle;

use crate::texture::is_depth_format;
use crate::{Headless, MAX_COLOR_ATTACHMENTS};

/// An image attached to a framebuffer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttachedImage {
  /// A level of a texture.
  Texture {
    /// Texture target.
    target: GLenum,
    /// Texture handle.
    handle: NativeHandle,
    /// Mipmap level.
    level: GLint,
  },
  /// A renderbuffer.
  RenderBuffer(NativeHandle),
}

#[derive(Debug, Default)]
pub(crate) struct RenderbufferObject {
  internal_format: GLenum,
  size: [u32; 2],
}

#[derive(Debug)]
pub(crate) struct FramebufferObject {
  attachments: BTreeMap<GLenum, AttachedImage>,
  draw_buffers: Vec<GLenum>,
}

impl Default for FramebufferObject {
  fn default() -> Self {
    FramebufferObject {
      attachments: BTreeMap::new(),
      draw_buffers: vec![gl::COLOR_ATTACHMENT0],
    }
  }
}

fn color_index(attachment: GLenum) -> Option<u32> {
  attachment
    .checked_sub(gl::COLOR_ATTACHMENT0)
    .filter(|&i| i < MAX_COLOR_ATTACHMENTS)
}

fn is_attachment(attachment: GLenum) -> bool {
  color_index(attachment).is_some()
    || matches!(
      attachment,
      gl::DEPTH_ATTACHMENT | gl::STENCIL_ATTACHMENT | gl::DEPTH_STENCIL_ATTACHMENT
    )
}

impl Headless {
  /// Internal format and size of a renderbuffer; `NONE` and zeros before the first allocation.
  pub fn renderbuffer_allocation(&self, handle: NativeHandle) -> Option<(GLenum, [u32; 2])> {
    self
      .renderbuffers
      .get(&handle)
      .map(|rb| (rb.internal_format, rb.size))
  }

  /// Draw buffer list of a framebuffer. A new framebuffer draws to `COLOR_ATTACHMENT0`.
  pub fn framebuffer_draw_buffers(&self, handle: NativeHandle) -> Option<&[GLenum]> {
    if handle == 0 {
      Some(&self.default_draw_buffers)
    } else {
      self
        .framebuffers
        .get(&handle)
        .map(|fb| fb.draw_buffers.as_slice())
    }
  }

  /// Image attached to a framebuffer at `attachment`.
  pub fn framebuffer_attachment(
    &self,
    handle: NativeHandle,
    attachment: GLenum,
  ) -> Option<AttachedImage> {
    self.framebuffers.get(&handle)?.attachments.get(&attachment).copied()
  }

  // framebuffer bound to target; raises on invalid targets
  fn bound_framebuffer(&mut self, target: GLenum) -> Option<NativeHandle> {
    match target {
      gl::FRAMEBUFFER | gl::DRAW_FRAMEBUFFER => Some(self.draw_framebuffer),
      gl::READ_FRAMEBUFFER => Some(self.read_framebuffer),

      _ => {
        self.raise(gl::INVALID_ENUM);
        None
      }
    }
  }

  fn attach(&mut self, target: GLenum, attachment: GLenum, image: Option<AttachedImage>) {
    let handle = match self.bound_framebuffer(target) {
      Some(handle) => handle,
      None => return,
    };

    if !is_attachment(attachment) {
      self.raise(gl::INVALID_ENUM);
      return;
    }

    // the default framebuffer has no attachment point
    let fb = match self.framebuffers.get_mut(&handle) {
      Some(fb) => fb,
      None => {
        self.raise(gl::INVALID_OPERATION);
        return;
      }
    };

    match image {
      Some(image) => fb.attachments.insert(attachment, image),
      None => fb.attachments.remove(&attachment),
    };
  }

  // storage format of an attached image, if it still exists and has storage
  fn attached_format(&self, image: &AttachedImage) -> Option<GLenum> {
    match *image {
      AttachedImage::Texture { handle, .. } => self
        .textures
        .get(&handle)
        .filter(|texture| texture.has_storage())
        .map(|texture| texture.internal_format),

      AttachedImage::RenderBuffer(handle) => self
        .renderbuffers
        .get(&handle)
        .filter(|rb| rb.internal_format != gl::NONE && rb.size.iter().all(|&d| d > 0))
        .map(|rb| rb.internal_format),
    }
  }

  fn framebuffer_status(&self, handle: NativeHandle) -> GLenum {
    let fb = match self.framebuffers.get(&handle) {
      Some(fb) => fb,
      None => return gl::FRAMEBUFFER_COMPLETE,
    };

    if fb.attachments.is_empty() {
      return gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT;
    }

    for (&attachment, image) in &fb.attachments {
      let format = match self.attached_format(image) {
        Some(format) => format,
        None => return gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT,
      };

      let renderable = match attachment {
        gl::DEPTH_ATTACHMENT => is_depth_format(format),
        // no stencil-renderable format exists
        gl::STENCIL_ATTACHMENT | gl::DEPTH_STENCIL_ATTACHMENT => false,
        _ => !is_depth_format(format),
      };

      if !renderable {
        return gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT;
      }
    }

    let missing_draw_buffer = fb
      .draw_buffers
      .iter()
      .any(|&b| b != gl::NONE && !fb.attachments.contains_key(&b));

    if missing_draw_buffer {
      return gl::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER;
    }

    gl::FRAMEBUFFER_COMPLETE
  }
}

unsafe impl FramebufferBackend for Headless {
  unsafe fn gen_framebuffer(&mut self) -> NativeHandle {
    let handle = self.gen_framebuffer_name();
    self.framebuffers.insert(handle, FramebufferObject::default());
    handle
  }

  unsafe fn delete_framebuffer(&mut self, handle: NativeHandle) {
    if self.framebuffers.remove(&handle).is_none() {
      return;
    }

    if self.draw_framebuffer == handle {
      self.draw_framebuffer = 0;
    }

    if self.read_framebuffer == handle {
      self.read_framebuffer = 0;
    }
  }

  unsafe fn bind_framebuffer(&mut self, target: GLenum, handle: NativeHandle) {
    if handle != 0 && !self.framebuffers.contains_key(&handle) {
      self.raise(gl::INVALID_OPERATION);
      return;
    }

    match target {
      gl::FRAMEBUFFER => {
        self.draw_framebuffer = handle;
        self.read_framebuffer = handle;
      }

      gl::DRAW_FRAMEBUFFER => self.draw_framebuffer = handle,
      gl::READ_FRAMEBUFFER => self.read_framebuffer = handle,
      _ => self.raise(gl::INVALID_ENUM),
    }
  }

  unsafe fn framebuffer_texture(
    &mut self,
    target: GLenum,
    attachment: GLenum,
    tex_target: GLenum,
    texture: NativeHandle,
    level: GLint,
  ) {
    if texture == 0 {
      self.attach(target, attachment, None);
      return;
    }

    let valid = match self.textures.get(&texture) {
      None => false,
      // a texture that was never bound has no type yet
      Some(t) => t.target == Some(tex_target),
    };

    if !valid || level < 0 {
      self.raise(gl::INVALID_OPERATION);
      return;
    }

    let image = AttachedImage::Texture {
      target: tex_target,
      handle: texture,
      level,
    };

    self.attach(target, attachment, Some(image));
  }

  unsafe fn framebuffer_renderbuffer(
    &mut self,
    target: GLenum,
    attachment: GLenum,
    renderbuffer: NativeHandle,
  ) {
    if renderbuffer == 0 {
      self.attach(target, attachment, None);
      return;
    }

    if !self.renderbuffers.contains_key(&renderbuffer) {
      self.raise(gl::INVALID_OPERATION);
      return;
    }

    let image = AttachedImage::RenderBuffer(renderbuffer);
    self.attach(target, attachment, Some(image));
  }

  unsafe fn draw_buffers(&mut self, buffers: &[GLenum]) {
    if buffers.len() > MAX_COLOR_ATTACHMENTS as usize {
      self.raise(gl::INVALID_VALUE);
      return;
    }

    let handle = self.draw_framebuffer;

    if handle == 0 {
      if buffers.iter().any(|&b| !matches!(b, gl::NONE | gl::BACK | gl::FRONT)) {
        self.raise(gl::INVALID_OPERATION);
        return;
      }

      self.default_draw_buffers = buffers.to_vec();
      return;
    }

    if buffers.iter().any(|&b| b != gl::NONE && color_index(b).is_none()) {
      self.raise(gl::INVALID_ENUM);
      return;
    }

    let named: Vec<_> = buffers.iter().filter(|&&b| b != gl::NONE).collect();
    let duplicated = named.iter().enumerate().any(|(i, b)| named[..i].contains(b));

    if duplicated {
      self.raise(gl::INVALID_OPERATION);
      return;
    }

    if let Some(fb) = self.framebuffers.get_mut(&handle) {
      fb.draw_buffers = buffers.to_vec();
    }
  }

  unsafe fn check_framebuffer_status(&mut self, target: GLenum) -> GLenum {
    match self.bound_framebuffer(target) {
      Some(handle) => self.framebuffer_status(handle),
      None => 0,
    }
  }
}

unsafe impl RenderBufferBackend for Headless {
  unsafe fn gen_renderbuffer(&mut self) -> NativeHandle {
    let handle = self.gen_renderbuffer_name();
    self.renderbuffers.insert(handle, RenderbufferObject::default());
    handle
  }

  unsafe fn delete_renderbuffer(&mut self, handle: NativeHandle) {
    if self.renderbuffers.remove(&handle).is_none() {
      return;
    }

    if self.renderbuffer == handle {
      self.renderbuffer = 0;
    }
  }

  unsafe fn bind_renderbuffer(&mut self, handle: NativeHandle) {
    if handle != 0 && !self.renderbuffers.contains_key(&handle) {
      self.raise(gl::INVALID_OPERATION);
      return;
    }

    self.renderbuffer = handle;
  }

  unsafe fn renderbuffer_storage(&mut self, internal_format: GLenum, width: u32, height: u32) {
    if internal_format == gl::NONE {
      self.raise(gl::INVALID_ENUM);
      return;
    }

    let handle = self.renderbuffer;

    match self.renderbuffers.get_mut(&handle) {
      Some(rb) => {
        rb.internal_format = internal_format;
        rb.size = [width, height];
      }

      None => self.raise(gl::INVALID_OPERATION),
    }
  }
}
