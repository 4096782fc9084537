use gl::types::*;

use glue::backend::framebuffer::Framebuffer as FramebufferBackend;
use glue::backend::renderbuffer::RenderBuffer as RenderBufferBackend;
use glue::backend::NativeHandle;

use crate::gl33::GL33;

unsafe impl FramebufferBackend for GL33 {
  unsafe fn gen_framebuffer(&mut self) -> NativeHandle {
    let mut handle: GLuint = 0;
    gl::GenFramebuffers(1, &mut handle);
    handle
  }

  unsafe fn delete_framebuffer(&mut self, handle: NativeHandle) {
    gl::DeleteFramebuffers(1, &handle);
  }

  unsafe fn bind_framebuffer(&mut self, target: GLenum, handle: NativeHandle) {
    gl::BindFramebuffer(target, handle);
  }

  unsafe fn framebuffer_texture(
    &mut self,
    target: GLenum,
    attachment: GLenum,
    tex_target: GLenum,
    texture: NativeHandle,
    level: GLint,
  ) {
    if tex_target == gl::TEXTURE_1D {
      gl::FramebufferTexture1D(target, attachment, tex_target, texture, level);
    } else {
      gl::FramebufferTexture2D(target, attachment, tex_target, texture, level);
    }
  }

  unsafe fn framebuffer_renderbuffer(
    &mut self,
    target: GLenum,
    attachment: GLenum,
    renderbuffer: NativeHandle,
  ) {
    gl::FramebufferRenderbuffer(target, attachment, gl::RENDERBUFFER, renderbuffer);
  }

  unsafe fn draw_buffers(&mut self, buffers: &[GLenum]) {
    if buffers.is_empty() {
      gl::DrawBuffer(gl::NONE);
    } else {
      gl::DrawBuffers(buffers.len() as GLsizei, buffers.as_ptr());
    }
  }

  unsafe fn check_framebuffer_status(&mut self, target: GLenum) -> GLenum {
    gl::CheckFramebufferStatus(target)
  }
}

unsafe impl RenderBufferBackend for GL33 {
  unsafe fn gen_renderbuffer(&mut self) -> NativeHandle {
    let mut handle: GLuint = 0;
    gl::GenRenderbuffers(1, &mut handle);
    handle
  }

  unsafe fn delete_renderbuffer(&mut self, handle: NativeHandle) {
    gl::DeleteRenderbuffers(1, &handle);
  }

  unsafe fn bind_renderbuffer(&mut self, handle: NativeHandle) {
    gl::BindRenderbuffer(gl::RENDERBUFFER, handle);
  }

  unsafe fn renderbuffer_storage(&mut self, internal_format: GLenum, width: u32, height: u32) {
    gl::RenderbufferStorage(
      gl::RENDERBUFFER,
      internal_format,
      width as GLsizei,
      height as GLsizei,
    );
  }
}
