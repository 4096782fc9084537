use gl::types::*;
use std::ptr;

use glue::backend::texture::Texture as TextureBackend;
use glue::backend::NativeHandle;

use crate::gl33::GL33;

unsafe impl TextureBackend for GL33 {
  unsafe fn gen_texture(&mut self) -> NativeHandle {
    let mut handle: GLuint = 0;
    gl::GenTextures(1, &mut handle);
    handle
  }

  unsafe fn delete_texture(&mut self, handle: NativeHandle) {
    gl::DeleteTextures(1, &handle);
  }

  unsafe fn active_texture(&mut self, unit: GLuint) {
    gl::ActiveTexture(gl::TEXTURE0 + unit);
  }

  unsafe fn bind_texture(&mut self, target: GLenum, handle: NativeHandle) {
    gl::BindTexture(target, handle);
  }

  unsafe fn tex_image(
    &mut self,
    target: GLenum,
    level: GLint,
    internal_format: GLenum,
    size: [u32; 3],
    format: GLenum,
    ty: GLenum,
    data: Option<&[u8]>,
  ) {
    let ptr = data.map_or(ptr::null(), |data| data.as_ptr() as *const _);
    let [width, height, depth] = size;

    match target {
      gl::TEXTURE_1D => gl::TexImage1D(
        target,
        level,
        internal_format as GLint,
        width as GLsizei,
        0,
        format,
        ty,
        ptr,
      ),

      gl::TEXTURE_3D => gl::TexImage3D(
        target,
        level,
        internal_format as GLint,
        width as GLsizei,
        height as GLsizei,
        depth as GLsizei,
        0,
        format,
        ty,
        ptr,
      ),

      _ => gl::TexImage2D(
        target,
        level,
        internal_format as GLint,
        width as GLsizei,
        height as GLsizei,
        0,
        format,
        ty,
        ptr,
      ),
    }
  }

  unsafe fn tex_parameter_i(&mut self, target: GLenum, pname: GLenum, param: GLint) {
    gl::TexParameteri(target, pname, param);
  }

  unsafe fn get_tex_image(
    &mut self,
    target: GLenum,
    level: GLint,
    format: GLenum,
    ty: GLenum,
    out: &mut [u8],
  ) {
    gl::GetTexImage(target, level, format, ty, out.as_mut_ptr() as *mut _);
  }
}
