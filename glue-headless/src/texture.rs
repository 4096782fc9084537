use gl::types::*;
use std::collections::HashMap;

use glue::backend::texture::Texture as TextureBackend;
use glue::backend::NativeHandle;

use crate::{Headless, MAX_TEXTURE_UNITS};

/// Texel storage of a texture.
#[derive(Debug)]
pub(crate) enum Texels {
  /// Allocated without data; reads back as zeros whatever the transfer format.
  Cleared,
  /// Uploaded texels, along with the transfer format and type they were given in.
  Uploaded {
    format: GLenum,
    ty: GLenum,
    bytes: Vec<u8>,
  },
}

#[derive(Debug)]
pub(crate) struct TextureObject {
  // set by the first bind
  pub(crate) target: Option<GLenum>,
  pub(crate) internal_format: GLenum,
  pub(crate) size: [u32; 3],
  texels: Texels,
  parameters: HashMap<GLenum, GLint>,
  allocations: usize,
}

impl Default for TextureObject {
  fn default() -> Self {
    TextureObject {
      target: None,
      internal_format: gl::NONE,
      size: [0; 3],
      texels: Texels::Cleared,
      parameters: HashMap::new(),
      allocations: 0,
    }
  }
}

impl TextureObject {
  pub(crate) fn has_storage(&self) -> bool {
    self.internal_format != gl::NONE && self.size.iter().all(|&d| d > 0)
  }
}

pub(crate) fn is_depth_format(internal_format: GLenum) -> bool {
  matches!(
    internal_format,
    gl::DEPTH_COMPONENT16 | gl::DEPTH_COMPONENT24 | gl::DEPTH_COMPONENT32 | gl::DEPTH_COMPONENT32F
  )
}

fn is_internal_format(internal_format: GLenum) -> bool {
  is_depth_format(internal_format)
    || matches!(
      internal_format,
      gl::R8
        | gl::RG8
        | gl::RGB8
        | gl::RGBA8
        | gl::R16
        | gl::RG16
        | gl::RGB16
        | gl::RGBA16
        | gl::R16F
        | gl::RG16F
        | gl::RGB16F
        | gl::RGBA16F
        | gl::R32F
        | gl::RG32F
        | gl::RGB32F
        | gl::RGBA32F
    )
}

// size of a tightly packed texel in the given transfer format and type
fn texel_bytes(format: GLenum, ty: GLenum) -> Option<usize> {
  let channels = match format {
    gl::RED | gl::DEPTH_COMPONENT => 1,
    gl::RG => 2,
    gl::RGB | gl::BGR => 3,
    gl::RGBA | gl::BGRA => 4,
    _ => return None,
  };

  let bytes = match ty {
    gl::UNSIGNED_BYTE | gl::BYTE => 1,
    gl::UNSIGNED_SHORT | gl::SHORT | gl::HALF_FLOAT => 2,
    gl::UNSIGNED_INT | gl::INT | gl::FLOAT => 4,
    _ => return None,
  };

  Some(channels * bytes)
}

fn dimensions(target: GLenum) -> Option<usize> {
  match target {
    gl::TEXTURE_1D => Some(1),
    gl::TEXTURE_2D => Some(2),
    gl::TEXTURE_3D => Some(3),
    _ => None,
  }
}

impl Headless {
  /// Internal format and size of a texture; `NONE` and zeros before the first allocation.
  pub fn texture_storage(&self, handle: NativeHandle) -> Option<(GLenum, [u32; 3])> {
    self
      .textures
      .get(&handle)
      .map(|texture| (texture.internal_format, texture.size))
  }

  /// Texels last uploaded to a texture; `None` when its storage was allocated without data.
  pub fn texture_data(&self, handle: NativeHandle) -> Option<&[u8]> {
    match self.textures.get(&handle)?.texels {
      Texels::Uploaded { ref bytes, .. } => Some(bytes),
      Texels::Cleared => None,
    }
  }

  /// Number of storage allocations performed on a texture.
  pub fn texture_allocations(&self, handle: NativeHandle) -> usize {
    self
      .textures
      .get(&handle)
      .map_or(0, |texture| texture.allocations)
  }

  /// Value of an integer parameter of a texture, if it was ever set.
  pub fn texture_parameter(&self, handle: NativeHandle, pname: GLenum) -> Option<GLint> {
    self.textures.get(&handle)?.parameters.get(&pname).copied()
  }

  /// Texture bound to `target` on texture unit `unit`.
  pub fn bound_texture(&self, unit: u32, target: GLenum) -> NativeHandle {
    self
      .texture_bindings
      .get(&(unit, target))
      .copied()
      .unwrap_or(0)
  }

  // texture bound to target on the active unit; raises on invalid targets and empty slots
  fn bound_texture_object(&mut self, target: GLenum) -> Option<&mut TextureObject> {
    if dimensions(target).is_none() {
      self.raise(gl::INVALID_ENUM);
      return None;
    }

    let handle = self.bound_texture(self.texture_unit, target);

    if handle == 0 {
      self.raise(gl::INVALID_OPERATION);
      return None;
    }

    self.textures.get_mut(&handle)
  }
}

unsafe impl TextureBackend for Headless {
  unsafe fn gen_texture(&mut self) -> NativeHandle {
    let handle = self.gen_texture_name();
    self.textures.insert(handle, TextureObject::default());
    handle
  }

  unsafe fn delete_texture(&mut self, handle: NativeHandle) {
    if self.textures.remove(&handle).is_none() {
      return;
    }

    // unbound from every unit
    self.texture_bindings.retain(|_, bound| *bound != handle);
  }

  unsafe fn active_texture(&mut self, unit: GLuint) {
    if unit >= MAX_TEXTURE_UNITS {
      self.raise(gl::INVALID_ENUM);
      return;
    }

    self.texture_unit = unit;
  }

  unsafe fn bind_texture(&mut self, target: GLenum, handle: NativeHandle) {
    if dimensions(target).is_none() {
      self.raise(gl::INVALID_ENUM);
      return;
    }

    if handle != 0 {
      match self.textures.get_mut(&handle) {
        None => {
          self.raise(gl::INVALID_OPERATION);
          return;
        }

        Some(texture) => match texture.target {
          None => texture.target = Some(target),
          Some(t) if t == target => (),

          // a texture keeps the type of its first binding
          Some(_) => {
            self.raise(gl::INVALID_OPERATION);
            return;
          }
        },
      }
    }

    let unit = self.texture_unit;

    if handle == 0 {
      self.texture_bindings.remove(&(unit, target));
    } else {
      self.texture_bindings.insert((unit, target), handle);
    }
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
    if level < 0 || !is_internal_format(internal_format) {
      self.raise(gl::INVALID_VALUE);
      return;
    }

    let texel_bytes = match texel_bytes(format, ty) {
      Some(texel_bytes) => texel_bytes,
      None => {
        self.raise(gl::INVALID_ENUM);
        return;
      }
    };

    // depth storage only accepts depth transfers, and conversely
    if is_depth_format(internal_format) != (format == gl::DEPTH_COMPONENT) {
      self.raise(gl::INVALID_OPERATION);
      return;
    }

    // unused dimensions are ignored
    let dims = dimensions(target).unwrap_or(3);
    let mut size = size;
    for d in &mut size[dims..] {
      *d = 1;
    }

    let len = size.iter().map(|&d| d as usize).product::<usize>() * texel_bytes;

    if data.map_or(false, |data| data.len() < len) {
      self.raise(gl::INVALID_OPERATION);
      return;
    }

    let texture = match self.bound_texture_object(target) {
      Some(texture) => texture,
      None => return,
    };

    // only the base level is mirrored
    if level > 0 {
      log::debug!("ignoring storage of level {}", level);
      return;
    }

    texture.internal_format = internal_format;
    texture.size = size;
    texture.allocations += 1;
    texture.texels = match data {
      Some(data) => Texels::Uploaded {
        format,
        ty,
        bytes: data[..len].to_vec(),
      },
      None => Texels::Cleared,
    };
  }

  unsafe fn tex_parameter_i(&mut self, target: GLenum, pname: GLenum, param: GLint) {
    if let Some(texture) = self.bound_texture_object(target) {
      texture.parameters.insert(pname, param);
    }
  }

  unsafe fn get_tex_image(
    &mut self,
    target: GLenum,
    level: GLint,
    format: GLenum,
    ty: GLenum,
    out: &mut [u8],
  ) {
    if level != 0 {
      self.raise(gl::INVALID_VALUE);
      return;
    }

    if texel_bytes(format, ty).is_none() {
      self.raise(gl::INVALID_ENUM);
      return;
    }

    let mismatch = match self.bound_texture_object(target) {
      None => return,

      Some(texture) => match texture.texels {
        Texels::Cleared => {
          out.iter_mut().for_each(|b| *b = 0);
          false
        }

        Texels::Uploaded {
          format: f,
          ty: t,
          ref bytes,
        } if f == format && t == ty => {
          let len = out.len().min(bytes.len());
          out[..len].copy_from_slice(&bytes[..len]);
          false
        }

        // no conversion between transfer formats
        Texels::Uploaded { .. } => true,
      },
    };

    if mismatch {
      self.raise(gl::INVALID_OPERATION);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn upload_and_read_back() {
    let mut backend = Headless::new();

    unsafe {
      let texture = backend.gen_texture();
      backend.bind_texture(gl::TEXTURE_2D, texture);
      backend.tex_image(
        gl::TEXTURE_2D,
        0,
        gl::RGBA8,
        [1, 2, 7],
        gl::RGBA,
        gl::UNSIGNED_BYTE,
        Some(&[1, 2, 3, 4, 5, 6, 7, 8][..]),
      );

      let mut out = [0; 8];
      backend.get_tex_image(gl::TEXTURE_2D, 0, gl::RGBA, gl::UNSIGNED_BYTE, &mut out);

      assert_eq!(out, [1, 2, 3, 4, 5, 6, 7, 8]);
      assert_eq!(backend.texture_storage(texture), Some((gl::RGBA8, [1, 2, 1])));
      assert_eq!(backend.texture_allocations(texture), 1);
    }

    assert!(backend.raised_errors().is_empty());
  }

  #[test]
  fn read_back_in_another_format() {
    let mut backend = Headless::new();

    unsafe {
      let texture = backend.gen_texture();
      backend.bind_texture(gl::TEXTURE_1D, texture);
      backend.tex_image(
        gl::TEXTURE_1D,
        0,
        gl::R8,
        [2, 1, 1],
        gl::RED,
        gl::UNSIGNED_BYTE,
        Some(&[1, 2][..]),
      );

      let mut out = [0; 8];
      backend.get_tex_image(gl::TEXTURE_1D, 0, gl::RED, gl::FLOAT, &mut out);
    }

    assert_eq!(backend.raised_errors(), &[gl::INVALID_OPERATION]);
  }

  #[test]
  fn depth_storage_needs_depth_transfer() {
    let mut backend = Headless::new();

    unsafe {
      let texture = backend.gen_texture();
      backend.bind_texture(gl::TEXTURE_2D, texture);
      backend.tex_image(
        gl::TEXTURE_2D,
        0,
        gl::DEPTH_COMPONENT24,
        [4, 4, 1],
        gl::RED,
        gl::UNSIGNED_BYTE,
        None,
      );
    }

    assert_eq!(backend.raised_errors(), &[gl::INVALID_OPERATION]);
  }

  #[test]
  fn textures_keep_their_type() {
    let mut backend = Headless::new();

    unsafe {
      let texture = backend.gen_texture();
      backend.bind_texture(gl::TEXTURE_2D, texture);
      backend.bind_texture(gl::TEXTURE_3D, texture);
    }

    assert_eq!(backend.raised_errors(), &[gl::INVALID_OPERATION]);
  }

  #[test]
  fn bindings_are_per_unit() {
    let mut backend = Headless::new();

    unsafe {
      let a = backend.gen_texture();
      let b = backend.gen_texture();

      backend.active_texture(2);
      backend.bind_texture(gl::TEXTURE_2D, a);
      backend.active_texture(0);
      backend.bind_texture(gl::TEXTURE_2D, b);

      assert_eq!(backend.bound_texture(2, gl::TEXTURE_2D), a);
      assert_eq!(backend.bound_texture(0, gl::TEXTURE_2D), b);

      backend.delete_texture(a);
      assert_eq!(backend.bound_texture(2, gl::TEXTURE_2D), 0);

      backend.active_texture(MAX_TEXTURE_UNITS);
    }

    assert_eq!(backend.raised_errors(), &[gl::INVALID_ENUM]);
  }
}
