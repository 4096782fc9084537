//! Textures.
//!
//! Textures are GPU images of one, two or three dimensions, bound to texture units. The dimension
//! is a type parameter of [`Texture`]; [`Texture1D`], [`Texture2D`] and [`Texture3D`] are the
//! usual aliases.
//!
//! Storage is allocated by [`Texture::set_image_data`] or [`Texture::resize`]. Both always
//! reallocate, even when neither the size nor the format change, and both pin the texture to a
//! single mipmap level: mipmaps are never generated.

use gl::types::*;
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::backend::{Backend, NativeHandle};
use crate::bind::Bindable;
use crate::context::Context;
use crate::native::{
  internal_format_to_glenum, mag_filter_to_glenum, min_filter_to_glenum, pixel_format_to_glenum,
  pixel_type_to_glenum, texture_type_to_glenum, wrap_to_glenum,
};
use crate::pixel::{texel_bytes, InternalFormat, PixelFormat, PixelType};
use crate::state::State;

/// Type of a texture.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TextureType {
  /// 1D texture.
  Texture1D,
  /// 2D texture.
  Texture2D,
  /// 3D texture.
  Texture3D,
}

/// Minification filter.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MinFilter {
  /// Nearest texel.
  Nearest,
  /// Weighted average of the four nearest texels.
  Linear,
  /// Nearest texel of the nearest mipmap.
  NearestMipmapNearest,
  /// Linear filtering of the nearest mipmap.
  LinearMipmapNearest,
  /// Nearest texel of the two nearest mipmaps, averaged.
  NearestMipmapLinear,
  /// Linear filtering of the two nearest mipmaps, averaged.
  LinearMipmapLinear,
}

/// Magnification filter.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MagFilter {
  /// Nearest texel.
  Nearest,
  /// Weighted average of the four nearest texels.
  Linear,
}

/// Behavior of texture coordinates outside of `[0; 1]`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Wrap {
  /// Clamp to the edge texels.
  ClampToEdge,
  /// Clamp to the border color.
  ClampToBorder,
  /// Repeat, mirroring every other repetition.
  MirroredRepeat,
  /// Repeat.
  Repeat,
  /// Mirror once, then clamp to the edge texels.
  MirrorClampToEdge,
}

/// Dimension of a texture.
pub trait Dimensionable {
  /// Size type of a dimension.
  type Size: Copy + fmt::Debug + Eq;

  /// Zero size.
  const ZERO: Self::Size;

  /// Type of the textures of this dimension.
  const TEXTURE_TYPE: TextureType;

  /// Wrapping axes (`TEXTURE_WRAP_*`) of the textures of this dimension.
  const WRAP_AXES: &'static [GLenum];

  /// Width, height and depth of a size; missing dimensions are `1`.
  fn extent(size: Self::Size) -> [u32; 3];

  /// Amount of texels this size represents.
  fn count(size: Self::Size) -> usize {
    let [w, h, d] = Self::extent(size);
    w as usize * h as usize * d as usize
  }
}

/// 1D dimension.
#[derive(Clone, Copy, Debug)]
pub struct Dim1;

impl Dimensionable for Dim1 {
  type Size = u32;

  const ZERO: Self::Size = 0;

  const TEXTURE_TYPE: TextureType = TextureType::Texture1D;

  const WRAP_AXES: &'static [GLenum] = &[gl::TEXTURE_WRAP_S];

  fn extent(size: Self::Size) -> [u32; 3] {
    [size, 1, 1]
  }
}

/// 2D dimension.
#[derive(Clone, Copy, Debug)]
pub struct Dim2;

impl Dimensionable for Dim2 {
  type Size = [u32; 2];

  const ZERO: Self::Size = [0, 0];

  const TEXTURE_TYPE: TextureType = TextureType::Texture2D;

  const WRAP_AXES: &'static [GLenum] = &[gl::TEXTURE_WRAP_S, gl::TEXTURE_WRAP_T];

  fn extent(size: Self::Size) -> [u32; 3] {
    [size[0], size[1], 1]
  }
}

/// 3D dimension.
#[derive(Clone, Copy, Debug)]
pub struct Dim3;

impl Dimensionable for Dim3 {
  type Size = [u32; 3];

  const ZERO: Self::Size = [0, 0, 0];

  const TEXTURE_TYPE: TextureType = TextureType::Texture3D;

  const WRAP_AXES: &'static [GLenum] = &[
    gl::TEXTURE_WRAP_S,
    gl::TEXTURE_WRAP_T,
    gl::TEXTURE_WRAP_R,
  ];

  fn extent(size: Self::Size) -> [u32; 3] {
    size
  }
}

/// Texture.
pub struct Texture<B, D>
where
  B: Backend,
  D: Dimensionable,
{
  handle: NativeHandle,
  format: InternalFormat,
  size: D::Size,
  state: Rc<RefCell<State<B>>>,
  _d: PhantomData<D>,
}

/// 1D texture.
pub type Texture1D<B> = Texture<B, Dim1>;

/// 2D texture.
pub type Texture2D<B> = Texture<B, Dim2>;

/// 3D texture.
pub type Texture3D<B> = Texture<B, Dim3>;

impl<B, D> Texture<B, D>
where
  B: Backend,
  D: Dimensionable,
{
  /// Create a new texture without storage.
  ///
  /// Its format is [`InternalFormat::Invalid`] until storage gets allocated.
  pub fn new(ctx: &mut Context<B>) -> Self {
    let handle = native!(ctx.state.borrow_mut(), gen_texture());

    Texture {
      handle,
      format: InternalFormat::Invalid,
      size: D::ZERO,
      state: ctx.state.clone(),
      _d: PhantomData,
    }
  }

  /// Native handle.
  pub fn handle(&self) -> NativeHandle {
    self.handle
  }

  /// Type of the texture.
  pub fn texture_type(&self) -> TextureType {
    D::TEXTURE_TYPE
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
  pub fn size(&self) -> D::Size {
    self.size
  }

  /// Width of the storage.
  pub fn width(&self) -> u32 {
    D::extent(self.size)[0]
  }

  /// Height of the storage; `1` for 1D textures.
  pub fn height(&self) -> u32 {
    D::extent(self.size)[1]
  }

  /// Depth of the storage; `1` for 1D and 2D textures.
  pub fn depth(&self) -> u32 {
    D::extent(self.size)[2]
  }

  /// Bind the texture.
  ///
  /// With `Some(unit)`, `unit` first becomes the active texture unit. With `None`, the texture
  /// is bound to the active unit, which is left untouched.
  ///
  /// # Panics
  ///
  /// Panics if `unit` is past the texture unit limit of the context options.
  pub fn bind(&self, unit: Option<u32>) {
    let mut state = self.state.borrow_mut();

    if let Some(unit) = unit {
      state.active_texture(unit);
    }

    state.bind_texture(D::TEXTURE_TYPE, self.handle);
  }

  /// Unbind any texture of this type, on `unit` (made active first) or on the active unit.
  pub fn release(&self, unit: Option<u32>) {
    let mut state = self.state.borrow_mut();

    if let Some(unit) = unit {
      state.active_texture(unit);
    }

    state.bind_texture(D::TEXTURE_TYPE, 0);
  }

  /// Whether the texture is bound to the active texture unit.
  pub fn is_bound(&self) -> bool {
    self.state.borrow().texture_binding(D::TEXTURE_TYPE) == self.handle
  }

  /// Set the minification filter. The texture must be bound.
  pub fn set_min_filter(&mut self, filter: MinFilter) {
    self.set_parameter(gl::TEXTURE_MIN_FILTER, min_filter_to_glenum(filter));
  }

  /// Set the magnification filter. The texture must be bound.
  pub fn set_mag_filter(&mut self, filter: MagFilter) {
    self.set_parameter(gl::TEXTURE_MAG_FILTER, mag_filter_to_glenum(filter));
  }

  /// Set the wrapping of every axis of the texture. The texture must be bound.
  pub fn set_wrap(&mut self, wrap: Wrap) {
    let wrap = wrap_to_glenum(wrap);

    for &axis in D::WRAP_AXES {
      self.set_parameter(axis, wrap);
    }
  }

  /// Allocate storage of `size` texels in `format`, uploading `data` when provided.
  ///
  /// `data` holds tightly packed texels described by `pixel_format` and `pixel_type`, rows
  /// starting from the bottom. Without data, the content of the storage is undefined. The
  /// texture must be bound.
  ///
  /// # Panics
  ///
  /// Panics if `format` is [`InternalFormat::Invalid`] or if `data` holds fewer bytes than
  /// `size` texels.
  pub fn set_image_data(
    &mut self,
    format: InternalFormat,
    size: D::Size,
    pixel_format: PixelFormat,
    pixel_type: PixelType,
    data: Option<&[u8]>,
  ) {
    assert!(
      format != InternalFormat::Invalid,
      "cannot allocate texture storage with an invalid format"
    );

    if let Some(data) = data {
      let expected = D::count(size) * texel_bytes(pixel_format, pixel_type);
      assert!(
        data.len() >= expected,
        "texture data of {} bytes given for {} bytes of texels",
        data.len(),
        expected
      );
    }

    self.warn_if_unbound("set_image_data");
    self.tex_image(format, size, pixel_format, pixel_type, data);
  }

  /// Reallocate the storage to `size` texels in `format`.
  ///
  /// The previous content is discarded, even if neither `size` nor `format` change. The texture
  /// must be bound.
  ///
  /// # Panics
  ///
  /// Panics if `format` is [`InternalFormat::Invalid`].
  pub fn resize(&mut self, format: InternalFormat, size: D::Size) {
    assert!(
      format != InternalFormat::Invalid,
      "cannot allocate texture storage with an invalid format"
    );

    self.warn_if_unbound("resize");

    // the transfer format must agree with the storage kind even without data
    let pixel_format = if format.is_depth() {
      PixelFormat::DepthComponent
    } else {
      PixelFormat::Red
    };

    self.tex_image(format, size, pixel_format, PixelType::UnsignedByte, None);
  }

  /// Read the whole storage back, as tightly packed texels described by `pixel_format` and
  /// `pixel_type`. The texture must be bound.
  pub fn get_image_data(&self, pixel_format: PixelFormat, pixel_type: PixelType) -> Vec<u8> {
    self.warn_if_unbound("get_image_data");

    let mut texels = vec![0; D::count(self.size) * texel_bytes(pixel_format, pixel_type)];
    let target = texture_type_to_glenum(D::TEXTURE_TYPE);
    let format = pixel_format_to_glenum(pixel_format);
    let ty = pixel_type_to_glenum(pixel_type);
    native!(
      self.state.borrow_mut(),
      get_tex_image(target, 0, format, ty, &mut texels)
    );

    texels
  }

  fn tex_image(
    &mut self,
    format: InternalFormat,
    size: D::Size,
    pixel_format: PixelFormat,
    pixel_type: PixelType,
    data: Option<&[u8]>,
  ) {
    let target = texture_type_to_glenum(D::TEXTURE_TYPE);
    let internal_format = internal_format_to_glenum(format);
    let pixel_format = pixel_format_to_glenum(pixel_format);
    let pixel_type = pixel_type_to_glenum(pixel_type);
    let extent = D::extent(size);

    {
      let mut state = self.state.borrow_mut();
      native!(
        state,
        tex_image(
          target,
          0,
          internal_format,
          extent,
          pixel_format,
          pixel_type,
          data
        )
      );

      // single level
      native!(state, tex_parameter_i(target, gl::TEXTURE_BASE_LEVEL, 0));
      native!(state, tex_parameter_i(target, gl::TEXTURE_MAX_LEVEL, 0));
    }

    self.format = format;
    self.size = size;
  }

  fn set_parameter(&mut self, pname: GLenum, param: GLenum) {
    self.warn_if_unbound("set_parameter");

    let target = texture_type_to_glenum(D::TEXTURE_TYPE);
    native!(
      self.state.borrow_mut(),
      tex_parameter_i(target, pname, param as GLint)
    );
  }

  fn warn_if_unbound(&self, op: &str) {
    let state = self.state.borrow();

    if state.warn_unbound() && state.texture_binding(D::TEXTURE_TYPE) != self.handle {
      log::warn!(
        "{} on texture {} while it is not bound to texture unit {}",
        op,
        self.handle,
        state.texture_unit()
      );
    }
  }
}

impl<B, D> Drop for Texture<B, D>
where
  B: Backend,
  D: Dimensionable,
{
  fn drop(&mut self) {
    let mut state = self.state.borrow_mut();
    state.forget_texture(self.handle);
    native!(state, delete_texture(self.handle));
  }
}

impl<B, D> Bindable for Texture<B, D>
where
  B: Backend,
  D: Dimensionable,
{
  fn bind(&self) {
    Texture::bind(self, None);
  }

  fn release(&self) {
    Texture::release(self, None);
  }

  fn is_bound(&self) -> bool {
    Texture::is_bound(self)
  }
}

impl<B, D> fmt::Debug for Texture<B, D>
where
  B: Backend,
  D: Dimensionable,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Texture")
      .field("handle", &self.handle)
      .field("type", &D::TEXTURE_TYPE)
      .field("format", &self.format)
      .field("size", &self.size)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extents() {
    assert_eq!(Dim1::extent(7), [7, 1, 1]);
    assert_eq!(Dim2::extent([3, 4]), [3, 4, 1]);
    assert_eq!(Dim3::count([2, 3, 4]), 24);
  }

  #[test]
  fn wrap_axes_follow_dimension() {
    assert_eq!(Dim1::WRAP_AXES.len(), 1);
    assert_eq!(Dim2::WRAP_AXES.len(), 2);
    assert_eq!(Dim3::WRAP_AXES[2], gl::TEXTURE_WRAP_R);
  }
}
