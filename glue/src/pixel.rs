//! Pixel formats.
//!
//! [`InternalFormat`] is the format of texels in GPU memory. [`PixelFormat`] and [`PixelType`]
//! describe the layout of texels on the host side, when uploading or reading back.

/// Format of the texels stored on the GPU.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum InternalFormat {
  /// No storage allocated yet.
  Invalid,
  /// 8-bit red channel.
  R8,
  /// 8-bit red and green channels.
  RG8,
  /// 8-bit red, green and blue channels.
  RGB8,
  /// 8-bit red, green, blue and alpha channels.
  RGBA8,
  /// 16-bit red channel.
  R16,
  /// 16-bit red and green channels.
  RG16,
  /// 16-bit red, green and blue channels.
  RGB16,
  /// 16-bit red, green, blue and alpha channels.
  RGBA16,
  /// Half-float red channel.
  R16F,
  /// Half-float red and green channels.
  RG16F,
  /// Half-float red, green and blue channels.
  RGB16F,
  /// Half-float red, green, blue and alpha channels.
  RGBA16F,
  /// Float red channel.
  R32F,
  /// Float red and green channels.
  RG32F,
  /// Float red, green and blue channels.
  RGB32F,
  /// Float red, green, blue and alpha channels.
  RGBA32F,
  /// 16-bit depth.
  DepthComponent16,
  /// 24-bit depth.
  DepthComponent24,
  /// 32-bit depth.
  DepthComponent32,
  /// Float depth.
  DepthComponent32F,
}

impl InternalFormat {
  /// Whether the format is one of the depth formats.
  pub fn is_depth(self) -> bool {
    matches!(
      self,
      InternalFormat::DepthComponent16
        | InternalFormat::DepthComponent24
        | InternalFormat::DepthComponent32
        | InternalFormat::DepthComponent32F
    )
  }
}

/// Channels of host-side texels.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PixelFormat {
  /// Red.
  Red,
  /// Red, green.
  RG,
  /// Red, green, blue.
  RGB,
  /// Red, green, blue, alpha.
  RGBA,
  /// Blue, green, red.
  BGR,
  /// Blue, green, red, alpha.
  BGRA,
  /// Depth.
  DepthComponent,
}

impl PixelFormat {
  /// Number of channels.
  pub fn channels(self) -> usize {
    match self {
      PixelFormat::Red | PixelFormat::DepthComponent => 1,
      PixelFormat::RG => 2,
      PixelFormat::RGB | PixelFormat::BGR => 3,
      PixelFormat::RGBA | PixelFormat::BGRA => 4,
    }
  }
}

/// Type of the channels of host-side texels.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PixelType {
  /// `u8`.
  UnsignedByte,
  /// `i8`.
  Byte,
  /// `u16`.
  UnsignedShort,
  /// `i16`.
  Short,
  /// 16-bit float.
  HalfFloat,
  /// `f32`.
  Float,
}

impl PixelType {
  /// Size in bytes of a channel.
  pub fn bytes(self) -> usize {
    match self {
      PixelType::UnsignedByte | PixelType::Byte => 1,
      PixelType::UnsignedShort | PixelType::Short | PixelType::HalfFloat => 2,
      PixelType::Float => 4,
    }
  }
}

/// Size in bytes of a tightly packed host-side texel.
pub fn texel_bytes(format: PixelFormat, ty: PixelType) -> usize {
  format.channels() * ty.bytes()
}
