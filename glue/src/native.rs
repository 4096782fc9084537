//! Translation of glue enums into native constants, and classification of native error codes.
//!
//! Every abstract enum maps to exactly one native constant. The tables are exhaustive matches,
//! so an unmapped value cannot be constructed.

use gl::types::*;
use std::error;
use std::fmt;

use crate::buffer::{Target, Usage};
use crate::framebuffer::{Attachment, FramebufferTarget};
use crate::index_buffer::IndexType;
use crate::pixel::{InternalFormat, PixelFormat, PixelType};
use crate::query::QueryTarget;
use crate::shader::StageType;
use crate::texture::{MagFilter, MinFilter, TextureType, Wrap};
use crate::vertex::AttribType;
use crate::vertex_array::Primitive;

/// Classified native error code.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NativeError {
  /// An enum argument was out of range.
  InvalidEnum,
  /// A numeric argument was out of range.
  InvalidValue,
  /// The operation is not allowed in the current state.
  InvalidOperation,
  /// The bound framebuffer is not complete.
  InvalidFramebufferOperation,
  /// Not enough memory left to execute the command.
  OutOfMemory,
  /// Any other code.
  Unknown(GLenum),
}

impl NativeError {
  /// Classify a native error code. `None` is returned for `gl::NO_ERROR`.
  pub fn from_code(code: GLenum) -> Option<Self> {
    match code {
      gl::NO_ERROR => None,
      gl::INVALID_ENUM => Some(NativeError::InvalidEnum),
      gl::INVALID_VALUE => Some(NativeError::InvalidValue),
      gl::INVALID_OPERATION => Some(NativeError::InvalidOperation),
      gl::INVALID_FRAMEBUFFER_OPERATION => Some(NativeError::InvalidFramebufferOperation),
      gl::OUT_OF_MEMORY => Some(NativeError::OutOfMemory),
      _ => Some(NativeError::Unknown(code)),
    }
  }
}

impl fmt::Display for NativeError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      NativeError::InvalidEnum => f.write_str("invalid enum"),
      NativeError::InvalidValue => f.write_str("invalid value"),
      NativeError::InvalidOperation => f.write_str("invalid operation"),
      NativeError::InvalidFramebufferOperation => f.write_str("invalid framebuffer operation"),
      NativeError::OutOfMemory => f.write_str("out of memory"),
      NativeError::Unknown(code) => write!(f, "unknown error 0x{:04X}", code),
    }
  }
}

impl error::Error for NativeError {}

pub(crate) fn buffer_target_to_glenum(target: Target) -> GLenum {
  match target {
    Target::Array => gl::ARRAY_BUFFER,
    Target::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
  }
}

pub(crate) fn usage_to_glenum(usage: Usage) -> GLenum {
  match usage {
    Usage::StreamCopy => gl::STREAM_COPY,
    Usage::StreamDraw => gl::STREAM_DRAW,
    Usage::StreamRead => gl::STREAM_READ,
    Usage::StaticCopy => gl::STATIC_COPY,
    Usage::StaticDraw => gl::STATIC_DRAW,
    Usage::StaticRead => gl::STATIC_READ,
    Usage::DynamicCopy => gl::DYNAMIC_COPY,
    Usage::DynamicDraw => gl::DYNAMIC_DRAW,
    Usage::DynamicRead => gl::DYNAMIC_READ,
  }
}

pub(crate) fn attrib_type_to_glenum(ty: AttribType) -> GLenum {
  match ty {
    AttribType::Byte => gl::BYTE,
    AttribType::UnsignedByte => gl::UNSIGNED_BYTE,
    AttribType::Short => gl::SHORT,
    AttribType::UnsignedShort => gl::UNSIGNED_SHORT,
    AttribType::Int => gl::INT,
    AttribType::UnsignedInt => gl::UNSIGNED_INT,
    AttribType::Float => gl::FLOAT,
  }
}

pub(crate) fn primitive_to_glenum(mode: Primitive) -> GLenum {
  match mode {
    Primitive::Points => gl::POINTS,
    Primitive::LineStrip => gl::LINE_STRIP,
    Primitive::LineLoop => gl::LINE_LOOP,
    Primitive::Lines => gl::LINES,
    Primitive::TriangleStrip => gl::TRIANGLE_STRIP,
    Primitive::TriangleFan => gl::TRIANGLE_FAN,
    Primitive::Triangles => gl::TRIANGLES,
  }
}

pub(crate) fn index_type_to_glenum(ty: IndexType) -> GLenum {
  match ty {
    IndexType::UnsignedByte => gl::UNSIGNED_BYTE,
    IndexType::UnsignedShort => gl::UNSIGNED_SHORT,
    IndexType::UnsignedInt => gl::UNSIGNED_INT,
  }
}

pub(crate) fn framebuffer_target_to_glenum(target: FramebufferTarget) -> GLenum {
  match target {
    FramebufferTarget::Read => gl::READ_FRAMEBUFFER,
    FramebufferTarget::Draw => gl::DRAW_FRAMEBUFFER,
    FramebufferTarget::DrawRead => gl::FRAMEBUFFER,
  }
}

pub(crate) fn attachment_to_glenum(attachment: Attachment) -> GLenum {
  match attachment {
    Attachment::Color0 => gl::COLOR_ATTACHMENT0,
    Attachment::Color1 => gl::COLOR_ATTACHMENT1,
    Attachment::Color2 => gl::COLOR_ATTACHMENT2,
    Attachment::Color3 => gl::COLOR_ATTACHMENT3,
    Attachment::Color4 => gl::COLOR_ATTACHMENT4,
    Attachment::Color5 => gl::COLOR_ATTACHMENT5,
    Attachment::Color6 => gl::COLOR_ATTACHMENT6,
    Attachment::Color7 => gl::COLOR_ATTACHMENT7,
    Attachment::Color8 => gl::COLOR_ATTACHMENT8,
    Attachment::Depth => gl::DEPTH_ATTACHMENT,
    Attachment::Stencil => gl::STENCIL_ATTACHMENT,
  }
}

pub(crate) fn texture_type_to_glenum(ty: TextureType) -> GLenum {
  match ty {
    TextureType::Texture1D => gl::TEXTURE_1D,
    TextureType::Texture2D => gl::TEXTURE_2D,
    TextureType::Texture3D => gl::TEXTURE_3D,
  }
}

pub(crate) fn texture_binding_to_glenum(ty: TextureType) -> GLenum {
  match ty {
    TextureType::Texture1D => gl::TEXTURE_BINDING_1D,
    TextureType::Texture2D => gl::TEXTURE_BINDING_2D,
    TextureType::Texture3D => gl::TEXTURE_BINDING_3D,
  }
}

pub(crate) fn internal_format_to_glenum(format: InternalFormat) -> GLenum {
  match format {
    InternalFormat::Invalid => gl::NONE,
    InternalFormat::R8 => gl::R8,
    InternalFormat::RG8 => gl::RG8,
    InternalFormat::RGB8 => gl::RGB8,
    InternalFormat::RGBA8 => gl::RGBA8,
    InternalFormat::R16 => gl::R16,
    InternalFormat::RG16 => gl::RG16,
    InternalFormat::RGB16 => gl::RGB16,
    InternalFormat::RGBA16 => gl::RGBA16,
    InternalFormat::R16F => gl::R16F,
    InternalFormat::RG16F => gl::RG16F,
    InternalFormat::RGB16F => gl::RGB16F,
    InternalFormat::RGBA16F => gl::RGBA16F,
    InternalFormat::R32F => gl::R32F,
    InternalFormat::RG32F => gl::RG32F,
    InternalFormat::RGB32F => gl::RGB32F,
    InternalFormat::RGBA32F => gl::RGBA32F,
    InternalFormat::DepthComponent16 => gl::DEPTH_COMPONENT16,
    InternalFormat::DepthComponent24 => gl::DEPTH_COMPONENT24,
    InternalFormat::DepthComponent32 => gl::DEPTH_COMPONENT32,
    InternalFormat::DepthComponent32F => gl::DEPTH_COMPONENT32F,
  }
}

pub(crate) fn pixel_format_to_glenum(format: PixelFormat) -> GLenum {
  match format {
    PixelFormat::Red => gl::RED,
    PixelFormat::RG => gl::RG,
    PixelFormat::RGB => gl::RGB,
    PixelFormat::RGBA => gl::RGBA,
    PixelFormat::BGR => gl::BGR,
    PixelFormat::BGRA => gl::BGRA,
    PixelFormat::DepthComponent => gl::DEPTH_COMPONENT,
  }
}

pub(crate) fn pixel_type_to_glenum(ty: PixelType) -> GLenum {
  match ty {
    PixelType::UnsignedByte => gl::UNSIGNED_BYTE,
    PixelType::Byte => gl::BYTE,
    PixelType::UnsignedShort => gl::UNSIGNED_SHORT,
    PixelType::Short => gl::SHORT,
    PixelType::HalfFloat => gl::HALF_FLOAT,
    PixelType::Float => gl::FLOAT,
  }
}

pub(crate) fn min_filter_to_glenum(filter: MinFilter) -> GLenum {
  match filter {
    MinFilter::Nearest => gl::NEAREST,
    MinFilter::Linear => gl::LINEAR,
    MinFilter::NearestMipmapNearest => gl::NEAREST_MIPMAP_NEAREST,
    MinFilter::LinearMipmapNearest => gl::LINEAR_MIPMAP_NEAREST,
    MinFilter::NearestMipmapLinear => gl::NEAREST_MIPMAP_LINEAR,
    MinFilter::LinearMipmapLinear => gl::LINEAR_MIPMAP_LINEAR,
  }
}

pub(crate) fn mag_filter_to_glenum(filter: MagFilter) -> GLenum {
  match filter {
    MagFilter::Nearest => gl::NEAREST,
    MagFilter::Linear => gl::LINEAR,
  }
}

pub(crate) fn wrap_to_glenum(wrap: Wrap) -> GLenum {
  match wrap {
    Wrap::ClampToEdge => gl::CLAMP_TO_EDGE,
    Wrap::ClampToBorder => gl::CLAMP_TO_BORDER,
    Wrap::MirroredRepeat => gl::MIRRORED_REPEAT,
    Wrap::Repeat => gl::REPEAT,
    Wrap::MirrorClampToEdge => gl::MIRROR_CLAMP_TO_EDGE,
  }
}

pub(crate) fn stage_type_to_glenum(ty: StageType) -> GLenum {
  match ty {
    StageType::VertexShader => gl::VERTEX_SHADER,
    StageType::GeometryShader => gl::GEOMETRY_SHADER,
    StageType::FragmentShader => gl::FRAGMENT_SHADER,
  }
}

pub(crate) fn query_target_to_glenum(target: QueryTarget) -> GLenum {
  match target {
    QueryTarget::TimeElapsed => gl::TIME_ELAPSED,
  }
}
