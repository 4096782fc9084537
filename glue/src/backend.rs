//! Backend interfacing.
//!
//! The driver surface glue consumes is split per concern, one trait per module. A type
//! implementing all of them automatically implements [`Backend`], which is the bound every
//! resource type uses.
//!
//! Every method receives native constants already translated by the [`native`](crate::native)
//! module. Implementors are not expected to validate them: the driver reports misuse through its
//! error flag, which is read back with [`State::get_error`].

use gl::types::*;

pub mod buffer;
pub mod framebuffer;
pub mod query;
pub mod renderbuffer;
pub mod shader;
pub mod texture;
pub mod vertex_array;

/// Opaque native object name.
///
/// `0` is reserved and means “no object” or “default object”.
pub type NativeHandle = GLuint;

/// Driver-wide state queries.
pub unsafe trait State {
  /// Retrieve and clear the oldest pending error flag; `gl::NO_ERROR` when none is pending.
  unsafe fn get_error(&mut self) -> GLenum;

  /// Query an integer state value, such as a `*_BINDING` name.
  unsafe fn get_integer(&mut self, pname: GLenum) -> GLint;
}

/// The complete driver surface.
///
/// This trait is automatically implemented for any type implementing every backend trait.
pub trait Backend:
  State
  + buffer::Buffer
  + vertex_array::VertexArray
  + texture::Texture
  + renderbuffer::RenderBuffer
  + framebuffer::Framebuffer
  + shader::Shader
  + query::Query
{
}

impl<B> Backend for B where
  B: State
    + buffer::Buffer
    + vertex_array::VertexArray
    + texture::Texture
    + renderbuffer::RenderBuffer
    + framebuffer::Framebuffer
    + shader::Shader
    + query::Query
{
}
