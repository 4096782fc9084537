//! Vertex buffers.
//!
//! A [`VertexBuffer`] stores several attribute streams in a single allocation, one contiguous
//! block per attribute (non-interleaved). For vertices with a position and a color, the storage
//! holds every position first, then every color:
//!
//! ```text
//! | p0 p1 p2 … pn | c0 c1 c2 … cn |
//! ```

use std::error;
use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::backend::Backend;
use crate::bind::Bindable;
use crate::buffer::{Buffer, Target, Usage};
use crate::context::Context;
use crate::vertex::{AttributeSource, VertexAttribute};

/// Errors raised by [`VertexBuffer::set_data`].
///
/// Nothing is uploaded when an error is returned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VertexBufferError {
  /// No attribute stream was given.
  NoAttributes,
  /// An attribute stream does not have as many vertices as the first one.
  LengthMismatch {
    /// Position of the offending stream.
    index: usize,
    /// Number of vertices of the first stream.
    expected: usize,
    /// Number of vertices of the offending stream.
    found: usize,
  },
}

impl fmt::Display for VertexBufferError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      VertexBufferError::NoAttributes => f.write_str("no vertex attribute"),
      VertexBufferError::LengthMismatch {
        index,
        expected,
        found,
      } => write!(
        f,
        "vertex attribute {} has {} vertices, expected {}",
        index, found, expected
      ),
    }
  }
}

impl error::Error for VertexBufferError {}

/// Buffer of vertex attributes, bound to [`Target::Array`].
pub struct VertexBuffer<B>
where
  B: Backend,
{
  buffer: Buffer<B>,
  attributes: Vec<VertexAttribute>,
  len: usize,
}

impl<B> VertexBuffer<B>
where
  B: Backend,
{
  /// Create a new, empty vertex buffer.
  pub fn new(ctx: &mut Context<B>) -> Self {
    VertexBuffer {
      buffer: Buffer::new(ctx, Target::Array),
      attributes: Vec::new(),
      len: 0,
    }
  }

  /// Replace the storage with the given attribute streams.
  ///
  /// Every stream must have the same number of vertices. Stream `i` becomes the attribute of slot
  /// `i`, stored right after stream `i - 1`. The previous attributes are forgotten.
  ///
  /// The buffer must be bound.
  pub fn set_data(
    &mut self,
    usage: Usage,
    sources: &[AttributeSource],
  ) -> Result<(), VertexBufferError> {
    let first = sources.first().ok_or(VertexBufferError::NoAttributes)?;
    let len = first.len();

    if let Some((index, source)) = sources
      .iter()
      .enumerate()
      .find(|(_, source)| source.len() != len)
    {
      return Err(VertexBufferError::LengthMismatch {
        index,
        expected: len,
        found: source.len(),
      });
    }

    let size = sources.iter().map(|source| source.bytes().len()).sum();
    self.buffer.set_data(usage, None, size);

    let mut attributes = Vec::with_capacity(sources.len());
    let mut pointer = 0;

    for (index, source) in sources.iter().enumerate() {
      let fmt = source.fmt();

      attributes.push(VertexAttribute {
        index: index as u32,
        components: fmt.dim.components() as i32,
        comp_type: fmt.comp_type,
        stride: 0,
        pointer,
        normalized: source.is_normalized(),
      });

      self.buffer.set_sub_data(source.bytes(), pointer);
      pointer += source.bytes().len();
    }

    self.attributes = attributes;
    self.len = len;

    Ok(())
  }

  /// Attributes recorded by the last [`VertexBuffer::set_data`], in slot order.
  pub fn attributes(&self) -> &[VertexAttribute] {
    &self.attributes
  }

  /// Attribute of slot `index`.
  pub fn attribute(&self, index: usize) -> Option<&VertexAttribute> {
    self.attributes.get(index)
  }

  /// Number of attributes.
  pub fn num_attributes(&self) -> usize {
    self.attributes.len()
  }

  /// Number of vertices.
  pub fn num_vertices(&self) -> usize {
    self.len
  }
}

impl<B> Deref for VertexBuffer<B>
where
  B: Backend,
{
  type Target = Buffer<B>;

  fn deref(&self) -> &Self::Target {
    &self.buffer
  }
}

impl<B> DerefMut for VertexBuffer<B>
where
  B: Backend,
{
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.buffer
  }
}

impl<B> Bindable for VertexBuffer<B>
where
  B: Backend,
{
  fn bind(&self) {
    self.buffer.bind();
  }

  fn release(&self) {
    self.buffer.release();
  }

  fn is_bound(&self) -> bool {
    self.buffer.is_bound()
  }
}

impl<B> fmt::Debug for VertexBuffer<B>
where
  B: Backend,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("VertexBuffer")
      .field("buffer", &self.buffer)
      .field("attributes", &self.attributes)
      .field("len", &self.len)
      .finish()
  }
}
