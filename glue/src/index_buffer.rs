//! Index buffers.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::backend::Backend;
use crate::bind::Bindable;
use crate::buffer::{Buffer, Target, Usage};
use crate::context::Context;

/// Type of the elements of an index buffer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IndexType {
  /// `u8`.
  UnsignedByte,
  /// `u16`.
  UnsignedShort,
  /// `u32`.
  UnsignedInt,
}

impl IndexType {
  /// Size in bytes of an index.
  pub fn bytes(self) -> usize {
    match self {
      IndexType::UnsignedByte => 1,
      IndexType::UnsignedShort => 2,
      IndexType::UnsignedInt => 4,
    }
  }
}

/// Types that can be used as indices.
pub unsafe trait IndexElement: bytemuck::Pod {
  /// Native type of the index.
  const INDEX_TYPE: IndexType;
}

unsafe impl IndexElement for u8 {
  const INDEX_TYPE: IndexType = IndexType::UnsignedByte;
}

unsafe impl IndexElement for u16 {
  const INDEX_TYPE: IndexType = IndexType::UnsignedShort;
}

unsafe impl IndexElement for u32 {
  const INDEX_TYPE: IndexType = IndexType::UnsignedInt;
}

/// Buffer of indices, bound to [`Target::ElementArray`].
///
/// The number and type of indices are only recorded by [`IndexBuffer::set_data`]. The untyped
/// [`Buffer::set_data`], reachable through [`Deref`], replaces the storage without touching them:
/// they keep describing whatever was uploaded before.
pub struct IndexBuffer<B>
where
  B: Backend,
{
  buffer: Buffer<B>,
  len: usize,
  index_type: IndexType,
}

impl<B> IndexBuffer<B>
where
  B: Backend,
{
  /// Create a new, empty index buffer.
  pub fn new(ctx: &mut Context<B>) -> Self {
    IndexBuffer {
      buffer: Buffer::new(ctx, Target::ElementArray),
      len: 0,
      index_type: IndexType::UnsignedByte,
    }
  }

  /// Replace the storage with `indices`, recording their number and type.
  ///
  /// The buffer must be bound.
  pub fn set_data<I>(&mut self, usage: Usage, indices: &[I])
  where
    I: IndexElement,
  {
    let bytes: &[u8] = bytemuck::cast_slice(indices);
    self.buffer.set_data(usage, Some(bytes), bytes.len());

    self.len = indices.len();
    self.index_type = I::INDEX_TYPE;
  }

  /// Number of indices recorded by the last [`IndexBuffer::set_data`].
  pub fn num_indices(&self) -> usize {
    self.len
  }

  /// Type of the indices recorded by the last [`IndexBuffer::set_data`].
  pub fn index_type(&self) -> IndexType {
    self.index_type
  }
}

impl<B> Deref for IndexBuffer<B>
where
  B: Backend,
{
  type Target = Buffer<B>;

  fn deref(&self) -> &Self::Target {
    &self.buffer
  }
}

impl<B> DerefMut for IndexBuffer<B>
where
  B: Backend,
{
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.buffer
  }
}

impl<B> Bindable for IndexBuffer<B>
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

impl<B> fmt::Debug for IndexBuffer<B>
where
  B: Backend,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("IndexBuffer")
      .field("buffer", &self.buffer)
      .field("len", &self.len)
      .field("index_type", &self.index_type)
      .finish()
  }
}
