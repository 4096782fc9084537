//! Vertex attribute formats and sources.
//!
//! A vertex attribute is described by the type of its components and the number of components.
//! Any type implementing [`VertexAttrib`] can be turned into an [`AttributeSource`], the runtime
//! description of one attribute stream handed to
//! [`VertexBuffer::set_data`](crate::vertex_buffer::VertexBuffer::set_data).

use std::borrow::Cow;

/// Type of the components of a vertex attribute.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AttribType {
  /// `i8`.
  Byte,
  /// `u8`.
  UnsignedByte,
  /// `i16`.
  Short,
  /// `u16`.
  UnsignedShort,
  /// `i32`.
  Int,
  /// `u32`.
  UnsignedInt,
  /// `f32`.
  Float,
}

impl AttribType {
  /// Size in bytes of a single component.
  pub fn size(self) -> usize {
    match self {
      AttribType::Byte | AttribType::UnsignedByte => 1,
      AttribType::Short | AttribType::UnsignedShort => 2,
      AttribType::Int | AttribType::UnsignedInt | AttribType::Float => 4,
    }
  }

  /// Whether the components are integers, which can then be normalized.
  pub fn is_integral(self) -> bool {
    !matches!(self, AttribType::Float)
  }
}

/// Possible dimension of vertex attributes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VertexAttribDim {
  /// One component.
  Dim1,
  /// Two components.
  Dim2,
  /// Three components.
  Dim3,
  /// Four components.
  Dim4,
}

impl VertexAttribDim {
  /// Number of components.
  pub fn components(self) -> usize {
    match self {
      VertexAttribDim::Dim1 => 1,
      VertexAttribDim::Dim2 => 2,
      VertexAttribDim::Dim3 => 3,
      VertexAttribDim::Dim4 => 4,
    }
  }
}

/// Vertex attribute format.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VertexAttribFmt {
  /// Type of the components.
  pub comp_type: AttribType,
  /// Number of components.
  pub dim: VertexAttribDim,
}

impl VertexAttribFmt {
  /// Size in bytes of a whole attribute.
  pub fn size(&self) -> usize {
    self.comp_type.size() * self.dim.components()
  }
}

/// Class of vertex attributes.
///
/// # Safety
///
/// [`VertexAttrib::attrib_bytes`] must return exactly `VERTEX_ATTRIB_FMT.size()` bytes per
/// attribute, laid out as consecutive native-endian components.
pub unsafe trait VertexAttrib: Sized {
  /// Format of the attribute.
  const VERTEX_ATTRIB_FMT: VertexAttribFmt;

  /// Raw bytes of a sequence of attributes.
  fn attrib_bytes(attribs: &[Self]) -> Cow<[u8]>;
}

// Macro to quickly implement VertexAttrib for a plain-old-data type.
macro_rules! impl_vertex_attribute {
  ($t:ty, $comp_type:ident, $dim:ident) => {
    unsafe impl VertexAttrib for $t {
      const VERTEX_ATTRIB_FMT: VertexAttribFmt = VertexAttribFmt {
        comp_type: AttribType::$comp_type,
        dim: VertexAttribDim::$dim,
      };

      fn attrib_bytes(attribs: &[Self]) -> Cow<[u8]> {
        Cow::Borrowed(bytemuck::cast_slice(attribs))
      }
    }
  };

  ($t:ty, $comp_type:ident) => {
    impl_vertex_attribute!($t, $comp_type, Dim1);
    impl_vertex_attribute!([$t; 1], $comp_type, Dim1);
    impl_vertex_attribute!([$t; 2], $comp_type, Dim2);
    impl_vertex_attribute!([$t; 3], $comp_type, Dim3);
    impl_vertex_attribute!([$t; 4], $comp_type, Dim4);
  };
}

impl_vertex_attribute!(i8, Byte);
impl_vertex_attribute!(u8, UnsignedByte);
impl_vertex_attribute!(i16, Short);
impl_vertex_attribute!(u16, UnsignedShort);
impl_vertex_attribute!(i32, Int);
impl_vertex_attribute!(u32, UnsignedInt);
impl_vertex_attribute!(f32, Float);

#[cfg(feature = "cgmath")]
macro_rules! impl_vertex_attribute_cgmath {
  ($t:ty, $n:literal, $dim:ident) => {
    unsafe impl VertexAttrib for $t {
      const VERTEX_ATTRIB_FMT: VertexAttribFmt = VertexAttribFmt {
        comp_type: AttribType::Float,
        dim: VertexAttribDim::$dim,
      };

      fn attrib_bytes(attribs: &[Self]) -> Cow<[u8]> {
        let arrays: Vec<[f32; $n]> = attribs.iter().map(|&a| a.into()).collect();
        Cow::Owned(bytemuck::cast_slice::<_, u8>(&arrays).to_vec())
      }
    }
  };
}

#[cfg(feature = "cgmath")]
impl_vertex_attribute_cgmath!(cgmath::Vector2<f32>, 2, Dim2);
#[cfg(feature = "cgmath")]
impl_vertex_attribute_cgmath!(cgmath::Vector3<f32>, 3, Dim3);
#[cfg(feature = "cgmath")]
impl_vertex_attribute_cgmath!(cgmath::Vector4<f32>, 4, Dim4);
#[cfg(feature = "cgmath")]
impl_vertex_attribute_cgmath!(cgmath::Point2<f32>, 2, Dim2);
#[cfg(feature = "cgmath")]
impl_vertex_attribute_cgmath!(cgmath::Point3<f32>, 3, Dim3);

/// One attribute stream: a format, a number of vertices and their raw bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeSource<'a> {
  fmt: VertexAttribFmt,
  normalized: bool,
  len: usize,
  bytes: Cow<'a, [u8]>,
}

impl<'a> AttributeSource<'a> {
  /// Describe a sequence of attributes, one per vertex.
  pub fn new<T>(attribs: &'a [T]) -> Self
  where
    T: VertexAttrib,
  {
    AttributeSource {
      fmt: T::VERTEX_ATTRIB_FMT,
      normalized: false,
      len: attribs.len(),
      bytes: T::attrib_bytes(attribs),
    }
  }

  /// Have integer components normalized to `[0; 1]` (unsigned) or `[-1; 1]` (signed) when read
  /// by shaders. Has no effect on float components.
  pub fn normalized(self) -> Self {
    AttributeSource {
      normalized: self.fmt.comp_type.is_integral(),
      ..self
    }
  }

  /// Format of the attributes.
  pub fn fmt(&self) -> VertexAttribFmt {
    self.fmt
  }

  /// Whether integer components are normalized.
  pub fn is_normalized(&self) -> bool {
    self.normalized
  }

  /// Number of vertices.
  pub fn len(&self) -> usize {
    self.len
  }

  /// Whether there is no vertex at all.
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Raw bytes of the whole stream.
  pub fn bytes(&self) -> &[u8] {
    &self.bytes
  }
}

impl<'a, T> From<&'a [T]> for AttributeSource<'a>
where
  T: VertexAttrib,
{
  fn from(attribs: &'a [T]) -> Self {
    AttributeSource::new(attribs)
  }
}

impl<'a, T> From<&'a Vec<T>> for AttributeSource<'a>
where
  T: VertexAttrib,
{
  fn from(attribs: &'a Vec<T>) -> Self {
    AttributeSource::new(attribs.as_slice())
  }
}

/// Layout of one attribute inside a vertex buffer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VertexAttribute {
  /// Attribute slot, matching the shader input location.
  pub index: u32,
  /// Number of components (1 to 4).
  pub components: i32,
  /// Type of the components.
  pub comp_type: AttribType,
  /// Distance in bytes between two consecutive attributes; `0` for tightly packed.
  pub stride: usize,
  /// Offset in bytes of the first attribute inside the buffer.
  pub pointer: usize,
  /// Whether integer components are normalized.
  pub normalized: bool,
}
