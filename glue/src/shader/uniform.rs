//! Uniform values.
//!
//! Any type implementing [`Uniformable`] can be passed to
//! [`Program::set_uniform`](crate::shader::Program::set_uniform). Matrices are column-major: each
//! inner array is a column.

/// A uniform payload, tagged with its native type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
  /// `int`, also used for `bool` and samplers.
  Int(i32),
  /// `ivec2`.
  IVec2([i32; 2]),
  /// `ivec3`.
  IVec3([i32; 3]),
  /// `ivec4`.
  IVec4([i32; 4]),
  /// `uint`.
  UInt(u32),
  /// `uvec2`.
  UIVec2([u32; 2]),
  /// `uvec3`.
  UIVec3([u32; 3]),
  /// `uvec4`.
  UIVec4([u32; 4]),
  /// `float`.
  Float(f32),
  /// `vec2`.
  Vec2([f32; 2]),
  /// `vec3`.
  Vec3([f32; 3]),
  /// `vec4`.
  Vec4([f32; 4]),
  /// `mat2`.
  Mat2([[f32; 2]; 2]),
  /// `mat3`.
  Mat3([[f32; 3]; 3]),
  /// `mat4`.
  Mat4([[f32; 4]; 4]),
}

/// Types that can be sent to a uniform.
pub trait Uniformable {
  /// Convert into a uniform payload.
  fn into_uniform(self) -> UniformValue;
}

impl Uniformable for UniformValue {
  fn into_uniform(self) -> UniformValue {
    self
  }
}

macro_rules! impl_uniformable {
  ($t:ty, $v:ident) => {
    impl Uniformable for $t {
      fn into_uniform(self) -> UniformValue {
        UniformValue::$v(self)
      }
    }
  };
}

impl_uniformable!(i32, Int);
impl_uniformable!([i32; 2], IVec2);
impl_uniformable!([i32; 3], IVec3);
impl_uniformable!([i32; 4], IVec4);
impl_uniformable!(u32, UInt);
impl_uniformable!([u32; 2], UIVec2);
impl_uniformable!([u32; 3], UIVec3);
impl_uniformable!([u32; 4], UIVec4);
impl_uniformable!(f32, Float);
impl_uniformable!([f32; 2], Vec2);
impl_uniformable!([f32; 3], Vec3);
impl_uniformable!([f32; 4], Vec4);
impl_uniformable!([[f32; 2]; 2], Mat2);
impl_uniformable!([[f32; 3]; 3], Mat3);
impl_uniformable!([[f32; 4]; 4], Mat4);

impl Uniformable for bool {
  fn into_uniform(self) -> UniformValue {
    UniformValue::Int(self as i32)
  }
}

// no double-precision uniforms; narrowed
impl Uniformable for f64 {
  fn into_uniform(self) -> UniformValue {
    UniformValue::Float(self as f32)
  }
}

#[cfg(feature = "cgmath")]
macro_rules! impl_uniformable_cgmath {
  ($t:ty, $v:ident) => {
    impl Uniformable for $t {
      fn into_uniform(self) -> UniformValue {
        UniformValue::$v(self.into())
      }
    }
  };
}

#[cfg(feature = "cgmath")]
impl_uniformable_cgmath!(cgmath::Vector2<f32>, Vec2);
#[cfg(feature = "cgmath")]
impl_uniformable_cgmath!(cgmath::Vector3<f32>, Vec3);
#[cfg(feature = "cgmath")]
impl_uniformable_cgmath!(cgmath::Vector4<f32>, Vec4);
#[cfg(feature = "cgmath")]
impl_uniformable_cgmath!(cgmath::Point3<f32>, Vec3);
#[cfg(feature = "cgmath")]
impl_uniformable_cgmath!(cgmath::Matrix2<f32>, Mat2);
#[cfg(feature = "cgmath")]
impl_uniformable_cgmath!(cgmath::Matrix3<f32>, Mat3);
#[cfg(feature = "cgmath")]
impl_uniformable_cgmath!(cgmath::Matrix4<f32>, Mat4);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn scalars() {
    assert_eq!(3i32.into_uniform(), UniformValue::Int(3));
    assert_eq!(true.into_uniform(), UniformValue::Int(1));
    assert_eq!(0.5f64.into_uniform(), UniformValue::Float(0.5));
    assert_eq!([1u32, 2].into_uniform(), UniformValue::UIVec2([1, 2]));
  }

  #[cfg(feature = "cgmath")]
  #[test]
  fn cgmath_matrices_are_column_major() {
    use cgmath::{Matrix4, Vector3};

    let m = Matrix4::from_translation(Vector3::new(1.0f32, 2.0, 3.0));

    match m.into_uniform() {
      UniformValue::Mat4(columns) => assert_eq!(columns[3], [1.0, 2.0, 3.0, 1.0]),
      other => panic!("unexpected uniform value: {:?}", other),
    }
  }
}
