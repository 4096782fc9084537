//! Shader backend interface.

use gl::types::*;

use crate::backend::NativeHandle;
use crate::shader::UniformValue;

/// Shader stage and program backend.
pub unsafe trait Shader {
  /// Create a new shader object for a stage (`VERTEX_SHADER`, …).
  unsafe fn create_shader(&mut self, ty: GLenum) -> NativeHandle;

  /// Delete a shader object.
  unsafe fn delete_shader(&mut self, handle: NativeHandle);

  /// Replace the source of a shader object.
  unsafe fn shader_source(&mut self, handle: NativeHandle, source: &str);

  /// Compile the current source of a shader object.
  unsafe fn compile_shader(&mut self, handle: NativeHandle);

  /// Query an integer parameter of a shader object (`COMPILE_STATUS`, …).
  unsafe fn shader_parameter(&mut self, handle: NativeHandle, pname: GLenum) -> GLint;

  /// Retrieve the information log of a shader object.
  unsafe fn shader_info_log(&mut self, handle: NativeHandle) -> String;

  /// Create a new program object.
  unsafe fn create_program(&mut self) -> NativeHandle;

  /// Delete a program object.
  unsafe fn delete_program(&mut self, handle: NativeHandle);

  /// Attach a shader object to a program object.
  unsafe fn attach_shader(&mut self, program: NativeHandle, shader: NativeHandle);

  /// Link a program object.
  unsafe fn link_program(&mut self, program: NativeHandle);

  /// Query an integer parameter of a program object (`LINK_STATUS`, …).
  unsafe fn program_parameter(&mut self, program: NativeHandle, pname: GLenum) -> GLint;

  /// Retrieve the information log of a program object.
  unsafe fn program_info_log(&mut self, program: NativeHandle) -> String;

  /// Make a program current (`0` for none).
  unsafe fn use_program(&mut self, program: NativeHandle);

  /// Bind a fragment output variable to a color number. Takes effect at the next link.
  unsafe fn bind_frag_data_location(&mut self, program: NativeHandle, color: GLuint, name: &str);

  /// Location of a vertex input; negative when not found.
  unsafe fn attrib_location(&mut self, program: NativeHandle, name: &str) -> GLint;

  /// Location of a uniform; negative when not found.
  unsafe fn uniform_location(&mut self, program: NativeHandle, name: &str) -> GLint;

  /// Write a uniform of the current program.
  unsafe fn uniform(&mut self, location: GLint, value: &UniformValue);
}
