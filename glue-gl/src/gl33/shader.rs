use gl::types::*;
use std::ffi::CString;
use std::ptr::null_mut;

use glue::backend::shader::Shader as ShaderBackend;
use glue::backend::NativeHandle;
use glue::shader::UniformValue;

use crate::gl33::GL33;

// names with interior nul bytes cannot exist in GLSL
fn c_name(name: &str) -> Option<CString> {
  match CString::new(name) {
    Ok(c_name) => Some(c_name),
    Err(_) => {
      log::debug!("invalid GLSL identifier {:?}", name);
      None
    }
  }
}

fn read_log(len: GLint, read: impl FnOnce(GLsizei, *mut GLchar)) -> String {
  if len <= 0 {
    return String::new();
  }

  let mut log: Vec<u8> = vec![0; len as usize];
  read(len, log.as_mut_ptr() as *mut GLchar);

  // the reported length includes the nul terminator
  while log.last() == Some(&0) {
    log.pop();
  }

  String::from_utf8_lossy(&log).into_owned()
}

unsafe impl ShaderBackend for GL33 {
  unsafe fn create_shader(&mut self, ty: GLenum) -> NativeHandle {
    gl::CreateShader(ty)
  }

  unsafe fn delete_shader(&mut self, handle: NativeHandle) {
    gl::DeleteShader(handle);
  }

  unsafe fn shader_source(&mut self, handle: NativeHandle, source: &str) {
    let ptr = source.as_ptr() as *const GLchar;
    let len = source.len() as GLint;
    gl::ShaderSource(handle, 1, &ptr, &len);
  }

  unsafe fn compile_shader(&mut self, handle: NativeHandle) {
    gl::CompileShader(handle);
  }

  unsafe fn shader_parameter(&mut self, handle: NativeHandle, pname: GLenum) -> GLint {
    let mut value = 0;
    gl::GetShaderiv(handle, pname, &mut value);
    value
  }

  unsafe fn shader_info_log(&mut self, handle: NativeHandle) -> String {
    let len = self.shader_parameter(handle, gl::INFO_LOG_LENGTH);
    read_log(len, |len, buf| gl::GetShaderInfoLog(handle, len, null_mut(), buf))
  }

  unsafe fn create_program(&mut self) -> NativeHandle {
    gl::CreateProgram()
  }

  unsafe fn delete_program(&mut self, handle: NativeHandle) {
    gl::DeleteProgram(handle);
  }

  unsafe fn attach_shader(&mut self, program: NativeHandle, shader: NativeHandle) {
    gl::AttachShader(program, shader);
  }

  unsafe fn link_program(&mut self, program: NativeHandle) {
    gl::LinkProgram(program);
  }

  unsafe fn program_parameter(&mut self, program: NativeHandle, pname: GLenum) -> GLint {
    let mut value = 0;
    gl::GetProgramiv(program, pname, &mut value);
    value
  }

  unsafe fn program_info_log(&mut self, program: NativeHandle) -> String {
    let len = self.program_parameter(program, gl::INFO_LOG_LENGTH);
    read_log(len, |len, buf| {
      gl::GetProgramInfoLog(program, len, null_mut(), buf)
    })
  }

  unsafe fn use_program(&mut self, program: NativeHandle) {
    gl::UseProgram(program);
  }

  unsafe fn bind_frag_data_location(&mut self, program: NativeHandle, color: GLuint, name: &str) {
    if let Some(c_name) = c_name(name) {
      gl::BindFragDataLocation(program, color, c_name.as_ptr() as *const GLchar);
    }
  }

  unsafe fn attrib_location(&mut self, program: NativeHandle, name: &str) -> GLint {
    c_name(name).map_or(-1, |c_name| {
      gl::GetAttribLocation(program, c_name.as_ptr() as *const GLchar)
    })
  }

  unsafe fn uniform_location(&mut self, program: NativeHandle, name: &str) -> GLint {
    c_name(name).map_or(-1, |c_name| {
      gl::GetUniformLocation(program, c_name.as_ptr() as *const GLchar)
    })
  }

  unsafe fn uniform(&mut self, location: GLint, value: &UniformValue) {
    match *value {
      UniformValue::Int(x) => gl::Uniform1i(location, x),
      UniformValue::IVec2(v) => gl::Uniform2iv(location, 1, v.as_ptr()),
      UniformValue::IVec3(v) => gl::Uniform3iv(location, 1, v.as_ptr()),
      UniformValue::IVec4(v) => gl::Uniform4iv(location, 1, v.as_ptr()),
      UniformValue::UInt(x) => gl::Uniform1ui(location, x),
      UniformValue::UIVec2(v) => gl::Uniform2uiv(location, 1, v.as_ptr()),
      UniformValue::UIVec3(v) => gl::Uniform3uiv(location, 1, v.as_ptr()),
      UniformValue::UIVec4(v) => gl::Uniform4uiv(location, 1, v.as_ptr()),
      UniformValue::Float(x) => gl::Uniform1f(location, x),
      UniformValue::Vec2(v) => gl::Uniform2fv(location, 1, v.as_ptr()),
      UniformValue::Vec3(v) => gl::Uniform3fv(location, 1, v.as_ptr()),
      UniformValue::Vec4(v) => gl::Uniform4fv(location, 1, v.as_ptr()),
      UniformValue::Mat2(m) => gl::UniformMatrix2fv(location, 1, gl::FALSE, m.as_ptr() as _),
      UniformValue::Mat3(m) => gl::UniformMatrix3fv(location, 1, gl::FALSE, m.as_ptr() as _),
      UniformValue::Mat4(m) => gl::UniformMatrix4fv(location, 1, gl::FALSE, m.as_ptr() as _),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn log_trailing_nul_is_stripped() {
    let log = read_log(6, |len, buf| unsafe {
      let out = std::slice::from_raw_parts_mut(buf as *mut u8, len as usize);
      out.copy_from_slice(b"oops\n\0");
    });

    assert_eq!(log, "oops\n");
  }

  #[test]
  fn empty_log() {
    assert_eq!(read_log(0, |_, _| unreachable!()), "");
  }

  #[test]
  fn nul_in_name() {
    assert!(c_name("color\0").is_none());
    assert!(c_name("color").is_some());
  }
}
