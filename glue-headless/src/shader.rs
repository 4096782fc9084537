use gl::types::*;
use std::collections::HashMap;

use glue::backend::shader::Shader as ShaderBackend;
use glue::backend::NativeHandle;
use glue::shader::UniformValue;

use crate::Headless;

#[derive(Debug)]
pub(crate) struct ShaderObject {
  ty: GLenum,
  source: String,
  compiled: bool,
  log: String,
}

#[derive(Debug)]
struct Uniform {
  location: GLint,
  ty: String,
}

#[derive(Debug, Default)]
pub(crate) struct ProgramObject {
  shaders: Vec<NativeHandle>,
  linked: bool,
  log: String,
  attributes: HashMap<String, GLint>,
  uniforms: HashMap<String, Uniform>,
  values: HashMap<GLint, UniformValue>,
  // applied at the next link
  frag_data_bindings: HashMap<String, GLuint>,
  frag_data_locations: HashMap<String, GLuint>,
}

/// A `uniform` or `in` declaration found in a stage source.
#[derive(Debug, Eq, PartialEq)]
struct Declaration {
  storage: &'static str,
  ty: String,
  name: String,
}

// strip comments and preprocessor lines
fn strip(source: &str) -> String {
  let mut stripped = String::with_capacity(source.len());

  for line in source.lines() {
    let line = line.split("//").next().unwrap_or("");

    if !line.trim_start().starts_with('#') {
      stripped.push_str(line);
      stripped.push('\n');
    }
  }

  stripped
}

// global declarations of a stage; only one name per declaration is understood
fn declarations(source: &str) -> Vec<Declaration> {
  let source = strip(source);
  let mut declarations = Vec::new();
  let mut depth = 0usize;
  let mut statement = String::new();

  for c in source.chars() {
    match c {
      '{' => {
        depth += 1;
        statement.clear();
      }

      '}' => {
        depth = depth.saturating_sub(1);
        statement.clear();
      }

      ';' => {
        if depth == 0 {
          declarations.extend(declaration(&statement));
        }

        statement.clear();
      }

      _ => statement.push(c),
    }
  }

  declarations
}

fn declaration(statement: &str) -> Option<Declaration> {
  let mut statement = statement.trim();

  // layout qualifiers are not honored
  if statement.starts_with("layout") {
    statement = &statement[statement.find(')')? + 1..];
  }

  let tokens: Vec<_> = statement.split_whitespace().collect();

  let storage = match tokens.first() {
    Some(&"uniform") => "uniform",
    Some(&"in") => "in",
    _ => return None,
  };

  match tokens[1..] {
    [.., ty, name] => {
      // arrays are reported under their base name
      let name = name.split('[').next().unwrap_or(name);

      Some(Declaration {
        storage,
        ty: ty.to_owned(),
        name: name.to_owned(),
      })
    }

    _ => None,
  }
}

fn compile(source: &str) -> Result<(), String> {
  let stripped = strip(source);
  let mut depth = 0isize;

  for c in stripped.chars() {
    match c {
      '{' => depth += 1,
      '}' => depth -= 1,
      _ => (),
    }

    if depth < 0 {
      return Err("0:0: error: unexpected '}'".to_owned());
    }
  }

  if depth != 0 {
    return Err("0:0: error: unbalanced braces".to_owned());
  }

  if !stripped.contains("main") {
    return Err("0:0: error: missing entry point main".to_owned());
  }

  Ok(())
}

// whether a uniform value may be written to a uniform declared with type ty
fn accepts(ty: &str, value: &UniformValue) -> bool {
  match value {
    UniformValue::Int(_) => ty == "int" || ty == "bool" || ty.starts_with("sampler"),
    UniformValue::IVec2(_) => ty == "ivec2" || ty == "bvec2",
    UniformValue::IVec3(_) => ty == "ivec3" || ty == "bvec3",
    UniformValue::IVec4(_) => ty == "ivec4" || ty == "bvec4",
    UniformValue::UInt(_) => ty == "uint" || ty == "bool",
    UniformValue::UIVec2(_) => ty == "uvec2",
    UniformValue::UIVec3(_) => ty == "uvec3",
    UniformValue::UIVec4(_) => ty == "uvec4",
    UniformValue::Float(_) => ty == "float" || ty == "bool",
    UniformValue::Vec2(_) => ty == "vec2",
    UniformValue::Vec3(_) => ty == "vec3",
    UniformValue::Vec4(_) => ty == "vec4",
    UniformValue::Mat2(_) => ty == "mat2",
    UniformValue::Mat3(_) => ty == "mat3",
    UniformValue::Mat4(_) => ty == "mat4",
  }
}

fn bool_to_glint(b: bool) -> GLint {
  if b {
    gl::TRUE as GLint
  } else {
    gl::FALSE as GLint
  }
}

// info log length as reported by the driver, nul terminator included
fn log_length(log: &str) -> GLint {
  if log.is_empty() {
    0
  } else {
    log.len() as GLint + 1
  }
}

impl Headless {
  /// Source last given to a shader.
  pub fn shader_source_of(&self, handle: NativeHandle) -> Option<&str> {
    self.shaders.get(&handle).map(|shader| shader.source.as_str())
  }

  /// Value of the uniform `name` of a program, if it was ever written since the last link.
  pub fn uniform_value(&self, program: NativeHandle, name: &str) -> Option<UniformValue> {
    let program = self.programs.get(&program)?;
    let location = program.uniforms.get(name)?.location;
    program.values.get(&location).copied()
  }

  /// Color number the fragment output `name` was bound to at the last link of a program.
  pub fn frag_data_location(&self, program: NativeHandle, name: &str) -> Option<GLuint> {
    self
      .programs
      .get(&program)?
      .frag_data_locations
      .get(name)
      .copied()
  }

  fn link(&mut self, handle: NativeHandle) {
    let mut stages = Vec::new();
    let mut errors = Vec::new();

    if let Some(program) = self.programs.get(&handle) {
      for shader in &program.shaders {
        match self.shaders.get(shader) {
          Some(shader) if shader.compiled => stages.push(shader),
          Some(_) => errors.push(format!("shader {} is not compiled", shader)),
          None => errors.push(format!("shader {} was deleted", shader)),
        }
      }
    }

    for &(ty, name) in &[(gl::VERTEX_SHADER, "vertex"), (gl::FRAGMENT_SHADER, "fragment")] {
      match stages.iter().filter(|shader| shader.ty == ty).count() {
        1 => (),
        0 => errors.push(format!("missing {} shader", name)),
        _ => errors.push(format!("several {} shaders", name)),
      }
    }

    let mut attributes = HashMap::new();
    let mut uniforms = HashMap::new();

    for shader in &stages {
      for decl in declarations(&shader.source) {
        match decl.storage {
          "in" if shader.ty == gl::VERTEX_SHADER => {
            let location = attributes.len() as GLint;
            attributes.entry(decl.name).or_insert(location);
          }

          "uniform" => {
            let location = uniforms.len() as GLint;
            let uniform = uniforms.entry(decl.name.clone()).or_insert(Uniform {
              location,
              ty: decl.ty.clone(),
            });

            if uniform.ty != decl.ty {
              errors.push(format!(
                "uniform {} declared as both {} and {}",
                decl.name, uniform.ty, decl.ty
              ));
            }
          }

          _ => (),
        }
      }
    }

    if let Some(program) = self.programs.get_mut(&handle) {
      program.linked = errors.is_empty();
      program.log = errors.join("\n");
      program.values.clear();

      if program.linked {
        program.attributes = attributes;
        program.uniforms = uniforms;
        program.frag_data_locations = program.frag_data_bindings.clone();
      } else {
        program.attributes.clear();
        program.uniforms.clear();
      }
    }
  }

  // linked program; raises when it does not exist or failed to link
  fn linked_program(&mut self, handle: NativeHandle) -> Option<&ProgramObject> {
    let linked = match self.programs.get(&handle) {
      None => {
        self.raise(gl::INVALID_VALUE);
        return None;
      }

      Some(program) => program.linked,
    };

    if !linked {
      self.raise(gl::INVALID_OPERATION);
      return None;
    }

    self.programs.get(&handle)
  }
}

unsafe impl ShaderBackend for Headless {
  unsafe fn create_shader(&mut self, ty: GLenum) -> NativeHandle {
    if !matches!(ty, gl::VERTEX_SHADER | gl::GEOMETRY_SHADER | gl::FRAGMENT_SHADER) {
      self.raise(gl::INVALID_ENUM);
      return 0;
    }

    let handle = self.gen_shader_name();
    let shader = ShaderObject {
      ty,
      source: String::new(),
      compiled: false,
      log: String::new(),
    };

    self.shaders.insert(handle, shader);
    handle
  }

  unsafe fn delete_shader(&mut self, handle: NativeHandle) {
    self.shaders.remove(&handle);
  }

  unsafe fn shader_source(&mut self, handle: NativeHandle, source: &str) {
    match self.shaders.get_mut(&handle) {
      Some(shader) => shader.source = source.to_owned(),
      None => self.raise(gl::INVALID_VALUE),
    }
  }

  unsafe fn compile_shader(&mut self, handle: NativeHandle) {
    match self.shaders.get_mut(&handle) {
      Some(shader) => match compile(&shader.source) {
        Ok(()) => {
          shader.compiled = true;
          shader.log.clear();
        }

        Err(log) => {
          shader.compiled = false;
          shader.log = log;
        }
      },

      None => self.raise(gl::INVALID_VALUE),
    }
  }

  unsafe fn shader_parameter(&mut self, handle: NativeHandle, pname: GLenum) -> GLint {
    let value = match self.shaders.get(&handle) {
      None => None,
      Some(shader) => match pname {
        gl::SHADER_TYPE => Some(shader.ty as GLint),
        gl::COMPILE_STATUS => Some(bool_to_glint(shader.compiled)),
        gl::DELETE_STATUS => Some(bool_to_glint(false)),
        gl::INFO_LOG_LENGTH => Some(log_length(&shader.log)),
        gl::SHADER_SOURCE_LENGTH => Some(log_length(&shader.source)),

        _ => {
          self.raise(gl::INVALID_ENUM);
          return 0;
        }
      },
    };

    value.unwrap_or_else(|| {
      self.raise(gl::INVALID_VALUE);
      0
    })
  }

  unsafe fn shader_info_log(&mut self, handle: NativeHandle) -> String {
    match self.shaders.get(&handle) {
      Some(shader) => shader.log.clone(),
      None => {
        self.raise(gl::INVALID_VALUE);
        String::new()
      }
    }
  }

  unsafe fn create_program(&mut self) -> NativeHandle {
    let handle = self.gen_shader_name();
    self.programs.insert(handle, ProgramObject::default());
    handle
  }

  // a program in use stays current after deletion
  unsafe fn delete_program(&mut self, handle: NativeHandle) {
    self.programs.remove(&handle);
  }

  unsafe fn attach_shader(&mut self, program: NativeHandle, shader: NativeHandle) {
    if !self.shaders.contains_key(&shader) {
      self.raise(gl::INVALID_VALUE);
      return;
    }

    let already_attached = match self.programs.get_mut(&program) {
      None => {
        self.raise(gl::INVALID_VALUE);
        return;
      }

      Some(program) if program.shaders.contains(&shader) => true,

      Some(program) => {
        program.shaders.push(shader);
        false
      }
    };

    if already_attached {
      self.raise(gl::INVALID_OPERATION);
    }
  }

  unsafe fn link_program(&mut self, program: NativeHandle) {
    if !self.programs.contains_key(&program) {
      self.raise(gl::INVALID_VALUE);
      return;
    }

    self.link(program);
  }

  unsafe fn program_parameter(&mut self, program: NativeHandle, pname: GLenum) -> GLint {
    let value = match self.programs.get(&program) {
      None => None,
      Some(program) => match pname {
        gl::LINK_STATUS => Some(bool_to_glint(program.linked)),
        gl::DELETE_STATUS => Some(bool_to_glint(false)),
        gl::INFO_LOG_LENGTH => Some(log_length(&program.log)),
        gl::ATTACHED_SHADERS => Some(program.shaders.len() as GLint),
        gl::ACTIVE_ATTRIBUTES => Some(program.attributes.len() as GLint),
        gl::ACTIVE_UNIFORMS => Some(program.uniforms.len() as GLint),

        _ => {
          self.raise(gl::INVALID_ENUM);
          return 0;
        }
      },
    };

    value.unwrap_or_else(|| {
      self.raise(gl::INVALID_VALUE);
      0
    })
  }

  unsafe fn program_info_log(&mut self, program: NativeHandle) -> String {
    match self.programs.get(&program) {
      Some(program) => program.log.clone(),
      None => {
        self.raise(gl::INVALID_VALUE);
        String::new()
      }
    }
  }

  unsafe fn use_program(&mut self, program: NativeHandle) {
    if program != 0 && self.linked_program(program).is_none() {
      return;
    }

    self.program = program;
  }

  unsafe fn bind_frag_data_location(&mut self, program: NativeHandle, color: GLuint, name: &str) {
    if name.starts_with("gl_") {
      self.raise(gl::INVALID_OPERATION);
      return;
    }

    match self.programs.get_mut(&program) {
      Some(program) => {
        program.frag_data_bindings.insert(name.to_owned(), color);
      }

      None => self.raise(gl::INVALID_VALUE),
    }
  }

  unsafe fn attrib_location(&mut self, program: NativeHandle, name: &str) -> GLint {
    self
      .linked_program(program)
      .and_then(|program| program.attributes.get(name).copied())
      .unwrap_or(-1)
  }

  unsafe fn uniform_location(&mut self, program: NativeHandle, name: &str) -> GLint {
    self
      .linked_program(program)
      .and_then(|program| program.uniforms.get(name))
      .map_or(-1, |uniform| uniform.location)
  }

  unsafe fn uniform(&mut self, location: GLint, value: &UniformValue) {
    let handle = self.program;

    let accepted = match self.programs.get(&handle) {
      None => false,

      // -1 is silently ignored
      Some(_) if location == -1 => return,

      Some(program) => program
        .uniforms
        .values()
        .any(|uniform| uniform.location == location && accepts(&uniform.ty, value)),
    };

    if !accepted {
      self.raise(gl::INVALID_OPERATION);
      return;
    }

    if let Some(program) = self.programs.get_mut(&handle) {
      program.values.insert(location, *value);
      self.uniform_writes += 1;
    }
  }
}
