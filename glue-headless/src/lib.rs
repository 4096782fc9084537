//! A software backend for [glue](https://crates.io/crates/glue).
//!
//! [`Headless`] mirrors driver objects in host memory and applies the validation rules of an
//! OpenGL 3.3 core context: misuse raises the same error flags a driver would, read back through
//! [`State::get_error`]. No pixel is ever rasterized; draw calls and query timings are recorded
//! instead.
//!
//! On top of the backend traits, [`Headless`] exposes accessors to inspect the mirrored objects
//! (buffer content, attribute layouts, texture storage, framebuffer attachments, uniform values,
//! etc.), which makes it the backend of choice to test code built on glue without a GPU.
//!
//! Shader compilation is approximated: a stage compiles when its source declares a `main`
//! function and its braces are balanced. Linking collects the `in` declarations of the vertex
//! stage and the `uniform` declarations of every stage, and assigns them locations in declaration
//! order.

mod buffer;
mod framebuffer;
mod query;
mod shader;
mod texture;
mod vertex_array;

pub use crate::framebuffer::AttachedImage;
pub use crate::vertex_array::{DrawCall, VertexAttrib};

use gl::types::*;
use std::collections::{HashMap, VecDeque};

use glue::backend::{NativeHandle, State};

use crate::buffer::BufferObject;
use crate::framebuffer::{FramebufferObject, RenderbufferObject};
use crate::query::{ActiveQuery, QueryObject};
use crate::shader::{ProgramObject, ShaderObject};
use crate::texture::TextureObject;
use crate::vertex_array::VertexArrayObject;

/// Number of texture units.
pub const MAX_TEXTURE_UNITS: u32 = 48;

/// Number of vertex attribute slots per vertex array.
pub const MAX_VERTEX_ATTRIBS: u32 = 16;

/// Number of color attachment slots per framebuffer, and of entries in a draw buffer list.
pub const MAX_COLOR_ATTACHMENTS: u32 = 16;

// flags raised past this are dropped
const MAX_PENDING_ERRORS: usize = 64;

/// Name generator for one kind of object. `0` is never handed out.
#[derive(Debug, Default)]
struct Names(NativeHandle);

impl Names {
  fn next(&mut self) -> NativeHandle {
    self.0 += 1;
    self.0
  }
}

/// The software backend.
#[derive(Debug)]
pub struct Headless {
  // names
  buffer_names: Names,
  vertex_array_names: Names,
  texture_names: Names,
  renderbuffer_names: Names,
  framebuffer_names: Names,
  shader_names: Names,
  query_names: Names,

  // errors
  pending_errors: VecDeque<GLenum>,
  raised_errors: Vec<GLenum>,

  // objects
  pub(crate) buffers: HashMap<NativeHandle, BufferObject>,
  pub(crate) vertex_arrays: HashMap<NativeHandle, VertexArrayObject>,
  pub(crate) textures: HashMap<NativeHandle, TextureObject>,
  pub(crate) renderbuffers: HashMap<NativeHandle, RenderbufferObject>,
  pub(crate) framebuffers: HashMap<NativeHandle, FramebufferObject>,
  pub(crate) shaders: HashMap<NativeHandle, ShaderObject>,
  pub(crate) programs: HashMap<NativeHandle, ProgramObject>,
  pub(crate) queries: HashMap<NativeHandle, QueryObject>,

  // bindings
  pub(crate) array_buffer: NativeHandle,
  pub(crate) vertex_array: NativeHandle,
  pub(crate) texture_unit: u32,
  pub(crate) texture_bindings: HashMap<(u32, GLenum), NativeHandle>,
  pub(crate) renderbuffer: NativeHandle,
  pub(crate) draw_framebuffer: NativeHandle,
  pub(crate) read_framebuffer: NativeHandle,
  pub(crate) program: NativeHandle,
  pub(crate) default_draw_buffers: Vec<GLenum>,

  // bookkeeping
  pub(crate) active_query: Option<ActiveQuery>,
  pub(crate) clock_ns: u64,
  pub(crate) draw_calls: Vec<DrawCall>,
  pub(crate) uniform_writes: usize,
}

impl Default for Headless {
  fn default() -> Self {
    Self::new()
  }
}

impl Headless {
  /// Create a backend with no object and every binding slot empty.
  pub fn new() -> Self {
    let mut vertex_arrays = HashMap::new();
    // the default vertex array only ever holds an element buffer binding
    vertex_arrays.insert(0, VertexArrayObject::default());

    Headless {
      buffer_names: Names::default(),
      vertex_array_names: Names::default(),
      texture_names: Names::default(),
      renderbuffer_names: Names::default(),
      framebuffer_names: Names::default(),
      shader_names: Names::default(),
      query_names: Names::default(),
      pending_errors: VecDeque::new(),
      raised_errors: Vec::new(),
      buffers: HashMap::new(),
      vertex_arrays,
      textures: HashMap::new(),
      renderbuffers: HashMap::new(),
      framebuffers: HashMap::new(),
      shaders: HashMap::new(),
      programs: HashMap::new(),
      queries: HashMap::new(),
      array_buffer: 0,
      vertex_array: 0,
      texture_unit: 0,
      texture_bindings: HashMap::new(),
      renderbuffer: 0,
      draw_framebuffer: 0,
      read_framebuffer: 0,
      program: 0,
      default_draw_buffers: vec![gl::BACK],
      active_query: None,
      clock_ns: 0,
      draw_calls: Vec::new(),
      uniform_writes: 0,
    }
  }

  /// Every error flag raised so far, oldest first, whether it was read back or not.
  pub fn raised_errors(&self) -> &[GLenum] {
    &self.raised_errors
  }

  /// Forget the error history. Pending flags are left untouched.
  pub fn clear_raised_errors(&mut self) {
    self.raised_errors.clear();
  }

  /// Number of live objects, of every kind.
  pub fn live_objects(&self) -> usize {
    // the default vertex array is not an object
    self.buffers.len()
      + (self.vertex_arrays.len() - 1)
      + self.textures.len()
      + self.renderbuffers.len()
      + self.framebuffers.len()
      + self.shaders.len()
      + self.programs.len()
      + self.queries.len()
  }

  /// Every draw call issued so far, oldest first.
  pub fn draw_calls(&self) -> &[DrawCall] {
    &self.draw_calls
  }

  /// Number of uniform values written so far.
  pub fn uniform_writes(&self) -> usize {
    self.uniform_writes
  }

  /// Simulated GPU clock, in nanoseconds. It only moves forward with draw calls.
  pub fn clock_ns(&self) -> u64 {
    self.clock_ns
  }

  pub(crate) fn raise(&mut self, code: GLenum) {
    log::trace!("raising error 0x{:04X}", code);

    self.raised_errors.push(code);

    if self.pending_errors.len() < MAX_PENDING_ERRORS {
      self.pending_errors.push_back(code);
    }
  }

  pub(crate) fn gen_buffer_name(&mut self) -> NativeHandle {
    self.buffer_names.next()
  }

  pub(crate) fn gen_vertex_array_name(&mut self) -> NativeHandle {
    self.vertex_array_names.next()
  }

  pub(crate) fn gen_texture_name(&mut self) -> NativeHandle {
    self.texture_names.next()
  }

  pub(crate) fn gen_renderbuffer_name(&mut self) -> NativeHandle {
    self.renderbuffer_names.next()
  }

  pub(crate) fn gen_framebuffer_name(&mut self) -> NativeHandle {
    self.framebuffer_names.next()
  }

  // shaders and programs share a namespace
  pub(crate) fn gen_shader_name(&mut self) -> NativeHandle {
    self.shader_names.next()
  }

  pub(crate) fn gen_query_name(&mut self) -> NativeHandle {
    self.query_names.next()
  }

  fn texture_binding(&self, target: GLenum) -> NativeHandle {
    self
      .texture_bindings
      .get(&(self.texture_unit, target))
      .copied()
      .unwrap_or(0)
  }
}

unsafe impl State for Headless {
  unsafe fn get_error(&mut self) -> GLenum {
    self.pending_errors.pop_front().unwrap_or(gl::NO_ERROR)
  }

  unsafe fn get_integer(&mut self, pname: GLenum) -> GLint {
    let value = match pname {
      gl::ARRAY_BUFFER_BINDING => self.array_buffer,
      gl::ELEMENT_ARRAY_BUFFER_BINDING => self.element_buffer(self.vertex_array).unwrap_or(0),
      gl::VERTEX_ARRAY_BINDING => self.vertex_array,
      gl::ACTIVE_TEXTURE => gl::TEXTURE0 + self.texture_unit,
      gl::TEXTURE_BINDING_1D => self.texture_binding(gl::TEXTURE_1D),
      gl::TEXTURE_BINDING_2D => self.texture_binding(gl::TEXTURE_2D),
      gl::TEXTURE_BINDING_3D => self.texture_binding(gl::TEXTURE_3D),
      gl::RENDERBUFFER_BINDING => self.renderbuffer,
      gl::DRAW_FRAMEBUFFER_BINDING => self.draw_framebuffer,
      gl::READ_FRAMEBUFFER_BINDING => self.read_framebuffer,
      gl::CURRENT_PROGRAM => self.program,
      gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS | gl::MAX_TEXTURE_IMAGE_UNITS => MAX_TEXTURE_UNITS,
      gl::MAX_VERTEX_ATTRIBS => MAX_VERTEX_ATTRIBS,
      gl::MAX_COLOR_ATTACHMENTS | gl::MAX_DRAW_BUFFERS => MAX_COLOR_ATTACHMENTS,
      gl::MAJOR_VERSION | gl::MINOR_VERSION => 3,

      _ => {
        self.raise(gl::INVALID_ENUM);
        0
      }
    };

    value as GLint
  }
}
