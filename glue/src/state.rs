//! Binding-slot tracking.

use gl::types::*;
use std::collections::HashMap;

use crate::backend::{Backend, NativeHandle};
use crate::buffer::Target;
use crate::context::ContextOpt;
use crate::framebuffer::FramebufferTarget;
use crate::native::{
  buffer_target_to_glenum, framebuffer_target_to_glenum, texture_binding_to_glenum,
  texture_type_to_glenum, NativeError,
};
use crate::texture::TextureType;

/// Occupancy of every binding slot glue knows about.
#[derive(Debug, Default)]
pub(crate) struct Bindings {
  array_buffer: NativeHandle,

  // the element array slot belongs to the bound vertex array; 0 is the default vertex array
  element_array_buffers: HashMap<NativeHandle, NativeHandle>,

  vertex_array: NativeHandle,

  // 0-based
  texture_unit: u32,

  // per unit, indexed by texture_index()
  textures: Vec<[NativeHandle; 3]>,

  renderbuffer: NativeHandle,

  draw_framebuffer: NativeHandle,
  read_framebuffer: NativeHandle,

  program: NativeHandle,
}

const MAX_PENDING_ERRORS: usize = 8;

// in texture_index() order
const TEXTURE_TYPES: [TextureType; 3] = [
  TextureType::Texture1D,
  TextureType::Texture2D,
  TextureType::Texture3D,
];

fn texture_index(ty: TextureType) -> usize {
  match ty {
    TextureType::Texture1D => 0,
    TextureType::Texture2D => 1,
    TextureType::Texture3D => 2,
  }
}

/// State shared between a [`Context`](crate::Context) and every resource created from it.
pub(crate) struct State<B> {
  pub(crate) backend: B,
  pub(crate) opt: ContextOpt,
  bindings: Bindings,
  // from the options, or the driver when they leave it out
  max_texture_units: Option<u32>,
}

impl<B> State<B>
where
  B: Backend,
{
  pub(crate) fn new(backend: B, opt: ContextOpt) -> Self {
    let mut state = State {
      backend,
      opt,
      bindings: Bindings::default(),
      max_texture_units: opt.max_texture_units(),
    };

    if state.max_texture_units.is_none() {
      let queried = unsafe {
        state
          .backend
          .get_integer(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS)
      };
      state.max_texture_units = u32::try_from(queried).ok().filter(|&units| units > 0);
    }

    state.resync_bindings();
    state
  }

  /// Read the current binding slots back from the driver.
  ///
  /// Only the active texture unit is queried; every other unit is assumed empty.
  pub(crate) fn resync_bindings(&mut self) {
    let get =
      |backend: &mut B, pname: GLenum| unsafe { backend.get_integer(pname) } as NativeHandle;
    let backend = &mut self.backend;

    let vertex_array = get(backend, gl::VERTEX_ARRAY_BINDING);
    let mut element_array_buffers = HashMap::new();
    element_array_buffers.insert(vertex_array, get(backend, gl::ELEMENT_ARRAY_BUFFER_BINDING));

    let texture_unit = get(backend, gl::ACTIVE_TEXTURE).saturating_sub(gl::TEXTURE0);
    let mut textures = vec![[0; 3]; texture_unit as usize + 1];
    textures[texture_unit as usize] =
      TEXTURE_TYPES.map(|ty| get(backend, texture_binding_to_glenum(ty)));

    self.bindings = Bindings {
      array_buffer: get(backend, gl::ARRAY_BUFFER_BINDING),
      element_array_buffers,
      vertex_array,
      texture_unit,
      textures,
      renderbuffer: get(backend, gl::RENDERBUFFER_BINDING),
      draw_framebuffer: get(backend, gl::DRAW_FRAMEBUFFER_BINDING),
      read_framebuffer: get(backend, gl::READ_FRAMEBUFFER_BINDING),
      program: get(backend, gl::CURRENT_PROGRAM),
    };
  }

  pub(crate) fn check_native_error(&mut self, file: &str, line: u32, call: &str) {
    if !self.opt.check_native_errors() {
      return;
    }

    // the driver may have queued several flags; a lost context reports one forever
    for _ in 0..MAX_PENDING_ERRORS {
      let code = unsafe { self.backend.get_error() };

      match NativeError::from_code(code) {
        Some(err) => log::warn!("{}:{}: {}: {}", file, line, call, err),
        None => break,
      }
    }
  }

  pub(crate) fn warn_unbound(&self) -> bool {
    self.opt.warn_unbound()
  }

  pub(crate) fn bind_buffer(&mut self, target: Target, handle: NativeHandle) {
    native!(self, bind_buffer(buffer_target_to_glenum(target), handle));

    match target {
      Target::Array => self.bindings.array_buffer = handle,
      Target::ElementArray => {
        let vao = self.bindings.vertex_array;
        self.bindings.element_array_buffers.insert(vao, handle);
      }
    }
  }

  pub(crate) fn buffer_binding(&self, target: Target) -> NativeHandle {
    match target {
      Target::Array => self.bindings.array_buffer,
      Target::ElementArray => self
        .bindings
        .element_array_buffers
        .get(&self.bindings.vertex_array)
        .copied()
        .unwrap_or(0),
    }
  }

  pub(crate) fn forget_buffer(&mut self, handle: NativeHandle) {
    if self.bindings.array_buffer == handle {
      self.bindings.array_buffer = 0;
    }

    let vao = self.bindings.vertex_array;
    if let Some(element) = self.bindings.element_array_buffers.get_mut(&vao) {
      if *element == handle {
        *element = 0;
      }
    }
  }

  pub(crate) fn bind_vertex_array(&mut self, handle: NativeHandle) {
    native!(self, bind_vertex_array(handle));
    self.bindings.vertex_array = handle;
  }

  pub(crate) fn vertex_array_binding(&self) -> NativeHandle {
    self.bindings.vertex_array
  }

  pub(crate) fn forget_vertex_array(&mut self, handle: NativeHandle) {
    if self.bindings.vertex_array == handle {
      self.bindings.vertex_array = 0;
    }

    self.bindings.element_array_buffers.remove(&handle);
  }

  pub(crate) fn active_texture(&mut self, unit: u32) {
    if let Some(max) = self.max_texture_units {
      assert!(
        unit < max,
        "texture unit {} out of range (max texture units: {})",
        unit,
        max
      );
    }

    native!(self, active_texture(unit));
    self.bindings.texture_unit = unit;
  }

  pub(crate) fn max_texture_units(&self) -> Option<u32> {
    self.max_texture_units
  }

  pub(crate) fn texture_unit(&self) -> u32 {
    self.bindings.texture_unit
  }

  pub(crate) fn bind_texture(&mut self, ty: TextureType, handle: NativeHandle) {
    native!(self, bind_texture(texture_type_to_glenum(ty), handle));

    let unit = self.bindings.texture_unit as usize;
    if self.bindings.textures.len() <= unit {
      self.bindings.textures.resize(unit + 1, [0; 3]);
    }

    self.bindings.textures[unit][texture_index(ty)] = handle;
  }

  pub(crate) fn texture_binding(&self, ty: TextureType) -> NativeHandle {
    self
      .bindings
      .textures
      .get(self.bindings.texture_unit as usize)
      .map(|unit| unit[texture_index(ty)])
      .unwrap_or(0)
  }

  pub(crate) fn forget_texture(&mut self, handle: NativeHandle) {
    for unit in &mut self.bindings.textures {
      for bound in unit.iter_mut().filter(|bound| **bound == handle) {
        *bound = 0;
      }
    }
  }

  pub(crate) fn bind_renderbuffer(&mut self, handle: NativeHandle) {
    native!(self, bind_renderbuffer(handle));
    self.bindings.renderbuffer = handle;
  }

  pub(crate) fn renderbuffer_binding(&self) -> NativeHandle {
    self.bindings.renderbuffer
  }

  pub(crate) fn forget_renderbuffer(&mut self, handle: NativeHandle) {
    if self.bindings.renderbuffer == handle {
      self.bindings.renderbuffer = 0;
    }
  }

  pub(crate) fn bind_framebuffer(&mut self, target: FramebufferTarget, handle: NativeHandle) {
    native!(
      self,
      bind_framebuffer(framebuffer_target_to_glenum(target), handle)
    );

    match target {
      FramebufferTarget::Read => self.bindings.read_framebuffer = handle,
      FramebufferTarget::Draw => self.bindings.draw_framebuffer = handle,
      FramebufferTarget::DrawRead => {
        self.bindings.read_framebuffer = handle;
        self.bindings.draw_framebuffer = handle;
      }
    }
  }

  pub(crate) fn framebuffer_binding(&self, target: FramebufferTarget) -> NativeHandle {
    match target {
      FramebufferTarget::Read => self.bindings.read_framebuffer,
      // FRAMEBUFFER queries resolve to the draw binding
      FramebufferTarget::Draw | FramebufferTarget::DrawRead => self.bindings.draw_framebuffer,
    }
  }

  pub(crate) fn forget_framebuffer(&mut self, handle: NativeHandle) {
    if self.bindings.read_framebuffer == handle {
      self.bindings.read_framebuffer = 0;
    }

    if self.bindings.draw_framebuffer == handle {
      self.bindings.draw_framebuffer = 0;
    }
  }

  pub(crate) fn use_program(&mut self, handle: NativeHandle) {
    native!(self, use_program(handle));
    self.bindings.program = handle;
  }

  pub(crate) fn program_binding(&self) -> NativeHandle {
    self.bindings.program
  }
}
