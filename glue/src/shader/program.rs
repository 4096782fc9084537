//! Shader programs.

use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use crate::backend::{Backend, NativeHandle};
use crate::bind::Bindable;
use crate::context::Context;
use crate::shader::uniform::Uniformable;
use crate::shader::{ProgramError, Stage, StageError, StageType};
use crate::state::State;

/// A shader program.
///
/// The program keeps its stages alive. It is linked as soon as it is built; whether that succeeded
/// is told by [`Program::is_linked`] and [`Program::link_log`].
pub struct Program<B>
where
  B: Backend,
{
  handle: NativeHandle,
  vertex: Rc<Stage<B>>,
  geometry: Option<Rc<Stage<B>>>,
  fragment: Rc<Stage<B>>,
  state: Rc<RefCell<State<B>>>,
}

impl<B> Program<B>
where
  B: Backend,
{
  /// Build a program from stages.
  ///
  /// Stages that are not compiled yet get compiled; the first compilation failure is returned.
  /// The stages are then attached and the program is linked.
  ///
  /// # Panics
  ///
  /// Panics if a stage is given at the place of another type of stage.
  pub fn from_stages(
    ctx: &mut Context<B>,
    vertex: Rc<Stage<B>>,
    geometry: Option<Rc<Stage<B>>>,
    fragment: Rc<Stage<B>>,
  ) -> Result<Self, StageError> {
    assert_stage_type(&vertex, StageType::VertexShader);
    assert_stage_type(&fragment, StageType::FragmentShader);

    if let Some(ref geometry) = geometry {
      assert_stage_type(geometry, StageType::GeometryShader);
    }

    let stages = Some(&vertex).into_iter().chain(geometry.as_ref()).chain(Some(&fragment));

    for stage in stages.clone() {
      if !stage.is_valid() {
        stage.compile()?;
      }
    }

    let handle = {
      let mut state = ctx.state.borrow_mut();
      let handle = native!(state, create_program());

      for stage in stages {
        native!(state, attach_shader(handle, stage.handle()));
      }

      handle
    };

    let program = Program {
      handle,
      vertex,
      geometry,
      fragment,
      state: ctx.state.clone(),
    };

    program.link();

    Ok(program)
  }

  /// Build a program from stage sources.
  pub fn from_sources(
    ctx: &mut Context<B>,
    vertex: &str,
    geometry: Option<&str>,
    fragment: &str,
  ) -> Result<Self, StageError> {
    let vertex = Rc::new(Stage::vertex(ctx, vertex));
    let geometry = geometry.map(|source| Rc::new(Stage::geometry(ctx, source)));
    let fragment = Rc::new(Stage::fragment(ctx, fragment));

    Self::from_stages(ctx, vertex, geometry, fragment)
  }

  /// Build a program from stage source files.
  pub fn from_files<V, F>(
    ctx: &mut Context<B>,
    vertex: V,
    geometry: Option<&Path>,
    fragment: F,
  ) -> Result<Self, ProgramError>
  where
    V: AsRef<Path>,
    F: AsRef<Path>,
  {
    let vertex = read_source(vertex.as_ref())?;
    let geometry = geometry.map(read_source).transpose()?;
    let fragment = read_source(fragment.as_ref())?;

    Ok(Self::from_sources(
      ctx,
      &vertex,
      geometry.as_deref(),
      &fragment,
    )?)
  }

  /// Native handle.
  pub fn handle(&self) -> NativeHandle {
    self.handle
  }

  /// Vertex stage.
  pub fn vertex_stage(&self) -> &Rc<Stage<B>> {
    &self.vertex
  }

  /// Geometry stage, if any.
  pub fn geometry_stage(&self) -> Option<&Rc<Stage<B>>> {
    self.geometry.as_ref()
  }

  /// Fragment stage.
  pub fn fragment_stage(&self) -> &Rc<Stage<B>> {
    &self.fragment
  }

  /// Link the program and tell whether it succeeded.
  ///
  /// Needed again after [`Program::set_frag_data_location`].
  pub fn link(&self) -> bool {
    native!(self.state.borrow_mut(), link_program(self.handle));

    let linked = self.is_linked();
    let log = self.link_log();

    if !linked {
      log::warn!("program {} failed to link: {}", self.handle, log);
    } else if !log.is_empty() {
      log::info!("program {} linked: {}", self.handle, log);
    }

    linked
  }

  /// Log of the last link.
  pub fn link_log(&self) -> String {
    native!(self.state.borrow_mut(), program_info_log(self.handle))
  }

  /// Whether the last link succeeded.
  pub fn is_linked(&self) -> bool {
    let status = native!(
      self.state.borrow_mut(),
      program_parameter(self.handle, gl::LINK_STATUS)
    );

    status == gl::TRUE as i32
  }

  /// Make the program current.
  pub fn activate(&self) {
    self.state.borrow_mut().use_program(self.handle);
  }

  /// Make no program current.
  pub fn deactivate(&self) {
    self.state.borrow_mut().use_program(0);
  }

  /// Whether the program is current.
  pub fn is_active(&self) -> bool {
    self.state.borrow().program_binding() == self.handle
  }

  /// Bind the fragment output `name` to color number `color`. Takes effect at the next link.
  pub fn set_frag_data_location(&mut self, name: &str, color: u32) {
    native!(
      self.state.borrow_mut(),
      bind_frag_data_location(self.handle, color, name)
    );
  }

  /// Location of the vertex input `name`; negative when there is no such input.
  pub fn attribute_location(&self, name: &str) -> i32 {
    native!(self.state.borrow_mut(), attrib_location(self.handle, name))
  }

  /// Location of the uniform `name`; negative when there is no such uniform.
  pub fn uniform_location(&self, name: &str) -> i32 {
    native!(self.state.borrow_mut(), uniform_location(self.handle, name))
  }

  /// Set the uniform `name`. The program must be active.
  ///
  /// The location is resolved at each call. When `name` does not resolve, nothing is written.
  pub fn set_uniform<T>(&self, name: &str, value: T)
  where
    T: Uniformable,
  {
    let location = self.uniform_location(name);

    if location < 0 {
      log::debug!("uniform {} not found in program {}", name, self.handle);
      return;
    }

    let mut state = self.state.borrow_mut();

    if state.warn_unbound() && state.program_binding() != self.handle {
      log::warn!(
        "setting uniform {} of program {} while it is not active",
        name,
        self.handle
      );
    }

    let value = value.into_uniform();
    native!(state, uniform(location, &value));
  }
}

fn assert_stage_type<B>(stage: &Stage<B>, expected: StageType)
where
  B: Backend,
{
  assert!(
    stage.stage_type() == expected,
    "{} given where a {} is expected",
    stage.stage_type(),
    expected
  );
}

fn read_source(path: &Path) -> Result<String, ProgramError> {
  fs::read_to_string(path).map_err(|e| ProgramError::FileNotFound(path.to_owned(), e))
}

impl<B> Drop for Program<B>
where
  B: Backend,
{
  fn drop(&mut self) {
    // a current program stays current until another one is used
    native!(self.state.borrow_mut(), delete_program(self.handle));
  }
}

impl<B> Bindable for Program<B>
where
  B: Backend,
{
  fn bind(&self) {
    self.activate();
  }

  fn release(&self) {
    self.deactivate();
  }

  fn is_bound(&self) -> bool {
    self.is_active()
  }
}

impl<B> fmt::Debug for Program<B>
where
  B: Backend,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Program")
      .field("handle", &self.handle)
      .field("vertex", &self.vertex)
      .field("geometry", &self.geometry)
      .field("fragment", &self.fragment)
      .finish()
  }
}
