//! Shader stages.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::backend::{Backend, NativeHandle};
use crate::context::Context;
use crate::native::stage_type_to_glenum;
use crate::shader::{StageError, StageType};
use crate::state::State;

/// A shader stage.
///
/// The stage is created uncompiled. Its compilation status is queried from the driver each time
/// it is needed; it is never cached.
pub struct Stage<B>
where
  B: Backend,
{
  handle: NativeHandle,
  ty: StageType,
  source: String,
  state: Rc<RefCell<State<B>>>,
}

impl<B> Stage<B>
where
  B: Backend,
{
  /// Create a new stage holding `source`, without compiling it.
  pub fn new<S>(ctx: &mut Context<B>, ty: StageType, source: S) -> Self
  where
    S: Into<String>,
  {
    let source = source.into();
    let handle = {
      let mut state = ctx.state.borrow_mut();
      let handle = native!(state, create_shader(stage_type_to_glenum(ty)));
      native!(state, shader_source(handle, &source));
      handle
    };

    Stage {
      handle,
      ty,
      source,
      state: ctx.state.clone(),
    }
  }

  /// Create a new vertex stage.
  pub fn vertex<S>(ctx: &mut Context<B>, source: S) -> Self
  where
    S: Into<String>,
  {
    Self::new(ctx, StageType::VertexShader, source)
  }

  /// Create a new geometry stage.
  pub fn geometry<S>(ctx: &mut Context<B>, source: S) -> Self
  where
    S: Into<String>,
  {
    Self::new(ctx, StageType::GeometryShader, source)
  }

  /// Create a new fragment stage.
  pub fn fragment<S>(ctx: &mut Context<B>, source: S) -> Self
  where
    S: Into<String>,
  {
    Self::new(ctx, StageType::FragmentShader, source)
  }

  /// Native handle.
  pub fn handle(&self) -> NativeHandle {
    self.handle
  }

  /// Type of the stage.
  pub fn stage_type(&self) -> StageType {
    self.ty
  }

  /// Source of the stage.
  pub fn source(&self) -> &str {
    &self.source
  }

  /// Replace the source. The stage has to be compiled again.
  pub fn set_source<S>(&mut self, source: S)
  where
    S: Into<String>,
  {
    self.source = source.into();
    native!(
      self.state.borrow_mut(),
      shader_source(self.handle, &self.source)
    );
  }

  /// Compile the source of the stage.
  ///
  /// The stored source is submitted again at each call.
  pub fn compile(&self) -> Result<(), StageError> {
    {
      let mut state = self.state.borrow_mut();
      native!(state, shader_source(self.handle, &self.source));
      native!(state, compile_shader(self.handle));
    }

    let log = self.compile_log();

    if self.is_valid() {
      if !log.is_empty() {
        log::info!("{} {} compiled: {}", self.ty, self.handle, log);
      }

      Ok(())
    } else {
      Err(StageError::CompilationFailed(self.ty, log))
    }
  }

  /// Log of the last compilation.
  pub fn compile_log(&self) -> String {
    native!(self.state.borrow_mut(), shader_info_log(self.handle))
  }

  /// Whether the last compilation succeeded.
  pub fn is_valid(&self) -> bool {
    let status = native!(
      self.state.borrow_mut(),
      shader_parameter(self.handle, gl::COMPILE_STATUS)
    );

    status == gl::TRUE as i32
  }
}

impl<B> Drop for Stage<B>
where
  B: Backend,
{
  fn drop(&mut self) {
    native!(self.state.borrow_mut(), delete_shader(self.handle));
  }
}

impl<B> fmt::Debug for Stage<B>
where
  B: Backend,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Stage")
      .field("handle", &self.handle)
      .field("ty", &self.ty)
      .finish()
  }
}
