//! Graphics context.
//!
//! A [`Context`] owns a backend and the table of binding slots. Every resource is created from a
//! context and keeps a shared reference to it, so that it can issue its own driver calls and
//! delete its native object when dropped. Contexts are neither [`Send`] nor [`Sync`]: every call
//! must originate from the thread owning the native context.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::backend::{Backend, NativeHandle};
use crate::framebuffer::FramebufferTarget;
use crate::state::State;

/// Context options.
///
/// Feel free to look at the different methods available to tweak the options. You may want to
/// start with `default()` though.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ContextOpt {
  check_native_errors: bool,
  warn_unbound: bool,
  max_texture_units: Option<u32>,
}

impl Default for ContextOpt {
  /// Defaults:
  ///
  /// - `check_native_errors` set to `true` in debug builds, `false` otherwise.
  /// - `warn_unbound` set to `true` in debug builds, `false` otherwise.
  /// - `max_texture_units` set to `None`.
  fn default() -> Self {
    ContextOpt {
      check_native_errors: cfg!(debug_assertions),
      warn_unbound: cfg!(debug_assertions),
      max_texture_units: None,
    }
  }
}

impl ContextOpt {
  /// Check the native error flag after every driver call and log what is found.
  #[inline]
  pub fn set_check_native_errors(self, check_native_errors: bool) -> Self {
    ContextOpt {
      check_native_errors,
      ..self
    }
  }

  /// Whether the native error flag is checked after every driver call.
  #[inline]
  pub fn check_native_errors(&self) -> bool {
    self.check_native_errors
  }

  /// Warn when a resource is mutated while not bound, and when a depth image is attached to a
  /// color slot (or the other way around).
  #[inline]
  pub fn set_warn_unbound(self, warn_unbound: bool) -> Self {
    ContextOpt {
      warn_unbound,
      ..self
    }
  }

  /// Whether binding discipline violations are reported.
  #[inline]
  pub fn warn_unbound(&self) -> bool {
    self.warn_unbound
  }

  /// Limit the texture units a texture can be bound to.
  ///
  /// Binding to a unit past the limit panics. With `None`, the limit is the driver’s
  /// `MAX_COMBINED_TEXTURE_IMAGE_UNITS`, read when the context is created.
  #[inline]
  pub fn set_max_texture_units<U>(self, units: U) -> Self
  where
    U: Into<Option<u32>>,
  {
    ContextOpt {
      max_texture_units: units.into(),
      ..self
    }
  }

  /// Texture unit limit, if any.
  #[inline]
  pub fn max_texture_units(&self) -> Option<u32> {
    self.max_texture_units
  }
}

/// Graphics context.
pub struct Context<B> {
  pub(crate) state: Rc<RefCell<State<B>>>,
}

impl<B> Context<B>
where
  B: Backend,
{
  /// Create a context with the default options.
  ///
  /// The binding slots are read back from the backend, so any object bound before this call is
  /// taken into account.
  pub fn new(backend: B) -> Self {
    Self::with_opt(backend, ContextOpt::default())
  }

  /// Create a context with explicit options.
  pub fn with_opt(backend: B, opt: ContextOpt) -> Self {
    let state = Rc::new(RefCell::new(State::new(backend, opt)));
    Context { state }
  }

  /// Options the context was created with.
  pub fn opt(&self) -> ContextOpt {
    self.state.borrow().opt
  }

  /// Access the backend.
  ///
  /// The returned guard must be dropped before using any resource of this context again.
  pub fn backend(&self) -> Ref<B> {
    Ref::map(self.state.borrow(), |state| &state.backend)
  }

  /// Read the binding slots back from the backend.
  ///
  /// Call this after having issued raw driver calls that changed bindings behind glue’s back.
  pub fn resync_bindings(&mut self) {
    self.state.borrow_mut().resync_bindings();
  }

  /// Number of texture units textures can be bound to, `None` if unknown.
  pub fn max_texture_units(&self) -> Option<u32> {
    self.state.borrow().max_texture_units()
  }

  /// Currently active texture unit.
  pub fn active_texture_unit(&self) -> u32 {
    self.state.borrow().texture_unit()
  }

  /// Handle of the current program, `0` if none.
  pub fn current_program(&self) -> NativeHandle {
    self.state.borrow().program_binding()
  }

  /// Handle of the bound vertex array, `0` if none.
  pub fn bound_vertex_array(&self) -> NativeHandle {
    self.state.borrow().vertex_array_binding()
  }

  /// Handle of the framebuffer bound to `target`, `0` for the default framebuffer.
  pub fn bound_framebuffer(&self, target: FramebufferTarget) -> NativeHandle {
    self.state.borrow().framebuffer_binding(target)
  }
}

impl<B> fmt::Debug for Context<B> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Context").finish()
  }
}
