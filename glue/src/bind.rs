//! Scoped binding.

use std::ops::{Deref, DerefMut};

/// Objects occupying a binding slot.
///
/// Resources with several slots (texture units, framebuffer targets) bind to their default slot
/// through this trait: the active texture unit, and both framebuffer targets.
pub trait Bindable {
  /// Write this object into its slot.
  fn bind(&self);

  /// Write the default object (`0`) into the slot.
  fn release(&self);

  /// Whether the slot currently holds this object.
  fn is_bound(&self) -> bool;
}

/// Keep an object bound for as long as the guard lives.
///
/// The guard dereferences to the object, so that it can be mutated while bound. The object is
/// released when the guard is dropped, whatever was bound before it.
#[derive(Debug)]
pub struct BindGuard<'a, T>
where
  T: Bindable + ?Sized,
{
  object: &'a mut T,
}

impl<'a, T> BindGuard<'a, T>
where
  T: Bindable + ?Sized,
{
  /// Bind `object` and return the guard releasing it.
  pub fn new(object: &'a mut T) -> Self {
    object.bind();
    BindGuard { object }
  }
}

impl<'a, T> Deref for BindGuard<'a, T>
where
  T: Bindable + ?Sized,
{
  type Target = T;

  fn deref(&self) -> &T {
    self.object
  }
}

impl<'a, T> DerefMut for BindGuard<'a, T>
where
  T: Bindable + ?Sized,
{
  fn deref_mut(&mut self) -> &mut T {
    self.object
  }
}

impl<'a, T> Drop for BindGuard<'a, T>
where
  T: Bindable + ?Sized,
{
  fn drop(&mut self) {
    self.object.release();
  }
}

/// Bind an object until the returned guard goes out of scope.
pub fn bind_guard<T>(object: &mut T) -> BindGuard<T>
where
  T: Bindable + ?Sized,
{
  BindGuard::new(object)
}
