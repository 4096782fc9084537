//! OpenGL backends for [glue](https://crates.io/crates/glue).
//!
//! The only backend so far is [`GL33`], which drives a current OpenGL 3.3 core context through
//! the [gl](https://crates.io/crates/gl) bindings. The function pointers must have been loaded
//! (`gl::load_with`) before a [`GL33`] is created.

pub mod gl33;

pub use gl33::GL33;
