//! # A thin, handle-owning layer over OpenGL
//!
//! glue wraps the imperative, global-state-machine OpenGL API into owned resource types: buffers,
//! vertex arrays, textures, renderbuffers, framebuffers, shader stages, programs and queries. Every
//! operation maps to a single driver call, with abstract enums translated into native constants
//! through the tables of the [`native`] module.
//!
//! # Binding model
//!
//! OpenGL operates on _bind slots_: a buffer is mutated through the slot of its target, a texture
//! through the slot of the active texture unit, a framebuffer through the draw or read slot, etc.
//! glue keeps that model but makes the slots explicit: a [`Context`] records which handle occupies
//! which slot, and every resource is created from a [`Context`] and tracks its own occupancy
//! through it. Mutating a resource while it is not bound is still accepted (OpenGL is permissive
//! about it) but is reported with a `warn` log when [`ContextOpt::warn_unbound`] is set.
//!
//! # Lifetimes
//!
//! Each resource owns exactly one native handle, created in its constructor and deleted when the
//! resource is dropped. Resizing or reallocating storage changes content, never identity.
//!
//! [`Program`](shader::Program) shares ownership of its [`Stage`](shader::Stage)s through
//! [`Rc`](std::rc::Rc). [`VertexArray`](vertex_array::VertexArray) on the other hand only records
//! the vertex and index counts of the buffers it is given: those buffers must outlive it.
//!
//! # Backends
//!
//! The driver surface is described by the traits of the [`backend`] module. Two implementations
//! exist in separate crates: `glue-gl`, the OpenGL 3.3 implementation, and `glue-headless`, a
//! software implementation mirroring driver objects in host memory.
//!
//! # Feature flags
//!
//! - `png` (default): [`Texture2D::from_png`](texture::Texture::from_png) and the [`decode`]
//!   module, built on top of the `image` crate.
//! - `cgmath` (default): vertex attribute and uniform implementations for `cgmath` types.

#![deny(missing_docs)]

#[macro_use]
mod macros;

pub mod backend;
pub mod bind;
pub mod buffer;
pub mod context;
#[cfg(feature = "png")]
pub mod decode;
pub mod framebuffer;
pub mod index_buffer;
pub mod native;
pub mod pixel;
pub mod query;
pub mod renderbuffer;
pub mod shader;
pub(crate) mod state;
pub mod texture;
pub mod vertex;
pub mod vertex_array;
pub mod vertex_buffer;

pub use crate::backend::NativeHandle;
pub use crate::bind::{bind_guard, BindGuard, Bindable};
pub use crate::context::{Context, ContextOpt};
