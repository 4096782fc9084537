mod common;

use glue::backend::vertex_array::VertexArray as _;
use glue::buffer::{Buffer, Target, Usage};
use glue::framebuffer::{FrameBuffer, FramebufferTarget};
use glue::query::{Query, QueryTarget};
use glue::texture::Texture2D;
use glue::vertex_array::{Primitive, VertexArray};
use glue::{bind_guard, Bindable, Context, ContextOpt};
use glue_headless::Headless;

#[test]
fn default_options() {
  let opt = ContextOpt::default();

  assert_eq!(opt.check_native_errors(), cfg!(debug_assertions));
  assert_eq!(opt.warn_unbound(), cfg!(debug_assertions));
  assert_eq!(opt.max_texture_units(), None);
}

#[test]
fn bindings_are_read_back_at_creation() {
  let mut backend = Headless::new();

  let vao = unsafe {
    let vao = backend.gen_vertex_array();
    backend.bind_vertex_array(vao);
    vao
  };

  let ctx = Context::new(backend);

  assert_eq!(ctx.bound_vertex_array(), vao);
  assert_eq!(ctx.active_texture_unit(), 0);
  assert_eq!(ctx.current_program(), 0);
}

#[test]
fn bind_guard_releases_on_drop() {
  let mut ctx = common::context();
  let mut buffer = Buffer::new(&mut ctx, Target::Array);

  {
    let guard = bind_guard(&mut buffer);
    assert!(guard.is_bound());
  }

  assert!(!buffer.is_bound());
}

#[test]
fn mutations_through_a_bind_guard() {
  let mut ctx = common::context();
  let mut buffer = Buffer::new(&mut ctx, Target::Array);

  common::capture_logs();

  {
    let mut bound = bind_guard(&mut buffer);
    bound.set_data(Usage::StaticDraw, Some(&[1, 2, 3, 4][..]), 4);
    bound.set_sub_data(&[9], 2);
  }

  assert!(!buffer.is_bound());
  assert_eq!(buffer.size(), 4);
  assert_eq!(
    ctx.backend().buffer_content(buffer.handle()),
    Some(&[1, 2, 9, 4][..])
  );
  assert!(!common::warned("while it is not bound"));
  assert!(common::raised_errors(&ctx).is_empty());
}

#[test]
fn bind_guard_over_trait_objects() {
  let mut ctx = common::context();
  let mut fb = FrameBuffer::new(&mut ctx);
  let mut texture = Texture2D::new(&mut ctx);
  let fb_handle = fb.handle();

  {
    let guards = vec![
      bind_guard::<dyn Bindable>(&mut fb),
      bind_guard::<dyn Bindable>(&mut texture),
    ];

    assert!(guards.iter().all(|guard| guard.is_bound()));
    assert_eq!(ctx.bound_framebuffer(FramebufferTarget::Read), fb_handle);
  }

  assert!(!fb.is_bound());
  assert!(!texture.is_bound());
}

#[test]
fn element_buffer_slot_follows_the_vertex_array() {
  let mut ctx = common::context();
  let a = VertexArray::new(&mut ctx, true);
  let b = VertexArray::new(&mut ctx, true);
  let indices = Buffer::new(&mut ctx, Target::ElementArray);

  a.bind();
  indices.bind();

  assert!(indices.is_bound());

  b.bind();

  assert!(!indices.is_bound());

  a.bind();

  assert!(indices.is_bound());
}

#[test]
fn unbound_mutations_are_reported() {
  let mut ctx = common::context();
  let mut buffer = Buffer::new(&mut ctx, Target::Array);

  common::capture_logs();
  buffer.set_data(Usage::StaticDraw, None, 4);

  assert!(common::warned("set_data on buffer"));
}

#[test]
fn unbound_mutations_are_silent_when_disabled() {
  let opt = ContextOpt::default()
    .set_warn_unbound(false)
    .set_check_native_errors(false);
  let mut ctx = Context::with_opt(Headless::new(), opt);
  let mut buffer = Buffer::new(&mut ctx, Target::Array);

  common::capture_logs();
  buffer.set_data(Usage::StaticDraw, None, 4);

  assert!(common::logged(log::Level::Warn).is_empty());
}

#[test]
fn native_errors_are_logged() {
  let mut ctx = common::context();
  let vao = VertexArray::new(&mut ctx, true);

  common::capture_logs();

  // no vertex array bound
  vao.draw(Primitive::Points);

  assert!(common::warned("draw_arrays: invalid operation"));
  assert_eq!(common::raised_errors(&ctx), vec![gl::INVALID_OPERATION]);
}

#[test]
fn elapsed_time() {
  let mut ctx = common::context();
  let vao = VertexArray::new(&mut ctx, true);
  let query = Query::new(&mut ctx, QueryTarget::TimeElapsed);

  vao.bind();
  query.begin();
  vao.draw(Primitive::Triangles);
  query.end();

  assert_eq!(query.target(), QueryTarget::TimeElapsed);
  assert_eq!(query.retrieve(), 1000);
  assert_eq!(query.retrieve64(), 1000);
  assert!(common::raised_errors(&ctx).is_empty());
}

#[test]
fn every_handle_is_deleted() {
  let mut ctx = common::context();

  {
    let _buffer = Buffer::new(&mut ctx, Target::Array);
    let _vao = VertexArray::new(&mut ctx, false);
    let _texture = Texture2D::new(&mut ctx);
    let _fb = FrameBuffer::new(&mut ctx);
    let _query = Query::new(&mut ctx, QueryTarget::TimeElapsed);

    assert_eq!(ctx.backend().live_objects(), 5);
  }

  assert_eq!(ctx.backend().live_objects(), 0);
}
