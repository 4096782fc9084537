mod common;

use glue::framebuffer::{Attachment, FrameBuffer, FramebufferTarget};
use glue::pixel::InternalFormat;
use glue::renderbuffer::RenderBuffer;
use glue::texture::{Texture1D, Texture2D};
use glue_headless::AttachedImage;

#[test]
fn color_and_depth_targets_are_complete() {
  let mut ctx = common::context();
  let mut fb = FrameBuffer::new(&mut ctx);
  let mut color = Texture2D::new(&mut ctx);
  let mut depth = RenderBuffer::new(&mut ctx);

  color.bind(None);
  color.resize(InternalFormat::RGBA8, [256, 256]);
  depth.bind();
  depth.resize(InternalFormat::DepthComponent24, [256, 256]);

  fb.bind(FramebufferTarget::DrawRead);
  fb.attach(&color, Attachment::Color0);
  fb.attach(&depth, Attachment::Depth);
  fb.assign_draw_buffers();

  assert!(fb.is_complete(FramebufferTarget::DrawRead));
  assert_eq!(fb.draw_buffers(), &[gl::COLOR_ATTACHMENT0]);
  assert!(common::raised_errors(&ctx).is_empty());
}

#[test]
fn draw_buffers_mirror_color_slots() {
  let mut ctx = common::context();
  let mut fb = FrameBuffer::new(&mut ctx);
  let mut a = Texture2D::new(&mut ctx);
  let mut b = Texture2D::new(&mut ctx);

  a.bind(None);
  a.resize(InternalFormat::RGBA8, [4, 4]);
  b.bind(None);
  b.resize(InternalFormat::R32F, [4, 4]);

  fb.bind(FramebufferTarget::DrawRead);
  fb.attach(&a, Attachment::Color3);
  fb.attach(&b, Attachment::Color1);

  assert_eq!(
    fb.draw_buffers(),
    &[
      gl::NONE,
      gl::COLOR_ATTACHMENT1,
      gl::NONE,
      gl::COLOR_ATTACHMENT3
    ]
  );

  fb.assign_draw_buffers();

  assert_eq!(
    ctx.backend().framebuffer_draw_buffers(fb.handle()),
    Some(fb.draw_buffers())
  );
  assert!(fb.is_complete(FramebufferTarget::Draw));

  fb.detach(Attachment::Color3);

  assert_eq!(fb.draw_buffers(), &[gl::NONE, gl::COLOR_ATTACHMENT1]);
  assert_eq!(
    ctx
      .backend()
      .framebuffer_attachment(fb.handle(), gl::COLOR_ATTACHMENT3),
    None
  );

  // the driver still draws to the detached slot until told otherwise
  assert!(!fb.is_complete(FramebufferTarget::Draw));

  fb.assign_draw_buffers();

  assert!(fb.is_complete(FramebufferTarget::Draw));
}

#[test]
fn detaching_depth_keeps_color_slots() {
  let mut ctx = common::context();
  let mut fb = FrameBuffer::new(&mut ctx);
  let mut color = Texture2D::new(&mut ctx);
  let mut depth = RenderBuffer::new(&mut ctx);

  color.bind(None);
  color.resize(InternalFormat::RGBA8, [4, 4]);
  depth.bind();
  depth.resize(InternalFormat::DepthComponent16, [4, 4]);

  fb.bind(FramebufferTarget::DrawRead);
  fb.attach(&color, Attachment::Color0);
  fb.attach(&depth, Attachment::Depth);
  fb.detach(Attachment::Depth);

  let backend = ctx.backend();

  assert_eq!(fb.draw_buffers(), &[gl::COLOR_ATTACHMENT0]);
  assert_eq!(backend.framebuffer_attachment(fb.handle(), gl::DEPTH_ATTACHMENT), None);
  assert_eq!(
    backend.framebuffer_attachment(fb.handle(), gl::COLOR_ATTACHMENT0),
    Some(AttachedImage::Texture {
      target: gl::TEXTURE_2D,
      handle: color.handle(),
      level: 0
    })
  );
}

#[test]
fn one_dimensional_attachments() {
  let mut ctx = common::context();
  let mut fb = FrameBuffer::new(&mut ctx);
  let mut line = Texture1D::new(&mut ctx);

  line.bind(None);
  line.resize(InternalFormat::RGBA8, 32);

  fb.bind(FramebufferTarget::DrawRead);
  fb.attach(&line, Attachment::Color0);

  assert_eq!(
    ctx
      .backend()
      .framebuffer_attachment(fb.handle(), gl::COLOR_ATTACHMENT0),
    Some(AttachedImage::Texture {
      target: gl::TEXTURE_1D,
      handle: line.handle(),
      level: 0
    })
  );
  assert!(fb.is_complete(FramebufferTarget::DrawRead));
}

#[test]
fn empty_framebuffer_is_incomplete() {
  let mut ctx = common::context();
  let fb = FrameBuffer::new(&mut ctx);

  common::capture_logs();
  fb.bind(FramebufferTarget::DrawRead);

  assert!(!fb.is_complete(FramebufferTarget::DrawRead));
  assert!(common::logged(log::Level::Debug)
    .iter()
    .any(|line| line.contains("incomplete")));
}

#[test]
fn depth_image_in_a_color_slot() {
  let mut ctx = common::context();
  let mut fb = FrameBuffer::new(&mut ctx);
  let mut depth = Texture2D::new(&mut ctx);

  depth.bind(None);
  depth.resize(InternalFormat::DepthComponent24, [4, 4]);

  common::capture_logs();
  fb.bind(FramebufferTarget::DrawRead);
  fb.attach(&depth, Attachment::Color0);

  assert!(common::warned("attaching a depth image"));
  assert!(!fb.is_complete(FramebufferTarget::DrawRead));
}

#[test]
fn separate_draw_and_read_bindings() {
  let mut ctx = common::context();
  let draw = FrameBuffer::new(&mut ctx);
  let read = FrameBuffer::new(&mut ctx);

  draw.bind(FramebufferTarget::Draw);
  read.bind(FramebufferTarget::Read);

  assert_eq!(ctx.bound_framebuffer(FramebufferTarget::Draw), draw.handle());
  assert_eq!(ctx.bound_framebuffer(FramebufferTarget::Read), read.handle());
  assert!(draw.is_bound());
  assert!(read.is_bound());

  read.release(FramebufferTarget::DrawRead);

  assert!(!draw.is_bound());
  assert!(!read.is_bound());
}

#[test]
fn dropping_a_bound_framebuffer() {
  let mut ctx = common::context();

  {
    let fb = FrameBuffer::new(&mut ctx);
    fb.bind(FramebufferTarget::DrawRead);
  }

  assert_eq!(ctx.bound_framebuffer(FramebufferTarget::DrawRead), 0);
  assert_eq!(ctx.backend().live_objects(), 0);
}

#[test]
fn unbound_framebuffer_operations_warn() {
  let mut ctx = common::context();
  let mut fb = FrameBuffer::new(&mut ctx);
  let mut color = Texture2D::new(&mut ctx);

  color.bind(None);
  color.resize(InternalFormat::RGBA8, [4, 4]);

  common::capture_logs();
  fb.attach(&color, Attachment::Color0);
  fb.detach(Attachment::Color0);
  fb.assign_draw_buffers();
  fb.is_complete(FramebufferTarget::Draw);

  for op in ["attach", "detach", "assign_draw_buffers", "is_complete"] {
    let line = format!("{} on framebuffer {} while it is not bound", op, fb.handle());
    assert!(common::warned(&line), "no warning for {}", op);
  }

  fb.bind(FramebufferTarget::DrawRead);
  common::capture_logs();
  fb.attach(&color, Attachment::Color0);
  fb.assign_draw_buffers();

  assert!(fb.is_complete(FramebufferTarget::Draw));
  assert!(!common::warned("while it is not bound"));
}

#[test]
fn color_image_in_the_depth_slot() {
  let mut ctx = common::context();
  let mut fb = FrameBuffer::new(&mut ctx);
  let mut color = RenderBuffer::new(&mut ctx);

  color.bind();
  color.resize(InternalFormat::RGBA8, [4, 4]);

  common::capture_logs();
  fb.bind(FramebufferTarget::DrawRead);
  fb.attach(&color, Attachment::Depth);

  assert!(common::warned("attaching a non-depth image to Depth"));
  assert!(!common::warned("attaching a depth image"));
  assert!(!fb.is_complete(FramebufferTarget::DrawRead));
}

#[test]
fn attachment_warnings_can_be_disabled() {
  let opt = glue::ContextOpt::default().set_warn_unbound(false);
  let mut ctx = glue::Context::with_opt(glue_headless::Headless::new(), opt);
  let mut fb = FrameBuffer::new(&mut ctx);
  let mut depth = Texture2D::new(&mut ctx);

  depth.bind(None);
  depth.resize(InternalFormat::DepthComponent24, [4, 4]);

  common::capture_logs();
  fb.attach(&depth, Attachment::Color0);

  assert!(!common::warned("attaching a depth image"));
  assert!(!common::warned("while it is not bound"));
}
