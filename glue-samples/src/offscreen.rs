//! The triangle demo rendered into a framebuffer first, then displayed on a quad.
//!
//! The offscreen pass is timed with an elapsed-time query and its duration is logged every
//! second.

use glue::framebuffer::{Attachment, FrameBuffer, FramebufferTarget};
use glue::pixel::InternalFormat;
use glue::query::{Query, QueryTarget};
use glue::renderbuffer::RenderBuffer;
use glue::shader::Program;
use glue::texture::{MagFilter, MinFilter, Texture2D};
use glue::vertex_array::Primitive;
use glue::Context;
use glue_gl::GL33;
use std::error::Error;

use crate::surface::Surface;
use crate::{textures, triangle};

const SIZE: [u32; 2] = [256, 256];

pub fn run(surface: &mut Surface, ctx: &mut Context<GL33>) -> Result<(), Box<dyn Error>> {
  let mut color = Texture2D::new(ctx);
  color.bind(Some(0));
  color.resize(InternalFormat::RGBA8, SIZE);
  color.set_min_filter(MinFilter::Nearest);
  color.set_mag_filter(MagFilter::Nearest);

  let mut depth = RenderBuffer::new(ctx);
  depth.bind();
  depth.resize(InternalFormat::DepthComponent24, SIZE);
  depth.release();

  let mut framebuffer = FrameBuffer::new(ctx);
  framebuffer.bind(FramebufferTarget::DrawRead);
  framebuffer.attach(&color, Attachment::Color0);
  framebuffer.attach(&depth, Attachment::Depth);
  framebuffer.assign_draw_buffers();

  if !framebuffer.is_complete(FramebufferTarget::Draw) {
    return Err("the offscreen framebuffer is incomplete".into());
  }

  framebuffer.release(FramebufferTarget::DrawRead);

  let scene = Program::from_sources(ctx, triangle::VS, None, triangle::FS)?;
  let display = Program::from_sources(ctx, textures::VS, None, textures::FS)?;

  for program in [&scene, &display] {
    if !program.is_linked() {
      return Err(program.link_log().into());
    }
  }

  let (scene_vao, _vertices) = triangle::triangle(ctx)?;
  let (quad, _quad_vertices, _indices) = textures::quad(ctx)?;
  let query = Query::new(ctx, QueryTarget::TimeElapsed);
  let mut last_report = 0.;

  while surface.poll() {
    let t = surface.time();

    query.begin();
    framebuffer.bind(FramebufferTarget::Draw);

    unsafe {
      gl::Viewport(0, 0, SIZE[0] as _, SIZE[1] as _);
      gl::ClearColor(0.2, 0.2, 0.3, 1.);
      gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
    }

    scene.activate();
    triangle::draw(&scene, &scene_vao, t);

    framebuffer.release(FramebufferTarget::Draw);
    query.end();

    surface.clear([0., 0., 0., 1.]);

    color.bind(Some(0));
    display.activate();
    display.set_uniform("tex", 0i32);
    quad.bind();
    quad.draw_indexed(Primitive::Triangles);
    quad.release();

    surface.swap();

    if t - last_report >= 1. {
      last_report = t;
      log::info!("offscreen pass: {} ns", query.retrieve64());
    }
  }

  Ok(())
}
