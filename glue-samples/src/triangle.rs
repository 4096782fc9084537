//! A triangle with one color per vertex, slowly pulsing.
//!
//! Positions and colors are stored as two non-interleaved streams of the same vertex buffer.

use cgmath::{Matrix4, Rad};
use glue::buffer::Usage;
use glue::shader::Program;
use glue::vertex::AttributeSource;
use glue::vertex_array::{Primitive, VertexArray};
use glue::vertex_buffer::VertexBuffer;
use glue::Context;
use glue_gl::GL33;
use std::error::Error;

use crate::surface::Surface;

pub const VS: &str = "#version 330 core
layout (location = 0) in vec2 co;
layout (location = 1) in vec3 color;

uniform mat4 rotation;

out vec3 v_color;

void main() {
  gl_Position = rotation * vec4(co, 0., 1.);
  v_color = color;
}";

pub const FS: &str = "#version 330 core
in vec3 v_color;

uniform float t;

out vec4 frag;

void main() {
  frag = vec4(v_color * (0.75 + 0.25 * cos(t)), 1.);
}";

pub const POSITIONS: [[f32; 2]; 3] = [[-0.5, -0.5], [0.5, -0.5], [0., 0.5]];
pub const COLORS: [[u8; 3]; 3] = [[255, 0, 0], [0, 255, 0], [0, 0, 255]];

/// Vertex array holding the triangle, with its vertex buffer.
pub fn triangle(
  ctx: &mut Context<GL33>,
) -> Result<(VertexArray<GL33>, VertexBuffer<GL33>), Box<dyn Error>> {
  let mut vertices = VertexBuffer::new(ctx);
  vertices.bind();
  vertices.set_data(
    Usage::StaticDraw,
    &[
      AttributeSource::new(&POSITIONS[..]),
      AttributeSource::new(&COLORS[..]).normalized(),
    ],
  )?;

  let mut vao = VertexArray::new(ctx, true);
  vao.bind();
  vao.set_vertex_source(&vertices);
  vao.release();

  Ok((vao, vertices))
}

/// Draw the triangle at time `t` with the active `program`.
pub fn draw(program: &Program<GL33>, vao: &VertexArray<GL33>, t: f32) {
  program.set_uniform("t", t);
  program.set_uniform("rotation", Matrix4::from_angle_z(Rad(t * 0.5)));

  vao.bind();
  vao.draw(Primitive::Triangles);
  vao.release();
}

pub fn run(surface: &mut Surface, ctx: &mut Context<GL33>) -> Result<(), Box<dyn Error>> {
  let program = Program::from_sources(ctx, VS, None, FS)?;
  if !program.is_linked() {
    return Err(program.link_log().into());
  }

  let (vao, _vertices) = triangle(ctx)?;

  while surface.poll() {
    surface.clear([0.1, 0.1, 0.1, 1.]);

    program.activate();
    draw(&program, &vao, surface.time());

    surface.swap();
  }

  Ok(())
}
