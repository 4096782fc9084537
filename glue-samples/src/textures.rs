//! A PNG image stretched over the window.
//!
//! The quad is made of four vertices and six indices; the image is sampled from texture unit 0.

use glue::buffer::Usage;
use glue::index_buffer::IndexBuffer;
use glue::shader::Program;
use glue::texture::{MagFilter, MinFilter, Texture2D, Wrap};
use glue::vertex::AttributeSource;
use glue::vertex_array::{Primitive, VertexArray};
use glue::vertex_buffer::VertexBuffer;
use glue::Context;
use glue_gl::GL33;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::surface::Surface;

pub const VS: &str = "#version 330 core
layout (location = 0) in vec2 co;

out vec2 v_uv;

void main() {
  gl_Position = vec4(co, 0., 1.);
  v_uv = co * .5 + .5;
}";

pub const FS: &str = "#version 330 core
in vec2 v_uv;

uniform sampler2D tex;

out vec4 frag;

void main() {
  frag = texture(tex, v_uv);
}";

pub const CORNERS: [[f32; 2]; 4] = [[-1., -1.], [1., -1.], [1., 1.], [-1., 1.]];
pub const INDICES: [u8; 6] = [0, 1, 2, 0, 2, 3];

/// Vertex array covering the whole viewport, with its buffers.
pub fn quad(
  ctx: &mut Context<GL33>,
) -> Result<(VertexArray<GL33>, VertexBuffer<GL33>, IndexBuffer<GL33>), Box<dyn Error>> {
  let mut vao = VertexArray::new(ctx, true);
  vao.bind();

  let mut vertices = VertexBuffer::new(ctx);
  vertices.bind();
  vertices.set_data(Usage::StaticDraw, &[AttributeSource::new(&CORNERS[..])])?;
  vao.set_vertex_source(&vertices);

  // bound while the vertex array is, so that the vertex array keeps it
  let mut indices = IndexBuffer::new(ctx);
  indices.bind();
  indices.set_data(Usage::StaticDraw, &INDICES[..]);
  vao.set_index_source(&indices);

  vao.release();

  Ok((vao, vertices, indices))
}

pub fn run(
  surface: &mut Surface,
  ctx: &mut Context<GL33>,
  image: &Path,
) -> Result<(), Box<dyn Error>> {
  let reader = BufReader::new(File::open(image)?);
  let mut texture = Texture2D::from_png(ctx, reader)
    .ok_or_else(|| format!("{} is not a PNG image", image.display()))?;
  log::info!("loaded {}×{} image", texture.width(), texture.height());

  texture.bind(Some(0));
  texture.set_min_filter(MinFilter::Linear);
  texture.set_mag_filter(MagFilter::Linear);
  texture.set_wrap(Wrap::ClampToEdge);

  let program = Program::from_sources(ctx, VS, None, FS)?;
  if !program.is_linked() {
    return Err(program.link_log().into());
  }

  program.activate();
  program.set_uniform("tex", 0i32);

  let (vao, _vertices, _indices) = quad(ctx)?;

  while surface.poll() {
    surface.clear([0., 0., 0., 1.]);

    vao.bind();
    vao.draw_indexed(Primitive::Triangles);
    vao.release();

    surface.swap();
  }

  Ok(())
}
