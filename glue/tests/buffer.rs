mod common;

use glue::buffer::{Buffer, Target, Usage};
use glue::index_buffer::{IndexBuffer, IndexType};
use glue::vertex::{AttribType, AttributeSource};
use glue::vertex_array::{Primitive, VertexArray};
use glue::vertex_buffer::{VertexBuffer, VertexBufferError};
use glue_headless::Headless;

#[test]
fn sub_data_round_trip() {
  let mut ctx = common::context();
  let mut buffer = Buffer::new(&mut ctx, Target::Array);

  buffer.bind();
  buffer.set_data(Usage::StaticDraw, Some(&[0, 1, 2, 3, 4, 5, 6, 7][..]), 8);
  buffer.set_sub_data(&[42, 43], 3);

  let mut out = [0; 4];
  buffer.get_sub_data(2, &mut out);

  assert_eq!(out, [2, 42, 43, 5]);
  assert_eq!(buffer.size(), 8);
  assert_eq!(buffer.usage(), Usage::StaticDraw);
  assert!(common::raised_errors(&ctx).is_empty());
}

#[test]
fn storage_without_data() {
  let mut ctx = common::context();
  let mut buffer = Buffer::new(&mut ctx, Target::Array);

  buffer.bind();
  buffer.set_data(Usage::DynamicDraw, None, 16);

  assert_eq!(buffer.size(), 16);
  assert_eq!(
    ctx.backend().buffer_content(buffer.handle()).map(<[u8]>::len),
    Some(16)
  );
}

#[test]
#[should_panic(expected = "out of range (buffer size: 4)")]
fn sub_data_out_of_range() {
  let mut ctx = common::context();
  let mut buffer = Buffer::new(&mut ctx, Target::Array);

  buffer.bind();
  buffer.set_data(Usage::StaticDraw, None, 4);
  buffer.set_sub_data(&[1, 2], 3);
}

#[test]
#[should_panic(expected = "buffer data of 3 bytes given for a 4 bytes storage")]
fn data_of_the_wrong_size() {
  let mut ctx = common::context();
  let mut buffer = Buffer::new(&mut ctx, Target::Array);

  buffer.bind();
  buffer.set_data(Usage::StaticDraw, Some(&[1, 2, 3][..]), 4);
}

#[test]
fn handles_are_deleted_on_drop() {
  let mut ctx = common::context();

  {
    let buffer = Buffer::new(&mut ctx, Target::Array);
    buffer.bind();

    assert_eq!(ctx.backend().live_objects(), 1);
  }

  assert_eq!(ctx.backend().live_objects(), 0);
  assert!(common::raised_errors(&ctx).is_empty());
}

#[test]
fn vertex_attributes_are_laid_out_one_after_the_other() {
  let mut ctx = common::context();
  let positions: [[f32; 3]; 4] = [[0., 0., 0.], [1., 0., 0.], [1., 1., 0.], [0., 1., 0.]];
  let colors: [[f32; 3]; 4] = [[1., 0., 0.], [0., 1., 0.], [0., 0., 1.], [1., 1., 1.]];

  let mut vertices = VertexBuffer::new(&mut ctx);
  vertices.bind();
  vertices
    .set_data(
      Usage::StaticDraw,
      &[
        AttributeSource::new(&positions),
        AttributeSource::new(&colors),
      ],
    )
    .unwrap();

  assert_eq!(vertices.num_attributes(), 2);
  assert_eq!(vertices.num_vertices(), 4);
  assert_eq!(vertices.size(), 96);

  let first = vertices.attribute(0).unwrap();
  let second = vertices.attribute(1).unwrap();

  assert_eq!(first.index, 0);
  assert_eq!(first.components, 3);
  assert_eq!(first.comp_type, AttribType::Float);
  assert_eq!(first.pointer, 0);
  assert_eq!(second.index, 1);
  assert_eq!(second.pointer, 48);
  assert!(vertices.attribute(2).is_none());

  let content = ctx.backend().buffer_content(vertices.handle()).unwrap().to_vec();
  assert_eq!(&content[48..52], &1f32.to_ne_bytes());
}

#[test]
fn attributes_of_different_lengths() {
  let mut ctx = common::context();
  let positions = [[0f32; 2]; 3];
  let colors = [[0u8; 4]; 2];

  let mut vertices = VertexBuffer::new(&mut ctx);
  vertices.bind();

  let r = vertices.set_data(
    Usage::StaticDraw,
    &[
      AttributeSource::new(&positions),
      AttributeSource::new(&colors).normalized(),
    ],
  );

  assert_eq!(
    r,
    Err(VertexBufferError::LengthMismatch {
      index: 1,
      expected: 3,
      found: 2
    })
  );
  assert_eq!(
    vertices.set_data(Usage::StaticDraw, &[]),
    Err(VertexBufferError::NoAttributes)
  );
}

#[test]
fn typed_indices() {
  let mut ctx = common::context();
  let mut indices = IndexBuffer::new(&mut ctx);

  indices.bind();
  indices.set_data(Usage::StaticDraw, &[0u16, 1, 2, 2, 3, 0]);

  assert_eq!(indices.num_indices(), 6);
  assert_eq!(indices.index_type(), IndexType::UnsignedShort);
  assert_eq!(indices.size(), 12);

  indices.set_data(Usage::StaticDraw, &[0u32, 1, 2]);

  assert_eq!(indices.num_indices(), 3);
  assert_eq!(indices.index_type(), IndexType::UnsignedInt);
}

#[test]
fn untyped_index_data_keeps_the_previous_count() {
  let mut ctx = common::context();
  let mut indices = IndexBuffer::new(&mut ctx);

  indices.bind();
  indices.set_data(Usage::StaticDraw, &[0u8, 1, 2]);

  // through the underlying buffer; count and type are left as they were
  let buffer: &mut Buffer<Headless> = &mut indices;
  buffer.set_data(Usage::StaticDraw, Some(&[0, 0, 1, 0][..]), 4);

  assert_eq!(indices.num_indices(), 3);
  assert_eq!(indices.index_type(), IndexType::UnsignedByte);
  assert_eq!(indices.size(), 4);
}

#[test]
fn vertex_array_records_attribute_layout() {
  let mut ctx = common::context();
  let positions = [[0f32; 3]; 4];
  let colors = [[1f32; 3]; 4];

  let mut vao = VertexArray::new(&mut ctx, true);
  let mut vertices = VertexBuffer::new(&mut ctx);

  vao.bind();
  vertices.bind();
  vertices
    .set_data(
      Usage::StaticDraw,
      &[(&positions[..]).into(), (&colors[..]).into()],
    )
    .unwrap();
  vao.set_vertex_source(&vertices);

  let backend = ctx.backend();
  let color = backend.vertex_attrib(vao.handle(), 1).unwrap();

  assert_eq!(color.buffer, vertices.handle());
  assert_eq!(color.size, 3);
  assert_eq!(color.ty, gl::FLOAT);
  assert_eq!(color.offset, 48);
  assert!(color.enabled);
  assert_eq!(vao.num_vertices(), 4);
  assert_eq!(vao.vertex_source(), Some(vertices.handle()));
}

#[test]
fn attributes_are_not_enabled_without_auto_enable() {
  let mut ctx = common::context();
  let positions = [[0f32; 2]; 3];

  let mut vao = VertexArray::new(&mut ctx, false);
  let mut vertices = VertexBuffer::new(&mut ctx);

  vao.bind();
  vertices.bind();
  vertices
    .set_data(Usage::StaticDraw, &[AttributeSource::new(&positions)])
    .unwrap();
  vao.set_vertex_source(&vertices);

  assert!(!ctx.backend().vertex_attrib(vao.handle(), 0).unwrap().enabled);

  vao.enable_attribute(0);

  assert!(ctx.backend().vertex_attrib(vao.handle(), 0).unwrap().enabled);
}

#[test]
fn draws() {
  let mut ctx = common::context();
  let positions = [[0f32; 2]; 4];

  let mut vao = VertexArray::new(&mut ctx, true);
  let mut vertices = VertexBuffer::new(&mut ctx);
  let mut indices = IndexBuffer::new(&mut ctx);

  vao.bind();
  vertices.bind();
  vertices
    .set_data(Usage::StaticDraw, &[AttributeSource::new(&positions)])
    .unwrap();
  vao.set_vertex_source(&vertices);

  vao.draw(Primitive::TriangleFan);

  indices.bind();
  indices.set_data(Usage::StaticDraw, &[0u16, 1, 2, 2, 3, 0]);
  vao.set_index_source(&indices);

  vao.draw_indexed(Primitive::Triangles);

  let backend = ctx.backend();
  let calls = backend.draw_calls();

  assert_eq!(calls.len(), 2);
  assert_eq!(calls[0].mode, gl::TRIANGLE_FAN);
  assert_eq!(calls[0].count, 4);
  assert_eq!(calls[0].index_type, None);
  assert_eq!(calls[1].mode, gl::TRIANGLES);
  assert_eq!(calls[1].count, 6);
  assert_eq!(calls[1].index_type, Some(gl::UNSIGNED_SHORT));
  assert_eq!(backend.element_buffer(vao.handle()), Some(indices.handle()));
  assert!(backend.raised_errors().is_empty());
}

#[test]
fn indexed_draw_without_index_source_draws_nothing() {
  let mut ctx = common::context();
  let vao = VertexArray::new(&mut ctx, true);

  vao.bind();
  vao.draw_indexed(Primitive::Triangles);

  assert_eq!(vao.index_source(), None);
  assert_eq!(ctx.backend().draw_calls()[0].count, 0);
  assert!(common::raised_errors(&ctx).is_empty());
}

#[test]
fn unbound_vertex_array_operations_warn() {
  let mut ctx = common::context();
  let positions = [[0f32; 2]; 3];

  let mut vao = VertexArray::new(&mut ctx, false);
  let mut vertices = VertexBuffer::new(&mut ctx);
  let mut indices = IndexBuffer::new(&mut ctx);

  vertices.bind();
  vertices
    .set_data(Usage::StaticDraw, &[AttributeSource::new(&positions)])
    .unwrap();
  indices.bind();
  indices.set_data(Usage::StaticDraw, &[0u8, 1, 2][..]);

  common::capture_logs();
  vao.set_vertex_source(&vertices);
  vao.set_index_source(&indices);
  vao.enable_attribute(0);
  vao.disable_attribute(0);
  vao.draw(Primitive::Triangles);
  vao.draw_indexed(Primitive::Triangles);

  let ops = [
    "set_vertex_source",
    "set_index_source",
    "enable_attribute",
    "disable_attribute",
    "draw",
    "draw_indexed",
  ];

  for op in ops {
    let line = format!("{} on vertex array {} while it is not bound", op, vao.handle());
    assert!(common::warned(&line), "no warning for {}", op);
  }

  vao.bind();
  common::capture_logs();
  vao.enable_attribute(0);
  vao.draw(Primitive::Triangles);

  assert!(!common::warned("while it is not bound"));
}
