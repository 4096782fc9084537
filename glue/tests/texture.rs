mod common;

use glue::pixel::{InternalFormat, PixelFormat, PixelType};
use glue::renderbuffer::RenderBuffer;
use glue::texture::{MagFilter, MinFilter, Texture1D, Texture2D, Texture3D, TextureType, Wrap};

#[test]
fn fresh_texture_has_no_storage() {
  let mut ctx = common::context();
  let texture = Texture2D::new(&mut ctx);

  assert_ne!(texture.handle(), 0);
  assert_eq!(texture.texture_type(), TextureType::Texture2D);
  assert_eq!(texture.format(), InternalFormat::Invalid);
  assert_eq!(texture.size(), [0, 0]);
  assert!(!texture.has_depth_format());
}

#[test]
fn image_data_round_trip() {
  let mut ctx = common::context();
  let mut texture = Texture2D::new(&mut ctx);
  let texels: Vec<u8> = (0..2 * 3 * 4).collect();

  texture.bind(None);
  texture.set_image_data(
    InternalFormat::RGBA8,
    [2, 3],
    PixelFormat::RGBA,
    PixelType::UnsignedByte,
    Some(&texels[..]),
  );

  assert_eq!(texture.format(), InternalFormat::RGBA8);
  assert_eq!(texture.width(), 2);
  assert_eq!(texture.height(), 3);
  assert_eq!(texture.depth(), 1);
  assert_eq!(
    texture.get_image_data(PixelFormat::RGBA, PixelType::UnsignedByte),
    texels
  );

  let backend = ctx.backend();
  assert_eq!(
    backend.texture_parameter(texture.handle(), gl::TEXTURE_MAX_LEVEL),
    Some(0)
  );
  assert_eq!(
    backend.texture_parameter(texture.handle(), gl::TEXTURE_BASE_LEVEL),
    Some(0)
  );
  assert!(backend.raised_errors().is_empty());
}

#[test]
fn resize_always_reallocates() {
  let mut ctx = common::context();
  let mut texture = Texture2D::new(&mut ctx);

  texture.bind(None);
  texture.set_image_data(
    InternalFormat::RGBA8,
    [1, 1],
    PixelFormat::RGBA,
    PixelType::UnsignedByte,
    Some(&[255, 255, 255, 255][..]),
  );
  texture.resize(InternalFormat::RGBA8, [1, 1]);
  texture.resize(InternalFormat::RGBA8, [1, 1]);

  assert_eq!(ctx.backend().texture_allocations(texture.handle()), 3);
  assert_eq!(ctx.backend().texture_data(texture.handle()), None);
  assert_eq!(
    texture.get_image_data(PixelFormat::RGBA, PixelType::UnsignedByte),
    vec![0; 4]
  );
}

#[test]
fn depth_textures() {
  let mut ctx = common::context();
  let mut texture = Texture2D::new(&mut ctx);

  texture.bind(None);
  texture.resize(InternalFormat::DepthComponent32F, [8, 8]);

  assert!(texture.has_depth_format());
  assert!(common::raised_errors(&ctx).is_empty());
}

#[test]
#[should_panic(expected = "cannot allocate texture storage with an invalid format")]
fn invalid_format() {
  let mut ctx = common::context();
  let mut texture = Texture2D::new(&mut ctx);

  texture.bind(None);
  texture.resize(InternalFormat::Invalid, [8, 8]);
}

#[test]
#[should_panic(expected = "texture data of 11 bytes given for 12 bytes of texels")]
fn not_enough_texels() {
  let mut ctx = common::context();
  let mut texture = Texture2D::new(&mut ctx);

  texture.bind(None);
  texture.set_image_data(
    InternalFormat::RGB8,
    [2, 2],
    PixelFormat::RGB,
    PixelType::UnsignedByte,
    Some(&[0; 11][..]),
  );
}

#[test]
fn one_and_three_dimensions() {
  let mut ctx = common::context();
  let mut line = Texture1D::new(&mut ctx);
  let mut volume = Texture3D::new(&mut ctx);

  line.bind(None);
  line.resize(InternalFormat::R32F, 16);
  volume.bind(None);
  volume.resize(InternalFormat::RGBA16F, [4, 5, 6]);

  let backend = ctx.backend();

  assert_eq!(
    backend.texture_storage(line.handle()),
    Some((gl::R32F, [16, 1, 1]))
  );
  assert_eq!(
    backend.texture_storage(volume.handle()),
    Some((gl::RGBA16F, [4, 5, 6]))
  );
  assert_eq!(line.size(), 16);
  assert_eq!(volume.depth(), 6);
  assert!(backend.raised_errors().is_empty());
}

#[test]
fn sampling_parameters() {
  let mut ctx = common::context();
  let mut texture = Texture3D::new(&mut ctx);

  texture.bind(None);
  texture.set_min_filter(MinFilter::LinearMipmapNearest);
  texture.set_mag_filter(MagFilter::Nearest);
  texture.set_wrap(Wrap::MirroredRepeat);

  let backend = ctx.backend();
  let param = |pname| backend.texture_parameter(texture.handle(), pname);

  assert_eq!(
    param(gl::TEXTURE_MIN_FILTER),
    Some(gl::LINEAR_MIPMAP_NEAREST as i32)
  );
  assert_eq!(param(gl::TEXTURE_MAG_FILTER), Some(gl::NEAREST as i32));
  assert_eq!(param(gl::TEXTURE_WRAP_S), Some(gl::MIRRORED_REPEAT as i32));
  assert_eq!(param(gl::TEXTURE_WRAP_T), Some(gl::MIRRORED_REPEAT as i32));
  assert_eq!(param(gl::TEXTURE_WRAP_R), Some(gl::MIRRORED_REPEAT as i32));
}

#[test]
fn binding_to_a_unit() {
  let mut ctx = common::context();
  let a = Texture2D::new(&mut ctx);
  let b = Texture2D::new(&mut ctx);

  a.bind(Some(3));

  assert_eq!(ctx.active_texture_unit(), 3);
  assert!(a.is_bound());

  // binds to the active unit
  b.bind(None);

  assert!(b.is_bound());
  assert!(!a.is_bound());
  assert_eq!(ctx.backend().bound_texture(3, gl::TEXTURE_2D), b.handle());

  a.bind(Some(0));
  b.release(Some(3));

  assert_eq!(ctx.active_texture_unit(), 3);
  assert_eq!(ctx.backend().bound_texture(3, gl::TEXTURE_2D), 0);
  assert_eq!(ctx.backend().bound_texture(0, gl::TEXTURE_2D), a.handle());
}

#[test]
#[should_panic(expected = "texture unit 4 out of range (max texture units: 4)")]
fn unit_past_the_limit() {
  let opt = glue::ContextOpt::default().set_max_texture_units(4);
  let mut ctx = glue::Context::with_opt(glue_headless::Headless::new(), opt);
  let texture = Texture2D::new(&mut ctx);

  texture.bind(Some(4));
}

#[test]
fn renderbuffer_storage() {
  let mut ctx = common::context();
  let mut rb = RenderBuffer::new(&mut ctx);

  assert_eq!(rb.format(), InternalFormat::Invalid);

  rb.bind();
  rb.resize(InternalFormat::DepthComponent24, [64, 32]);

  assert!(rb.has_depth_format());
  assert_eq!(rb.width(), 64);
  assert_eq!(rb.height(), 32);
  assert_eq!(
    ctx.backend().renderbuffer_allocation(rb.handle()),
    Some((gl::DEPTH_COMPONENT24, [64, 32]))
  );
}

#[test]
fn texture_bindings_survive_a_resync() {
  let mut ctx = common::context();
  let line = Texture1D::new(&mut ctx);
  let plane = Texture2D::new(&mut ctx);
  let volume = Texture3D::new(&mut ctx);

  line.bind(Some(2));
  plane.bind(None);
  volume.bind(None);
  ctx.resync_bindings();

  assert_eq!(ctx.active_texture_unit(), 2);
  assert!(line.is_bound());
  assert!(plane.is_bound());
  assert!(volume.is_bound());

  plane.release(None);
  ctx.resync_bindings();

  assert!(line.is_bound());
  assert!(!plane.is_bound());
  assert!(volume.is_bound());
}

#[test]
fn unit_limit_comes_from_the_driver() {
  let ctx = common::context();

  assert_eq!(
    ctx.max_texture_units(),
    Some(glue_headless::MAX_TEXTURE_UNITS)
  );
  assert!(common::raised_errors(&ctx).is_empty());
}

#[test]
fn explicit_unit_limit_wins() {
  let opt = glue::ContextOpt::default().set_max_texture_units(4);
  let ctx = glue::Context::with_opt(glue_headless::Headless::new(), opt);

  assert_eq!(ctx.max_texture_units(), Some(4));
}

#[test]
#[should_panic(expected = "texture unit 100 out of range (max texture units: 48)")]
fn unit_past_the_driver_limit() {
  let mut ctx = common::context();
  let texture = Texture2D::new(&mut ctx);

  texture.bind(Some(100));
}

#[test]
fn unbound_texture_operations_warn() {
  let mut ctx = common::context();
  let mut texture = Texture2D::new(&mut ctx);
  let other = Texture2D::new(&mut ctx);

  texture.bind(None);
  texture.resize(InternalFormat::RGBA8, [2, 2]);
  other.bind(None);

  common::capture_logs();
  texture.resize(InternalFormat::RGBA8, [2, 2]);
  texture.set_image_data(
    InternalFormat::RGBA8,
    [2, 2],
    PixelFormat::RGBA,
    PixelType::UnsignedByte,
    None,
  );
  let _ = texture.get_image_data(PixelFormat::RGBA, PixelType::UnsignedByte);
  texture.set_min_filter(MinFilter::Nearest);

  for op in ["resize", "set_image_data", "get_image_data", "set_parameter"] {
    let line = format!(
      "{} on texture {} while it is not bound to texture unit 0",
      op,
      texture.handle()
    );
    assert!(common::warned(&line), "no warning for {}", op);
  }

  // the storage that changed is the bound one
  assert_eq!(
    ctx.backend().texture_allocations(other.handle()),
    2
  );
}

#[test]
fn unbound_renderbuffer_resize_warns() {
  let mut ctx = common::context();
  let mut rb = RenderBuffer::new(&mut ctx);

  common::capture_logs();
  rb.resize(InternalFormat::DepthComponent24, [8, 8]);

  let line = format!("resize on renderbuffer {} while it is not bound", rb.handle());
  assert!(common::warned(&line));

  rb.bind();
  common::capture_logs();
  rb.resize(InternalFormat::DepthComponent24, [8, 8]);

  assert!(!common::warned("while it is not bound"));
}

#[cfg(feature = "png")]
mod png {
  use super::*;
  use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};

  fn encode(img: RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(img)
      .write_to(&mut bytes, ImageOutputFormat::Png)
      .unwrap();
    bytes
  }

  #[test]
  fn texture_from_png() {
    let mut ctx = super::common::context();
    let img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
    let texture = Texture2D::from_png(&mut ctx, encode(img).as_slice()).unwrap();

    assert_eq!(texture.format(), InternalFormat::RGBA8);
    assert_eq!(texture.size(), [3, 2]);
    assert!(!texture.is_bound());

    let data = ctx.backend().texture_data(texture.handle()).unwrap().to_vec();
    assert_eq!(data.len(), 3 * 2 * 4);
    assert_eq!(&data[..4], &[10, 20, 30, 255]);
  }

  #[test]
  fn garbage_is_not_a_texture() {
    let mut ctx = super::common::context();

    assert!(Texture2D::from_png(&mut ctx, &b"GIF89a"[..]).is_none());
    assert_eq!(ctx.backend().live_objects(), 0);
  }
}
