//! PNG decoding.
//!
//! Decoded images are handed over as tightly packed RGBA texels, with rows flipped so that the
//! first row is the bottom one, which is the order texture uploads expect.

use std::io::Read;

use crate::backend::Backend;
use crate::context::Context;
use crate::pixel::{InternalFormat, PixelFormat, PixelType};
use crate::texture::Texture2D;

/// A decoded image: `width × height` texels in [`PixelFormat::RGBA`] and
/// [`PixelType::UnsignedByte`], bottom row first.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodedImage {
  /// Width in texels.
  pub width: u32,
  /// Height in texels.
  pub height: u32,
  /// Texels.
  pub pixels: Vec<u8>,
}

impl DecodedImage {
  /// Format of the texels.
  pub fn pixel_format(&self) -> PixelFormat {
    PixelFormat::RGBA
  }

  /// Type of the texels.
  pub fn pixel_type(&self) -> PixelType {
    PixelType::UnsignedByte
  }
}

/// Decode a PNG stream.
///
/// `None` is returned if the stream cannot be read or is not a valid PNG image.
pub fn decode_png<R>(mut reader: R) -> Option<DecodedImage>
where
  R: Read,
{
  let mut bytes = Vec::new();

  if let Err(e) = reader.read_to_end(&mut bytes) {
    log::debug!("cannot read PNG stream: {}", e);
    return None;
  }

  let img = match image::load_from_memory_with_format(&bytes, image::ImageFormat::Png) {
    Ok(img) => img.flipv().to_rgba8(),
    Err(e) => {
      log::debug!("cannot decode PNG image: {}", e);
      return None;
    }
  };

  let (width, height) = img.dimensions();

  Some(DecodedImage {
    width,
    height,
    pixels: img.into_raw(),
  })
}

impl<B> Texture2D<B>
where
  B: Backend,
{
  /// Create a [`InternalFormat::RGBA8`] texture from a PNG stream.
  ///
  /// `None` is returned if the stream cannot be decoded; no texture is created then. The texture
  /// is bound to the active texture unit during the upload and released afterwards.
  pub fn from_png<R>(ctx: &mut Context<B>, reader: R) -> Option<Self>
  where
    R: Read,
  {
    let img = decode_png(reader)?;
    let mut texture = Texture2D::new(ctx);

    texture.bind(None);
    texture.set_image_data(
      InternalFormat::RGBA8,
      [img.width, img.height],
      img.pixel_format(),
      img.pixel_type(),
      Some(&img.pixels),
    );
    texture.release(None);

    Some(texture)
  }
}
