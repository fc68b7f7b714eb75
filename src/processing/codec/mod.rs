//! Codec boundary for pixel work.
//!
//! The optimizer never inspects pixels itself. It hands bytes, target bounds and
//! a quality to a [`TextureCodec`] and consumes the dimensions and encoded bytes
//! that come back.
//!
//! # Architecture
//!
//! - [`ImageCodec`]: Default codec backed by the `image` crate.
//! - [`resize`]: Aspect-preserving, never-enlarging fit into target bounds.
//! - [`formats`]: Maps [`Quality`] onto format-specific encoder options.

mod formats;
mod resize;

use std::io::Cursor;
use image::{DynamicImage, ImageReader};
use crate::core::{Dimensions, Quality};
use crate::utils::{OptimizerError, OptimizerResult, TextureFormat};

pub use formats::{encode_as, png_compression};
pub use resize::fit_within;

/// A decoded texture plus the format its bytes were in.
#[derive(Debug, Clone)]
pub struct DecodedTexture {
    pub image: DynamicImage,
    pub format: TextureFormat,
}

impl DecodedTexture {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.image.width(), self.image.height())
    }
}

/// Decode / resize / encode contract used by the texture pipeline.
///
/// Implementations run on blocking worker threads and must be shareable.
pub trait TextureCodec: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> OptimizerResult<DecodedTexture>;

    /// Fits `texture` inside `bounds`, preserving aspect ratio and never enlarging.
    fn resize(&self, texture: DecodedTexture, bounds: Dimensions) -> OptimizerResult<DecodedTexture>;

    fn encode(
        &self,
        texture: &DecodedTexture,
        format: TextureFormat,
        quality: Quality,
    ) -> OptimizerResult<Vec<u8>>;
}

/// Codec backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl TextureCodec for ImageCodec {
    fn decode(&self, bytes: &[u8]) -> OptimizerResult<DecodedTexture> {
        let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
        let format: TextureFormat = reader
            .format()
            .ok_or_else(|| OptimizerError::format("Unrecognized image data"))?
            .try_into()?;
        let image = reader.decode()?;
        Ok(DecodedTexture { image, format })
    }

    fn resize(&self, texture: DecodedTexture, bounds: Dimensions) -> OptimizerResult<DecodedTexture> {
        Ok(DecodedTexture {
            image: fit_within(texture.image, bounds)?,
            format: texture.format,
        })
    }

    fn encode(
        &self,
        texture: &DecodedTexture,
        format: TextureFormat,
        quality: Quality,
    ) -> OptimizerResult<Vec<u8>> {
        encode_as(&texture.image, format, quality)
    }
}
