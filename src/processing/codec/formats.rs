//! Maps texture quality onto format-specific `image` encoders.
//!
//! JPEG is lossy and takes the quality directly. PNG is lossless, so quality only
//! picks the compression effort. WebP is written lossless by the `image` crate and
//! ignores quality.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::{ColorType, DynamicImage};
use crate::core::Quality;
use crate::utils::{OptimizerError, OptimizerResult, TextureFormat};

/// Compression effort for PNG output: the lower the quality target, the harder
/// the encoder works to shrink the file.
pub fn png_compression(quality: Quality) -> CompressionType {
    match quality.value() {
        0..=50 => CompressionType::Best,
        51..=90 => CompressionType::Default,
        _ => CompressionType::Fast,
    }
}

/// Encodes `image` as JPEG. Alpha and high bit depths are flattened to 8-bit RGB.
pub fn encode_jpeg(image: &DynamicImage, quality: Quality) -> OptimizerResult<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality.value());

    let result = match image.color() {
        ColorType::L8 | ColorType::Rgb8 => image.write_with_encoder(encoder),
        _ => DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder),
    };
    result.map_err(|e| OptimizerError::codec(format!("JPEG encode failed: {e}")))?;
    Ok(buf)
}

/// Encodes `image` as PNG with adaptive filtering.
pub fn encode_png(image: &DynamicImage, quality: Quality) -> OptimizerResult<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut buf, png_compression(quality), PngFilter::Adaptive);

    image
        .write_with_encoder(encoder)
        .map_err(|e| OptimizerError::codec(format!("PNG encode failed: {e}")))?;
    Ok(buf)
}

/// Encodes `image` as lossless WebP. Only 8-bit RGB(A) is accepted by the encoder.
pub fn encode_webp(image: &DynamicImage) -> OptimizerResult<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder = WebPEncoder::new_lossless(&mut buf);

    let result = match image.color() {
        ColorType::Rgb8 | ColorType::Rgba8 => image.write_with_encoder(encoder),
        _ => DynamicImage::ImageRgba8(image.to_rgba8()).write_with_encoder(encoder),
    };
    result.map_err(|e| OptimizerError::codec(format!("WebP encode failed: {e}")))?;
    Ok(buf)
}

/// Dispatches to the correct encoder for `format`.
pub fn encode_as(image: &DynamicImage, format: TextureFormat, quality: Quality) -> OptimizerResult<Vec<u8>> {
    match format {
        TextureFormat::JPEG => encode_jpeg(image, quality),
        TextureFormat::PNG => encode_png(image, quality),
        TextureFormat::WebP => encode_webp(image),
    }
}
