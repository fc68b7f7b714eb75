//! Resize logic for the `image` codec.

use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;
use crate::core::Dimensions;
use crate::utils::{OptimizerError, OptimizerResult};

/// Fits `image` inside `bounds`, keeping its aspect ratio.
///
/// Returns the image unchanged when it already fits, so nothing is ever enlarged.
pub fn fit_within(image: DynamicImage, bounds: Dimensions) -> OptimizerResult<DynamicImage> {
    if bounds.width == 0 || bounds.height == 0 {
        return Err(OptimizerError::codec(format!("Invalid resize bounds {bounds}")));
    }

    let (orig_w, orig_h) = (image.width(), image.height());
    if orig_w <= bounds.width && orig_h <= bounds.height {
        return Ok(image);
    }

    let resized = image.resize(bounds.width, bounds.height, FilterType::Lanczos3);
    debug!(
        "Resized {}×{} → {}×{} (bounds {bounds})",
        orig_w, orig_h, resized.width(), resized.height()
    );
    Ok(resized)
}
