//! Target resolution planning for game textures.
//!
//! Textures are snapped to power-of-two sizes, capped by the configured
//! [`MaxSize`], and never planned below a 64 px floor (or `maxSize` itself when
//! the cap is smaller than that).

use crate::core::{Dimensions, MaxSize};

/// Smallest planned side, unless the cap itself is smaller.
pub const MIN_DIMENSION: u32 = 64;

/// Largest power of two not exceeding `value`. Zero maps to 1.
pub fn floor_power_of_two(value: u32) -> u32 {
    if value == 0 {
        return 1;
    }
    1 << (u32::BITS - 1 - value.leading_zeros())
}

/// Plans the target size for an `original_width`×`original_height` texture.
///
/// Each side is floored to a power of two. If either still exceeds `max_size`,
/// the longer original side becomes `max_size` and the shorter one is derived
/// from the original aspect ratio, floored again. Both sides are then clamped
/// into `[min(64, max_size), max_size]`.
///
/// The result may exceed a tiny original; the resize step caps at the
/// original size rather than enlarging.
pub fn plan(original_width: u32, original_height: u32, max_size: MaxSize) -> Dimensions {
    let max = max_size.pixels();
    let floor = MIN_DIMENSION.min(max);

    let mut width = floor_power_of_two(original_width);
    let mut height = floor_power_of_two(original_height);

    if width > max || height > max {
        let aspect = original_width.max(1) as f64 / original_height.max(1) as f64;
        if original_width >= original_height {
            width = max;
            height = floor_power_of_two((max as f64 / aspect) as u32);
        } else {
            height = max;
            width = floor_power_of_two((max as f64 * aspect) as u32);
        }
    }

    Dimensions::new(width.clamp(floor, max), height.clamp(floor, max))
}

/// Box the resize step should fit into: the plan, capped at the original size.
pub fn resize_bounds(original: Dimensions, planned: Dimensions) -> Dimensions {
    Dimensions::new(
        planned.width.min(original.width),
        planned.height.min(original.height),
    )
}
