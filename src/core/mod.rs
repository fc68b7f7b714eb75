//! Core texture types.
//!
//! This module contains the fundamental types used throughout the crate:
//! - [`TextureSettings`]: Max size and quality applied to a texture
//! - [`TextureTask`]: One file's source, destination, and settings
//! - [`OptimizationResult`]: Result of an optimization operation

mod types;
mod task;

pub use types::{
    Dimensions, ImageStats, MaxSize, OptimizationResult, Quality, ResolvedSettings,
    SettingsOverride, SourceState, TextureSettings, reduction_percent,
};
pub use task::TextureTask;
