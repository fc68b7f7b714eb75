//! Texture task definition.

use std::path::PathBuf;
use serde::Serialize;
use crate::core::{ResolvedSettings, SourceState};

/// Represents a single texture optimization task.
///
/// Contains the source/destination paths and the settings for processing one file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureTask {
    /// Live texture path as discovered
    pub texture_path: PathBuf,
    /// Source of truth to read pixels from
    pub source_path: PathBuf,
    /// Path where the optimized texture will be written
    pub output_path: PathBuf,
    /// Resolved settings (max size, quality)
    pub settings: ResolvedSettings,
    /// Whether a non-default config entry applied
    pub custom_settings: bool,
    pub source_state: SourceState,
}

impl TextureTask {
    /// A standalone task reading `source` and writing `output`, outside any batch.
    pub fn standalone(
        source: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        settings: ResolvedSettings,
    ) -> Self {
        let source_path = source.into();
        Self {
            texture_path: source_path.clone(),
            source_path,
            output_path: output.into(),
            settings,
            custom_settings: false,
            source_state: SourceState::FirstRun,
        }
    }
}
