//! Core types for texture settings and optimization results.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize, Serializer};
use crate::utils::TextureFormat;

/// Maximum texture dimension. Only powers of two from 32 to 4096 are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum MaxSize {
    S32,
    S64,
    S128,
    S256,
    S512,
    S1024,
    S2048,
    S4096,
}

impl MaxSize {
    pub const ALL: [MaxSize; 8] = [
        Self::S32,
        Self::S64,
        Self::S128,
        Self::S256,
        Self::S512,
        Self::S1024,
        Self::S2048,
        Self::S4096,
    ];

    pub fn pixels(self) -> u32 {
        match self {
            Self::S32 => 32,
            Self::S64 => 64,
            Self::S128 => 128,
            Self::S256 => 256,
            Self::S512 => 512,
            Self::S1024 => 1024,
            Self::S2048 => 2048,
            Self::S4096 => 4096,
        }
    }
}

impl From<MaxSize> for u32 {
    fn from(size: MaxSize) -> Self {
        size.pixels()
    }
}

impl TryFrom<u32> for MaxSize {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|s| s.pixels() == value)
            .ok_or_else(|| format!(
                "must be one of 32, 64, 128, 256, 512, 1024, 2048, 4096, got {value}"
            ))
    }
}

impl fmt::Display for MaxSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pixels())
    }
}

/// Encode quality in the closed range 1..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub struct Quality(u8);

impl Quality {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 100;

    pub fn new(value: u32) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&value)
            .then(|| Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<Quality> for u32 {
    fn from(q: Quality) -> Self {
        q.0 as u32
    }
}

impl TryFrom<u32> for Quality {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("must be between 1 and 100, got {value}"))
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Complete settings for one texture. Never carries optional fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureSettings {
    pub max_size: MaxSize,
    pub quality: Quality,
}

/// Settings actually applied to one file for one run.
pub type ResolvedSettings = TextureSettings;

/// Per-texture override. Absent fields fall back to the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsOverride {
    pub max_size: Option<MaxSize>,
    pub quality: Option<Quality>,
}

impl SettingsOverride {
    /// Field-by-field merge over `defaults`.
    pub fn merge_over(&self, defaults: &TextureSettings) -> ResolvedSettings {
        TextureSettings {
            max_size: self.max_size.unwrap_or(defaults.max_size),
            quality: self.quality.unwrap_or(defaults.quality),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}

/// Pixel size and encoded byte size of one image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageStats {
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
}

impl ImageStats {
    pub fn new(dimensions: Dimensions, bytes: u64) -> Self {
        Self {
            width: dimensions.width,
            height: dimensions.height,
            bytes,
        }
    }
}

/// Where a file's pixels came from in this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceState {
    /// No backup existed; the live file (or a fresh copy of it) was the source
    FirstRun,
    /// A backup from an earlier run was the source
    Reoptimization,
    /// Only a backup exists; output restores the live file
    BackupOnly,
}

impl SourceState {
    /// Any run sourcing from a previously created backup.
    pub fn is_reoptimization(self) -> bool {
        !matches!(self, Self::FirstRun)
    }
}

/// Result of optimizing one texture.
///
/// Built once per file per run; failed results carry zeroed stats.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    /// Whether the optimization succeeded
    pub success: bool,
    /// Live texture path this result is about
    pub input_path: PathBuf,
    /// File the pixels were actually read from (live file or backup)
    pub source_path: PathBuf,
    /// Where the optimized texture was written; absent on failure
    pub output_path: Option<PathBuf>,
    /// Detected format; absent when the extension is unsupported
    pub format: Option<TextureFormat>,
    pub original: ImageStats,
    pub optimized: ImageStats,
    /// Percentage of bytes saved (negative if the file grew)
    pub reduction_percent: f64,
    pub settings: ResolvedSettings,
    /// Whether a non-default config entry applied
    pub custom_settings: bool,
    pub source_state: SourceState,
    #[serde(rename = "durationMs", serialize_with = "serialize_millis")]
    pub duration: Duration,
    /// Error message if optimization failed
    pub error: Option<String>,
}

/// Percentage of `original` saved by shrinking to `optimized`.
pub fn reduction_percent(original: u64, optimized: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (original as f64 - optimized as f64) / original as f64 * 100.0
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}
