//! On-disk shape of the texture configuration document.
//!
//! The document is parsed loosely (every field as an optional raw JSON value) so
//! that validation can name the exact field that is wrong.

use std::path::Path;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use crate::core::{SettingsOverride, TextureSettings};
use crate::utils::{ConfigError, validate_document};

/// Settings block as written in the document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSettings {
    #[serde(default)]
    pub max_size: Option<Value>,
    #[serde(default)]
    pub quality: Option<Value>,
}

/// One `textures[]` entry as written in the document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTextureEntry {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub use_default: Option<Value>,
    #[serde(default)]
    pub max_size: Option<Value>,
    #[serde(default)]
    pub quality: Option<Value>,
}

/// Root of the configuration document.
///
/// Both blocks stay raw JSON until validation checks their shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureConfigDocument {
    #[serde(default)]
    pub default_settings: Value,
    #[serde(default)]
    pub textures: Value,
}

/// A validated `textures[]` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureEntry {
    /// Name as written in the document
    pub name: String,
    pub use_default: bool,
    pub overrides: SettingsOverride,
}

/// Validated document contents, ready to build a lookup from.
#[derive(Debug, Clone)]
pub struct ValidatedDocument {
    pub defaults: TextureSettings,
    pub entries: Vec<TextureEntry>,
}

impl TextureConfigDocument {
    /// Parses a document from JSON text. `origin` only labels errors.
    pub fn from_json(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Reads and parses the document at `path`.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!("Read config {} ({} bytes)", path.display(), text.len());
        Self::from_json(&text, path)
    }

    pub fn validate(&self) -> Result<ValidatedDocument, ConfigError> {
        validate_document(self)
    }
}
