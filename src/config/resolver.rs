//! Name-keyed lookup of per-texture settings.

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};
use crate::config::{TextureConfigDocument, TextureEntry, ValidatedDocument};
use crate::core::{ResolvedSettings, TextureSettings};
use crate::utils::ConfigError;

/// Normalized lookup key for a configured name: trimmed and lowercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Texture identity of a path: its basename without extension, lowercased.
pub fn texture_identity(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .file_stem()
        .map(|s| normalize_name(&s.to_string_lossy()))
        .unwrap_or_default()
}

/// Loaded texture configuration.
///
/// Entries are keyed by normalized name. Duplicate names are rejected when the
/// document is validated, so each key maps to exactly one entry.
#[derive(Debug, Clone)]
pub struct TextureConfig {
    defaults: TextureSettings,
    entries: HashMap<String, TextureEntry>,
    /// Configured names in document order
    names: Vec<String>,
}

impl TextureConfig {
    /// Loads, parses and validates the document at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = Self::from_validated(TextureConfigDocument::read(path)?.validate()?);
        info!(
            "Loaded config {} ({} textures, default {}px @ q{})",
            path.display(),
            config.names.len(),
            config.defaults.max_size,
            config.defaults.quality
        );
        Ok(config)
    }

    /// Parses and validates a JSON document held in memory.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let doc = TextureConfigDocument::from_json(text, Path::new("<inline>"))?;
        Ok(Self::from_validated(doc.validate()?))
    }

    pub fn from_validated(doc: ValidatedDocument) -> Self {
        let names = doc.entries.iter().map(|e| e.name.clone()).collect();
        let entries = doc
            .entries
            .into_iter()
            .map(|e| (normalize_name(&e.name), e))
            .collect();

        Self {
            defaults: doc.defaults,
            entries,
            names,
        }
    }

    pub fn defaults(&self) -> &TextureSettings {
        &self.defaults
    }

    fn entry_for(&self, texture: &Path) -> Option<&TextureEntry> {
        self.entries.get(&texture_identity(texture))
    }

    /// Effective settings for `texture`.
    ///
    /// Unlisted names and `useDefault` entries get exactly the defaults; otherwise
    /// each field present on the entry wins over the default.
    pub fn resolve_settings(&self, texture: impl AsRef<Path>) -> ResolvedSettings {
        match self.entry_for(texture.as_ref()) {
            Some(entry) if !entry.use_default => {
                let resolved = entry.overrides.merge_over(&self.defaults);
                debug!(
                    "{}: custom settings {}px @ q{}",
                    entry.name, resolved.max_size, resolved.quality
                );
                resolved
            }
            _ => self.defaults,
        }
    }

    /// True iff a config entry exists for `texture` with `useDefault = false`.
    pub fn has_custom_settings(&self, texture: impl AsRef<Path>) -> bool {
        self.entry_for(texture.as_ref())
            .is_some_and(|entry| !entry.use_default)
    }

    pub fn list_configured_names(&self) -> &[String] {
        &self.names
    }
}
