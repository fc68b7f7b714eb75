//! Error types for the texture optimizer.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.
//! [`ConfigError`] and [`DiscoveryError`] are fatal for a run; everything else is
//! reported per file through a failed [`OptimizationResult`](crate::core::OptimizationResult).

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use serde::Serialize;

/// Errors raised while loading or validating the texture configuration document.
#[derive(Error, Debug, Serialize)]
pub enum ConfigError {
    /// The document could not be read from disk
    #[error("Cannot read config {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    /// The document is not valid JSON or does not have the required shape
    #[error("Malformed config {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// A field violates a schema constraint
    #[error("Invalid config field `{field}`: {reason}")]
    Invalid { field: String, reason: String },

    /// Two entries normalize to the same texture name
    #[error("Duplicate texture name `{name}` in textures[{first}] and textures[{second}]")]
    DuplicateName { name: String, first: usize, second: usize },
}

/// Errors raised while discovering candidate textures under the base path.
#[derive(Error, Debug, Serialize)]
pub enum DiscoveryError {
    /// Base path does not exist
    #[error("Base path not found: {0}")]
    NotFound(PathBuf),
    /// Base path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotDirectory(PathBuf),
    /// An include or exclude glob failed to compile
    #[error("Invalid pattern `{pattern}`: {reason}")]
    Pattern { pattern: String, reason: String },
    /// IO error while walking the tree
    #[error("IO error: {0}")]
    IO(String),
}

/// Main error type for the optimizer.
#[derive(Error, Debug, Serialize)]
pub enum OptimizerError {
    /// Configuration document is missing, malformed, or invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Discovery of the texture set failed
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// Texture processing failed
    #[error("Processing error: {0}")]
    Processing(String),

    /// Decode, resize or encode failed inside the codec
    #[error("Codec error: {0}")]
    Codec(String),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),

    /// Unsupported or invalid image format
    #[error("Format error: {0}")]
    Format(String),
}

/// Convenience result type for optimizer operations.
pub type OptimizerResult<T> = Result<T, OptimizerError>;

impl OptimizerError {
    pub fn processing<T: Into<String>>(msg: T) -> Self {
        Self::Processing(msg.into())
    }

    pub fn codec<T: Into<String>>(msg: T) -> Self {
        Self::Codec(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        Self::IO(msg.into())
    }

    pub fn format<T: Into<String>>(msg: T) -> Self {
        Self::Format(msg.into())
    }
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// Convert std::io::Error to OptimizerError
impl From<io::Error> for OptimizerError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

impl From<image::ImageError> for OptimizerError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Unsupported(e) => Self::Format(e.to_string()),
            image::ImageError::IoError(e) => Self::IO(e.to_string()),
            other => Self::Codec(other.to_string()),
        }
    }
}

impl From<walkdir::Error> for DiscoveryError {
    fn from(err: walkdir::Error) -> Self {
        Self::IO(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_level_errors_keep_their_kind() {
        let config: OptimizerError = ConfigError::invalid("defaultSettings.quality", "out of range").into();
        let discovery: OptimizerError = DiscoveryError::NotFound(PathBuf::from("/missing")).into();

        assert!(matches!(config, OptimizerError::Config(ConfigError::Invalid { .. })));
        assert!(matches!(discovery, OptimizerError::Discovery(DiscoveryError::NotFound(_))));
        assert!(discovery.to_string().contains("/missing"));
    }

    #[test]
    fn io_errors_convert() {
        let err: OptimizerError = io::Error::new(io::ErrorKind::StorageFull, "disk full").into();
        assert!(matches!(err, OptimizerError::IO(ref msg) if msg.contains("disk full")));
    }

    #[test]
    fn invalid_field_is_named_in_message() {
        let err = ConfigError::invalid("textures[3].quality", "must be between 1 and 100, got 150");
        let msg = err.to_string();

        assert!(msg.contains("textures[3].quality"));
        assert!(msg.contains("150"));
    }
}
