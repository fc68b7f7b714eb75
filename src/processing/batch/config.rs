use std::num::NonZeroUsize;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};

/// Options for one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOptions {
    /// Root to scan for textures
    pub base_path: PathBuf,
    /// Output root; `None` optimizes in place
    pub output_path: Option<PathBuf>,
    /// Texture configuration document
    pub config_path: PathBuf,
    /// Include globs relative to `base_path`; empty means every supported format
    pub include: Vec<String>,
    /// Extra exclude globs; the backup folder is always excluded
    pub exclude: Vec<String>,
    /// Files processed concurrently per chunk
    pub concurrency: NonZeroUsize,
    /// Restore textures that only exist in a backup folder
    pub include_backup_only: bool,
    pub verbose: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            output_path: None,
            config_path: PathBuf::from("texture-config.json"),
            include: Vec::new(),
            exclude: Vec::new(),
            concurrency: NonZeroUsize::new(4).unwrap_or(NonZeroUsize::MIN),
            include_backup_only: true,
            verbose: false,
        }
    }
}
