//! Candidate texture discovery.
//!
//! Live textures are found by walking the base path with the pristine tier pruned.
//! Files that only exist inside a pristine folder are reported separately as
//! backup-only, with their live location inferred from the folder's parent.

use std::path::{Path, PathBuf};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};
use walkdir::WalkDir;
use crate::processing::store::{BACKUP_DIR_NAME, is_in_backup_dir};
use crate::utils::{DiscoveryError, TextureFormat, is_supported_texture, relative_to};

/// One file the batch will process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredTexture {
    /// Live path (inferred for backup-only files)
    pub live_path: PathBuf,
    /// `live_path` relative to the base path
    pub relative_path: PathBuf,
    pub backup_only: bool,
}

/// Default include patterns: every supported texture extension.
pub fn default_include_patterns() -> Vec<String> {
    let exts: Vec<&str> = TextureFormat::all_extensions().collect();
    vec![format!("**/*.{{{}}}", exts.join(","))]
}

/// Pattern always added to the exclusions so the pristine tier is never treated as live.
pub fn backup_exclude_pattern() -> String {
    format!("**/{BACKUP_DIR_NAME}/**")
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, DiscoveryError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| DiscoveryError::Pattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| DiscoveryError::Pattern {
        pattern: patterns.join(", "),
        reason: e.to_string(),
    })
}

/// Compiled include/exclude filters for relative texture paths.
#[derive(Debug, Clone)]
pub struct PathFilter {
    include: GlobSet,
    exclude: GlobSet,
}

impl PathFilter {
    /// Empty `include` falls back to [`default_include_patterns`]. The pristine tier is
    /// always excluded.
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, DiscoveryError> {
        let include = if include.is_empty() {
            default_include_patterns()
        } else {
            include.to_vec()
        };
        let mut exclude = exclude.to_vec();
        exclude.push(backup_exclude_pattern());

        Ok(Self {
            include: build_globset(&include)?,
            exclude: build_globset(&exclude)?,
        })
    }

    /// Whether a path relative to the base is a candidate texture.
    pub fn accepts(&self, relative: &Path) -> bool {
        let s = relative.to_string_lossy().replace('\\', "/");
        is_supported_texture(relative)
            && self.include.is_match(&s)
            && !self.exclude.is_match(&s)
    }
}

fn check_base(base: &Path) -> Result<(), DiscoveryError> {
    let meta = std::fs::metadata(base).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DiscoveryError::NotFound(base.to_path_buf()),
        _ => DiscoveryError::IO(format!("{}: {e}", base.display())),
    })?;
    if !meta.is_dir() {
        return Err(DiscoveryError::NotDirectory(base.to_path_buf()));
    }
    Ok(())
}

/// Walks `base` and returns live textures in walk order, followed by backup-only
/// textures when `include_backup_only` is set.
pub fn discover(
    base: &Path,
    filter: &PathFilter,
    include_backup_only: bool,
) -> Result<Vec<DiscoveredTexture>, DiscoveryError> {
    check_base(base)?;

    let mut found = Vec::new();
    let walker = WalkDir::new(base)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && e.file_name() == BACKUP_DIR_NAME));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = relative_to(entry.path(), base);
        if filter.accepts(&relative) {
            found.push(DiscoveredTexture {
                live_path: entry.path().to_path_buf(),
                relative_path: relative,
                backup_only: false,
            });
        }
    }

    let live_count = found.len();
    if include_backup_only {
        found.extend(discover_backup_only(base, filter)?);
    }

    debug!(
        "Discovered {} live and {} backup-only textures under {}",
        live_count,
        found.len() - live_count,
        base.display()
    );
    Ok(found)
}

/// Files inside a pristine folder whose live counterpart is missing.
fn discover_backup_only(base: &Path, filter: &PathFilter) -> Result<Vec<DiscoveredTexture>, DiscoveryError> {
    let mut found = Vec::new();

    let backup_dirs = WalkDir::new(base)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_dir() && e.file_name() == BACKUP_DIR_NAME);

    for dir in backup_dirs {
        let Some(parent) = dir.path().parent() else {
            continue;
        };
        // Nested pristine folders are not part of the layout.
        if is_in_backup_dir(&relative_to(parent, base)) {
            continue;
        }

        for entry in WalkDir::new(dir.path())
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
        {
            let live_path = parent.join(entry.file_name());
            if live_path.exists() {
                continue;
            }
            let relative = relative_to(&live_path, base);
            if filter.accepts(&relative) {
                debug!("Backup-only texture {}", relative.display());
                found.push(DiscoveredTexture {
                    live_path,
                    relative_path: relative,
                    backup_only: true,
                });
            }
        }
    }

    Ok(found)
}
