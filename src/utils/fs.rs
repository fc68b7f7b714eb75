use std::path::{Path, PathBuf};
use tokio::fs;
use crate::utils::{OptimizerError, OptimizerResult};

/// Check if a regular file exists at `path`
pub async fn file_exists(path: impl AsRef<Path>) -> bool {
    fs::metadata(path.as_ref())
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Create the parent directory of `path` and all of its ancestors
pub async fn ensure_parent_dir(path: impl AsRef<Path>) -> OptimizerResult<()> {
    if let Some(parent) = path.as_ref().parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(|e| {
            OptimizerError::io(format!("Cannot create directory {}: {}", parent.display(), e))
        })?;
    }
    Ok(())
}

/// Copy `from` to `to` byte for byte, creating parent directories of `to`.
///
/// Bytes land in a staging file next to `to` that is renamed into place only after
/// the copy completes, so `to` either holds the full copy or does not exist.
pub async fn copy_verbatim(from: impl AsRef<Path>, to: impl AsRef<Path>) -> OptimizerResult<u64> {
    let (from, to) = (from.as_ref(), to.as_ref());
    ensure_parent_dir(to).await?;

    let staging = staging_path(to);
    let copied = match fs::copy(from, &staging).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let _ = fs::remove_file(&staging).await;
            return Err(OptimizerError::io(format!(
                "Cannot copy {} to {}: {}", from.display(), to.display(), e
            )));
        }
    };

    if let Err(e) = fs::rename(&staging, to).await {
        let _ = fs::remove_file(&staging).await;
        return Err(OptimizerError::io(format!(
            "Cannot move {} into place: {}", to.display(), e
        )));
    }
    Ok(copied)
}

/// Hidden sibling of `path` used while a copy is in flight.
fn staging_path(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    path.with_file_name(format!(".{name}.partial"))
}

/// Write `bytes` to `path`, creating parent directories
pub async fn write_file(path: impl AsRef<Path>, bytes: &[u8]) -> OptimizerResult<()> {
    let path = path.as_ref();
    ensure_parent_dir(path).await?;
    fs::write(path, bytes)
        .await
        .map_err(|e| OptimizerError::io(format!("Cannot write {}: {}", path.display(), e)))
}

/// `path` relative to `base`, or the bare file name when `path` is outside `base`
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.file_name().map(PathBuf::from).unwrap_or_default())
}

/// Absolute form of `path` with symlinks and `.`/`..` resolved as far as the
/// filesystem allows. A missing tail (an output root not created yet) is appended
/// to the canonical form of its deepest existing ancestor.
pub fn resolve_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();

    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return missing.iter().rev().fold(canonical, |acc, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return absolute,
        }
    }
}

/// Get file name as a display string
pub fn extract_filename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
