//! Two-tier texture store: the live tier (files the game loads) and the pristine
//! tier (untouched originals under [`BACKUP_DIR_NAME`] next to each live file).
//!
//! Once a pristine copy exists it is the only source of truth for that file, so
//! repeated runs never re-compress already-compressed pixels.

use std::path::{Path, PathBuf};
use serde::Serialize;
use tracing::debug;
use crate::core::SourceState;
use crate::utils::{OptimizerResult, copy_verbatim, file_exists};

/// Reserved per-directory folder holding pristine originals.
pub const BACKUP_DIR_NAME: &str = ".originals";

/// Where optimized output goes for the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "mode", content = "root")]
pub enum RunMode {
    /// Overwrite live files, keeping originals in the pristine tier
    InPlace,
    /// Mirror the input tree under a separate root; never touch the input tree
    OutputDirectory(PathBuf),
}

impl RunMode {
    pub fn from_output(output: Option<PathBuf>) -> Self {
        output.map_or(Self::InPlace, Self::OutputDirectory)
    }
}

/// Which tier a file's pixels are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Live,
    Pristine,
}

/// Outcome of the source-of-truth rule table for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceDecision {
    /// Copy the live file into the pristine tier before anything else
    pub create_backup: bool,
    pub read_from: Tier,
    pub state: SourceState,
}

/// The rule table.
///
/// | mode       | backup | action                         | state           |
/// |------------|--------|--------------------------------|-----------------|
/// | in-place   | no     | back up, read pristine         | first run       |
/// | in-place   | yes    | read pristine                  | re-optimization |
/// | output dir | yes    | read pristine                  | re-optimization |
/// | output dir | no     | read live                      | first run       |
///
/// Backup-only files always read pristine and are tagged as such.
pub fn decide(mode: &RunMode, backup_exists: bool, backup_only: bool) -> SourceDecision {
    if backup_only {
        return SourceDecision {
            create_backup: false,
            read_from: Tier::Pristine,
            state: SourceState::BackupOnly,
        };
    }

    match (mode, backup_exists) {
        (_, true) => SourceDecision {
            create_backup: false,
            read_from: Tier::Pristine,
            state: SourceState::Reoptimization,
        },
        (RunMode::InPlace, false) => SourceDecision {
            create_backup: true,
            read_from: Tier::Pristine,
            state: SourceState::FirstRun,
        },
        (RunMode::OutputDirectory(_), false) => SourceDecision {
            create_backup: false,
            read_from: Tier::Live,
            state: SourceState::FirstRun,
        },
    }
}

/// Pristine-tier path for a live texture path.
pub fn backup_path_for(live: &Path) -> PathBuf {
    let parent = live.parent().unwrap_or_else(|| Path::new(""));
    match live.file_name() {
        Some(name) => parent.join(BACKUP_DIR_NAME).join(name),
        None => parent.join(BACKUP_DIR_NAME),
    }
}

/// Whether any component of `path` is the reserved backup folder.
pub fn is_in_backup_dir(path: &Path) -> bool {
    path.components()
        .any(|c| c.as_os_str() == BACKUP_DIR_NAME)
}

/// Source and destination for one file, after any backup was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSource {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub state: SourceState,
}

/// Applies the rule table against the filesystem.
#[derive(Debug, Clone)]
pub struct TextureStore {
    mode: RunMode,
}

impl TextureStore {
    pub fn new(mode: RunMode) -> Self {
        Self { mode }
    }

    /// Where the optimized copy of the texture at `live` (relative path `relative`) goes.
    pub fn destination_for(&self, live: &Path, relative: &Path) -> PathBuf {
        match &self.mode {
            RunMode::InPlace => live.to_path_buf(),
            RunMode::OutputDirectory(root) => root.join(relative),
        }
    }

    /// Resolves the source of truth for a texture, creating its backup first when
    /// the rule table asks for one.
    ///
    /// Backup copies are verbatim and finish before the live file can be touched.
    pub async fn prepare(
        &self,
        live: &Path,
        relative: &Path,
        backup_only: bool,
    ) -> OptimizerResult<PreparedSource> {
        let backup = backup_path_for(live);
        let decision = decide(&self.mode, file_exists(&backup).await, backup_only);

        if decision.create_backup {
            let bytes = copy_verbatim(live, &backup).await?;
            debug!("Backed up {} ({} bytes) → {}", live.display(), bytes, backup.display());
        }

        let source = match decision.read_from {
            Tier::Live => live.to_path_buf(),
            Tier::Pristine => backup,
        };

        Ok(PreparedSource {
            source,
            destination: self.destination_for(live, relative),
            state: decision.state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn out_mode() -> RunMode {
        RunMode::OutputDirectory(PathBuf::from("/out"))
    }

    #[test]
    fn rule_table() {
        let d = decide(&RunMode::InPlace, false, false);
        assert!(d.create_backup);
        assert_eq!((d.read_from, d.state), (Tier::Pristine, SourceState::FirstRun));

        let d = decide(&RunMode::InPlace, true, false);
        assert!(!d.create_backup);
        assert_eq!((d.read_from, d.state), (Tier::Pristine, SourceState::Reoptimization));

        let d = decide(&out_mode(), true, false);
        assert!(!d.create_backup);
        assert_eq!((d.read_from, d.state), (Tier::Pristine, SourceState::Reoptimization));

        let d = decide(&out_mode(), false, false);
        assert!(!d.create_backup);
        assert_eq!((d.read_from, d.state), (Tier::Live, SourceState::FirstRun));

        for mode in [RunMode::InPlace, out_mode()] {
            let d = decide(&mode, true, true);
            assert!(!d.create_backup);
            assert_eq!((d.read_from, d.state), (Tier::Pristine, SourceState::BackupOnly));
        }
    }

    #[test]
    fn backup_paths_are_siblings() {
        assert_eq!(
            backup_path_for(Path::new("assets/ui/icon.png")),
            Path::new("assets/ui/.originals/icon.png")
        );
        assert!(is_in_backup_dir(Path::new("assets/ui/.originals/icon.png")));
        assert!(!is_in_backup_dir(Path::new("assets/ui/icon.png")));
    }

    #[test]
    fn destinations_follow_mode() {
        let live = Path::new("/tex/ui/icon.png");
        let rel = Path::new("ui/icon.png");
        assert_eq!(TextureStore::new(RunMode::InPlace).destination_for(live, rel), live);
        assert_eq!(
            TextureStore::new(out_mode()).destination_for(live, rel),
            Path::new("/out/ui/icon.png")
        );
    }

    #[tokio::test]
    async fn in_place_prepare_backs_up_once() {
        let dir = TempDir::new().unwrap();
        let live = dir.path().join("icon.png");
        std::fs::write(&live, b"original pixels").unwrap();
        let store = TextureStore::new(RunMode::InPlace);

        let first = store.prepare(&live, Path::new("icon.png"), false).await.unwrap();
        assert_eq!(first.state, SourceState::FirstRun);
        assert_eq!(first.source, dir.path().join(".originals/icon.png"));
        assert_eq!(first.destination, live);
        assert_eq!(std::fs::read(&first.source).unwrap(), b"original pixels");

        std::fs::write(&live, b"optimized").unwrap();
        let second = store.prepare(&live, Path::new("icon.png"), false).await.unwrap();
        assert_eq!(second.state, SourceState::Reoptimization);
        assert_eq!(std::fs::read(&second.source).unwrap(), b"original pixels");
    }

    #[tokio::test]
    async fn failed_backup_is_not_mistaken_for_pristine_copy() {
        let dir = TempDir::new().unwrap();
        let live = dir.path().join("gone.png");
        let store = TextureStore::new(RunMode::InPlace);

        assert!(store.prepare(&live, Path::new("gone.png"), false).await.is_err());
        let backup_dir = dir.path().join(BACKUP_DIR_NAME);
        let leftovers = std::fs::read_dir(&backup_dir).map(|d| d.count()).unwrap_or(0);
        assert_eq!(leftovers, 0);

        // Once the live file shows up, the next run still takes a fresh backup.
        std::fs::write(&live, b"late pixels").unwrap();
        let prepared = store.prepare(&live, Path::new("gone.png"), false).await.unwrap();
        assert_eq!(prepared.state, SourceState::FirstRun);
        assert_eq!(std::fs::read(&prepared.source).unwrap(), b"late pixels");
    }

    #[tokio::test]
    async fn output_mode_never_writes_into_input_tree() {
        let dir = TempDir::new().unwrap();
        let live = dir.path().join("bg.jpg");
        std::fs::write(&live, b"jpeg").unwrap();
        let store = TextureStore::new(RunMode::OutputDirectory(dir.path().join("dist")));

        let prepared = store.prepare(&live, Path::new("bg.jpg"), false).await.unwrap();
        assert_eq!(prepared.source, live);
        assert_eq!(prepared.destination, dir.path().join("dist/bg.jpg"));
        assert!(!dir.path().join(BACKUP_DIR_NAME).exists());
    }
}
