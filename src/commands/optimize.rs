//! Batch run and config listing entry points.

use std::path::Path;
use std::sync::Arc;
use serde::Serialize;
use tracing::{debug, info};
use crate::config::TextureConfig;
use crate::core::OptimizationResult;
use crate::processing::batch::{
    BatchOptions, BatchProcessor, BatchProgress, BatchSummary, DiscoveredTexture, PathFilter, discover,
};
use crate::processing::codec::{ImageCodec, TextureCodec};
use crate::processing::store::{RunMode, TextureStore};
use crate::utils::{OptimizerError, OptimizerResult, resolve_path};

/// Everything a batch run produces.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub mode: RunMode,
    /// One result per discovered texture, in discovery order
    pub results: Vec<OptimizationResult>,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }
}

/// Optimizes every texture under `options.base_path` with the default codec.
pub async fn optimize_textures(options: &BatchOptions) -> OptimizerResult<BatchReport> {
    optimize_textures_with(options, Arc::new(ImageCodec), |_| {}).await
}

/// Runs a full batch: load config, discover, process, aggregate.
///
/// Only configuration and discovery errors are returned as `Err`; both happen
/// before any file is touched. Per-file failures are reported in the results.
///
/// # Arguments
/// * `options` - Run options (paths, patterns, concurrency)
/// * `codec` - Codec doing the pixel work
/// * `progress_callback` - Called after each chunk completes
pub async fn optimize_textures_with(
    options: &BatchOptions,
    codec: Arc<dyn TextureCodec>,
    progress_callback: impl Fn(BatchProgress),
) -> OptimizerResult<BatchReport> {
    let config = Arc::new(TextureConfig::load(&options.config_path)?);

    let mode = RunMode::from_output(options.output_path.clone());
    let textures = discover_textures(options, &mode).await?;

    info!(
        "Optimizing {} textures under {} ({})",
        textures.len(),
        options.base_path.display(),
        match &mode {
            RunMode::InPlace => "in place".to_string(),
            RunMode::OutputDirectory(root) => format!("into {}", root.display()),
        }
    );

    let processor = BatchProcessor::new(config, TextureStore::new(mode.clone()), codec, options.concurrency);
    let results = processor.process_batch(&textures, progress_callback).await;
    let summary = BatchSummary::from_results(&results);

    Ok(BatchReport {
        mode,
        results,
        summary,
    })
}

/// Walks the base path on the blocking pool. In output mode, textures already
/// under the output root are dropped so a run never ingests its own output.
async fn discover_textures(options: &BatchOptions, mode: &RunMode) -> OptimizerResult<Vec<DiscoveredTexture>> {
    let filter = PathFilter::new(&options.include, &options.exclude)?;
    let base = options.base_path.clone();
    let include_backup_only = options.include_backup_only;
    let output_root = match mode {
        RunMode::InPlace => None,
        RunMode::OutputDirectory(root) => Some(root.clone()),
    };

    tokio::task::spawn_blocking(move || -> OptimizerResult<Vec<DiscoveredTexture>> {
        let mut textures = discover(&base, &filter, include_backup_only)?;

        if let Some(root) = output_root {
            let root = resolve_path(&root);
            let base = resolve_path(&base);
            let before = textures.len();
            textures.retain(|t| !base.join(&t.relative_path).starts_with(&root));
            if textures.len() != before {
                debug!("Skipped {} textures inside output root {}", before - textures.len(), root.display());
            }
        }
        Ok(textures)
    })
    .await
    .map_err(|e| OptimizerError::processing(format!("Discovery task panicked: {e}")))?
}

/// Names configured in the document at `config_path`, in document order.
pub fn list_textures(config_path: impl AsRef<Path>) -> OptimizerResult<Vec<String>> {
    let config = TextureConfig::load(config_path)?;
    Ok(config.list_configured_names().to_vec())
}
