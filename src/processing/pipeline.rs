//! Single-texture pipeline: read → decode → plan → resize → encode → write.
//!
//! Codec work runs inside `tokio::task::spawn_blocking` so the async runtime is
//! never blocked by decoding or encoding.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::core::{
    Dimensions, ImageStats, OptimizationResult, ResolvedSettings, TextureTask, reduction_percent,
};
use crate::processing::codec::TextureCodec;
use crate::processing::planner::{plan, resize_bounds};
use crate::utils::{
    OptimizerError, OptimizerResult, TextureFormat, extract_filename, format_from_extension,
    write_file,
};

/// What the blocking half of the pipeline hands back.
struct Transcoded {
    format: TextureFormat,
    original: Dimensions,
    planned: Dimensions,
    optimized: Dimensions,
    bytes: Vec<u8>,
}

/// Optimizes one texture task.
///
/// Never fails: any read, decode, resize, encode or write error is folded into a
/// result with `success = false` and zeroed stats.
pub async fn optimize_texture(codec: Arc<dyn TextureCodec>, task: &TextureTask) -> OptimizationResult {
    let start = Instant::now();

    match run(codec, task).await {
        Ok((original, optimized, format)) => {
            let reduction = reduction_percent(original.bytes, optimized.bytes);
            debug!(
                "'{}' → {} bytes saved ({:.1}%)",
                extract_filename(&task.texture_path),
                original.bytes as i64 - optimized.bytes as i64,
                reduction
            );

            OptimizationResult {
                success: true,
                input_path: task.texture_path.clone(),
                source_path: task.source_path.clone(),
                output_path: Some(task.output_path.clone()),
                format: Some(format),
                original,
                optimized,
                reduction_percent: reduction,
                settings: task.settings,
                custom_settings: task.custom_settings,
                source_state: task.source_state,
                duration: start.elapsed(),
                error: None,
            }
        }
        Err(e) => {
            let error_msg = e.to_string();
            warn!("Texture optimization failed for {}: {}", task.texture_path.display(), error_msg);
            failed_result(task, error_msg, start)
        }
    }
}

/// Optimizes `source` into `destination` outside of any batch.
pub async fn optimize_file(
    codec: Arc<dyn TextureCodec>,
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    settings: ResolvedSettings,
) -> OptimizationResult {
    let task = TextureTask::standalone(source.as_ref(), destination.as_ref(), settings);
    optimize_texture(codec, &task).await
}

/// Builds the result for a task that failed before or during processing.
pub fn failed_result(task: &TextureTask, error: String, start: Instant) -> OptimizationResult {
    OptimizationResult {
        success: false,
        input_path: task.texture_path.clone(),
        source_path: task.source_path.clone(),
        output_path: None,
        format: format_from_extension(&task.texture_path).ok(),
        original: ImageStats::default(),
        optimized: ImageStats::default(),
        reduction_percent: 0.0,
        settings: task.settings,
        custom_settings: task.custom_settings,
        source_state: task.source_state,
        duration: start.elapsed(),
        error: Some(error),
    }
}

async fn run(
    codec: Arc<dyn TextureCodec>,
    task: &TextureTask,
) -> OptimizerResult<(ImageStats, ImageStats, TextureFormat)> {
    let input = tokio::fs::read(&task.source_path).await.map_err(|e| {
        OptimizerError::io(format!("Cannot read {}: {e}", task.source_path.display()))
    })?;
    let original_bytes = input.len() as u64;
    let settings = task.settings;

    let transcoded = tokio::task::spawn_blocking(move || transcode(codec.as_ref(), &input, settings))
        .await
        .map_err(|e| OptimizerError::processing(format!("Task panicked: {e}")))??;

    debug!(
        "Loaded '{}': {} {}, planned {} → {}",
        extract_filename(&task.source_path),
        transcoded.format,
        transcoded.original,
        transcoded.planned,
        transcoded.optimized
    );

    write_file(&task.output_path, &transcoded.bytes).await?;

    Ok((
        ImageStats::new(transcoded.original, original_bytes),
        ImageStats::new(transcoded.optimized, transcoded.bytes.len() as u64),
        transcoded.format,
    ))
}

// ── Blocking image processing (runs on tokio's blocking thread pool) ──────────────────

fn transcode(
    codec: &dyn TextureCodec,
    input: &[u8],
    settings: ResolvedSettings,
) -> OptimizerResult<Transcoded> {
    let decoded = codec.decode(input)?;
    let format = decoded.format;
    let original = decoded.dimensions();

    let planned = plan(original.width, original.height, settings.max_size);
    let resized = codec.resize(decoded, resize_bounds(original, planned))?;
    let optimized = resized.dimensions();

    let bytes = codec.encode(&resized, format, settings.quality)?;

    Ok(Transcoded {
        format,
        original,
        planned,
        optimized,
        bytes,
    })
}
