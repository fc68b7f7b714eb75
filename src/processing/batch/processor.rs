use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;
use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::config::TextureConfig;
use crate::core::{OptimizationResult, SourceState, TextureTask};
use crate::processing::batch::DiscoveredTexture;
use crate::processing::codec::TextureCodec;
use crate::processing::pipeline::{failed_result, optimize_texture};
use crate::processing::store::TextureStore;

/// Represents the progress of a batch processing operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchProgress {
    pub total_files: usize,
    pub processed_files: usize,
    pub current_chunk: usize,
    pub total_chunks: usize,
    pub failed_files: usize,
}

/// Handles batch processing of texture optimization tasks.
///
/// Files are processed in chunks of `concurrency`. Every file in a chunk runs
/// concurrently, and the next chunk starts only after the whole previous chunk
/// has finished, which bounds how many decoded images are alive at once.
pub struct BatchProcessor {
    chunk_size: usize,
    config: Arc<TextureConfig>,
    store: TextureStore,
    codec: Arc<dyn TextureCodec>,
}

impl BatchProcessor {
    pub fn new(
        config: Arc<TextureConfig>,
        store: TextureStore,
        codec: Arc<dyn TextureCodec>,
        concurrency: NonZeroUsize,
    ) -> Self {
        debug!("Creating BatchProcessor with chunk size of {}", concurrency);
        Self {
            chunk_size: concurrency.get(),
            config,
            store,
            codec,
        }
    }

    /// Resolves settings, prepares the source of truth, and runs the pipeline for one file.
    async fn process_texture(&self, texture: &DiscoveredTexture) -> OptimizationResult {
        let start = Instant::now();
        let settings = self.config.resolve_settings(&texture.live_path);
        let custom_settings = self.config.has_custom_settings(&texture.live_path);

        match self
            .store
            .prepare(&texture.live_path, &texture.relative_path, texture.backup_only)
            .await
        {
            Ok(prepared) => {
                let task = TextureTask {
                    texture_path: texture.live_path.clone(),
                    source_path: prepared.source,
                    output_path: prepared.destination,
                    settings,
                    custom_settings,
                    source_state: prepared.state,
                };
                optimize_texture(Arc::clone(&self.codec), &task).await
            }
            Err(e) => {
                warn!("Cannot prepare {}: {}", texture.live_path.display(), e);
                let task = TextureTask {
                    texture_path: texture.live_path.clone(),
                    source_path: texture.live_path.clone(),
                    output_path: self.store.destination_for(&texture.live_path, &texture.relative_path),
                    settings,
                    custom_settings,
                    source_state: if texture.backup_only {
                        SourceState::BackupOnly
                    } else {
                        SourceState::FirstRun
                    },
                };
                failed_result(&task, e.to_string(), start)
            }
        }
    }

    /// Processes every texture and returns one result per texture, in input order.
    ///
    /// A failing file never stops the batch.
    pub async fn process_batch(
        &self,
        textures: &[DiscoveredTexture],
        progress_callback: impl Fn(BatchProgress),
    ) -> Vec<OptimizationResult> {
        let total_files = textures.len();
        let total_chunks = total_files.div_ceil(self.chunk_size);
        info!("Processing {} textures in {} chunks", total_files, total_chunks);

        let mut results = Vec::with_capacity(total_files);
        let mut failed_files = 0;

        for (chunk_index, chunk) in textures.chunks(self.chunk_size).enumerate() {
            // Only log at important milestones to reduce noise
            if chunk_index == 0 || chunk_index + 1 == total_chunks || chunk_index % 5 == 0 {
                debug!("Processing chunk {}/{}", chunk_index + 1, total_chunks);
            }

            let chunk_results = join_all(chunk.iter().map(|t| self.process_texture(t))).await;
            failed_files += chunk_results.iter().filter(|r| !r.success).count();
            results.extend(chunk_results);

            progress_callback(BatchProgress {
                total_files,
                processed_files: results.len(),
                current_chunk: chunk_index + 1,
                total_chunks,
                failed_files,
            });
        }

        if failed_files > 0 {
            warn!(
                "Batch processing completed with {} failed textures out of {}",
                failed_files, total_files
            );
        } else {
            info!("Batch processing completed successfully: {} textures processed", results.len());
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use crate::core::{Dimensions, Quality};
    use crate::processing::codec::DecodedTexture;
    use crate::processing::store::RunMode;
    use crate::utils::{OptimizerError, OptimizerResult, TextureFormat};
    use image::DynamicImage;
    use tempfile::TempDir;

    /// Codec that records peak concurrency and fails on "bad" payloads.
    #[derive(Default)]
    struct CountingCodec {
        active: AtomicUsize,
        peak: AtomicUsize,
    }

    impl TextureCodec for CountingCodec {
        fn decode(&self, bytes: &[u8]) -> OptimizerResult<DecodedTexture> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            self.active.fetch_sub(1, Ordering::SeqCst);

            if bytes == b"bad" {
                return Err(OptimizerError::codec("corrupt"));
            }
            Ok(DecodedTexture {
                image: DynamicImage::new_rgb8(100, 100),
                format: TextureFormat::PNG,
            })
        }

        fn resize(&self, texture: DecodedTexture, _bounds: Dimensions) -> OptimizerResult<DecodedTexture> {
            Ok(texture)
        }

        fn encode(&self, _t: &DecodedTexture, _f: TextureFormat, _q: Quality) -> OptimizerResult<Vec<u8>> {
            Ok(b"ok".to_vec())
        }
    }

    fn config() -> Arc<TextureConfig> {
        Arc::new(
            TextureConfig::from_json(
                r#"{ "defaultSettings": { "maxSize": 128, "quality": 70 },
                     "textures": [{ "name": "t3", "useDefault": false, "maxSize": 64 }] }"#,
            )
            .unwrap(),
        )
    }

    fn textures(dir: &TempDir, count: usize, bad: usize) -> Vec<DiscoveredTexture> {
        (0..count)
            .map(|i| {
                let name = format!("t{i}.png");
                let live = dir.path().join(&name);
                std::fs::write(&live, if i == bad { &b"bad"[..] } else { &b"good"[..] }).unwrap();
                DiscoveredTexture {
                    live_path: live,
                    relative_path: PathBuf::from(name),
                    backup_only: false,
                }
            })
            .collect()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn chunks_bound_concurrency_and_keep_order() {
        let dir = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let input = textures(&dir, 7, 2);
        let codec = Arc::new(CountingCodec::default());
        let processor = BatchProcessor::new(
            config(),
            TextureStore::new(RunMode::OutputDirectory(out.path().to_path_buf())),
            codec.clone(),
            NonZeroUsize::new(3).unwrap(),
        );

        let progress = Mutex::new(Vec::new());
        let results = processor
            .process_batch(&input, |p| progress.lock().unwrap().push(p))
            .await;

        assert_eq!(results.len(), 7);
        for (texture, result) in input.iter().zip(&results) {
            assert_eq!(result.input_path, texture.live_path);
        }
        assert!(!results[2].success);
        assert_eq!(results.iter().filter(|r| r.success).count(), 6);
        assert!(codec.peak.load(Ordering::SeqCst) <= 3);

        assert!(results[3].custom_settings);
        assert_eq!(results[3].settings.max_size.pixels(), 64);
        assert_eq!(results[0].settings.max_size.pixels(), 128);

        let progress = progress.into_inner().unwrap();
        assert_eq!(progress.len(), 3);
        assert_eq!(progress[0].processed_files, 3);
        assert_eq!(progress[2].processed_files, 7);
        assert_eq!(progress[2].failed_files, 1);
        assert_eq!(progress[2].total_chunks, 3);
    }
}
