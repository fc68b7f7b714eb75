use std::collections::BTreeMap;
use std::time::Duration;
use serde::Serialize;
use tracing::debug;
use crate::core::{MaxSize, OptimizationResult, reduction_percent};
use crate::utils::TextureFormat;

/// Per-format totals over successful results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatBreakdown {
    pub count: usize,
    pub original_bytes: u64,
    pub optimized_bytes: u64,
}

/// Aggregate view of a batch run.
///
/// Byte totals, timings and the breakdowns only count successful results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub custom_settings: usize,
    pub default_settings: usize,
    pub reoptimized: usize,
    pub total_original_bytes: u64,
    pub total_optimized_bytes: u64,
    pub saved_percent: f64,
    pub average_duration_ms: f64,
    pub by_format: BTreeMap<TextureFormat, FormatBreakdown>,
    /// Keyed by max size in pixels
    pub by_max_size: BTreeMap<u32, usize>,
}

impl BatchSummary {
    pub fn from_results(results: &[OptimizationResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };
        let mut total_duration = Duration::ZERO;

        for result in results {
            if !result.success {
                summary.failed += 1;
                continue;
            }

            summary.succeeded += 1;
            if result.custom_settings {
                summary.custom_settings += 1;
            } else {
                summary.default_settings += 1;
            }
            if result.source_state.is_reoptimization() {
                summary.reoptimized += 1;
            }

            summary.total_original_bytes += result.original.bytes;
            summary.total_optimized_bytes += result.optimized.bytes;
            total_duration += result.duration;

            if let Some(format) = result.format {
                let entry = summary.by_format.entry(format).or_default();
                entry.count += 1;
                entry.original_bytes += result.original.bytes;
                entry.optimized_bytes += result.optimized.bytes;
            }
            *summary
                .by_max_size
                .entry(MaxSize::pixels(result.settings.max_size))
                .or_default() += 1;
        }

        summary.saved_percent = reduction_percent(summary.total_original_bytes, summary.total_optimized_bytes);
        if summary.succeeded > 0 {
            summary.average_duration_ms = total_duration.as_secs_f64() * 1000.0 / summary.succeeded as f64;
        }

        debug!(
            "Summary: {}/{} succeeded, {:.1}% saved, {:.1} ms/texture",
            summary.succeeded, summary.total, summary.saved_percent, summary.average_duration_ms
        );
        summary
    }

    pub fn saved_bytes(&self) -> i64 {
        self.total_original_bytes as i64 - self.total_optimized_bytes as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use crate::core::{ImageStats, Quality, SourceState, TextureSettings};

    fn result(
        success: bool,
        format: TextureFormat,
        max_size: MaxSize,
        custom: bool,
        state: SourceState,
        bytes: (u64, u64),
        ms: u64,
    ) -> OptimizationResult {
        OptimizationResult {
            success,
            input_path: PathBuf::from("t.png"),
            source_path: PathBuf::from("t.png"),
            output_path: success.then(|| PathBuf::from("o.png")),
            format: Some(format),
            original: ImageStats { width: 100, height: 100, bytes: bytes.0 },
            optimized: ImageStats { width: 64, height: 64, bytes: bytes.1 },
            reduction_percent: reduction_percent(bytes.0, bytes.1),
            settings: TextureSettings { max_size, quality: Quality::new(80).unwrap() },
            custom_settings: custom,
            source_state: state,
            duration: Duration::from_millis(ms),
            error: (!success).then(|| "boom".to_string()),
        }
    }

    #[test]
    fn aggregates_successes_and_failures() {
        let results = vec![
            result(true, TextureFormat::PNG, MaxSize::S512, true, SourceState::FirstRun, (1000, 400), 10),
            result(true, TextureFormat::JPEG, MaxSize::S512, false, SourceState::Reoptimization, (3000, 1600), 30),
            result(true, TextureFormat::PNG, MaxSize::S1024, false, SourceState::BackupOnly, (0, 0), 20),
            result(false, TextureFormat::WebP, MaxSize::S64, false, SourceState::FirstRun, (0, 0), 5),
        ];

        let summary = BatchSummary::from_results(&results);

        assert_eq!((summary.total, summary.succeeded, summary.failed), (4, 3, 1));
        assert_eq!((summary.custom_settings, summary.default_settings), (1, 2));
        assert_eq!(summary.reoptimized, 2);
        assert_eq!(summary.total_original_bytes, 4000);
        assert_eq!(summary.total_optimized_bytes, 2000);
        assert_eq!(summary.saved_percent, 50.0);
        assert_eq!(summary.saved_bytes(), 2000);
        assert!((summary.average_duration_ms - 20.0).abs() < 1e-9);
        assert_eq!(summary.by_format[&TextureFormat::PNG].count, 2);
        assert_eq!(summary.by_format[&TextureFormat::JPEG].original_bytes, 3000);
        assert!(!summary.by_format.contains_key(&TextureFormat::WebP));
        assert_eq!(summary.by_max_size.get(&512), Some(&2));
        assert_eq!(summary.by_max_size.get(&1024), Some(&1));
        assert_eq!(summary.by_max_size.get(&64), None);
    }

    #[test]
    fn empty_run_is_all_zero() {
        let summary = BatchSummary::from_results(&[]);
        assert_eq!(summary, BatchSummary::default());
    }
}
