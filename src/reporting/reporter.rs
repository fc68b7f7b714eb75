use std::fmt;
use crate::commands::BatchReport;
use crate::processing::store::RunMode;
use crate::utils::extract_filename;

/// Human-readable rendering of a [`BatchReport`].
pub struct SummaryReporter<'a> {
    report: &'a BatchReport,
    verbose: bool,
}

impl<'a> SummaryReporter<'a> {
    pub fn new(report: &'a BatchReport, verbose: bool) -> Self {
        Self { report, verbose }
    }

    pub fn format_bytes(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.2} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.2} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.2} KB", bytes as f64 / KB as f64)
        } else {
            format!("{} B", bytes)
        }
    }
}

impl fmt::Display for SummaryReporter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.report.summary;

        writeln!(f, "=== Texture Optimization Report ===")?;
        match &self.report.mode {
            RunMode::InPlace => writeln!(f, "Mode: in place")?,
            RunMode::OutputDirectory(root) => writeln!(f, "Mode: output to {}", root.display())?,
        }
        writeln!(f)?;

        if self.verbose {
            writeln!(f, "Textures:")?;
            for r in &self.report.results {
                let name = extract_filename(&r.input_path);
                if r.success {
                    writeln!(
                        f,
                        "  └── {name}: {}×{} → {}×{}, {} → {} ({:.1}%){}",
                        r.original.width,
                        r.original.height,
                        r.optimized.width,
                        r.optimized.height,
                        Self::format_bytes(r.original.bytes),
                        Self::format_bytes(r.optimized.bytes),
                        r.reduction_percent,
                        if r.source_state.is_reoptimization() { " [from backup]" } else { "" },
                    )?;
                } else {
                    writeln!(f, "  └── {name}: FAILED: {}", r.error.as_deref().unwrap_or("unknown error"))?;
                }
            }
            writeln!(f)?;
        }

        writeln!(f, "Results:")?;
        writeln!(f, "- Processed: {} ({} ok, {} failed)", summary.total, summary.succeeded, summary.failed)?;
        writeln!(f, "- Settings: {} custom, {} default", summary.custom_settings, summary.default_settings)?;
        writeln!(f, "- Re-optimized from backup: {}", summary.reoptimized)?;
        writeln!(f, "- Average Processing Time: {:.1} ms/texture", summary.average_duration_ms)?;
        writeln!(f)?;

        writeln!(f, "Size Reductions:")?;
        let saved = summary.saved_bytes();
        writeln!(
            f,
            "  └── Total: {} → {} ({}{} {}, {:.1}%)",
            Self::format_bytes(summary.total_original_bytes),
            Self::format_bytes(summary.total_optimized_bytes),
            if saved < 0 { "+" } else { "" },
            Self::format_bytes(saved.unsigned_abs()),
            if saved < 0 { "grown" } else { "saved" },
            summary.saved_percent.abs()
        )?;
        for (format, breakdown) in &summary.by_format {
            writeln!(
                f,
                "  └── {format}: {} files, {} → {}",
                breakdown.count,
                Self::format_bytes(breakdown.original_bytes),
                Self::format_bytes(breakdown.optimized_bytes)
            )?;
        }

        if !summary.by_max_size.is_empty() {
            writeln!(f)?;
            writeln!(f, "Max Size Distribution:")?;
            for (size, count) in &summary.by_max_size {
                writeln!(f, "  └── {size}px: {count}")?;
            }
        }

        Ok(())
    }
}
