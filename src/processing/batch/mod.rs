mod config;
mod discovery;
mod metrics;
mod processor;

pub use config::BatchOptions;
pub use discovery::{
    DiscoveredTexture, PathFilter, backup_exclude_pattern, default_include_patterns, discover,
};
pub use metrics::{BatchSummary, FormatBreakdown};
pub use processor::{BatchProcessor, BatchProgress};
