// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod config;
pub mod processing;
pub mod commands;
pub mod reporting;

// Public exports for external consumers
pub use core::{MaxSize, OptimizationResult, Quality, ResolvedSettings, SourceState, TextureSettings, TextureTask};
pub use config::TextureConfig;
pub use processing::{BACKUP_DIR_NAME, BatchOptions, BatchSummary, RunMode, TextureCodec, plan};
pub use reporting::SummaryReporter;
pub use utils::{ConfigError, DiscoveryError, OptimizerError, OptimizerResult, TextureFormat};
pub use commands::*;
