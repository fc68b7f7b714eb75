pub mod batch;
pub mod codec;
pub mod pipeline;
pub mod planner;
pub mod store;

pub use batch::{BatchOptions, BatchProcessor, BatchProgress, BatchSummary};
pub use codec::{DecodedTexture, ImageCodec, TextureCodec};
pub use pipeline::{optimize_file, optimize_texture};
pub use planner::plan;
pub use store::{BACKUP_DIR_NAME, RunMode, TextureStore};
