pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;

pub use error::{ConfigError, DiscoveryError, OptimizerError, OptimizerResult};
pub use validation::{validate_defaults, validate_document};
pub use formats::{TextureFormat, format_from_extension, is_supported_texture};
pub use fs::{
    copy_verbatim,
    ensure_parent_dir,
    extract_filename,
    file_exists,
    relative_to,
    resolve_path,
    write_file,
};
