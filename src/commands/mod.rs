//! Entry points for callers:
//! - [`optimize_textures`]: Optimize every texture under a base path
//! - [`list_textures`]: List the names a config document overrides

mod optimize;

pub use optimize::*;
