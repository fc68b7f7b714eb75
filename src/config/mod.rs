//! Texture configuration: document parsing and per-texture settings resolution.

mod document;
mod resolver;

pub use document::{RawSettings, RawTextureEntry, TextureConfigDocument, TextureEntry, ValidatedDocument};
pub use resolver::{TextureConfig, normalize_name, texture_identity};
