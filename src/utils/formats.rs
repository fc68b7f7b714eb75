use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use crate::utils::OptimizerError;

/// Texture file formats the optimizer reads and writes.
///
/// Output always keeps the input format; there is no conversion between variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureFormat {
    JPEG,
    PNG,
    WebP,
}

impl TextureFormat {
    pub const ALL: [TextureFormat; 3] = [Self::JPEG, Self::PNG, Self::WebP];

    /// Get file extensions associated with this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::JPEG => &["jpg", "jpeg"],
            Self::PNG => &["png"],
            Self::WebP => &["webp"],
        }
    }

    /// Every extension of every supported format.
    pub fn all_extensions() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().flat_map(|f| f.extensions().iter().copied())
    }
}

impl fmt::Display for TextureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::JPEG => "jpeg",
            Self::PNG => "png",
            Self::WebP => "webp",
        };
        f.write_str(name)
    }
}

impl FromStr for TextureFormat {
    type Err = OptimizerError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::JPEG),
            "png" => Ok(Self::PNG),
            "webp" => Ok(Self::WebP),
            _ => Err(OptimizerError::format(format!(
                "Unsupported texture format: {}", ext
            ))),
        }
    }
}

impl TryFrom<image::ImageFormat> for TextureFormat {
    type Error = OptimizerError;

    fn try_from(format: image::ImageFormat) -> Result<Self, Self::Error> {
        match format {
            image::ImageFormat::Jpeg => Ok(Self::JPEG),
            image::ImageFormat::Png => Ok(Self::PNG),
            image::ImageFormat::WebP => Ok(Self::WebP),
            other => Err(OptimizerError::format(format!(
                "Unsupported texture format: {:?}", other
            ))),
        }
    }
}

/// Get format from file extension
pub fn format_from_extension(path: impl AsRef<Path>) -> Result<TextureFormat, OptimizerError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| OptimizerError::format(
            format!("File has no extension: {}", path.display())
        ))?;

    TextureFormat::from_str(ext)
}

/// Whether `path` carries an extension of a supported texture format.
pub fn is_supported_texture(path: impl AsRef<Path>) -> bool {
    format_from_extension(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_lookup_is_case_insensitive() {
        assert_eq!(format_from_extension("a/b/Hero.PNG").unwrap(), TextureFormat::PNG);
        assert_eq!(format_from_extension("bg.JPG").unwrap(), TextureFormat::JPEG);
        assert_eq!(format_from_extension("bg.jpeg").unwrap(), TextureFormat::JPEG);
        assert_eq!(format_from_extension("fx.webp").unwrap(), TextureFormat::WebP);
    }

    #[test]
    fn unsupported_and_missing_extensions_fail() {
        assert!(format_from_extension("model.gltf").is_err());
        assert!(format_from_extension("README").is_err());
        assert!(!is_supported_texture("atlas.tga"));
    }
}
