//! Shared helpers for the integration tests: fixture textures and run options.

#![allow(dead_code)]

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use tempfile::TempDir;
use texture_optimizer_lib::BatchOptions;

/// Config used by most scenarios: `hero` gets custom settings, everything else the defaults.
pub const HERO_CONFIG: &str = r#"{
    "defaultSettings": { "maxSize": 512, "quality": 80 },
    "textures": [
        { "name": "hero", "useDefault": false, "maxSize": 1024, "quality": 90 }
    ]
}"#;

/// A noisy gradient so encoders have real work to do.
pub fn write_png(path: &Path, width: u32, height: u32) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbaImage::from_fn(width, height, |x, y| {
        let n = (x.wrapping_mul(7919) ^ y.wrapping_mul(104_729)) as u8;
        Rgba([(x % 256) as u8, (y % 256) as u8, n, 255])
    })
    .save(path)
    .unwrap();
}

pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]))
        .save(path)
        .unwrap();
}

pub fn write_config(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("texture-config.json");
    fs::write(&path, json).unwrap();
    path
}

/// A workspace with a `textures/` tree and a config next to it.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let ws = Self { dir: TempDir::new().unwrap() };
        fs::create_dir_all(ws.textures()).unwrap();
        ws
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn textures(&self) -> PathBuf {
        self.dir.path().join("textures")
    }

    pub fn options(&self, config_json: &str, output: Option<PathBuf>) -> BatchOptions {
        BatchOptions {
            base_path: self.textures(),
            output_path: output,
            config_path: write_config(self.root(), config_json),
            concurrency: NonZeroUsize::new(2).unwrap(),
            ..BatchOptions::default()
        }
    }
}
