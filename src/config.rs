// JSON config file. Every section falls back to defaults field-by-field,
// so a file only needs the keys you want to change.

use crate::assets::scan_dir;
use crate::composite::Interpolation;
use crate::error::Error;
use crate::geometry::GeometryConfig;
use crate::types::Category;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub camera: CameraConfig,
    pub window: WindowConfig,
    pub overlay: OverlayConfig,
    pub geometry: GeometryConfig,
    pub assets: AssetConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub index: u32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Flip frames left/right before pose estimation, like a real mirror.
    pub mirror: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { index: 0, width: 640, height: 480, fps: 30, mirror: false }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub show_hud: bool,
    pub splash_secs: f32,
    pub splash_text: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Smart Mirror".to_string(),
            show_hud: false,
            splash_secs: 2.0,
            splash_text: "MIRROR STARTING...".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub default_category: Category,
    pub interpolation: Interpolation,
    pub min_visibility: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            default_category: Category::Torso,
            interpolation: Interpolation::Linear,
            min_visibility: 0.0,
        }
    }
}

/// Where garment images come from. `dir` is scanned first (`dir/head`, `dir/neck`,
/// `dir/torso`), then the explicit lists are appended.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub dir: Option<PathBuf>,
    pub head: Vec<PathBuf>,
    pub neck: Vec<PathBuf>,
    pub torso: Vec<PathBuf>,
}

impl AssetConfig {
    pub fn paths_for(&self, category: Category) -> Vec<PathBuf> {
        let mut paths = match &self.dir {
            Some(dir) => scan_dir(&dir.join(category.dir_name())),
            None => Vec::new(),
        };
        let explicit = match category {
            Category::Head => &self.head,
            Category::Neck => &self.neck,
            Category::Torso => &self.torso,
        };
        paths.extend(explicit.iter().cloned());
        paths
    }
}

impl AppConfig {
    pub const DEFAULT_PATH: &'static str = "mirror.json";

    /// Read `path`. A missing file means defaults; a broken one is an error.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str::<AppConfig>(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
