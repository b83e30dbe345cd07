// Garment images, grouped by category, plus the cursor that picks the one on screen.
// Images are decoded once at startup and never touched again.

use crate::config::AssetConfig;
use crate::error::Error;
use crate::selection::CategorySelection;
use crate::types::Category;
use image::RgbaImage;
use std::fs;
use std::path::{Path, PathBuf};

/// One garment: an RGBA raster (alpha = how opaque the cloth is at each pixel).
#[derive(Clone, Debug)]
pub struct GarmentAsset {
    pub category: Category,
    pub index: usize,     // position in its category's list
    pub name: String,     // file stem, for logs and the HUD
    pub raster: RgbaImage,
}

#[derive(Debug, Default)]
pub struct AssetStore {
    lists: [Vec<GarmentAsset>; Category::COUNT],
    selection: CategorySelection,
}

impl AssetStore {
    pub fn new(active: Category) -> Self {
        Self { lists: Default::default(), selection: CategorySelection::new(active) }
    }

    /// Decode every configured garment. A file that fails to load is logged and
    /// skipped; its category just ends up with fewer (maybe zero) garments.
    pub fn load(cfg: &AssetConfig, active: Category) -> Self {
        let mut store = Self::new(active);
        for category in Category::ALL {
            for path in cfg.paths_for(category) {
                match load_raster(&path) {
                    Ok(raster) => {
                        let name = path
                            .file_stem()
                            .map(|s| s.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        store.push(category, name, raster);
                    }
                    Err(e) => log::warn!("Skipping {} garment: {e}", category),
                }
            }
            log::info!("{}: {} garment(s) loaded", category, store.count(category));
        }
        store
    }

    /// Append a garment to the end of its category.
    pub fn push(&mut self, category: Category, name: impl Into<String>, raster: RgbaImage) {
        let list = &mut self.lists[category.slot()];
        let index = list.len();
        list.push(GarmentAsset { category, index, name: name.into(), raster });
    }

    pub fn count(&self, category: Category) -> usize {
        self.lists[category.slot()].len()
    }

    /// Garment currently selected in `category`; None if the category has none.
    pub fn current_asset(&self, category: Category) -> Option<&GarmentAsset> {
        self.lists[category.slot()].get(self.selection.index(category))
    }

    /// Move `category` to its next garment, wrapping around.
    pub fn advance(&mut self, category: Category) {
        self.selection.advance(category, self.count(category));
    }

    pub fn set_active_category(&mut self, category: Category) {
        self.selection.set_active(category);
    }

    pub fn active_category(&self) -> Category {
        self.selection.active()
    }

    pub fn selection(&self) -> &CategorySelection {
        &self.selection
    }
}

fn load_raster(path: &Path) -> Result<RgbaImage, Error> {
    let img = image::open(path)
        .map_err(|e| Error::AssetLoad(format!("{}: {e}", path.display())))?;
    // Images without an alpha channel come out fully opaque.
    Ok(img.to_rgba8())
}

/// Image files directly inside `dir`, sorted by file name. A missing dir is just empty.
pub fn scan_dir(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("No garments in {}: {e}", dir.display());
            return Vec::new();
        }
    };
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_image(p))
        .collect();
    paths.sort();
    paths
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "png" | "webp" | "bmp" | "jpg" | "jpeg" | "gif" | "tga"))
        .unwrap_or(false)
}
