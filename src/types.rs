// Core types shared by the resolver, the compositor and the window.

use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// Black frame of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Pack an RGB image (camera frame or still picture) into 0x00RRGGBB pixels.
    pub fn from_rgb_image(img: &RgbImage) -> Self {
        let (w, h) = img.dimensions();
        let mut pixels = Vec::with_capacity((w as usize) * (h as usize));
        for pixel in img.pixels() {
            pixels.push(pack_rgb(pixel[0], pixel[1], pixel[2]));
        }
        Self { width: w as usize, height: h as usize, pixels }
    }

    /// RGB at (x,y); None outside the frame.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<(u8, u8, u8)> {
        self.index(x, y).map(|idx| unpack_rgb(self.pixels[idx]))
    }

    /// Write RGB at (x,y); silently ignored outside the frame.
    #[inline]
    pub fn set(&mut self, x: i64, y: i64, rgb: (u8, u8, u8)) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = pack_rgb(rgb.0, rgb.1, rgb.2);
        }
    }

    pub fn fill(&mut self, color: u32) {
        for p in &mut self.pixels { *p = color; }
    }

    /// Flip left/right in place, so the screen behaves like a mirror.
    pub fn mirror_horizontal(&mut self) {
        if self.width == 0 { return; }
        for row in self.pixels.chunks_exact_mut(self.width) {
            row.reverse();
        }
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 { return None; }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height { return None; }
        Some(y * self.width + x)
    }
}

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[inline]
pub fn unpack_rgb(px: u32) -> (u8, u8, u8) {
    (((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8)
}

/// Where a garment is drawn this frame, in frame pixels.
/// Width/height can come out zero or negative from noisy landmarks;
/// the compositor treats that as "draw nothing".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnchorBox {
    pub origin_x: i32,
    pub origin_y: i32,
    pub width: i32,
    pub height: i32,
}

impl AnchorBox {
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Garment slot. Each one has its own asset list and placement rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Head,
    Neck,
    Torso,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Head, Category::Neck, Category::Torso];
    pub const COUNT: usize = Self::ALL.len();

    /// Slot in per-category arrays.
    #[inline]
    pub fn slot(self) -> usize {
        match self {
            Category::Head => 0,
            Category::Neck => 1,
            Category::Torso => 2,
        }
    }

    /// Number keys pick a category directly.
    pub fn for_key(key: char) -> Option<Category> {
        match key {
            '1' => Some(Category::Head),
            '2' => Some(Category::Neck),
            '3' => Some(Category::Torso),
            _ => None,
        }
    }

    /// Subdirectory name under the asset dir.
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Head => "head",
            Category::Neck => "neck",
            Category::Torso => "torso",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Head => "HEAD",
            Category::Neck => "NECK",
            Category::Torso => "TORSO",
        };
        f.write_str(s)
    }
}
