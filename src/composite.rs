// Alpha compositor: scale a garment to its anchor box and blend it over the frame.
// Plain source-over per channel: out = a*garment + (1-a)*frame, a = alpha/255.
// No gamma handling here (unlike a brush blend): garments must look exactly as authored.

use crate::assets::GarmentAsset;
use crate::types::{pack_rgb, unpack_rgb, AnchorBox, FrameBuffer};
use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};

/// Resize filter used for both color and alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    Nearest,
    #[default]
    Linear,
    Cubic,
    Lanczos,
}

impl From<Interpolation> for FilterType {
    fn from(i: Interpolation) -> Self {
        match i {
            Interpolation::Nearest => FilterType::Nearest,
            Interpolation::Linear => FilterType::Triangle,
            Interpolation::Cubic => FilterType::CatmullRom,
            Interpolation::Lanczos => FilterType::Lanczos3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Compositor {
    pub interpolation: Interpolation,
}

impl Compositor {
    pub fn new(interpolation: Interpolation) -> Self {
        Self { interpolation }
    }

    /// Draw `asset` into `frame` at `target`. Returns how many frame pixels were blended.
    /// Degenerate boxes and boxes entirely off-screen leave the frame untouched;
    /// garment pixels that fall outside the frame are dropped (no wraparound).
    ///
    /// Blending is not additive in the "stacking" sense you might expect: the same
    /// garment drawn twice at the same spot blends over the already-blended pixels,
    /// so semi-transparent areas get denser while opaque areas stay identical.
    pub fn composite(&self, frame: &mut FrameBuffer, asset: &GarmentAsset, target: &AnchorBox) -> usize {
        if target.is_degenerate() {
            log::debug!("Skipping {} overlay: degenerate box {:?}", asset.category, target);
            return 0;
        }
        if asset.raster.width() == 0 || asset.raster.height() == 0 {
            return 0; // nothing to sample
        }

        // Visible part of the box, in garment coordinates.
        let (ox, oy) = (target.origin_x as i64, target.origin_y as i64);
        let (bw, bh) = (target.width as i64, target.height as i64);
        let j0 = (-ox).max(0);
        let i0 = (-oy).max(0);
        let j1 = bw.min(frame.width as i64 - ox);
        let i1 = bh.min(frame.height as i64 - oy);
        if j0 >= j1 || i0 >= i1 {
            return 0; // nothing lands on screen
        }

        // Only the visible part is resampled, so huge boxes cost no more than the frame.
        let resized = if (j0, i0, j1, i1) == (0, 0, bw, bh) {
            imageops::resize(&asset.raster, bw as u32, bh as u32, self.interpolation.into())
        } else {
            let (sw, sh) = asset.raster.dimensions();
            let (sx0, sx1) = source_span(j0, j1, bw, sw);
            let (sy0, sy1) = source_span(i0, i1, bh, sh);
            let part = imageops::crop_imm(&asset.raster, sx0, sy0, sx1 - sx0, sy1 - sy0).to_image();
            imageops::resize(&part, (j1 - j0) as u32, (i1 - i0) as u32, self.interpolation.into())
        };

        let mut blended = 0;
        for i in i0..i1 {
            let row = ((oy + i) as usize) * frame.width;
            for j in j0..j1 {
                let src = resized.get_pixel((j - j0) as u32, (i - i0) as u32);
                let a = src[3];
                if a == 0 { continue; } // fully transparent: frame stays bit-exact

                let idx = row + (ox + j) as usize;
                frame.pixels[idx] = blend_px(frame.pixels[idx], (src[0], src[1], src[2]), a);
                blended += 1;
            }
        }
        blended
    }
}

/// Garment pixels `[lo, hi)` of a box `len` wide map onto this source range.
/// Never empty, never past `src_len`.
fn source_span(lo: i64, hi: i64, len: i64, src_len: u32) -> (u32, u32) {
    let scale = src_len as f64 / len as f64;
    let start = ((lo as f64 * scale).floor() as u32).min(src_len - 1);
    let end = ((hi as f64 * scale).ceil() as u32).clamp(start + 1, src_len);
    (start, end)
}

/// Source-over one pixel. Channel results are truncated to whole values.
#[inline]
pub fn blend_px(dst: u32, src: (u8, u8, u8), alpha: u8) -> u32 {
    if alpha == u8::MAX {
        return pack_rgb(src.0, src.1, src.2);
    }
    let a = alpha as f32 / u8::MAX as f32;
    let inv = 1.0 - a;
    let (dr, dg, db) = unpack_rgb(dst);
    let mix = |s: u8, d: u8| (a * s as f32 + inv * d as f32).clamp(0.0, 255.0) as u8;
    pack_rgb(mix(src.0, dr), mix(src.1, dg), mix(src.2, db))
}
