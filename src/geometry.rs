// Landmark geometry: turns a detected body into one placement box per garment category.
// All constants live in the per-category parameter records below so they can be tuned
// from the config file.

use crate::landmarks::{Landmark, LandmarkSet, PixelPoint};
use crate::types::{AnchorBox, Category};
use serde::{Deserialize, Serialize};

/// Hats: sized from the ear span, sitting on top of the ears.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadParams {
    pub scale: f64, // box width = ear distance * scale
    pub ratio: f64, // box height = width * ratio
}

impl Default for HeadParams {
    fn default() -> Self {
        Self { scale: 2.8, ratio: 0.5 }
    }
}

/// Necklaces/collars: sized from the mouth width, centred under the nose.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeckParams {
    pub scale: f64,
    pub ratio: f64,
    /// Top edge = shoulder_y - nose_y * vertical_bias.
    /// Empirical; mixes two absolute coordinates. Kept as-is until recalibrated.
    pub vertical_bias: f64,
}

impl Default for NeckParams {
    fn default() -> Self {
        Self { scale: 3.0, ratio: 1.0, vertical_bias: 0.24 }
    }
}

/// Shirts: shoulder span plus margins, shoulder-to-hip height plus margins.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorsoParams {
    pub margin_w: f64,
    pub margin_h: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for TorsoParams {
    fn default() -> Self {
        Self { margin_w: 120.0, margin_h: 85.0, offset_x: 60.0, offset_y: 45.0 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub head: HeadParams,
    pub neck: NeckParams,
    pub torso: TorsoParams,
}

impl Category {
    /// Landmarks the placement rule for this category reads.
    pub fn required_landmarks(self) -> &'static [Landmark] {
        match self {
            Category::Head => &[Landmark::LeftEar, Landmark::RightEar],
            Category::Neck => &[
                Landmark::MouthLeft,
                Landmark::MouthRight,
                Landmark::Nose,
                Landmark::LeftShoulder,
            ],
            Category::Torso => &[
                Landmark::LeftShoulder,
                Landmark::RightShoulder,
                Landmark::LeftHip,
            ],
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct GeometryResolver {
    pub params: GeometryConfig,
    /// Landmarks reported below this visibility count as missing.
    pub min_visibility: f64,
}

impl GeometryResolver {
    pub fn new(params: GeometryConfig, min_visibility: f64) -> Self {
        Self { params, min_visibility }
    }

    /// Placement box for `category`, or None when there is no body or a landmark
    /// the category needs was not detected. No clamping to the frame happens here.
    pub fn resolve(
        &self,
        landmarks: Option<&LandmarkSet>,
        category: Category,
        frame_width: usize,
        frame_height: usize,
    ) -> Option<AnchorBox> {
        let landmarks = landmarks?;
        let px = |lm: Landmark| {
            landmarks
                .get_visible(lm, self.min_visibility)
                .map(|p| p.to_pixels(frame_width, frame_height))
        };

        let b = match category {
            Category::Head => head_box(
                &HeadAnchors { ear_l: px(Landmark::LeftEar)?, ear_r: px(Landmark::RightEar)? },
                &self.params.head,
            ),
            Category::Neck => neck_box(
                &NeckAnchors {
                    mouth_l: px(Landmark::MouthLeft)?,
                    mouth_r: px(Landmark::MouthRight)?,
                    nose: px(Landmark::Nose)?,
                    shoulder_l: px(Landmark::LeftShoulder)?,
                },
                &self.params.neck,
            ),
            Category::Torso => torso_box(
                &TorsoAnchors {
                    shoulder_l: px(Landmark::LeftShoulder)?,
                    shoulder_r: px(Landmark::RightShoulder)?,
                    hip_l: px(Landmark::LeftHip)?,
                },
                &self.params.torso,
            ),
        };
        log::trace!("resolve {category}: {b:?}");
        Some(b)
    }
}

// Landmarks each rule reads, already in frame pixels.
struct HeadAnchors {
    ear_l: PixelPoint,
    ear_r: PixelPoint,
}

struct NeckAnchors {
    mouth_l: PixelPoint,
    mouth_r: PixelPoint,
    nose: PixelPoint,
    shoulder_l: PixelPoint,
}

struct TorsoAnchors {
    shoulder_l: PixelPoint,
    shoulder_r: PixelPoint,
    hip_l: PixelPoint,
}

// Offsets are computed in f64 and only then cast; `as i32` saturates, so
// wildly out-of-range landmarks give huge boxes instead of overflowing.

fn head_box(a: &HeadAnchors, p: &HeadParams) -> AnchorBox {
    let center_x = ((a.ear_l.x + a.ear_r.x) / 2.0).floor();
    let ear_dist = a.ear_r.dist(&a.ear_l);
    let width = (ear_dist * p.scale) as i32;
    let height = (width as f64 * p.ratio) as i32;

    AnchorBox {
        origin_x: (center_x - (width as f64 / 2.0).floor()) as i32,
        origin_y: (a.ear_l.y - height as f64).floor() as i32,
        width,
        height,
    }
}

/// Origins truncate toward zero, like the integer cast the rule was tuned with.
fn neck_box(a: &NeckAnchors, p: &NeckParams) -> AnchorBox {
    let width = (a.mouth_r.dist(&a.mouth_l) * p.scale) as i32;
    let height = (width as f64 * p.ratio) as i32;

    AnchorBox {
        origin_x: (a.nose.x - width as f64 / 2.0).trunc() as i32,
        origin_y: (a.shoulder_l.y - a.nose.y * p.vertical_bias).trunc() as i32,
        width,
        height,
    }
}

fn torso_box(a: &TorsoAnchors, p: &TorsoParams) -> AnchorBox {
    let (sh_l, sh_r) = (a.shoulder_l, a.shoulder_r);
    let width = (sh_r.dist(&sh_l) + p.margin_w) as i32;
    let height = (a.hip_l.dist(&sh_l) + p.margin_h) as i32;

    AnchorBox {
        origin_x: (sh_l.x.min(sh_r.x) - p.offset_x).floor() as i32,
        origin_y: (sh_l.y.min(sh_r.y) - p.offset_y).floor() as i32,
        width,
        height,
    }
}
