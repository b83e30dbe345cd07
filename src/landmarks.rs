// Body landmarks as delivered by the pose collaborator.
// Coordinates are normalized (0..1 across the frame); nothing here checks the range,
// values outside it simply land outside the frame once converted to pixels.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Named anatomical points (the 33-point full-body layout).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Landmark {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

/// One landmark: normalized position plus the model's optional visibility score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl NormalizedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, visibility: None }
    }

    /// Scale to frame pixels, rounding to the nearest pixel.
    #[inline]
    pub fn to_pixels(&self, frame_width: usize, frame_height: usize) -> PixelPoint {
        PixelPoint {
            x: (self.x * frame_width as f64).round(),
            y: (self.y * frame_height as f64).round(),
        }
    }
}

/// Landmark in pixel space (whole-pixel values held as f64 for the geometry math).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    /// Euclidean distance in pixels.
    #[inline]
    pub fn dist(&self, other: &PixelPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Every landmark the pose model found in one frame. Missing keys = not detected.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: HashMap<Landmark, NormalizedPoint>,
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, landmark: Landmark, x: f64, y: f64) -> Self {
        self.insert(landmark, NormalizedPoint::new(x, y));
        self
    }

    pub fn insert(&mut self, landmark: Landmark, point: NormalizedPoint) {
        self.points.insert(landmark, point);
    }

    pub fn get(&self, landmark: Landmark) -> Option<&NormalizedPoint> {
        self.points.get(&landmark)
    }

    /// Like `get`, but a point whose visibility score is below `min_visibility`
    /// counts as missing. Points without a score always pass.
    pub fn get_visible(&self, landmark: Landmark, min_visibility: f64) -> Option<&NormalizedPoint> {
        self.get(landmark)
            .filter(|p| p.visibility.is_none_or(|v| v >= min_visibility))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<(Landmark, NormalizedPoint)> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = (Landmark, NormalizedPoint)>>(iter: I) -> Self {
        Self { points: iter.into_iter().collect() }
    }
}
