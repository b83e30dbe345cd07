// Pose collaborator: something that looks at a frame and reports body landmarks.
// The estimator itself is outside this crate; `ReplayPose` plays back landmarks
// recorded by one (JSON Lines, one frame per line), `NoPose` never sees anyone.

use crate::error::Error;
use crate::landmarks::LandmarkSet;
use crate::types::FrameBuffer;
use std::fs;
use std::path::Path;

pub trait PoseEstimator {
    /// Landmarks for this frame, or None when nobody is in view.
    fn estimate(&mut self, frame: &FrameBuffer) -> Option<LandmarkSet>;
}

/// Always reports "no body": the mirror shows the plain camera feed.
pub struct NoPose;

impl PoseEstimator for NoPose {
    fn estimate(&mut self, _frame: &FrameBuffer) -> Option<LandmarkSet> {
        None
    }
}

/// Recorded landmarks, handed out one line per frame.
///
/// Each non-blank line is either `null` (no body in that frame) or an object mapping
/// snake_case landmark names to `{"x": .., "y": .., "visibility": ..}`.
pub struct ReplayPose {
    frames: Vec<Option<LandmarkSet>>,
    cursor: usize,
    looping: bool,
}

impl ReplayPose {
    pub fn open(path: &Path, looping: bool) -> Result<Self, Error> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Landmarks(format!("{}: {e}", path.display())))?;
        let replay = Self::from_lines(&text, looping);
        log::info!("Replaying {} landmark frame(s) from {}", replay.len(), path.display());
        Ok(replay)
    }

    /// Parse JSON Lines. A malformed line becomes a "no body" frame.
    pub fn from_lines(text: &str, looping: bool) -> Self {
        let frames = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| match serde_json::from_str::<Option<LandmarkSet>>(line) {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("Landmark line {} unreadable ({e}); treating as no body", n + 1);
                    None
                }
            })
            .collect();
        Self { frames, cursor: 0, looping }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl PoseEstimator for ReplayPose {
    fn estimate(&mut self, _frame: &FrameBuffer) -> Option<LandmarkSet> {
        if self.frames.is_empty() { return None; }
        if self.cursor >= self.frames.len() {
            if !self.looping { return None; }
            self.cursor = 0;
        }
        let out = self.frames[self.cursor].clone();
        self.cursor += 1;
        out
    }
}
