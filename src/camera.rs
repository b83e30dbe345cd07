// Frame sources: the live camera, or a still picture for trying garments without one.
// Visual expectation: each `next_frame()` is one fresh 0x00RRGGBB buffer for the window.

use crate::error::Error;
use crate::types::FrameBuffer;
use std::path::Path;

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
        Resolution,
    },
};

pub trait FrameSource {
    /// Next frame. An error here means the source is gone and the session ends.
    fn next_frame(&mut self) -> Result<FrameBuffer, Error>;
    /// Size of the frames this source delivers.
    fn resolution(&self) -> (u32, u32);
}

// A small wrapper around nokhwa::Camera so our main loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open camera `index` near the requested resolution and start streaming.
    pub fn new(index: u32, width: u32, height: u32, fps: u32) -> Result<Self, Error> {
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            fps,
        );
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The actual stream might choose a slightly different resolution.
        let actual = cam.resolution();
        log::info!("Camera {index} streaming at {}x{}", actual.width(), actual.height());

        Ok(Self {
            cam,
            width: actual.width(),
            height: actual.height(),
        })
    }

    pub fn name(&self) -> String {
        self.cam.info().human_name()
    }
}

impl FrameSource for CameraCapture {
    fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        // Blocks until the camera has a new frame.
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        Ok(FrameBuffer::from_rgb_image(&rgb_img))
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Print the cameras nokhwa can see (for `--list`).
pub fn list_cameras() -> Result<(), Error> {
    let cameras = nokhwa::query(ApiBackend::Auto)
        .map_err(|e| Error::CameraInit(format!("Query cameras: {e}")))?;
    println!("{:<5} | {:<30} | {}", "Index", "Name", "Description");
    println!("{}", "-".repeat(60));
    for cam in cameras {
        println!("{:<5} | {:<30} | {}", cam.index(), cam.human_name(), cam.description());
    }
    Ok(())
}

/// The same picture every tick, optionally only `limit` times.
pub struct StillImage {
    frame: FrameBuffer,
    remaining: Option<usize>,
}

impl StillImage {
    pub fn open(path: &Path) -> Result<Self, Error> {
        let img = image::open(path)
            .map_err(|e| Error::CameraInit(format!("{}: {e}", path.display())))?;
        Ok(Self::new(FrameBuffer::from_rgb_image(&img.to_rgb8())))
    }

    pub fn new(frame: FrameBuffer) -> Self {
        Self { frame, remaining: None }
    }

    /// Stop (as a capture failure would) after `n` frames.
    pub fn with_limit(mut self, n: usize) -> Self {
        self.remaining = Some(n);
        self
    }
}

impl FrameSource for StillImage {
    fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        if let Some(left) = self.remaining.as_mut() {
            if *left == 0 {
                return Err(Error::CameraFrame("still image: frame limit reached".into()));
            }
            *left -= 1;
        }
        Ok(self.frame.clone())
    }

    fn resolution(&self) -> (u32, u32) {
        (self.frame.width as u32, self.frame.height as u32)
    }
}
