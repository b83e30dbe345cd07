// Whole-loop checks with in-memory collaborators: no camera, no window.

use image::{Rgba, RgbaImage};
use std::collections::VecDeque;
use virtual_mirror::assets::AssetStore;
use virtual_mirror::camera::StillImage;
use virtual_mirror::composite::Compositor;
use virtual_mirror::error::Error;
use virtual_mirror::geometry::GeometryResolver;
use virtual_mirror::landmarks::{Landmark, LandmarkSet};
use virtual_mirror::orchestrator::{Display, InputEvent, Orchestrator, RenderOutcome, Shutdown};
use virtual_mirror::pose::{PoseEstimator, ReplayPose};
use virtual_mirror::types::{AnchorBox, Category, FrameBuffer};

const BACKGROUND: u32 = 0x0020_4060;

/// Records every presented frame; hands out scripted events after each one.
struct RecordingDisplay {
    presented: Vec<FrameBuffer>,
    script: VecDeque<Vec<InputEvent>>,
    close_after: Option<usize>,
}

impl RecordingDisplay {
    fn new(script: Vec<Vec<InputEvent>>) -> Self {
        Self { presented: Vec::new(), script: script.into(), close_after: None }
    }
}

impl Display for RecordingDisplay {
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Error> {
        self.presented.push(frame.clone());
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.script.pop_front().unwrap_or_default()
    }

    fn is_open(&self) -> bool {
        self.close_after.is_none_or(|n| self.presented.len() < n)
    }
}

/// Same landmarks every frame.
struct FixedPose(Option<LandmarkSet>);

impl PoseEstimator for FixedPose {
    fn estimate(&mut self, _frame: &FrameBuffer) -> Option<LandmarkSet> {
        self.0.clone()
    }
}

fn background(w: usize, h: usize) -> FrameBuffer {
    FrameBuffer { width: w, height: h, pixels: vec![BACKGROUND; w * h] }
}

fn solid(r: u8, g: u8, b: u8) -> RgbaImage {
    RgbaImage::from_pixel(4, 4, Rgba([r, g, b, 255]))
}

/// Shoulders at (100,200)/(200,200) and left hip at (150,400) on a 1000x1000 frame.
fn body() -> LandmarkSet {
    LandmarkSet::new()
        .with(Landmark::LeftShoulder, 0.100, 0.200)
        .with(Landmark::RightShoulder, 0.200, 0.200)
        .with(Landmark::LeftHip, 0.150, 0.400)
        .with(Landmark::LeftEar, 0.140, 0.100)
}

fn shirts() -> AssetStore {
    let mut store = AssetStore::new(Category::Torso);
    store.push(Category::Torso, "red", solid(255, 0, 0));
    store.push(Category::Torso, "green", solid(0, 255, 0));
    store
}

fn mirror(store: AssetStore) -> Orchestrator {
    Orchestrator::new(store, GeometryResolver::default(), Compositor::default())
}

#[test]
fn torso_anchor_matches_the_shoulder_hip_formula() {
    let b = GeometryResolver::default()
        .resolve(Some(&body()), Category::Torso, 1000, 1000)
        .unwrap();
    let height = (50.0_f64.hypot(200.0) + 85.0) as i32;
    assert_eq!(b, AnchorBox { origin_x: 40, origin_y: 155, width: 220, height });
}

#[test]
fn garment_covers_exactly_its_anchor_box() {
    let o = mirror(shirts());
    let mut frame = background(1000, 1000);
    let outcome = o.render(&mut frame, Some(&body()));
    assert_eq!(outcome, RenderOutcome::Drawn(220 * 291));
    assert_eq!(frame.get(40, 155), Some((255, 0, 0)));
    assert_eq!(frame.get(259, 445), Some((255, 0, 0)));
    assert_eq!(frame.get(39, 155), Some((0x20, 0x40, 0x60)));
    assert_eq!(frame.get(260, 445), Some((0x20, 0x40, 0x60)));
    assert_eq!(frame.get(40, 446), Some((0x20, 0x40, 0x60)));
}

#[test]
fn head_without_right_ear_leaves_frame_unmodified() {
    let mut store = AssetStore::new(Category::Head);
    store.push(Category::Head, "hat", solid(0, 0, 255));
    let o = mirror(store);

    assert!(GeometryResolver::default().resolve(Some(&body()), Category::Head, 1000, 1000).is_none());
    let mut frame = background(1000, 1000);
    assert_eq!(o.render(&mut frame, Some(&body())), RenderOutcome::MissingLandmarks);
    assert_eq!(frame, background(1000, 1000));
}

#[test]
fn empty_neck_list_leaves_frame_unmodified() {
    let mut o = mirror(shirts());
    o.set_active_category(Category::Neck);
    assert!(o.store().current_asset(Category::Neck).is_none());

    let full = body()
        .with(Landmark::Nose, 0.15, 0.1)
        .with(Landmark::MouthLeft, 0.14, 0.12)
        .with(Landmark::MouthRight, 0.16, 0.12);
    for landmarks in [None, Some(&full)] {
        let mut frame = background(1000, 1000);
        o.render(&mut frame, landmarks);
        assert_eq!(frame, background(1000, 1000));
    }
}

#[test]
fn click_during_a_tick_changes_the_next_frame() {
    let mut o = mirror(shirts());
    let mut source = StillImage::new(background(1000, 1000));
    let mut pose = FixedPose(Some(body()));
    let mut display = RecordingDisplay::new(vec![vec![], vec![InputEvent::Click], vec![InputEvent::Quit]]);

    let end = o.run(&mut source, &mut pose, &mut display).unwrap();
    assert_eq!(end, Shutdown::QuitRequested);
    assert_eq!(display.presented.len(), 3);
    assert_eq!(display.presented[0].get(100, 300), Some((255, 0, 0)));
    assert_eq!(display.presented[1].get(100, 300), Some((255, 0, 0)));
    assert_eq!(display.presented[2].get(100, 300), Some((0, 255, 0)));
}

#[test]
fn key_switches_category_from_the_next_frame() {
    let mut store = shirts();
    store.push(Category::Head, "hat", solid(0, 0, 255));
    let mut o = mirror(store);
    let mut source = StillImage::new(background(1000, 1000));
    let with_ears = body().with(Landmark::RightEar, 0.160, 0.100);
    let mut pose = FixedPose(Some(with_ears));
    let mut display = RecordingDisplay::new(vec![vec![InputEvent::Key('1')], vec![InputEvent::Quit]]);

    o.run(&mut source, &mut pose, &mut display).unwrap();
    // Frame 0: shirt; frame 1: hat only (ears 20px apart -> 56x28 box above y=100).
    assert_eq!(display.presented[0].get(100, 300), Some((255, 0, 0)));
    assert_eq!(display.presented[1].get(100, 300), Some((0x20, 0x40, 0x60)));
    assert_eq!(display.presented[1].get(150, 90), Some((0, 0, 255)));
}

#[test]
fn no_body_frames_pass_through_untouched() {
    let mut o = mirror(shirts());
    let mut source = StillImage::new(background(64, 48));
    let mut pose = ReplayPose::from_lines("null\nnull\n", false);
    let mut display = RecordingDisplay::new(vec![]);
    display.close_after = Some(3);

    let end = o.run(&mut source, &mut pose, &mut display).unwrap();
    assert_eq!(end, Shutdown::WindowClosed);
    assert_eq!(display.presented.len(), 3);
    assert!(display.presented.iter().all(|f| *f == background(64, 48)));
}

#[test_log::test]
fn capture_failure_ends_the_session_with_an_error() {
    let mut o = mirror(shirts());
    let mut source = StillImage::new(background(8, 8)).with_limit(2);
    let mut pose = FixedPose(None);
    let mut display = RecordingDisplay::new(vec![]);

    let err = o.run(&mut source, &mut pose, &mut display).unwrap_err();
    assert!(matches!(err, Error::CameraFrame(_)));
    assert_eq!(display.presented.len(), 2);
}

#[test]
fn advancing_count_times_is_a_full_cycle() {
    let mut o = mirror(shirts());
    let start = o.store().selection().index(Category::Torso);
    for _ in 0..o.store().count(Category::Torso) {
        o.handle_click();
    }
    assert_eq!(o.store().selection().index(Category::Torso), start);
}

#[test]
fn hud_never_marks_frames_without_an_overlay() {
    let mut o = mirror(shirts());
    o.set_show_hud(true);
    let mut source = StillImage::new(background(64, 48));
    let mut pose = ReplayPose::from_lines("null\nnull\n", false);
    let mut display = RecordingDisplay::new(vec![]);
    display.close_after = Some(2);

    o.run(&mut source, &mut pose, &mut display).unwrap();
    assert!(display.presented.iter().all(|f| *f == background(64, 48)));
}

#[test]
fn hud_labels_frames_that_carry_a_garment() {
    let mut o = mirror(shirts());
    o.set_show_hud(true);
    let mut source = StillImage::new(background(1000, 1000));
    let mut pose = FixedPose(Some(body()));
    let mut display = RecordingDisplay::new(vec![vec![InputEvent::Quit]]);

    o.run(&mut source, &mut pose, &mut display).unwrap();
    let frame = &display.presented[0];
    let hud_pixels = (0..60)
        .flat_map(|x| (8..15).map(move |y| (x, y)))
        .filter(|&(x, y)| frame.get(x, y) == Some((255, 255, 255)))
        .count();
    assert!(hud_pixels > 0);
    assert_eq!(frame.get(100, 300), Some((255, 0, 0)));
}

#[test]
fn hat_far_larger_than_the_frame_still_renders() {
    let mut store = AssetStore::new(Category::Head);
    store.push(Category::Head, "hat", solid(0, 0, 255));
    let o = mirror(store);
    // Ears 40 frame-widths apart.
    let ears = LandmarkSet::new()
        .with(Landmark::LeftEar, -20.0, 0.5)
        .with(Landmark::RightEar, 20.0, 0.5);

    let b = GeometryResolver::default().resolve(Some(&ears), Category::Head, 640, 480).unwrap();
    assert_eq!(b, AnchorBox { origin_x: -35840, origin_y: -35600, width: 71680, height: 35840 });

    let mut frame = background(640, 480);
    assert_eq!(o.render(&mut frame, Some(&ears)), RenderOutcome::Drawn(640 * 240));
    assert_eq!(frame.get(0, 0), Some((0, 0, 255)));
    assert_eq!(frame.get(0, 240), Some((0x20, 0x40, 0x60)));
}
