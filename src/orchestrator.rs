// Per-tick control flow: landmarks in, garment placed and blended, frame out.
// Input events are collected after a frame is shown and applied before the next one,
// so a click never changes the garment halfway through a frame.

use crate::assets::AssetStore;
use crate::camera::FrameSource;
use crate::composite::Compositor;
use crate::config::AppConfig;
use crate::draw::draw_text_5x7;
use crate::error::Error;
use crate::geometry::GeometryResolver;
use crate::landmarks::LandmarkSet;
use crate::pose::PoseEstimator;
use crate::types::{Category, FrameBuffer};
use std::time::{Duration, Instant};

/// What the window hands back between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Click,     // left mouse press: next garment in the active category
    Key(char), // '1'/'2'/'3' pick a category; anything else is ignored
    Quit,
}

/// Display + input collaborator.
pub trait Display {
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Error>;
    /// Events since the last call, oldest first.
    fn poll_events(&mut self) -> Vec<InputEvent>;
    fn is_open(&self) -> bool;
}

/// Why `run` returned normally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shutdown {
    WindowClosed,
    QuitRequested,
}

/// What happened to the overlay on one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    Drawn(usize), // pixels blended
    NoBody,
    MissingLandmarks,
    EmptyCategory,
    /// Box was degenerate or entirely off-screen.
    NothingVisible,
}

pub struct Orchestrator {
    store: AssetStore,
    resolver: GeometryResolver,
    compositor: Compositor,
    mirror: bool,
    show_hud: bool,
    stopped: bool,
}

impl Orchestrator {
    pub fn new(store: AssetStore, resolver: GeometryResolver, compositor: Compositor) -> Self {
        Self { store, resolver, compositor, mirror: false, show_hud: false, stopped: false }
    }

    /// Wire everything the config describes around an already loaded store.
    pub fn from_config(cfg: &AppConfig, store: AssetStore) -> Self {
        let mut o = Self::new(
            store,
            GeometryResolver::new(cfg.geometry, cfg.overlay.min_visibility),
            Compositor::new(cfg.overlay.interpolation),
        );
        o.mirror = cfg.camera.mirror;
        o.show_hud = cfg.window.show_hud;
        o
    }

    /// Stamp the garment position onto frames that show an overlay. Off by default.
    pub fn set_show_hud(&mut self, on: bool) {
        self.show_hud = on;
    }

    pub fn store(&self) -> &AssetStore {
        &self.store
    }

    pub fn active_category(&self) -> Category {
        self.store.active_category()
    }

    /// Draw the active category's current garment onto `frame` in place.
    /// Every per-frame problem just leaves the frame as the camera delivered it.
    pub fn render(&self, frame: &mut FrameBuffer, landmarks: Option<&LandmarkSet>) -> RenderOutcome {
        let category = self.store.active_category();
        let Some(landmarks) = landmarks else {
            return RenderOutcome::NoBody;
        };
        let Some(asset) = self.store.current_asset(category) else {
            return RenderOutcome::EmptyCategory;
        };
        let Some(anchor) = self.resolver.resolve(Some(landmarks), category, frame.width, frame.height) else {
            return RenderOutcome::MissingLandmarks;
        };
        match self.compositor.composite(frame, asset, &anchor) {
            0 => RenderOutcome::NothingVisible,
            n => RenderOutcome::Drawn(n),
        }
    }

    /// Next garment in whichever category is active.
    pub fn handle_click(&mut self) {
        let category = self.store.active_category();
        self.store.advance(category);
        if let Some(asset) = self.store.current_asset(category) {
            log::info!("{category}: now wearing {} ({}/{})", asset.name, asset.index + 1, self.store.count(category));
        }
    }

    /// Number keys switch the active category; other keys do nothing.
    pub fn handle_key(&mut self, key: char) {
        if let Some(category) = Category::for_key(key) {
            self.set_active_category(category);
        }
    }

    pub fn set_active_category(&mut self, category: Category) {
        if category != self.store.active_category() {
            log::info!("Active category: {category}");
        }
        self.store.set_active_category(category);
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Click => self.handle_click(),
            InputEvent::Key(k) => self.handle_key(k),
            InputEvent::Quit => self.shutdown(),
        }
    }

    /// Ask the loop to stop at the next tick boundary.
    pub fn shutdown(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Capture -> estimate -> render -> present, once per tick, until the window closes
    /// or a quit arrives. A failing frame source ends the session with its error.
    pub fn run<S, P, D>(&mut self, source: &mut S, pose: &mut P, display: &mut D) -> Result<Shutdown, Error>
    where
        S: FrameSource + ?Sized,
        P: PoseEstimator + ?Sized,
        D: Display + ?Sized,
    {
        let mut last_fps_time = Instant::now();
        let mut frames_this_second: u32 = 0;

        loop {
            if self.stopped {
                return Ok(Shutdown::QuitRequested);
            }
            if !display.is_open() {
                return Ok(Shutdown::WindowClosed);
            }

            let mut frame = source.next_frame()?;
            if self.mirror {
                frame.mirror_horizontal();
            }

            let landmarks = pose.estimate(&frame);
            let outcome = self.render(&mut frame, landmarks.as_ref());
            // The status line only goes on frames that carry an overlay;
            // everything else reaches the window exactly as captured.
            if self.show_hud && matches!(outcome, RenderOutcome::Drawn(_)) {
                self.draw_hud(&mut frame);
            }
            display.present(&frame)?;

            for event in display.poll_events() {
                self.handle(event);
            }

            frames_this_second += 1;
            let now = Instant::now();
            if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
                let secs = now.duration_since(last_fps_time).as_secs_f32();
                log::debug!("FPS: {:.1}", frames_this_second as f32 / secs);
                frames_this_second = 0;
                last_fps_time = now;
            }
        }
    }

    /// One status line, top-left.
    pub fn hud_text(&self) -> String {
        let category = self.store.active_category();
        match self.store.count(category) {
            0 => format!("{category} EMPTY"),
            count => format!("{category} {}/{count}", self.store.selection().index(category) + 1),
        }
    }

    fn draw_hud(&self, frame: &mut FrameBuffer) {
        draw_text_5x7(frame, 8, 8, &self.hud_text(), 0x00_FF_FF_FF);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::Landmark;
    use image::{Rgba, RgbaImage};

    fn store_with(category: Category, n: u8) -> AssetStore {
        let mut store = AssetStore::new(Category::Torso);
        for i in 0..n {
            store.push(category, format!("g{i}"), RgbaImage::from_pixel(2, 2, Rgba([i * 50 + 10, 0, 0, 255])));
        }
        store
    }

    fn torso_body() -> LandmarkSet {
        LandmarkSet::new()
            .with(Landmark::LeftShoulder, 0.4, 0.4)
            .with(Landmark::RightShoulder, 0.6, 0.4)
            .with(Landmark::LeftHip, 0.45, 0.8)
    }

    fn orchestrator(store: AssetStore) -> Orchestrator {
        Orchestrator::new(store, GeometryResolver::default(), Compositor::default())
    }

    #[test]
    fn click_cycles_the_active_category_only() {
        let mut store = store_with(Category::Torso, 3);
        store.push(Category::Head, "hat", RgbaImage::new(1, 1));
        store.push(Category::Head, "cap", RgbaImage::new(1, 1));
        let mut o = orchestrator(store);

        o.handle(InputEvent::Click);
        o.handle(InputEvent::Click);
        assert_eq!(o.store().selection().index(Category::Torso), 2);
        assert_eq!(o.store().selection().index(Category::Head), 0);

        o.handle(InputEvent::Key('1'));
        assert_eq!(o.active_category(), Category::Head);
        o.handle(InputEvent::Click);
        assert_eq!(o.store().current_asset(Category::Head).unwrap().name, "cap");
        assert_eq!(o.store().selection().index(Category::Torso), 2);
    }

    #[test]
    fn unknown_keys_leave_the_category_alone() {
        let mut o = orchestrator(store_with(Category::Torso, 1));
        o.handle(InputEvent::Key('x'));
        o.handle(InputEvent::Key('9'));
        assert_eq!(o.active_category(), Category::Torso);
        o.handle(InputEvent::Key('2'));
        assert_eq!(o.active_category(), Category::Neck);
    }

    #[test]
    fn render_draws_the_current_torso_garment() {
        let o = orchestrator(store_with(Category::Torso, 1));
        let mut frame = FrameBuffer::new(400, 400);
        let outcome = o.render(&mut frame, Some(&torso_body()));
        assert!(matches!(outcome, RenderOutcome::Drawn(n) if n > 0));
        // Shoulders at (160,160)/(240,160): the garment starts at (100,115).
        assert_eq!(frame.get(100, 115), Some((10, 0, 0)));
        assert_eq!(frame.get(99, 115), Some((0, 0, 0)));
        assert_ne!(frame, FrameBuffer::new(400, 400));
    }

    #[test]
    fn render_without_body_leaves_frame_alone() {
        let o = orchestrator(store_with(Category::Torso, 2));
        let mut frame = FrameBuffer::new(50, 50);
        frame.fill(0x0010_2030);
        let before = frame.clone();
        assert_eq!(o.render(&mut frame, None), RenderOutcome::NoBody);
        assert_eq!(frame, before);
    }

    #[test]
    fn render_with_empty_category_leaves_frame_alone() {
        let mut o = orchestrator(store_with(Category::Torso, 2));
        o.set_active_category(Category::Neck);
        let mut frame = FrameBuffer::new(50, 50);
        let before = frame.clone();
        assert_eq!(o.render(&mut frame, Some(&torso_body())), RenderOutcome::EmptyCategory);
        assert_eq!(frame, before);
    }

    #[test]
    fn quit_event_stops_the_orchestrator() {
        let mut o = orchestrator(AssetStore::new(Category::Torso));
        assert!(!o.is_stopped());
        o.handle(InputEvent::Quit);
        assert!(o.is_stopped());
    }

    #[test]
    fn hud_reports_category_and_position() {
        let mut o = orchestrator(store_with(Category::Torso, 3));
        o.handle_click();
        assert_eq!(o.hud_text(), "TORSO 2/3");
        o.handle_key('1');
        assert_eq!(o.hud_text(), "HEAD EMPTY");
    }

    #[test]
    fn hud_is_off_unless_configured() {
        assert!(!orchestrator(store_with(Category::Torso, 1)).show_hud);
        assert!(!Orchestrator::from_config(&AppConfig::default(), store_with(Category::Torso, 1)).show_hud);

        let mut cfg = AppConfig::default();
        cfg.window.show_hud = true;
        assert!(Orchestrator::from_config(&cfg, store_with(Category::Torso, 1)).show_hud);
    }
}
