// What you SEE:
// • A short splash, then the live camera as a mirror.
// • When a body is in view, the current garment is drawn on it.
// • Left click: next garment in the active category.
// • 1 / 2 / 3: switch to HEAD / NECK / TORSO. Q or ESC quits.

use clap::Parser;
use virtual_mirror::args::Args;
use virtual_mirror::assets::AssetStore;
use virtual_mirror::camera::{list_cameras, CameraCapture, FrameSource, StillImage};
use virtual_mirror::config::AppConfig;
use virtual_mirror::draw::{show_splash, Drawer};
use virtual_mirror::orchestrator::{Orchestrator, Shutdown};
use virtual_mirror::pose::{NoPose, PoseEstimator, ReplayPose};
use virtual_mirror::Error;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();
    if args.list {
        return list_cameras();
    }

    /* --- Config + garments --- */
    let mut cfg = AppConfig::load(&args.config)?;
    args.apply(&mut cfg);
    let store = AssetStore::load(&cfg.assets, cfg.overlay.default_category);

    /* --- Frame source: camera, or a still picture --- */
    let mut source: Box<dyn FrameSource> = match &args.image {
        Some(path) => Box::new(StillImage::open(path)?),
        None => {
            let cam = CameraCapture::new(cfg.camera.index, cfg.camera.width, cfg.camera.height, cfg.camera.fps)?;
            log::info!("Opened camera: {}", cam.name());
            Box::new(cam)
        }
    };
    let (w, h) = source.resolution();

    /* --- Pose collaborator --- */
    let mut pose: Box<dyn PoseEstimator> = match &args.landmarks {
        Some(path) => Box::new(ReplayPose::open(path, !args.no_loop)?),
        None => {
            log::warn!("No landmark source given; showing the plain mirror");
            Box::new(NoPose)
        }
    };

    /* --- Window --- */
    let mut drawer = Drawer::new(&cfg.window.title, w as usize, h as usize)?;
    if !show_splash(&mut drawer, w as usize, h as usize, &cfg.window.splash_text, cfg.window.splash_secs)? {
        log::info!("Quit during splash");
        return Ok(());
    }

    /* --- Main loop --- */
    let mut mirror = Orchestrator::from_config(&cfg, store);
    match mirror.run(source.as_mut(), pose.as_mut(), &mut drawer) {
        Ok(Shutdown::WindowClosed) => log::info!("Window closed, bye"),
        Ok(Shutdown::QuitRequested) => log::info!("Quit requested, bye"),
        Err(e) => {
            log::error!("Session ended: {e}");
            return Err(e);
        }
    }
    Ok(())
}
