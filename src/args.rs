use crate::types::Category;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Try on virtual garments in a live camera mirror", long_about = None)]
pub struct Args {
    /// JSON config file (missing file = defaults)
    #[arg(short, long, default_value = crate::config::AppConfig::DEFAULT_PATH)]
    pub config: PathBuf,

    /// Camera index (overrides the config)
    #[arg(long)]
    pub cam_index: Option<u32>,

    /// Use a still image instead of the camera
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Recorded landmarks to replay, one JSON object (or null) per line
    #[arg(long)]
    pub landmarks: Option<PathBuf>,

    /// Play the landmark recording once instead of looping it
    #[arg(long, default_value_t = false)]
    pub no_loop: bool,

    /// Mirror the camera output
    #[arg(long, default_value_t = false)]
    pub mirror: bool,

    /// Category a click cycles at startup
    #[arg(long, value_enum)]
    pub category: Option<Category>,

    /// List available cameras
    #[arg(long)]
    pub list: bool,
}

impl Args {
    /// Fold command-line overrides into the loaded config.
    pub fn apply(&self, cfg: &mut crate::config::AppConfig) {
        if let Some(index) = self.cam_index {
            cfg.camera.index = index;
        }
        if self.mirror {
            cfg.camera.mirror = true;
        }
        if let Some(category) = self.category {
            cfg.overlay.default_category = category;
        }
    }
}
