// One error type for the whole mirror.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
    #[error("Camera init error: {0}")]
    CameraInit(String), // Opening/starting the camera failed
    #[error("Camera frame error: {0}")]
    CameraFrame(String), // Grabbing/decoding a frame failed (ends the session)
    #[error("Config error: {0}")]
    Config(String), // Config file present but unusable
    #[error("Asset load error: {0}")]
    AssetLoad(String), // A garment image could not be read
    #[error("Landmarks error: {0}")]
    Landmarks(String), // Landmark replay file could not be opened
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
