// One error type for the whole painter.
// Every variant states *where* things went wrong.

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Source image could not be read or decoded (fatal at startup).
    #[error("Image load error: {0}")]
    ImageLoad(String),

    /// Writing the canvas to disk failed (reported, loop keeps running).
    #[error("Image save error: {0}")]
    ImageSave(String),

    #[error("Window init error: {0}")]
    WindowInit(String),

    #[error("Window update error: {0}")]
    WindowUpdate(String),

    #[error("Camera init error: {0}")]
    CameraInit(String),

    #[error("Camera frame error: {0}")]
    CameraFrame(String),

    /// Tracking device could not be started (painting by hand stays inert).
    #[error("Tracking device error: {0}")]
    Device(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
