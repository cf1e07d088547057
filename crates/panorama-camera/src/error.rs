/// Errors that can occur when setting up or resizing a camera session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    #[error("invalid viewport size {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("invalid camera config: {0}")]
    Config(String),
}
