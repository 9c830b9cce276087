use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Cannot open camera {0}")]
    DeviceUnavailable(i32),

    #[error("{0}")]
    IllegalState(&'static str),

    #[error("OpenCV: {0}")]
    Backend(#[from] opencv::Error),
}

pub type Result<T> = std::result::Result<T, VisionError>;
