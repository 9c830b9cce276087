pub mod backend;
pub mod camera;
pub mod frame;

pub use backend::OpenCvBackend;
pub use camera::{CaptureBackend, CaptureConfig, CaptureDevice, CaptureSource, DeviceHint};
pub use frame::Frame;
