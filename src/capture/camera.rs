use super::frame::Frame;
use crate::error::{Result, VisionError};
use crate::shared::constants;

/// Requested device settings, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConfig {
    pub device: i32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device: constants::DEFAULT_CAMERA_ID,
            width: constants::DEFAULT_WIDTH,
            height: constants::DEFAULT_HEIGHT,
            fps: constants::DEFAULT_FPS,
        }
    }
}

/// A property the device is asked to honour. Devices may ignore any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceHint {
    Width(u32),
    Height(u32),
    FrameRate(u32),
}

/// Opens camera devices.
pub trait CaptureBackend {
    type Device: CaptureDevice;

    /// Returns `None` when the device exists but cannot be opened.
    fn open(&mut self, device: i32) -> Result<Option<Self::Device>>;
}

/// An open camera handle.
pub trait CaptureDevice {
    /// Returns whether the device accepted the hint.
    fn apply_hint(&mut self, hint: DeviceHint) -> Result<bool>;

    /// One unmirrored frame, or `None` if the device produced nothing.
    fn read_raw(&mut self) -> Result<Option<Frame>>;

    fn release(&mut self) -> Result<()>;

    /// Resolution and rate the device actually negotiated, when it reports them.
    fn negotiated(&self) -> Option<(f64, f64, f64)> {
        None
    }
}

/// Owns the camera handle between `start()` and `release()` and hands out
/// mirrored frames.
pub struct CaptureSource<B: CaptureBackend> {
    config: CaptureConfig,
    backend: B,
    device: Option<B::Device>,
}

impl<B: CaptureBackend> CaptureSource<B> {
    pub fn new(config: CaptureConfig, backend: B) -> Self {
        Self {
            config,
            backend,
            device: None,
        }
    }

    pub fn is_started(&self) -> bool {
        self.device.is_some()
    }

    pub fn start(&mut self) -> Result<&mut Self> {
        let mut device = self
            .backend
            .open(self.config.device)?
            .ok_or(VisionError::DeviceUnavailable(self.config.device))?;

        for hint in [
            DeviceHint::Width(self.config.width),
            DeviceHint::Height(self.config.height),
            DeviceHint::FrameRate(self.config.fps),
        ] {
            if !device.apply_hint(hint)? {
                crate::utils::logger::debug(&format!("Camera ignored {:?}", hint));
            }
        }

        match device.negotiated() {
            Some((w, h, fps)) => crate::utils::logger::info(&format!(
                "Camera {} opened: requested {}x{}@{} got {}x{}@{}",
                self.config.device, self.config.width, self.config.height, self.config.fps, w, h, fps
            )),
            None => crate::utils::logger::info(&format!("Camera {} opened", self.config.device)),
        }

        self.device = Some(device);
        Ok(self)
    }

    /// Next mirrored frame, or `None` once the camera stops delivering.
    pub fn read(&mut self) -> Result<Option<Frame>> {
        let device = self.device.as_mut().ok_or(VisionError::IllegalState(
            "Video stream not started. Call start() first.",
        ))?;

        match device.read_raw()? {
            Some(frame) if !frame.is_empty() => Ok(Some(frame.mirrored()?)),
            _ => Ok(None),
        }
    }

    /// Safe to call repeatedly or before `start()`.
    pub fn release(&mut self) {
        if let Some(mut device) = self.device.take() {
            if let Err(e) = device.release() {
                crate::utils::logger::error(&format!("Camera release failed: {}", e));
            }
        }
    }
}
