use opencv::{prelude::*, videoio};

use super::camera::{CaptureBackend, CaptureDevice, DeviceHint};
use super::frame::Frame;
use crate::error::Result;

/// Camera access through OpenCV `videoio`.
pub struct OpenCvBackend {
    api_preference: i32,
}

impl OpenCvBackend {
    pub fn new() -> Self {
        // CAP_ANY lets OpenCV pick V4L2 / AVFoundation / Media Foundation
        Self {
            api_preference: videoio::CAP_ANY,
        }
    }
}

impl Default for OpenCvBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureBackend for OpenCvBackend {
    type Device = OpenCvDevice;

    fn open(&mut self, device: i32) -> Result<Option<OpenCvDevice>> {
        let capture = videoio::VideoCapture::new(device, self.api_preference)?;
        if !capture.is_opened()? {
            return Ok(None);
        }
        Ok(Some(OpenCvDevice { capture }))
    }
}

pub struct OpenCvDevice {
    capture: videoio::VideoCapture,
}

impl CaptureDevice for OpenCvDevice {
    fn apply_hint(&mut self, hint: DeviceHint) -> Result<bool> {
        let (prop, value) = match hint {
            DeviceHint::Width(w) => (videoio::CAP_PROP_FRAME_WIDTH, w),
            DeviceHint::Height(h) => (videoio::CAP_PROP_FRAME_HEIGHT, h),
            DeviceHint::FrameRate(fps) => (videoio::CAP_PROP_FPS, fps),
        };
        Ok(self.capture.set(prop, value as f64)?)
    }

    fn read_raw(&mut self) -> Result<Option<Frame>> {
        let mut mat = Mat::default();
        if !self.capture.read(&mut mat)? {
            return Ok(None);
        }
        Ok(Some(Frame::from_mat(mat)))
    }

    fn release(&mut self) -> Result<()> {
        Ok(self.capture.release()?)
    }

    fn negotiated(&self) -> Option<(f64, f64, f64)> {
        let width = self.capture.get(videoio::CAP_PROP_FRAME_WIDTH).ok()?;
        let height = self.capture.get(videoio::CAP_PROP_FRAME_HEIGHT).ok()?;
        let fps = self.capture.get(videoio::CAP_PROP_FPS).ok()?;
        Some((width, height, fps))
    }
}
