use opencv::{core, imgproc};

use super::clock::Clock;
use crate::capture::Frame;
use crate::error::Result;
use crate::shared::constants;

/// Instantaneous frames-per-second from the gap between consecutive updates.
///
/// No smoothing. The previous timestamp starts at zero, so the first update
/// after construction reports a rate of effectively zero.
pub struct RateMonitor {
    clock: Box<dyn Clock>,
    prev_time: f64,
    fps: f64,
}

impl RateMonitor {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            prev_time: 0.0,
            fps: 0.0,
        }
    }

    /// Records a frame event and returns the latest rate.
    pub fn update(&mut self) -> f64 {
        let now = self.clock.now_secs();
        let elapsed = now - self.prev_time;

        // same clock tick: keep the last rate
        if elapsed > 0.0 {
            self.fps = 1.0 / elapsed;
        }

        self.prev_time = now;
        self.fps
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn label(&self) -> String {
        format!("FPS: {}", self.fps.floor() as i64)
    }

    /// Writes the rate label into the top-left corner of `frame`.
    pub fn draw<'a>(&self, frame: &'a mut Frame) -> Result<&'a mut Frame> {
        let (x, y) = constants::OVERLAY_ORIGIN;
        let (b, g, r) = constants::OVERLAY_COLOR;
        imgproc::put_text(
            frame.as_mat_mut(),
            &self.label(),
            core::Point::new(x, y),
            imgproc::FONT_HERSHEY_SIMPLEX,
            constants::OVERLAY_FONT_SCALE,
            core::Scalar::new(b, g, r, 0.0),
            constants::OVERLAY_THICKNESS,
            imgproc::LINE_8,
            false,
        )?;
        Ok(frame)
    }
}
