use std::time::{Duration, Instant};

use super::notice::{Notice, NoticeSink};
use crate::capture::{CaptureBackend, CaptureConfig, CaptureSource, Frame};
use crate::error::{Result, VisionError};
use crate::renderer::{is_quit_key, DisplayContext};
use crate::shared::constants;
use crate::sync::{Clock, RateMonitor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Ready,
    Running,
    Stopped,
    Terminated,
}

/// Checked once per iteration boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    QuitRequested,
    StreamEnded,
}

#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub frames: u64,
    pub elapsed: Duration,
    pub reason: StopReason,
}

impl RunSummary {
    pub fn average_fps(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.frames as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Drives capture → annotate → present → key poll until the user quits or
/// the camera stops delivering frames.
pub struct Session<B: CaptureBackend, D: DisplayContext> {
    capture: CaptureSource<B>,
    rate: RateMonitor,
    display: D,
    notices: Box<dyn NoticeSink>,
    state: SessionState,
}

impl<B: CaptureBackend, D: DisplayContext> Session<B, D> {
    pub fn new(
        config: CaptureConfig,
        backend: B,
        display: D,
        clock: Box<dyn Clock>,
        notices: Box<dyn NoticeSink>,
    ) -> Self {
        Self {
            capture: CaptureSource::new(config, backend),
            rate: RateMonitor::new(clock),
            display,
            notices,
            state: SessionState::Uninitialized,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn setup(&mut self) -> Result<&mut Self> {
        self.capture.start()?;
        self.display.open_window(constants::WINDOW_NAME)?;
        self.notices.emit(&Notice::Initialized);
        self.state = SessionState::Ready;
        Ok(self)
    }

    pub fn run(&mut self) -> Result<RunSummary> {
        if self.state != SessionState::Ready {
            return Err(VisionError::IllegalState(
                "Session not set up. Call setup() first.",
            ));
        }

        self.state = SessionState::Running;
        let started = Instant::now();
        let mut frames = 0u64;
        let outcome = self.run_loop(&mut frames);
        self.state = SessionState::Stopped;
        crate::utils::logger::debug(&format!(
            "Loop stopped after {} frames, last FPS {:.1}",
            frames,
            self.rate.fps()
        ));

        let reason = outcome?;
        Ok(RunSummary {
            frames,
            elapsed: started.elapsed(),
            reason,
        })
    }

    fn run_loop(&mut self, frames: &mut u64) -> Result<StopReason> {
        let mut control = LoopControl::Running;
        let mut reason = StopReason::QuitRequested;

        while control == LoopControl::Running {
            let Some(mut frame) = self.capture.read()? else {
                self.notices.emit(&Notice::FrameGrabFailed);
                reason = StopReason::StreamEnded;
                break;
            };

            if *frames == 0 {
                crate::utils::logger::debug(&format!(
                    "First frame: {}x{}",
                    frame.width(),
                    frame.height()
                ));
            }

            self.process_frame(&mut frame)?;
            self.display.present(constants::WINDOW_NAME, &frame)?;
            *frames += 1;

            if is_quit_key(self.display.poll_key(constants::KEY_POLL_MS)?) {
                control = LoopControl::Stopped;
            }
        }

        Ok(reason)
    }

    fn process_frame(&mut self, frame: &mut Frame) -> Result<()> {
        self.rate.update();
        self.rate.draw(frame)?;
        // strike analysis slots in here once pose estimation exists
        Ok(())
    }

    pub fn report_error(&mut self, err: &VisionError) {
        self.notices.emit(&Notice::Error(err.to_string()));
    }

    /// Releases the camera and closes every window. Runs at most once.
    pub fn cleanup(&mut self) {
        if self.state == SessionState::Terminated {
            return;
        }

        if self.capture.is_started() {
            crate::utils::logger::debug("Releasing camera");
        }
        self.capture.release();
        if let Err(e) = self.display.close_all() {
            crate::utils::logger::error(&format!("Closing windows failed: {}", e));
        }
        self.notices.emit(&Notice::Shutdown);
        self.state = SessionState::Terminated;
    }
}

impl<B: CaptureBackend, D: DisplayContext> Drop for Session<B, D> {
    fn drop(&mut self) {
        self.cleanup();
    }
}
