//! Scripted stand-ins for the camera, the window system and the clock.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use opencv::prelude::*;

use crate::capture::{CaptureBackend, CaptureConfig, CaptureDevice, DeviceHint, Frame};
use crate::core::notice::{Notice, NoticeSink};
use crate::core::session::Session;
use crate::error::{Result, VisionError};
use crate::renderer::DisplayContext;
use crate::sync::Clock;

#[derive(Clone)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedRead {
    Frame,
    Empty,
    Nothing,
    /// The backend raises, as OpenCV does on a driver fault.
    Fail,
}

#[derive(Default)]
pub struct CaptureLog {
    pub opened: Vec<i32>,
    pub hints: Vec<DeviceHint>,
    pub reads: usize,
    pub releases: usize,
}

pub type SharedCaptureLog = Rc<RefCell<CaptureLog>>;

pub struct ScriptedBackend {
    available: bool,
    accept_hints: bool,
    // None means frames forever
    script: Option<VecDeque<ScriptedRead>>,
    frame_size: Option<(i32, i32)>,
    tick: Option<(ManualClock, f64)>,
    log: SharedCaptureLog,
}

impl ScriptedBackend {
    fn build(available: bool, script: Option<VecDeque<ScriptedRead>>) -> (Self, SharedCaptureLog) {
        let log = SharedCaptureLog::default();
        let backend = Self {
            available,
            accept_hints: true,
            script,
            frame_size: None,
            tick: None,
            log: Rc::clone(&log),
        };
        (backend, log)
    }

    pub fn endless() -> (Self, SharedCaptureLog) {
        Self::build(true, None)
    }

    pub fn unavailable() -> (Self, SharedCaptureLog) {
        Self::build(false, None)
    }

    /// Reads past the end of the script yield no frame.
    pub fn scripted(reads: Vec<ScriptedRead>) -> (Self, SharedCaptureLog) {
        Self::build(true, Some(reads.into()))
    }

    pub fn rejecting_hints(mut self) -> Self {
        self.accept_hints = false;
        self
    }

    /// Deliver black frames of this size instead of the sample frame.
    pub fn with_frame_size(mut self, width: i32, height: i32) -> Self {
        self.frame_size = Some((width, height));
        self
    }

    /// Advance `clock` by `secs` on every read, like a camera pacing frames.
    pub fn ticking(mut self, clock: &ManualClock, secs: f64) -> Self {
        self.tick = Some((clock.clone(), secs));
        self
    }

    pub fn blank_frame(width: i32, height: i32) -> Frame {
        Frame::from_bgr(width, height, &vec![0u8; (width * height * 3) as usize]).unwrap()
    }

    /// 6x3 frame where every pixel encodes its own coordinates.
    pub fn sample_frame() -> Frame {
        let (w, h) = (6, 3);
        let mut pixels = Vec::new();
        for y in 0..h {
            for x in 0..w {
                pixels.extend_from_slice(&[x as u8 * 40, y as u8 * 80, 7]);
            }
        }
        Frame::from_bgr(w, h, &pixels).unwrap()
    }
}

impl CaptureBackend for ScriptedBackend {
    type Device = ScriptedDevice;

    fn open(&mut self, device: i32) -> Result<Option<ScriptedDevice>> {
        self.log.borrow_mut().opened.push(device);
        if !self.available {
            return Ok(None);
        }
        Ok(Some(ScriptedDevice {
            accept_hints: self.accept_hints,
            script: self.script.take(),
            frame_size: self.frame_size,
            tick: self.tick.clone(),
            log: Rc::clone(&self.log),
        }))
    }
}

pub struct ScriptedDevice {
    accept_hints: bool,
    script: Option<VecDeque<ScriptedRead>>,
    frame_size: Option<(i32, i32)>,
    tick: Option<(ManualClock, f64)>,
    log: SharedCaptureLog,
}

impl CaptureDevice for ScriptedDevice {
    fn apply_hint(&mut self, hint: DeviceHint) -> Result<bool> {
        self.log.borrow_mut().hints.push(hint);
        Ok(self.accept_hints)
    }

    fn read_raw(&mut self) -> Result<Option<Frame>> {
        self.log.borrow_mut().reads += 1;
        if let Some((clock, secs)) = &self.tick {
            clock.advance(*secs);
        }
        let next = match self.script.as_mut() {
            Some(script) => script.pop_front().unwrap_or(ScriptedRead::Nothing),
            None => ScriptedRead::Frame,
        };
        Ok(match next {
            ScriptedRead::Frame => Some(match self.frame_size {
                Some((w, h)) => ScriptedBackend::blank_frame(w, h),
                None => ScriptedBackend::sample_frame(),
            }),
            ScriptedRead::Empty => Some(Frame::from_mat(Mat::default())),
            ScriptedRead::Nothing => None,
            ScriptedRead::Fail => {
                return Err(VisionError::Backend(opencv::Error::new(
                    opencv::core::StsError,
                    "device disconnected",
                )))
            }
        })
    }

    fn release(&mut self) -> Result<()> {
        self.log.borrow_mut().releases += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct DisplayLog {
    pub open_windows: Vec<String>,
    pub presented: usize,
    pub last_frame: Option<Frame>,
    pub key_polls: usize,
    pub poll_timeouts: Vec<i32>,
    pub close_calls: usize,
}

pub type SharedDisplayLog = Rc<RefCell<DisplayLog>>;

/// Replays `keys` one per poll, then reports no key.
pub struct RecordingDisplay {
    keys: VecDeque<i32>,
    log: SharedDisplayLog,
}

impl RecordingDisplay {
    pub fn new(keys: Vec<i32>) -> (Self, SharedDisplayLog) {
        let log = SharedDisplayLog::default();
        let display = Self {
            keys: keys.into(),
            log: Rc::clone(&log),
        };
        (display, log)
    }
}

impl DisplayContext for RecordingDisplay {
    fn open_window(&mut self, name: &str) -> Result<()> {
        self.log.borrow_mut().open_windows.push(name.to_string());
        Ok(())
    }

    fn present(&mut self, _name: &str, frame: &Frame) -> Result<()> {
        let copy = Frame::from_mat(frame.as_mat().try_clone()?);
        let mut log = self.log.borrow_mut();
        log.presented += 1;
        log.last_frame = Some(copy);
        Ok(())
    }

    fn poll_key(&mut self, timeout_ms: i32) -> Result<i32> {
        let mut log = self.log.borrow_mut();
        log.key_polls += 1;
        log.poll_timeouts.push(timeout_ms);
        Ok(self.keys.pop_front().unwrap_or(-1))
    }

    fn close_all(&mut self) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.close_calls += 1;
        log.open_windows.clear();
        Ok(())
    }
}

pub type SharedNotices = Rc<RefCell<Vec<Notice>>>;

pub struct RecordingNotices {
    log: SharedNotices,
}

impl RecordingNotices {
    pub fn new() -> (Self, SharedNotices) {
        let log = SharedNotices::default();
        (Self { log: Rc::clone(&log) }, log)
    }
}

impl NoticeSink for RecordingNotices {
    fn emit(&mut self, notice: &Notice) {
        self.log.borrow_mut().push(notice.clone());
    }
}

pub fn fixture_session(
    backend: ScriptedBackend,
    keys: Vec<i32>,
) -> (Session<ScriptedBackend, RecordingDisplay>, SharedDisplayLog, SharedNotices) {
    let (display, display_log) = RecordingDisplay::new(keys);
    let (notices, notice_log) = RecordingNotices::new();
    let session = Session::new(
        CaptureConfig::default(),
        backend,
        display,
        Box::new(ManualClock::new(0.0)),
        Box::new(notices),
    );
    (session, display_log, notice_log)
}
