use opencv::highgui;

use crate::capture::Frame;
use crate::error::Result;
use crate::shared::constants;

/// Process-wide windowing state, opened in setup and torn down in cleanup.
pub trait DisplayContext {
    fn open_window(&mut self, name: &str) -> Result<()>;

    fn present(&mut self, name: &str, frame: &Frame) -> Result<()>;

    /// Raw key code, `-1` when nothing was pressed within `timeout_ms`.
    fn poll_key(&mut self, timeout_ms: i32) -> Result<i32>;

    fn close_all(&mut self) -> Result<()>;
}

/// OpenCV HighGUI windows.
#[derive(Default)]
pub struct HighGuiDisplay {
    windows: Vec<String>,
}

impl HighGuiDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplayContext for HighGuiDisplay {
    fn open_window(&mut self, name: &str) -> Result<()> {
        highgui::named_window(name, highgui::WINDOW_AUTOSIZE)?;
        self.windows.push(name.to_string());
        Ok(())
    }

    fn present(&mut self, name: &str, frame: &Frame) -> Result<()> {
        highgui::imshow(name, frame.as_mat())?;
        Ok(())
    }

    fn poll_key(&mut self, timeout_ms: i32) -> Result<i32> {
        Ok(highgui::wait_key(timeout_ms)?)
    }

    fn close_all(&mut self) -> Result<()> {
        // destroy_all_windows also covers windows created outside this context
        highgui::destroy_all_windows()?;
        if !self.windows.is_empty() {
            crate::utils::logger::debug(&format!("Closed windows: {:?}", self.windows));
        }
        self.windows.clear();
        Ok(())
    }
}

/// Only the low byte of the key code is significant.
pub fn is_quit_key(code: i32) -> bool {
    (code & 0xFF) == constants::QUIT_KEY as i32
}
