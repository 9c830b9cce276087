use std::fmt;

use crate::shared::constants;

/// User-facing console lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Initialized,
    FrameGrabFailed,
    Error(String),
    Shutdown,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Initialized => write!(
                f,
                "{} initialized. Press '{}' to quit.",
                constants::WINDOW_NAME,
                constants::QUIT_KEY as char
            ),
            Notice::FrameGrabFailed => write!(f, "Failed to grab frame. Exiting..."),
            Notice::Error(msg) => write!(f, "Error: {}", msg),
            Notice::Shutdown => write!(f, "{} shutdown complete.", constants::APP_NAME),
        }
    }
}

pub trait NoticeSink {
    fn emit(&mut self, notice: &Notice);
}

/// Prints to stdout and mirrors into the log files.
pub struct Console;

impl NoticeSink for Console {
    fn emit(&mut self, notice: &Notice) {
        println!("{}", notice);
        match notice {
            Notice::Error(_) => crate::utils::logger::error(&notice.to_string()),
            _ => crate::utils::logger::info(&notice.to_string()),
        }
    }
}
