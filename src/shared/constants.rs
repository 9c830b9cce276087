pub const APP_NAME: &str = "BoxingStrikeVision";
pub const WINDOW_NAME: &str = "PunchTracker";

pub const ERROR_LOG_FILE: &str = "error.log";
pub const DEBUG_LOG_FILE: &str = "debug.log";

pub const DEFAULT_CAMERA_ID: i32 = 0;
pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;
pub const DEFAULT_FPS: u32 = 30;

/// `wait_key` timeout per loop iteration. Also the loop's only yield to the GUI.
pub const KEY_POLL_MS: i32 = 1;
pub const QUIT_KEY: u8 = b'q';

pub const OVERLAY_ORIGIN: (i32, i32) = (10, 30);
pub const OVERLAY_FONT_SCALE: f64 = 1.0;
pub const OVERLAY_THICKNESS: i32 = 2;
// BGR
pub const OVERLAY_COLOR: (f64, f64, f64) = (0.0, 255.0, 0.0);
