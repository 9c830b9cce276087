use crate::capture::{CaptureBackend, CaptureConfig, OpenCvBackend};
use crate::renderer::{DisplayContext, HighGuiDisplay};
use crate::sync::WallClock;

use super::notice::Console;
use super::session::{RunSummary, Session};

/// setup → run, report any failure once, then always clean up.
pub fn launch<B: CaptureBackend, D: DisplayContext>(
    session: &mut Session<B, D>,
) -> Option<RunSummary> {
    let outcome = session.setup().and_then(|s| s.run());

    let summary = match outcome {
        Ok(summary) => Some(summary),
        Err(e) => {
            session.report_error(&e);
            None
        }
    };

    session.cleanup();
    crate::utils::logger::debug(&format!("Session state: {:?}", session.state()));
    summary
}

/// Runs the live camera session with OpenCV capture and HighGUI windows.
pub fn run_camera(config: CaptureConfig) {
    crate::utils::logger::info(&format!(
        "launch: camera={} size={}x{} fps={}",
        config.device, config.width, config.height, config.fps
    ));

    let mut session = Session::new(
        config,
        OpenCvBackend::new(),
        HighGuiDisplay::new(),
        Box::new(WallClock),
        Box::new(Console),
    );

    if let Some(summary) = launch(&mut session) {
        crate::utils::logger::info(&format!(
            "Session ended ({:?}): {} frames in {:.2}s, average FPS {:.2}",
            summary.reason,
            summary.frames,
            summary.elapsed.as_secs_f64(),
            summary.average_fps()
        ));
    }
}
