mod capture;
mod core;
mod error;
mod renderer;
mod shared;
mod sync;
mod utils;

#[cfg(test)]
mod testing;

use anyhow::Result;
use clap::Parser;

use crate::capture::CaptureConfig;

/// Webcam capture loop with a live FPS overlay. Press 'q' in the window to quit.
///
/// Camera 0 at 640x480, 30 fps; the capture settings are compiled in.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();

    crate::utils::logger::init()?;

    // Session failures are reported by the session itself; the exit code stays 0.
    crate::core::launcher::run_camera(CaptureConfig::default());

    Ok(())
}
