use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock timestamps for frame timing.
pub trait Clock {
    /// Seconds since the Unix epoch.
    fn now_secs(&self) -> f64;
}

/// System wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct WallClock;

impl Clock for WallClock {
    fn now_secs(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}
