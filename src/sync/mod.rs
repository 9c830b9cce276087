pub mod clock;
pub mod rate;

pub use clock::{Clock, WallClock};
pub use rate::RateMonitor;
