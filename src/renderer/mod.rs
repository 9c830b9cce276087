pub mod window;

pub use window::{is_quit_key, DisplayContext, HighGuiDisplay};
