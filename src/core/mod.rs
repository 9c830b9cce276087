pub mod launcher;
pub mod notice;
pub mod session;
