use anyhow::{Context, Result};
use lazy_static::lazy_static;
use std::backtrace::Backtrace;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::panic::{self, PanicHookInfo};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::shared::constants;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Error => "ERROR",
        })
    }
}

/// `debug.log` receives every line, `error.log` only ERROR lines and panics.
#[derive(Debug, Clone)]
struct LogFiles {
    error: PathBuf,
    debug: PathBuf,
}

impl LogFiles {
    fn in_dir(dir: &Path) -> Self {
        Self {
            error: dir.join(constants::ERROR_LOG_FILE),
            debug: dir.join(constants::DEBUG_LOG_FILE),
        }
    }

    /// Truncates both files and stamps a session header.
    fn reset(&self) -> Result<()> {
        let started = chrono::Local::now();
        for (path, title) in [(&self.error, "Error Log"), (&self.debug, "Debug Log")] {
            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            writeln!(file, "=== {} {} Started: {} ===", constants::APP_NAME, title, started)?;
        }
        Ok(())
    }

    fn write(&self, level: Level, msg: &str) {
        let line = format_line(&chrono::Local::now().format("%H:%M:%S%.3f").to_string(), level, msg);
        append_line(&self.debug, &line);
        if level == Level::Error {
            append_line(&self.error, &line);
        }
    }

    fn write_panic(&self, report: &str) {
        append_line(&self.error, report);
        append_line(&self.debug, report);
    }
}

lazy_static! {
    static ref LOGGER: Mutex<Option<LogFiles>> = Mutex::new(None);
}

fn files() -> MutexGuard<'static, Option<LogFiles>> {
    match LOGGER.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn append_line(path: &Path, line: &str) {
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{}", line);
    }
}

fn format_line(timestamp: &str, level: Level, msg: &str) -> String {
    format!("[{}][{}] {}", timestamp, level, msg)
}

fn panic_report(info: &PanicHookInfo<'_>) -> String {
    let msg = info
        .payload()
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
        .unwrap_or("Box<Any>");

    let location = info
        .location()
        .map(|l| format!("{}:{}", l.file(), l.line()))
        .unwrap_or_else(|| "unknown".to_string());

    format!(
        "\nCRITICAL PANIC at {}:\nMessage: {}\nBacktrace:\n{:?}\n",
        location,
        msg,
        Backtrace::capture()
    )
}

/// Starts fresh log files in the working directory and routes panics into
/// them. Logging before this is a no-op.
pub fn init() -> Result<()> {
    let dir = std::env::current_dir().context("cannot resolve working directory for logs")?;
    let log_files = LogFiles::in_dir(&dir);
    log_files.reset()?;
    *files() = Some(log_files.clone());

    panic::set_hook(Box::new(move |info| {
        log_files.write_panic(&panic_report(info));
        eprintln!(
            "{} crashed. See {} for details.",
            constants::APP_NAME,
            log_files.error.display()
        );
    }));
    Ok(())
}

pub fn log(level: Level, msg: &str) {
    if let Some(log_files) = files().as_ref() {
        log_files.write(level, msg);
    }
}

pub fn info(msg: &str) {
    log(Level::Info, msg);
}

pub fn error(msg: &str) {
    log(Level::Error, msg);
}

pub fn debug(msg: &str) {
    log(Level::Debug, msg);
}
