//! Process-wide writer handle
//!
//! Holds the writer for code that cannot have it passed in. The lifecycle is
//! explicit: [`install`] once at startup, [`shutdown`] at teardown. Dropping the
//! writer returned by `shutdown` closes the log file.

use std::sync::Mutex;

use super::file_writer::LogWriter;
use super::level::LogLevel;

static GLOBAL: Mutex<Option<LogWriter>> = Mutex::new(None);

/// Install `writer` as the process-wide writer
///
/// Only one `LogWriter` can exist, so the slot is always empty when a fresh
/// writer is installed.
pub fn install(writer: LogWriter) {
    if let Ok(mut slot) = GLOBAL.lock() {
        *slot = Some(writer);
    }
}

/// Run `f` against the installed writer
///
/// Returns `None` if no writer is installed or the lock is poisoned.
pub fn with<R>(f: impl FnOnce(&mut LogWriter) -> R) -> Option<R> {
    let mut slot = GLOBAL.lock().ok()?;
    slot.as_mut().map(f)
}

/// Check if a writer is installed
pub fn is_installed() -> bool {
    GLOBAL.lock().map(|slot| slot.is_some()).unwrap_or(false)
}

/// Write `message` through the installed writer, if any
pub fn log(level: LogLevel, message: &str) {
    with(|writer| writer.log(level, message));
}

/// Remove the installed writer
///
/// Drop the result to close the log file and allow a new writer to be created.
pub fn shutdown() -> Option<LogWriter> {
    GLOBAL.lock().ok()?.take()
}
