//! File-backed log writer
//!
//! Owns the single log file of the process. Creating a log rotates the files
//! written by earlier runs, then every record is appended to the live file as
//! `"<timestamp> | <tag> | <text>"`.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Local};

use super::error::LogWriterError;
use super::level::LogLevel;
use super::rotation;
use crate::config::Config;

/// Record timestamp layout, 23 characters wide
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Stands in for the timestamp on continuation lines
const BLANK_TIMESTAMP: &str = "                       ";

/// Stands in for the level tag on continuation lines
const BLANK_TAG: &str = "   ";

/// Set while a `LogWriter` is alive
static INSTANCE_ALIVE: AtomicBool = AtomicBool::new(false);

/// Version of the logger
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Format a message as one or more record lines
///
/// The first line carries the timestamp and level tag. Each further line of a
/// multiline message gets blank fields of the same width so the text columns
/// stay aligned. Every line ends with `'\n'`.
pub fn format_record(timestamp: &DateTime<Local>, level: LogLevel, message: &str) -> String {
    let stamp = timestamp.format(TIMESTAMP_FORMAT).to_string();
    let mut record = String::with_capacity(message.len() + 32);

    for (i, line) in message.split('\n').enumerate() {
        let (stamp, tag) = if i == 0 {
            (stamp.as_str(), level.tag())
        } else {
            (BLANK_TIMESTAMP, BLANK_TAG)
        };
        record.push_str(stamp);
        record.push_str(" | ");
        record.push_str(tag);
        record.push_str(" | ");
        record.push_str(line);
        record.push('\n');
    }

    record
}

/// The open log file and its stream
struct LogSink {
    /// Absolute path of the live file
    path: PathBuf,
    stream: BufWriter<File>,
}

/// Leveled file logger
///
/// At most one writer exists per process: [`LogWriter::new`] fails while
/// another one is alive. The writer does no locking of its own; share it
/// behind a mutex, or use [`crate::logging::global`].
pub struct LogWriter {
    /// Threshold: messages more verbose than this are dropped
    level: LogLevel,
    /// Present iff a log file is open
    sink: Option<LogSink>,
}

impl std::fmt::Debug for LogWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogWriter")
            .field("level", &self.level)
            .field("current_file", &self.current_file())
            .finish()
    }
}

impl LogWriter {
    /// Create the process's writer, with no file open and a `Debug` threshold
    pub fn new() -> Result<Self, LogWriterError> {
        if INSTANCE_ALIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(LogWriterError::AlreadyExists);
        }

        Ok(Self {
            level: LogLevel::Debug,
            sink: None,
        })
    }

    /// Create a writer with the configured threshold and its log file open
    pub fn with_config(config: &Config) -> Result<Self, LogWriterError> {
        let mut writer = Self::new()?;
        writer.set_level(config.level);
        writer.try_create_log(&config.log_file, config.rotation_count)?;
        Ok(writer)
    }

    /// Open a new log file, rotating older ones
    ///
    /// Returns `true` if the file was opened. On failure the writer is left
    /// closed and the cause is logged.
    pub fn create_log(&mut self, path: impl AsRef<Path>, rotation_count: u32) -> bool {
        match self.try_create_log(path, rotation_count) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("{:#}", anyhow::Error::new(e));
                false
            }
        }
    }

    /// Open a new log file, rotating older ones, and report why it failed
    ///
    /// Any open file is closed first. The parent directory is created if
    /// missing. With `rotation_count > 0` the existing files are shifted
    /// (see [`rotation::rotate_files`]) before `path` is truncated and opened.
    pub fn try_create_log(
        &mut self,
        path: impl AsRef<Path>,
        rotation_count: u32,
    ) -> Result<(), LogWriterError> {
        self.close_log();

        let path = path.as_ref();
        let live =
            rotation::rotation_file_name(path, 0).map_err(|source| LogWriterError::Resolve {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(dir) = live.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|source| LogWriterError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }
        }

        rotation::rotate_files(&live, rotation_count).map_err(|source| {
            LogWriterError::Resolve {
                path: live.clone(),
                source,
            }
        })?;

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&live)
            .map_err(|source| LogWriterError::Open {
                path: live.clone(),
                source,
            })?;

        tracing::debug!("Opened log file {}", live.display());
        self.sink = Some(LogSink {
            path: live,
            stream: BufWriter::new(file),
        });
        Ok(())
    }

    /// Flush and close the current log file, if any
    pub fn close_log(&mut self) {
        if let Some(mut sink) = self.sink.take() {
            if let Err(e) = sink.stream.flush() {
                tracing::warn!("Failed to flush {}: {}", sink.path.display(), e);
            }
            tracing::debug!("Closed log file {}", sink.path.display());
        }
    }

    /// Absolute path of the open log file
    pub fn current_file(&self) -> Option<&Path> {
        self.sink.as_ref().map(|sink| sink.path.as_path())
    }

    /// Check if a log file is open
    pub fn is_open(&self) -> bool {
        self.sink.is_some()
    }

    /// Current threshold
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Set the threshold
    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    /// Write `message` at `level`
    ///
    /// Nothing happens when no file is open, when the threshold filters the
    /// level out, or when `level` is `Off`.
    pub fn log(&mut self, level: LogLevel, message: &str) {
        if !self.level.allows(level) {
            return;
        }
        let Some(sink) = self.sink.as_mut() else {
            return;
        };

        let record = format_record(&Local::now(), level, message);
        let result = sink
            .stream
            .write_all(record.as_bytes())
            .and_then(|()| sink.stream.flush());
        if let Err(e) = result {
            tracing::warn!("Failed to write to {}: {}", sink.path.display(), e);
        }
    }

    pub fn debug(&mut self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&mut self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warning(&mut self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&mut self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn fatal(&mut self, message: &str) {
        self.log(LogLevel::Fatal, message);
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        self.close_log();
        INSTANCE_ALIVE.store(false, Ordering::Release);
    }
}
