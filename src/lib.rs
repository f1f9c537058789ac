//! rotolog - single-instance file logger with numbered rotation
//!
//! This library provides the log writer, its rotation scheme and the
//! configuration used to set it up.

pub mod config;
pub mod logging;

pub use logging::{LogLevel, LogWriter, LogWriterError};
