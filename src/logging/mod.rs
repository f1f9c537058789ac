//! File logging with numbered rotation
//!
//! Provides the single-instance [`LogWriter`], its level threshold, the
//! rotation naming scheme and an optional process-wide handle.

mod error;
mod file_writer;
pub mod global;
mod level;
mod rotation;

pub use error::LogWriterError;
pub use file_writer::{format_record, version, LogWriter};
pub use level::{LogLevel, ParseLevelError};
pub use rotation::{rotate_files, rotation_file_name};
