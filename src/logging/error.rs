//! Errors reported by the log writer

use std::io;
use std::path::PathBuf;

/// Failure to construct a writer or open a log file
#[derive(Debug, thiserror::Error)]
pub enum LogWriterError {
    /// Another `LogWriter` is alive in this process
    #[error("a LogWriter instance already exists")]
    AlreadyExists,

    /// The log path could not be made absolute
    #[error("failed to resolve log path {}", path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The parent directory of the log file could not be created
    #[error("failed to create log directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The log file could not be opened for writing
    #[error("failed to open log file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
