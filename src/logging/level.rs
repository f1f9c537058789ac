//! Log level threshold
//!
//! Levels are ordered by verbosity: a message is written when the configured
//! threshold is greater than or equal to the message level.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Log level, used both as the writer threshold and as a message severity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Nothing is logged
    #[serde(alias = "none")]
    Off = 0,
    /// Only fatal errors
    Fatal = 1,
    /// Errors and fatal errors
    Error = 2,
    /// Warnings and errors
    #[serde(alias = "warn")]
    Warning = 3,
    /// Informational messages, warnings and errors
    Info = 4,
    /// Everything
    #[default]
    Debug = 5,
}

impl LogLevel {
    /// All levels, from least to most verbose
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Off,
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    /// Three-character tag written in each record
    ///
    /// `Off` is not a message level and renders as `###`.
    pub fn tag(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DBG",
            LogLevel::Info => "INF",
            LogLevel::Warning => "WRN",
            LogLevel::Error => "ERR",
            LogLevel::Fatal => "FTL",
            LogLevel::Off => "###",
        }
    }

    /// Lowercase name, as used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Fatal => "fatal",
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// Whether a message at `message_level` passes this threshold
    pub fn allows(&self, message_level: LogLevel) -> bool {
        message_level != LogLevel::Off && *self >= message_level
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a level name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level '{0}'")]
pub struct ParseLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" | "none" => Ok(LogLevel::Off),
            "fatal" => Ok(LogLevel::Fatal),
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Off < LogLevel::Fatal);
        assert!(LogLevel::Fatal < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert_eq!(LogLevel::Debug as i32, 5);
    }

    #[test]
    fn test_threshold_allows() {
        for threshold in LogLevel::ALL {
            for message in LogLevel::ALL {
                let expected = message != LogLevel::Off && message <= threshold;
                assert_eq!(
                    threshold.allows(message),
                    expected,
                    "threshold {} message {}",
                    threshold,
                    message
                );
            }
        }
    }

    #[test]
    fn test_off_threshold_allows_nothing() {
        for message in LogLevel::ALL {
            assert!(!LogLevel::Off.allows(message));
        }
    }

    #[test]
    fn test_tags() {
        assert_eq!(LogLevel::Debug.tag(), "DBG");
        assert_eq!(LogLevel::Info.tag(), "INF");
        assert_eq!(LogLevel::Warning.tag(), "WRN");
        assert_eq!(LogLevel::Error.tag(), "ERR");
        assert_eq!(LogLevel::Fatal.tag(), "FTL");
        assert_eq!(LogLevel::Off.tag(), "###");
        for level in LogLevel::ALL {
            assert_eq!(level.tag().len(), 3);
        }
    }

    #[test]
    fn test_parse_level() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!(" warning ".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("off".parse::<LogLevel>().unwrap(), LogLevel::Off);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_default_is_debug() {
        assert_eq!(LogLevel::default(), LogLevel::Debug);
    }
}
