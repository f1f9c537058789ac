use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rotolog::config::Config;
use rotolog::logging::{self, LogLevel, LogWriter};

fn main() -> Result<()> {
    // Diagnostics go to stderr, records go to the log file
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rotolog=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => Config::load_from(&PathBuf::from(path))?,
        None => Config::load()?,
    };

    let writer = LogWriter::with_config(&config).context("Failed to open log")?;
    tracing::info!(
        "rotolog {} logging to: {}",
        logging::version(),
        config.log_file.display()
    );
    logging::global::install(writer);

    let piped = pipe_lines(io::stdin().lock(), |line| {
        logging::global::log(LogLevel::Info, line)
    });

    drop(logging::global::shutdown());
    piped.context("Failed to read stdin")?;
    Ok(())
}

/// Feed each line of `reader` to `sink`, without its line ending
///
/// Invalid UTF-8 is replaced rather than ending the run. Returns the number
/// of lines read.
fn pipe_lines(mut reader: impl BufRead, mut sink: impl FnMut(&str)) -> io::Result<usize> {
    let mut buf = Vec::new();
    let mut count = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(count);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        sink(&String::from_utf8_lossy(&buf));
        count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        let count = pipe_lines(input, |line| lines.push(line.to_string())).unwrap();
        assert_eq!(count, lines.len());
        lines
    }

    #[test]
    fn test_pipe_lines_strips_line_endings() {
        assert_eq!(collect(b"one\ntwo\r\nthree"), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_pipe_lines_keeps_going_after_invalid_utf8() {
        let lines = collect(b"before\n\xff\xfebad\nafter\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "before");
        assert_eq!(lines[1], "\u{FFFD}\u{FFFD}bad");
        assert_eq!(lines[2], "after");
    }

    #[test]
    fn test_pipe_lines_empty_input() {
        assert!(collect(b"").is_empty());
    }
}
