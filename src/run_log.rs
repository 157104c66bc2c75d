//! Append-only audit log for per-URL failures.
//!
//! An explicit handle rather than a process-global logger: opened once at
//! startup and passed to the stages that record outcomes. Successes are
//! reported on stdout only; the file keeps the WARNING/ERROR trail across
//! runs for later inspection.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;

/// Audit log file name, created in the working directory and appended to
/// across runs.
pub const DEFAULT_LOG_FILE: &str = "download_logs.txt";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

enum LogSink {
    File(File),
    Stderr,
}

impl LogSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self {
            LogSink::File(file) => writeln!(file, "{line}"),
            LogSink::Stderr => writeln!(io::stderr().lock(), "{line}"),
        }
    }
}

/// Handle to the append-only audit log.
pub struct RunLog {
    sink: Mutex<LogSink>,
}

impl RunLog {
    /// Opens (or creates) [`DEFAULT_LOG_FILE`] in the current working
    /// directory.
    pub fn open_default() -> Result<Self> {
        Self::open_at(Path::new(DEFAULT_LOG_FILE))
    }

    /// Opens (or creates) the audit log at `path` in append mode.
    pub fn open_at(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        Ok(RunLog {
            sink: Mutex::new(LogSink::File(file)),
        })
    }

    /// A handle that writes audit lines to stderr instead of a file, for when
    /// the log file cannot be opened.
    pub fn stderr() -> Self {
        RunLog {
            sink: Mutex::new(LogSink::Stderr),
        }
    }

    /// Records a recoverable per-URL failure (bad status, unusable URL).
    pub fn warning(&self, message: &str) {
        self.append("WARNING", message);
    }

    /// Records a transport-level failure.
    pub fn error(&self, message: &str) {
        self.append("ERROR", message);
    }

    fn append(&self, level: &str, message: &str) {
        let line = format!(
            "{} - {} - {}",
            Local::now().format(TIMESTAMP_FORMAT),
            level,
            message
        );
        let mut sink = self.sink.lock().unwrap();
        if sink.write_line(&line).is_err() {
            eprintln!("{line}");
        }
    }
}
