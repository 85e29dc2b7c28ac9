//! Durable record of solver disagreements

use crate::error::{OracleError, Result};
use crate::oracle::mode::OracleConfig;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Default bug log file name
pub const DEFAULT_LOG_FILE: &str = "bugs.txt";

/// A case where the solver contradicted the ground truth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchRecord {
    pub word1: String,
    pub word2: String,
    pub config: OracleConfig,
    /// Seed of the sub-minimal script; `None` in sat mode
    pub seed: Option<u64>,
}

impl fmt::Display for MismatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, solver: {}, mode: {}, seed: ",
            self.word1, self.word2, self.config.backend, self.config.mode
        )?;
        match self.seed {
            Some(seed) => write!(f, "{seed}"),
            None => write!(f, "none"),
        }
    }
}

/// Thread-safe, append-only list of mismatches.
///
/// With a file sink every record is appended as one line while the lock is
/// held, so concurrent workers never interleave partial lines.
#[derive(Debug, Default)]
pub struct MismatchLog {
    records: Mutex<Vec<MismatchRecord>>,
    path: Option<PathBuf>,
}

impl MismatchLog {
    /// Records kept in memory only
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Records also appended to `path`, which is created if missing and
    /// never truncated.
    pub fn appending_to(path: impl Into<PathBuf>) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Store `record`. The in-memory entry is kept even when the file append
    /// fails.
    pub fn record(&self, record: MismatchRecord) -> Result<()> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let appended = match &self.path {
            Some(path) => append_line(path, &record.to_string()),
            None => Ok(()),
        };
        records.push(record);
        appended
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of every record so far, in recording order
    pub fn snapshot(&self) -> Vec<MismatchRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    let wrap = |source: std::io::Error| OracleError::MismatchLog {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(wrap)?;
    writeln!(file, "{line}").map_err(wrap)
}
