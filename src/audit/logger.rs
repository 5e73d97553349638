//! Session audit logger
//!
//! Every entry is kept in memory for the lifetime of the session. When a log
//! path is configured, each entry is also appended to that file as a single
//! JSON line and flushed immediately. Entries are logged after the edit has
//! been applied, so a failed file write never fails the edit; it is kept in
//! `write_failures` for the caller to report.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{BudgetError, BudgetResult};

use super::entry::AuditEntry;

#[derive(Debug, Default)]
pub struct AuditLogger {
    entries: Vec<AuditEntry>,

    /// Optional JSONL sink
    log_path: Option<PathBuf>,

    write_failures: Vec<String>,
}

impl AuditLogger {
    /// Create a logger that only keeps entries in memory
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Create a logger that also appends to `log_path`
    ///
    /// The file is not touched until the first entry; see `open_file` for a
    /// checked variant.
    pub fn with_file(log_path: PathBuf) -> Self {
        Self {
            log_path: Some(log_path),
            ..Self::default()
        }
    }

    /// Create a file-backed logger, checking up front that the file can be
    /// opened for appending
    pub fn open_file(log_path: PathBuf) -> BudgetResult<Self> {
        open_append(&log_path)?;
        Ok(Self::with_file(log_path))
    }

    /// Record an audit entry
    ///
    /// The entry is always kept in memory. A failed append to the log file
    /// is remembered instead of returned.
    pub fn log(&mut self, entry: AuditEntry) {
        if let Some(path) = &self.log_path {
            if let Err(e) = append_line(path, &entry) {
                self.write_failures.push(e.to_string());
            }
        }
        self.entries.push(entry);
    }

    /// Errors from appends to the log file that did not go through
    pub fn write_failures(&self) -> &[String] {
        &self.write_failures
    }

    /// Entries recorded this session, oldest first
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// The most recent `count` entries of this session
    pub fn read_recent(&self, count: usize) -> &[AuditEntry] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Read every entry from the log file, including earlier sessions
    ///
    /// Returns an empty list when no file is configured or it does not exist.
    pub fn read_all(&self) -> BudgetResult<Vec<AuditEntry>> {
        let path = match &self.log_path {
            Some(path) if path.exists() => path,
            _ => return Ok(Vec::new()),
        };

        let file = File::open(path)
            .map_err(|e| BudgetError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                BudgetError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                BudgetError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }
}

fn open_append(path: &Path) -> BudgetResult<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| BudgetError::Io(format!("Failed to open audit log: {}", e)))
}

fn append_line(path: &Path, entry: &AuditEntry) -> BudgetResult<()> {
    let mut file = open_append(path)?;

    let json = serde_json::to_string(entry)
        .map_err(|e| BudgetError::Json(format!("Failed to serialize audit entry: {}", e)))?;

    writeln!(file, "{}", json)
        .map_err(|e| BudgetError::Io(format!("Failed to write audit entry: {}", e)))?;

    file.flush()
        .map_err(|e| BudgetError::Io(format!("Failed to flush audit log: {}", e)))?;

    Ok(())
}
