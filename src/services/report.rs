//! Run log artifact and batch results.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufWriter, Write};

/// Block separator used throughout the run log.
pub const SEPARATOR: &str =
    "----------------------------------------------------------------------";

/// Plain-text run log, one file per invocation, CRLF line endings.
///
/// A disabled log swallows every write, so callers log unconditionally. A
/// write failure mid-run downgrades the log to disabled rather than
/// disturbing the batch.
pub struct RunLog {
    writer: Option<BufWriter<File>>,
}

impl RunLog {
    /// Open (and truncate) the log file at `path`.
    pub fn create(path: &Utf8Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create run log: {path}"))?;
        Ok(Self {
            writer: Some(BufWriter::new(file)),
        })
    }

    /// A log that discards everything.
    pub fn disabled() -> Self {
        Self { writer: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    /// Append one line, flushed immediately.
    pub fn line(&mut self, message: &str) {
        if let Some(writer) = self.writer.as_mut() {
            let result = writer
                .write_all(message.as_bytes())
                .and_then(|_| writer.write_all(b"\r\n"))
                .and_then(|_| writer.flush());
            if result.is_err() {
                tracing::warn!("Run log write failed, disabling log output");
                self.writer = None;
            }
        }
    }

    pub fn blank(&mut self) {
        self.line("");
    }

    pub fn separator(&mut self) {
        self.line(SEPARATOR);
    }
}

/// Outcome of a batch run.
///
/// `flagged` maps each file that produced at least one finding to its
/// findings, in the order the batch visited them; clean files are counted
/// but not listed.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub files_found: usize,
    pub files_processed: usize,
    pub cancelled: bool,
    pub flagged: IndexMap<Utf8PathBuf, Vec<String>>,
}

impl BatchSummary {
    pub fn new(files_found: usize) -> Self {
        Self {
            files_found,
            ..Self::default()
        }
    }

    /// Record findings for one file. Empty findings are dropped.
    pub fn flag(&mut self, file: &Utf8Path, findings: Vec<String>) {
        if !findings.is_empty() {
            self.flagged
                .entry(file.to_path_buf())
                .or_default()
                .extend(findings);
        }
    }

    pub fn is_clean(&self) -> bool {
        self.flagged.is_empty()
    }
}
