use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;

/// Receives report lines and completion fractions as a merge progresses.
///
/// The engine holds no reference to any presentation layer; whatever drives
/// it (a CLI, a GUI shell) implements this trait to mirror the run live.
pub trait MergeObserver {
    /// Called once for every line recorded in the run report.
    fn on_line(&mut self, _line: &str) {}

    /// Called after each candidate file with the completed fraction in
    /// `0.0..=1.0`.
    fn on_progress(&mut self, _fraction: f64) {}
}

/// Observer that ignores every notification.
pub struct NullObserver;

impl MergeObserver for NullObserver {}

/// A candidate file that contributed nothing, with the reason it was
/// skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedFile {
    pub file: String,
    pub reason: String,
}

/// Aggregate statistics of a single merge run. A candidate appears either
/// in `success_count` or in `failed`, never both.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeSummary {
    pub total_files: usize,
    pub success_count: usize,
    pub failed: Vec<FailedFile>,
    /// Set when the run aborted: master unreadable or output write failure.
    pub fatal: Option<String>,
    pub output_written: bool,
}

/// The complete ordered log of a single merge invocation. Immutable once
/// the run returns; persisted verbatim by [`persist`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub lines: Vec<String>,
    pub summary: MergeSummary,
}

impl RunReport {
    /// Appends a line to the report and mirrors it to the observer.
    pub fn record(&mut self, observer: &mut dyn MergeObserver, line: impl Into<String>) {
        let line = line.into();
        observer.on_line(&line);
        self.lines.push(line);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Persists the report to `merge_log_<YYYYMMDD_HHMMSS>.txt` inside
/// `folder`, one line per report line, UTF-8.
///
/// An empty report is a no-op returning `None`. A write failure is returned
/// to the caller and does not invalidate the merge that already completed.
pub fn persist(folder: &Path, report: &RunReport) -> Result<Option<PathBuf>> {
    if report.is_empty() {
        return Ok(None);
    }

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = folder.join(format!("merge_log_{timestamp}.txt"));
    let mut contents = report.lines.join("\n");
    contents.push('\n');
    fs::write(&path, contents)?;
    debug!(path = %path.display(), lines = report.lines.len(), "run report persisted");
    Ok(Some(path))
}
