use std::fs;
use std::path::Path;

use chrono::Local;
use tracing::{info, instrument, warn};

use crate::error::{MergeError, Result};
use crate::io::{excel_read, excel_write};
use crate::model::{self, Row};
use crate::report::{FailedFile, MergeObserver, RunReport};

const SPREADSHEET_EXT: &str = ".xlsx";

/// Merges data rows from every candidate workbook in `folder` under the
/// master's header block and writes the result to `output_file`.
///
/// The first `header_rows` rows of `sheet_name` in `master_file` (clamped to
/// however many rows exist) are copied verbatim. Every other `.xlsx` file in
/// the folder contributes the rows following its header offset, up to the
/// first blank row. Per-file failures are classified and recorded without
/// interrupting the run; an unreadable master or a failed output write is
/// fatal and leaves `summary.fatal` set.
#[instrument(
    level = "info",
    skip_all,
    fields(folder = %folder.display(), master = master_file, sheet = sheet_name)
)]
pub fn merge_rows(
    folder: &Path,
    master_file: &str,
    output_file: &str,
    sheet_name: &str,
    header_rows: usize,
    observer: &mut dyn MergeObserver,
) -> RunReport {
    let mut report = RunReport::default();
    let started = Local::now().format("%Y-%m-%d %H:%M:%S");
    report.record(observer, format!("=== Excel merge report ({started}) ==="));

    let master_path = folder.join(master_file);
    let mut merged: Vec<Row> = match excel_read::read_sheet_rows(&master_path, sheet_name) {
        Ok(rows) => {
            let header_len = header_rows.min(rows.len());
            rows.into_iter().take(header_len).collect()
        }
        Err(error) => {
            warn!(%error, "aborting run, master unreadable");
            let line = format!("master read failure: {error}");
            report.record(observer, line.clone());
            report.summary.fatal = Some(line);
            return report;
        }
    };

    let candidates = match candidate_files(folder, master_file, output_file) {
        Ok(files) => files,
        Err(error) => {
            warn!(%error, "aborting run, folder unreadable");
            let line = format!("folder listing failure: {error}");
            report.record(observer, line.clone());
            report.summary.fatal = Some(line);
            return report;
        }
    };
    report.summary.total_files = candidates.len();

    let mut appended: Vec<Row> = Vec::new();
    for (index, file_name) in candidates.iter().enumerate() {
        let path = folder.join(file_name);
        match scan_candidate(&path, sheet_name, header_rows) {
            Ok(rows) => {
                for (row_index, row) in &rows {
                    report.record(
                        observer,
                        format!(
                            "{file_name} -> row {}: {}",
                            row_index + 1,
                            model::format_row(row)
                        ),
                    );
                }
                appended.extend(rows.into_iter().map(|(_, row)| row));
                report.summary.success_count += 1;
            }
            Err(reason) => {
                report.record(observer, format!("skipping '{file_name}': {reason}"));
                report.summary.failed.push(FailedFile {
                    file: file_name.clone(),
                    reason,
                });
            }
        }
        observer.on_progress((index + 1) as f64 / candidates.len() as f64);
    }

    info!(
        total_files = report.summary.total_files,
        success_count = report.summary.success_count,
        appended_rows = appended.len(),
        "row scan finished"
    );

    merged.extend(appended);
    let output_path = folder.join(output_file);
    match excel_write::write_rows(&output_path, &merged) {
        Ok(()) => {
            report.summary.output_written = true;
            report.record(observer, format!("output file created: {output_file}"));
        }
        Err(error) => {
            warn!(%error, "output write failed");
            let line = format!("output write failure: {error}");
            report.record(observer, line.clone());
            report.summary.fatal = Some(line);
            return report;
        }
    }

    let mut summary_lines = vec![
        format!("total files: {}", report.summary.total_files),
        format!("merged successfully: {}", report.summary.success_count),
        format!("failed files: {}", report.summary.failed.len()),
    ];
    for failure in &report.summary.failed {
        summary_lines.push(format!(" - {}: {}", failure.file, failure.reason));
    }
    for line in summary_lines {
        report.record(observer, line);
    }

    report
}

/// Lists the candidate file names: every regular `.xlsx` file in the folder
/// except the master and output files, matched by exact name.
fn candidate_files(folder: &Path, master_file: &str, output_file: &str) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(SPREADSHEET_EXT) && name != master_file && name != output_file {
            files.push(name);
        }
    }
    // Directory iteration order is platform dependent; sort so a given
    // folder always merges in the same order.
    files.sort();
    Ok(files)
}

/// Extracts the rows one candidate contributes, tagged with their original
/// row index. `Err` carries the reason the file contributes nothing.
fn scan_candidate(
    path: &Path,
    sheet_name: &str,
    header_rows: usize,
) -> std::result::Result<Vec<(usize, Row)>, String> {
    let rows = match excel_read::read_sheet_rows(path, sheet_name) {
        Ok(rows) => rows,
        Err(MergeError::SheetNotFound(_)) => return Err("sheet not found".to_string()),
        Err(error) => return Err(error.to_string()),
    };

    if rows.len() < 2 {
        return Err("fewer than 2 rows — nothing to merge".to_string());
    }

    let mut buffer = Vec::new();
    for (index, row) in rows.into_iter().enumerate().skip(header_rows) {
        // The first blank row ends this file's data region; later rows are
        // never inspected.
        if model::row_is_blank(&row) {
            break;
        }
        buffer.push((index, row));
    }

    if buffer.is_empty() {
        return Err("second row empty or no data found".to_string());
    }
    Ok(buffer)
}
