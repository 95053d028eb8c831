use std::path::Path;

use calamine::{Reader, Xlsx, open_workbook};

use crate::error::{MergeError, Result};
use crate::model::{Cell, Row};

/// Returns the sheet names of the workbook at `path`.
///
/// Used to populate a selection surface before a run. Any failure (missing
/// file, corrupt file, unsupported format) yields an empty vector rather
/// than an error.
pub fn list_sheets(path: &Path) -> Vec<String> {
    let workbook: Xlsx<_> = match open_workbook(path) {
        Ok(workbook) => workbook,
        Err(_) => return Vec::new(),
    };
    workbook.sheet_names().to_vec()
}

/// Reads every row of `sheet_name` from the workbook at `path` with no row
/// promoted to a label role.
///
/// A missing sheet is reported as [`MergeError::SheetNotFound`] so callers
/// can classify it apart from an unreadable file.
pub fn read_sheet_rows(path: &Path, sheet_name: &str) -> Result<Vec<Row>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range(sheet_name)
        .ok_or_else(|| MergeError::SheetNotFound(sheet_name.to_string()))?
        .map_err(MergeError::from)?;

    let rows = range
        .rows()
        .map(|row| row.iter().map(Cell::from).collect())
        .collect();
    Ok(rows)
}
