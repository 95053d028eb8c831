use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::error::Result;
use crate::model::{Cell, Row};

/// Writes the rows to a single-sheet workbook at `path` as a raw positional
/// dump: no column header row is promoted and empty cells stay unwritten.
pub fn write_rows(path: &Path, rows: &[Row]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let row_idx = row_idx as u32;
            let col_idx = col_idx as u16;
            match cell {
                Cell::Text(value) => {
                    worksheet.write_string(row_idx, col_idx, value)?;
                }
                Cell::Number(value) => {
                    worksheet.write_number(row_idx, col_idx, *value)?;
                }
                Cell::Boolean(value) => {
                    worksheet.write_boolean(row_idx, col_idx, *value)?;
                }
                Cell::Empty => {}
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
