use calamine::DataType;
use serde::{Deserialize, Serialize};

/// A single spreadsheet cell value. Alignment between rows is by column
/// index only; rows are free to have different lengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Cell {
    /// Plain text cell.
    Text(String),
    /// Numeric cell. Integers read from a workbook are widened to `f64`.
    Number(f64),
    /// Boolean cell.
    Boolean(bool),
    /// Empty cell.
    Empty,
}

/// An ordered sequence of cells as read from one worksheet row.
pub type Row = Vec<Cell>;

impl Cell {
    /// A cell is blank when it is empty or its trimmed text is empty.
    /// Numbers and booleans are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Text(value) => value.trim().is_empty(),
            Cell::Number(_) | Cell::Boolean(_) => false,
            Cell::Empty => true,
        }
    }
}

impl From<&DataType> for Cell {
    fn from(cell: &DataType) -> Self {
        match cell {
            DataType::String(value) => Cell::Text(value.clone()),
            DataType::Float(value) => Cell::Number(*value),
            DataType::Int(value) => Cell::Number(*value as f64),
            DataType::Bool(value) => Cell::Boolean(*value),
            DataType::Empty => Cell::Empty,
            other => Cell::Text(other.to_string()),
        }
    }
}

/// A row is blank when it has no cells or every cell is blank. The first
/// blank row in a candidate's data region terminates that file's scan.
pub fn row_is_blank(row: &[Cell]) -> bool {
    row.iter().all(Cell::is_blank)
}

/// Renders a row for the run report, e.g. `["Alice", 30, ""]`.
pub fn format_row(row: &[Cell]) -> String {
    let cells: Vec<String> = row
        .iter()
        .map(|cell| match cell {
            Cell::Text(value) => format!("{value:?}"),
            Cell::Number(value) => value.to_string(),
            Cell::Boolean(value) => value.to_string(),
            Cell::Empty => "\"\"".to_string(),
        })
        .collect();
    format!("[{}]", cells.join(", "))
}
