//! Rectangular input table.
//!
//! Row 0 is the header: two label columns followed by machine names.
//! Every other row is one operation: job name (empty to continue the
//! previous job), operation name, then one integer duration per machine.
//!
//! ```text
//! | Job | Op  | M1 | M2 | M3 |
//! | J1  | O11 | 2  | 5  | 4  |
//! |     | O12 | 5  | 4  | 5  |
//! | J2  | O21 | 2  | 5  | 4  |
//! ```
//!
//! Tables deserialize from a JSON array of arrays, where each cell is a
//! string or a number.

use serde::{Deserialize, Serialize};
use std::io::Read;

use crate::error::TableError;

/// One table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Integer value.
    Int(i64),
    /// Text value.
    Text(String),
    /// Anything else a JSON source may contain (floats, booleans, null, ...).
    Other(serde_json::Value),
}

impl Cell {
    /// Renders the cell as a label. `null` renders as an empty label.
    pub fn label(&self) -> String {
        match self {
            Cell::Int(v) => v.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Other(serde_json::Value::Null) => String::new(),
            Cell::Other(v) => v.to_string(),
        }
    }

    /// Whether the cell is empty (blank text or `null`).
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Other(serde_json::Value::Null) => true,
            _ => false,
        }
    }

    /// Reads the cell as an integer.
    ///
    /// Text is accepted when its trimmed content parses as `i64`.
    /// On failure, returns the cell's textual rendering.
    pub fn as_integer(&self) -> Result<i64, String> {
        match self {
            Cell::Int(v) => Ok(*v),
            Cell::Text(s) => s.trim().parse().map_err(|_| s.clone()),
            Cell::Other(v) => Err(v.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Cell::Int(v as i64)
    }
}

/// A rectangular grid of cells, header first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from raw rows.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Parses a JSON array of arrays.
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a JSON array of arrays from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Appends the header row: two label columns, then machine names.
    pub fn with_header<S: Into<String>>(
        mut self,
        job_label: impl Into<String>,
        operation_label: impl Into<String>,
        machines: impl IntoIterator<Item = S>,
    ) -> Self {
        let mut row = vec![
            Cell::Text(job_label.into()),
            Cell::Text(operation_label.into()),
        ];
        row.extend(machines.into_iter().map(|m| Cell::Text(m.into())));
        self.rows.push(row);
        self
    }

    /// Appends an operation row. Pass an empty `job` to continue the previous job.
    pub fn with_row(
        mut self,
        job: impl Into<String>,
        operation: impl Into<String>,
        durations: impl IntoIterator<Item = i64>,
    ) -> Self {
        let mut row = vec![Cell::Text(job.into()), Cell::Text(operation.into())];
        row.extend(durations.into_iter().map(Cell::Int));
        self.rows.push(row);
        self
    }

    /// Appends an arbitrary row.
    pub fn with_raw_row(mut self, row: Vec<Cell>) -> Self {
        self.rows.push(row);
        self
    }

    /// All rows, header first.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows including the header.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
