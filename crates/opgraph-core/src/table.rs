//! Tabular input read from delimited text.
//!
//! Rows may have different lengths. A row shorter than a column simply has
//! no cell there and is skipped when that column is read; so is an empty
//! cell.

use serde::Serialize;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// Classification of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Every present cell parses as a number.
    Numeric,
    /// No present cell parses as a number.
    String,
    /// Some cells parse as numbers and some do not.
    Mixed,
    /// The column has no cells.
    Unknown,
}

/// Column access used by the pipeline.
pub trait ColumnSource {
    /// Classifies a 0-based column.
    fn column_type(&self, column: usize) -> ColumnType;

    /// Reads a column as numbers.
    ///
    /// # Errors
    ///
    /// Returns `NotANumber` for the first cell that does not parse.
    fn read_numeric_column(&self, column: usize) -> Result<Vec<f64>>;

    /// Reads a column as text.
    fn read_string_column(&self, column: usize) -> Vec<String>;
}

/// In-memory table of trimmed cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Builds a table from rows of cells. Cells are trimmed.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|c| c.as_ref().trim().to_string()).collect())
            .collect();
        Self { rows }
    }

    /// Reads a table from delimited text.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid delimited text.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8, has_header: bool) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(has_header)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self { rows })
    }

    /// Reads a table from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn from_path<P: AsRef<Path>>(path: P, delimiter: u8, has_header: bool) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let table = Self::from_reader(file, delimiter, has_header)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            rows = table.row_count(),
            "table loaded"
        );
        Ok(table)
    }

    /// Returns the number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the widest row's length.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    fn cells(&self, column: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter_map(move |row| row.get(column))
            .map(String::as_str)
            .filter(|cell| !cell.is_empty())
    }
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok()
}

impl ColumnSource for DataTable {
    fn column_type(&self, column: usize) -> ColumnType {
        let mut numeric = 0usize;
        let mut text = 0usize;
        for cell in self.cells(column) {
            if parse_number(cell).is_some() {
                numeric += 1;
            } else {
                text += 1;
            }
        }
        match (numeric, text) {
            (0, 0) => ColumnType::Unknown,
            (_, 0) => ColumnType::Numeric,
            (0, _) => ColumnType::String,
            _ => ColumnType::Mixed,
        }
    }

    fn read_numeric_column(&self, column: usize) -> Result<Vec<f64>> {
        self.cells(column)
            .map(|cell| {
                parse_number(cell).ok_or_else(|| Error::NotANumber {
                    column,
                    value: cell.to_string(),
                })
            })
            .collect()
    }

    fn read_string_column(&self, column: usize) -> Vec<String> {
        self.cells(column).map(str::to_string).collect()
    }
}
