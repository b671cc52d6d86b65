//! Spreadsheet error types

use gridcalc_core::CellName;
use gridcalc_formula::FormulaError;
use thiserror::Error;

/// Result type alias using [`SpreadsheetError`]
pub type Result<T> = std::result::Result<T, SpreadsheetError>;

/// Errors raised by spreadsheet operations
///
/// Evaluation problems (undefined variables, division by zero) are not
/// errors here: they become the cell's value, see
/// [`CellValue::Error`](crate::CellValue::Error).
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    /// Cell name does not match letters-then-digits
    #[error(transparent)]
    InvalidName(#[from] gridcalc_core::Error),

    /// Formula content that failed validation
    #[error("Invalid formula: {0}")]
    Formula(#[from] FormulaError),

    /// The edit would make a cell depend on itself; nothing was changed
    #[error("Circular dependency detected involving cell {0}")]
    CircularDependency(CellName),

    /// Contents whose edit string would be read back as something else
    #[error("Contents {0} cannot be stored as entered")]
    InvalidContents(String),

    /// Two stored records name the same cell
    #[error("Cell {0} appears more than once")]
    DuplicateCell(CellName),

    /// Empty or otherwise unusable file path
    #[error("Invalid file path: '{0}'")]
    InvalidPath(String),

    /// Reading or writing a file failed
    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Encoding or decoding a spreadsheet document failed
    #[error("{message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stored cell could not be re-applied while loading
    #[error("Failed to load cell '{cell}'")]
    InvalidEntry {
        cell: String,
        #[source]
        source: Box<SpreadsheetError>,
    },
}

impl SpreadsheetError {
    /// True for failures reading, parsing or writing persisted data
    pub fn is_read_write(&self) -> bool {
        matches!(
            self,
            SpreadsheetError::InvalidPath(_)
                | SpreadsheetError::Io { .. }
                | SpreadsheetError::Json { .. }
                | SpreadsheetError::InvalidEntry { .. }
        )
    }
}
