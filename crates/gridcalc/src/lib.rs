//! # gridcalc
//!
//! An in-memory spreadsheet engine with incremental recalculation.
//!
//! Cells hold numbers, text or formulas over other cells. Setting a cell
//! re-evaluates exactly the cells that depend on it, in dependency order,
//! and refuses edits that would introduce a circular reference.
//!
//! ## Features
//!
//! - Cell names of letters followed by digits, case-insensitive (`a1` is `A1`)
//! - Formulas with `+ - * /`, parentheses, numbers and cell references
//! - Evaluation errors stored as cell values instead of aborting the edit
//! - JSON persistence of cell contents with atomic loading
//!
//! ## Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut sheet = Spreadsheet::new();
//! sheet.set_contents_of_cell("A1", "10").unwrap();
//! sheet.set_contents_of_cell("A2", "=A1 / 4").unwrap();
//! assert_eq!(sheet.cell_value("A2").unwrap(), CellValue::Number(2.5));
//!
//! // Circular references are rejected and nothing changes
//! let err = sheet.set_contents_of_cell("A1", "=A2").unwrap_err();
//! assert!(matches!(err, SpreadsheetError::CircularDependency(_)));
//! assert_eq!(sheet.cell_contents("A1").unwrap(), CellContents::Number(10.0));
//!
//! // Save the contents and load them into another sheet
//! let json = sheet.to_json().unwrap();
//! let copy = Spreadsheet::from_json(&json).unwrap();
//! assert_eq!(copy.cell_value("A2").unwrap(), CellValue::Number(2.5));
//! ```

pub mod cell;
pub mod document;
pub mod error;
pub mod options;
pub mod prelude;
pub mod recalc;
pub mod spreadsheet;

pub use cell::{Cell, CellContents, CellValue};
pub use document::{CellRecord, SpreadsheetDocument};
pub use error::{Result, SpreadsheetError};
pub use options::SpreadsheetOptions;
pub use recalc::recalc_order;
pub use spreadsheet::{Cells, Spreadsheet};

// Re-export core types
pub use gridcalc_core::{CellName, DependencyGraph, NodeSet};

// Re-export formula types
pub use gridcalc_formula::{EvalError, EvalResult, Formula, FormulaError, Lookup};
