//! Prelude module - common imports for gridcalc users
//!
//! ```rust
//! use gridcalc::prelude::*;
//! ```

pub use crate::{
    // Cell types
    CellContents,
    CellName,
    CellValue,
    // Error types
    EvalError,
    Formula,
    FormulaError,
    Result,
    // Main types
    Spreadsheet,
    SpreadsheetError,
    SpreadsheetOptions,
};
