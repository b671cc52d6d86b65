//! Saving and loading spreadsheets
//!
//! A spreadsheet is stored as one record per non-empty cell holding the
//! cell's edit string, the same text that `set_contents_of_cell` accepts:
//!
//! ```json
//! {
//!   "Cells": {
//!     "A1": { "StringForm": "5" },
//!     "B1": { "StringForm": "=A1*2" }
//!   }
//! }
//! ```
//!
//! Values are not stored; they are recomputed when the document is loaded.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use gridcalc_core::CellName;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpreadsheetError};
use crate::options::SpreadsheetOptions;
use crate::spreadsheet::Spreadsheet;

/// Serialized form of a spreadsheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadsheetDocument {
    /// Cell name → record
    #[serde(rename = "Cells", default)]
    pub cells: BTreeMap<String, CellRecord>,
}

/// A single stored cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    /// The cell's contents as an edit string
    #[serde(rename = "StringForm")]
    pub string_form: String,
}

impl SpreadsheetDocument {
    /// Parse a document from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SpreadsheetError::Json {
            message: format!("Malformed spreadsheet document: {}", e),
            source: e,
        })
    }

    /// Encode the document as JSON
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let encoded = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        encoded.map_err(|e| SpreadsheetError::Json {
            message: format!("Failed to encode spreadsheet document: {}", e),
            source: e,
        })
    }

    /// Replay every record into a new spreadsheet
    ///
    /// Fails on the first record that does not re-apply, wrapping the cause
    /// in [`SpreadsheetError::InvalidEntry`]. Keys that differ only in case
    /// name the same cell and are rejected as [`SpreadsheetError::DuplicateCell`].
    pub fn build(&self, options: SpreadsheetOptions) -> Result<Spreadsheet> {
        let mut sheet = Spreadsheet::with_options(options);
        let mut seen = BTreeSet::new();
        for (cell, record) in &self.cells {
            let invalid = |e: SpreadsheetError| SpreadsheetError::InvalidEntry {
                cell: cell.clone(),
                source: Box::new(e),
            };
            let name = CellName::parse(cell).map_err(|e| invalid(e.into()))?;
            if !seen.insert(name.clone()) {
                return Err(invalid(SpreadsheetError::DuplicateCell(name)));
            }
            sheet
                .set_contents_of_cell(name.as_str(), &record.string_form)
                .map_err(invalid)?;
        }
        sheet.set_changed(false);
        Ok(sheet)
    }
}

impl Spreadsheet {
    /// Snapshot of the spreadsheet's contents
    pub fn to_document(&self) -> SpreadsheetDocument {
        let cells = self
            .cells()
            .map(|(name, cell)| {
                let record = CellRecord {
                    string_form: cell.contents().to_edit_string(),
                };
                (name.to_string(), record)
            })
            .collect();
        SpreadsheetDocument { cells }
    }

    /// Encode the spreadsheet as JSON, indented unless
    /// [`SpreadsheetOptions::pretty_json`] is off
    pub fn to_json(&self) -> Result<String> {
        self.to_document().to_json(self.options().pretty_json)
    }

    /// Build a spreadsheet from JSON produced by [`to_json`](Self::to_json)
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_with_options(json, SpreadsheetOptions::default())
    }

    /// Build a spreadsheet from JSON with custom options
    pub fn from_json_with_options(json: &str, options: SpreadsheetOptions) -> Result<Self> {
        SpreadsheetDocument::from_json(json)?.build(options)
    }

    /// Replace this spreadsheet's contents with a JSON document
    ///
    /// The document is fully parsed and replayed before anything is
    /// replaced. If any part of it fails, the error is returned and the
    /// spreadsheet is left exactly as it was.
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        let loaded = Self::from_json_with_options(json, self.options().clone()).map_err(|e| {
            log::warn!("{}: rejected document: {}", self.name(), e);
            e
        })?;
        log::debug!("{}: loaded {} cell(s)", self.name(), loaded.len());
        *self = loaded;
        Ok(())
    }

    /// Write the spreadsheet to `path` as JSON and clear the changed flag
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = checked_path(path.as_ref())?;
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| SpreadsheetError::Io {
            message: format!("Failed to write '{}': {}", path.display(), e),
            source: e,
        })?;
        self.set_changed(false);
        log::debug!("{}: saved {} cell(s) to {}", self.name(), self.len(), path.display());
        Ok(())
    }

    /// Replace this spreadsheet's contents with the document at `path`
    ///
    /// Atomic in the same way as [`load_json`](Self::load_json).
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let json = read_document(path.as_ref())?;
        self.load_json(&json)
    }

    /// Open the document at `path` as a new spreadsheet
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, SpreadsheetOptions::default())
    }

    /// Open the document at `path` with custom options
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: SpreadsheetOptions) -> Result<Self> {
        let json = read_document(path.as_ref())?;
        Self::from_json_with_options(&json, options)
    }
}

fn checked_path(path: &Path) -> Result<&Path> {
    if path.as_os_str().is_empty() {
        return Err(SpreadsheetError::InvalidPath(path.display().to_string()));
    }
    Ok(path)
}

fn read_document(path: &Path) -> Result<String> {
    let path = checked_path(path)?;
    fs::read_to_string(path).map_err(|e| SpreadsheetError::Io {
        message: format!("Failed to read '{}': {}", path.display(), e),
        source: e,
    })
}
