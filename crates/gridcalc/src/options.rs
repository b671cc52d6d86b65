//! Spreadsheet options

/// Options for creating a spreadsheet
#[derive(Debug, Clone)]
pub struct SpreadsheetOptions {
    /// Display name of the spreadsheet (default: "default")
    pub name: String,
    /// Indent JSON documents produced by `to_json`/`save` (default: true)
    pub pretty_json: bool,
}

impl Default for SpreadsheetOptions {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            pretty_json: true,
        }
    }
}

impl SpreadsheetOptions {
    /// Default options with the given name
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
