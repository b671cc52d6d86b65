//! Cell contents and values

use std::fmt;

use gridcalc_formula::{EvalError, EvalResult, Formula, FormulaResult};

/// What the user put in a cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellContents {
    /// Empty cell (never stored)
    Empty,
    /// Numeric literal
    Number(f64),
    /// Anything that is neither a number nor a formula
    Text(String),
    /// Formula entered with a leading '='
    Formula(Formula),
}

impl CellContents {
    /// Classify an edit string
    ///
    /// - `""` is [`CellContents::Empty`]
    /// - anything that parses as a finite number (surrounding whitespace
    ///   allowed) is a [`CellContents::Number`]
    /// - a leading `=` makes the rest a [`CellContents::Formula`]
    /// - everything else is [`CellContents::Text`]
    ///
    /// # Example
    /// ```rust
    /// use gridcalc::CellContents;
    ///
    /// assert_eq!(CellContents::parse("2.50").unwrap(), CellContents::Number(2.5));
    /// assert_eq!(CellContents::parse("hi").unwrap(), CellContents::Text("hi".into()));
    /// assert!(CellContents::parse("=a1 + 1").unwrap().is_formula());
    /// assert!(CellContents::parse("=1 +").is_err());
    /// ```
    pub fn parse(content: &str) -> FormulaResult<Self> {
        if content.is_empty() {
            return Ok(CellContents::Empty);
        }
        if let Ok(n) = content.trim().parse::<f64>() {
            if n.is_finite() {
                return Ok(CellContents::Number(n));
            }
        }
        if let Some(formula) = content.strip_prefix('=') {
            return Ok(CellContents::Formula(Formula::new(formula)?));
        }
        Ok(CellContents::Text(content.to_string()))
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellContents::Empty)
    }

    /// Check if the cell contains a formula
    pub fn is_formula(&self) -> bool {
        matches!(self, CellContents::Formula(_))
    }

    /// Get the formula if this is a formula cell
    pub fn as_formula(&self) -> Option<&Formula> {
        match self {
            CellContents::Formula(formula) => Some(formula),
            _ => None,
        }
    }

    /// The string that, passed back to `set_contents_of_cell`, recreates these contents
    pub fn to_edit_string(&self) -> String {
        self.to_string()
    }

    /// Bring hand-built contents into the form [`parse`](Self::parse) produces
    ///
    /// Empty text becomes [`CellContents::Empty`]. Returns `None` for contents
    /// whose edit string would be read back as something else, such as
    /// non-finite numbers or text that looks like a number or formula.
    pub fn normalized(self) -> Option<Self> {
        let contents = match self {
            CellContents::Text(s) if s.is_empty() => CellContents::Empty,
            other => other,
        };
        match CellContents::parse(&contents.to_edit_string()) {
            Ok(reparsed) if reparsed == contents => Some(contents),
            _ => None,
        }
    }
}

impl fmt::Display for CellContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellContents::Empty => Ok(()),
            CellContents::Number(n) => write!(f, "{}", n),
            CellContents::Text(s) => f.write_str(s),
            CellContents::Formula(formula) => write!(f, "={}", formula),
        }
    }
}

/// The computed value of a cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell
    Empty,
    /// Numeric value
    Number(f64),
    /// Text value
    Text(String),
    /// Formula evaluation failed
    Error(EvalError),
}

impl CellValue {
    /// Get the value as a number
    ///
    /// Only [`CellValue::Number`] converts; text, errors and empty cells
    /// are undefined to formulas that reference them.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the value as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Check if the value is an evaluation error
    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }

    /// Get the error if this is one
    pub fn as_error(&self) -> Option<&EvalError> {
        match self {
            CellValue::Error(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EvalResult> for CellValue {
    fn from(result: EvalResult) -> Self {
        match result {
            Ok(n) => CellValue::Number(n),
            Err(e) => CellValue::Error(e),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Error(e) => write!(f, "#ERROR: {}", e),
        }
    }
}

/// A stored cell: its contents and current value
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    contents: CellContents,
    value: CellValue,
}

impl Cell {
    /// Create a cell; formula cells start out with an empty value until recalculated
    pub(crate) fn new(contents: CellContents) -> Self {
        let value = match &contents {
            CellContents::Empty | CellContents::Formula(_) => CellValue::Empty,
            CellContents::Number(n) => CellValue::Number(*n),
            CellContents::Text(s) => CellValue::Text(s.clone()),
        };
        Self { contents, value }
    }

    /// The cell's contents
    pub fn contents(&self) -> &CellContents {
        &self.contents
    }

    /// The cell's current value
    pub fn value(&self) -> &CellValue {
        &self.value
    }

    pub(crate) fn set_value(&mut self, value: CellValue) {
        self.value = value;
    }
}
