//! The spreadsheet engine
//!
//! A [`Spreadsheet`] owns the cell store and the dependency graph between
//! cells. Every edit goes through [`Spreadsheet::set_contents_of_cell`],
//! which keeps the two in step and recalculates the affected formulas.

use std::collections::{btree_map, BTreeMap, BTreeSet};

use gridcalc_core::{CellName, DependencyGraph};

use crate::cell::{Cell, CellContents, CellValue};
use crate::error::{Result, SpreadsheetError};
use crate::options::SpreadsheetOptions;
use crate::recalc::recalc_order;

/// An in-memory spreadsheet with automatic recalculation
///
/// # Example
///
/// ```rust
/// use gridcalc::{CellValue, Spreadsheet};
///
/// let mut sheet = Spreadsheet::new();
/// sheet.set_contents_of_cell("A1", "3").unwrap();
/// sheet.set_contents_of_cell("B1", "=A1*2").unwrap();
///
/// let changed = sheet.set_contents_of_cell("A1", "5").unwrap();
/// assert_eq!(changed, vec!["A1", "B1"]);
/// assert_eq!(sheet.cell_value("B1").unwrap(), CellValue::Number(10.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Spreadsheet {
    options: SpreadsheetOptions,
    /// Non-empty cells only
    cells: BTreeMap<CellName, Cell>,
    /// Edge (a, b) means b's formula reads a
    graph: DependencyGraph<CellName>,
    /// Modified since creation or the last save/load
    changed: bool,
}

impl Spreadsheet {
    /// Create an empty spreadsheet with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty spreadsheet with the given name
    pub fn with_name<S: Into<String>>(name: S) -> Self {
        Self::with_options(SpreadsheetOptions::named(name))
    }

    /// Create an empty spreadsheet with custom options
    pub fn with_options(options: SpreadsheetOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.options.name
    }

    pub fn options(&self) -> &SpreadsheetOptions {
        &self.options
    }

    /// Whether the spreadsheet was modified since it was created, saved or loaded
    pub fn changed(&self) -> bool {
        self.changed
    }

    pub(crate) fn set_changed(&mut self, changed: bool) {
        self.changed = changed;
    }

    /// Set a cell from its edit string and recalculate
    ///
    /// `content` is classified by [`CellContents::parse`]: a number, a
    /// formula after a leading `=`, the empty string (which empties the
    /// cell), or text.
    ///
    /// Returns the normalized `name` followed by every cell that depends on
    /// it directly or indirectly, each after all of the cells it reads.
    ///
    /// # Errors
    ///
    /// - [`SpreadsheetError::InvalidName`](crate::SpreadsheetError::InvalidName)
    ///   if `name` is not letters followed by digits
    /// - [`SpreadsheetError::Formula`](crate::SpreadsheetError::Formula) if a
    ///   formula does not validate
    /// - [`SpreadsheetError::CircularDependency`](crate::SpreadsheetError::CircularDependency)
    ///   if the formula would make the cell depend on itself
    ///
    /// The spreadsheet is unchanged whenever an error is returned.
    pub fn set_contents_of_cell(&mut self, name: &str, content: &str) -> Result<Vec<CellName>> {
        let name = CellName::parse(name)?;
        let contents = CellContents::parse(content)?;
        self.apply_contents(name, contents)
    }

    /// Set a cell from already-classified contents and recalculate
    ///
    /// Same as [`set_contents_of_cell`](Self::set_contents_of_cell) without
    /// the parsing step. Contents go through [`CellContents::normalized`]
    /// first, so empty text empties the cell.
    ///
    /// # Errors
    ///
    /// [`SpreadsheetError::InvalidContents`](crate::SpreadsheetError::InvalidContents)
    /// for contents that would change kind when saved and loaded again, plus
    /// the errors of `set_contents_of_cell`.
    pub fn set_cell_contents(
        &mut self,
        name: CellName,
        contents: CellContents,
    ) -> Result<Vec<CellName>> {
        let edit = contents.to_edit_string();
        let contents = contents
            .normalized()
            .ok_or_else(|| SpreadsheetError::InvalidContents(format!("{:?}", edit)))?;
        self.apply_contents(name, contents)
    }

    /// Store classified contents, keeping the graph in step
    fn apply_contents(&mut self, name: CellName, contents: CellContents) -> Result<Vec<CellName>> {
        let order = match contents.as_formula() {
            Some(formula) => {
                let previous = self.graph.dependees(&name);
                self.graph
                    .replace_dependees(&name, formula.variables().iter().cloned());

                match recalc_order(&self.graph, &name) {
                    Ok(order) => order,
                    Err(e) => {
                        self.graph.replace_dependees(&name, previous);
                        log::warn!("rejected formula for {}: {}", name, e);
                        return Err(e);
                    }
                }
            }
            None => {
                self.graph.replace_dependees(&name, std::iter::empty());
                recalc_order(&self.graph, &name)?
            }
        };

        if contents.is_empty() {
            self.cells.remove(&name);
        } else {
            self.cells.insert(name.clone(), Cell::new(contents));
        }

        self.recalculate(&order);
        self.changed = true;
        log::debug!(
            "{}: recalculated {} cell(s) after editing {}",
            self.name(),
            order.len(),
            name
        );
        Ok(order)
    }

    /// Re-evaluate formula cells in the given order
    fn recalculate(&mut self, order: &[CellName]) {
        for name in order {
            let value = match self.cells.get(name).map(Cell::contents) {
                Some(CellContents::Formula(formula)) => {
                    let cells = &self.cells;
                    let lookup =
                        |var: &str| cells.get(var).and_then(|cell| cell.value().as_number());
                    CellValue::from(formula.evaluate(&lookup))
                }
                _ => continue,
            };

            log::trace!("{} = {:?}", name, value);
            if let Some(cell) = self.cells.get_mut(name) {
                cell.set_value(value);
            }
        }
    }

    /// Contents of a cell; [`CellContents::Empty`] if it was never set
    pub fn cell_contents(&self, name: &str) -> Result<CellContents> {
        let name = CellName::parse(name)?;
        Ok(self
            .cells
            .get(&name)
            .map(|cell| cell.contents().clone())
            .unwrap_or(CellContents::Empty))
    }

    /// Value of a cell; [`CellValue::Empty`] if it was never set
    pub fn cell_value(&self, name: &str) -> Result<CellValue> {
        let name = CellName::parse(name)?;
        Ok(self
            .cells
            .get(&name)
            .map(|cell| cell.value().clone())
            .unwrap_or(CellValue::Empty))
    }

    /// Get a stored cell
    pub fn cell(&self, name: &CellName) -> Option<&Cell> {
        self.cells.get(name)
    }

    /// Names of every non-empty cell
    pub fn names_of_all_nonempty_cells(&self) -> BTreeSet<CellName> {
        self.cells.keys().cloned().collect()
    }

    /// Iterate over non-empty cells in name order
    pub fn cells(&self) -> Cells<'_> {
        Cells {
            inner: self.cells.iter(),
        }
    }

    /// Number of non-empty cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells whose formulas read `name` directly
    pub fn direct_dependents(&self, name: &str) -> Result<BTreeSet<CellName>> {
        let name = CellName::parse(name)?;
        Ok(self.graph.dependents(&name).into_iter().collect())
    }

    /// The dependency graph between cells
    pub fn graph(&self) -> &DependencyGraph<CellName> {
        &self.graph
    }
}

/// Iterator over `(name, cell)` pairs, see [`Spreadsheet::cells`]
#[derive(Debug, Clone)]
pub struct Cells<'a> {
    inner: btree_map::Iter<'a, CellName, Cell>,
}

impl<'a> Iterator for Cells<'a> {
    type Item = (&'a CellName, &'a Cell);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Cells<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpreadsheetError;
    use gridcalc_formula::EvalError;
    use pretty_assertions::assert_eq;

    fn names(list: &[CellName]) -> Vec<&str> {
        list.iter().map(CellName::as_str).collect()
    }

    #[test]
    fn test_new_sheet() {
        let sheet = Spreadsheet::new();
        assert!(sheet.is_empty());
        assert!(!sheet.changed());
        assert_eq!(sheet.name(), "default");
        assert_eq!(Spreadsheet::with_name("budget").name(), "budget");
    }

    #[test]
    fn test_number_and_text() {
        let mut sheet = Spreadsheet::new();
        assert_eq!(names(&sheet.set_contents_of_cell("a1", "5").unwrap()), vec!["A1"]);
        sheet.set_contents_of_cell("B2", "hello").unwrap();

        assert_eq!(sheet.cell_contents("A1").unwrap(), CellContents::Number(5.0));
        assert_eq!(sheet.cell_value("a1").unwrap(), CellValue::Number(5.0));
        assert_eq!(sheet.cell_value("B2").unwrap(), CellValue::Text("hello".into()));
        assert!(sheet.changed());
    }

    #[test]
    fn test_absent_cell_is_empty() {
        let sheet = Spreadsheet::new();
        assert_eq!(sheet.cell_contents("Z99").unwrap(), CellContents::Empty);
        assert_eq!(sheet.cell_value("Z99").unwrap(), CellValue::Empty);
    }

    #[test]
    fn test_invalid_names() {
        let mut sheet = Spreadsheet::new();
        for bad in ["", "1A", "A", "A1B", "A 1", "_A1"] {
            assert!(matches!(
                sheet.set_contents_of_cell(bad, "1"),
                Err(SpreadsheetError::InvalidName(_))
            ));
            assert!(sheet.cell_value(bad).is_err());
        }
        assert!(!sheet.changed());
    }

    #[test]
    fn test_formula_recalculates_dependents() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "2").unwrap();
        sheet.set_contents_of_cell("B1", "=A1*3").unwrap();
        sheet.set_contents_of_cell("C1", "=B1+A1").unwrap();
        assert_eq!(sheet.cell_value("C1").unwrap(), CellValue::Number(8.0));

        let order = sheet.set_contents_of_cell("A1", "10").unwrap();
        assert_eq!(names(&order), vec!["A1", "B1", "C1"]);
        assert_eq!(sheet.cell_value("B1").unwrap(), CellValue::Number(30.0));
        assert_eq!(sheet.cell_value("C1").unwrap(), CellValue::Number(40.0));
    }

    #[test]
    fn test_cycle_is_rejected_and_rolled_back() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "=B1+1").unwrap();
        sheet.set_contents_of_cell("B1", "=C1").unwrap();

        let err = sheet.set_contents_of_cell("C1", "=A1").unwrap_err();
        assert!(matches!(err, SpreadsheetError::CircularDependency(ref cell) if cell == "C1"));

        assert_eq!(sheet.cell_contents("C1").unwrap(), CellContents::Empty);
        assert!(sheet.graph().dependees("C1").is_empty());
        assert_eq!(sheet.graph().size(), 2);
    }

    #[test]
    fn test_cycle_keeps_previous_formula() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "1").unwrap();
        sheet.set_contents_of_cell("B1", "=A1+1").unwrap();

        assert!(sheet.set_contents_of_cell("A1", "=B1").is_err());
        assert_eq!(sheet.cell_contents("A1").unwrap(), CellContents::Number(1.0));
        assert_eq!(sheet.cell_value("B1").unwrap(), CellValue::Number(2.0));

        // The old edge from A1 to B1 is intact
        let order = sheet.set_contents_of_cell("A1", "5").unwrap();
        assert_eq!(names(&order), vec!["A1", "B1"]);
        assert_eq!(sheet.cell_value("B1").unwrap(), CellValue::Number(6.0));
    }

    #[test]
    fn test_self_reference_rejected() {
        let mut sheet = Spreadsheet::new();
        assert!(matches!(
            sheet.set_contents_of_cell("A1", "=A1+1"),
            Err(SpreadsheetError::CircularDependency(_))
        ));
        assert!(sheet.is_empty());
        assert!(sheet.graph().is_empty());
    }

    #[test]
    fn test_invalid_formula_leaves_sheet_unchanged() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "=1+1").unwrap();
        assert!(matches!(
            sheet.set_contents_of_cell("A1", "=1+"),
            Err(SpreadsheetError::Formula(_))
        ));
        assert_eq!(sheet.cell_value("A1").unwrap(), CellValue::Number(2.0));
    }

    #[test]
    fn test_errors_propagate_as_undefined() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "=1/0").unwrap();
        sheet.set_contents_of_cell("B1", "=A1+1").unwrap();
        sheet.set_contents_of_cell("C1", "text").unwrap();
        sheet.set_contents_of_cell("D1", "=C1*2").unwrap();
        sheet.set_contents_of_cell("E1", "=Z1").unwrap();

        assert_eq!(sheet.cell_value("A1").unwrap(), CellValue::Error(EvalError::DivisionByZero));
        assert_eq!(
            sheet.cell_value("B1").unwrap(),
            CellValue::Error(EvalError::UndefinedVariable("A1".into()))
        );
        assert_eq!(
            sheet.cell_value("D1").unwrap(),
            CellValue::Error(EvalError::UndefinedVariable("C1".into()))
        );
        assert_eq!(
            sheet.cell_value("E1").unwrap(),
            CellValue::Error(EvalError::UndefinedVariable("Z1".into()))
        );

        // Fixing the source fixes the chain
        sheet.set_contents_of_cell("A1", "4").unwrap();
        assert_eq!(sheet.cell_value("B1").unwrap(), CellValue::Number(5.0));
    }

    #[test]
    fn test_emptying_a_cell() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "1").unwrap();
        sheet.set_contents_of_cell("B1", "=A1").unwrap();

        let order = sheet.set_contents_of_cell("A1", "").unwrap();
        assert_eq!(names(&order), vec!["A1", "B1"]);
        assert_eq!(sheet.cell_contents("A1").unwrap(), CellContents::Empty);
        assert!(!sheet.names_of_all_nonempty_cells().contains("A1"));
        assert!(sheet.cell_value("B1").unwrap().is_error());

        // Emptying a formula cell drops its edges
        sheet.set_contents_of_cell("B1", "").unwrap();
        assert!(sheet.graph().is_empty());
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_replacing_formula_replaces_edges() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("C1", "=A1+B1").unwrap();
        sheet.set_contents_of_cell("C1", "=B1*D1").unwrap();

        assert_eq!(sheet.direct_dependents("A1").unwrap(), BTreeSet::new());
        assert_eq!(
            sheet.direct_dependents("b1").unwrap(),
            BTreeSet::from([CellName::parse("C1").unwrap()])
        );

        sheet.set_contents_of_cell("C1", "7").unwrap();
        assert!(sheet.graph().is_empty());
    }

    #[test]
    fn test_names_of_nonempty_cells() {
        let mut sheet = Spreadsheet::new();
        for (name, content) in [("b2", "1"), ("A1", "x"), ("C3", "=A1"), ("D4", "")] {
            sheet.set_contents_of_cell(name, content).unwrap();
        }
        let names: Vec<String> = sheet
            .names_of_all_nonempty_cells()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(names, vec!["A1", "B2", "C3"]);
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.cells().len(), 3);
    }

    #[test]
    fn test_set_cell_contents_directly() {
        let mut sheet = Spreadsheet::new();
        let a1 = CellName::parse("A1").unwrap();
        sheet.set_cell_contents(a1.clone(), CellContents::Number(2.0)).unwrap();
        let a2 = CellName::parse("A2").unwrap();
        sheet
            .set_cell_contents(a2, CellContents::parse("=A1/4").unwrap())
            .unwrap();
        assert_eq!(sheet.cell_value("A2").unwrap(), CellValue::Number(0.5));
        assert_eq!(sheet.cell(&a1).map(Cell::value), Some(&CellValue::Number(2.0)));
    }

    #[test]
    fn test_set_cell_contents_empty_text_removes_cell() {
        let mut sheet = Spreadsheet::new();
        let a1 = CellName::parse("A1").unwrap();
        sheet.set_contents_of_cell("A1", "x").unwrap();

        sheet.set_cell_contents(a1.clone(), CellContents::Text(String::new())).unwrap();
        assert!(sheet.names_of_all_nonempty_cells().is_empty());
        assert!(sheet.cell(&a1).is_none());
    }

    #[test]
    fn test_set_cell_contents_rejects_contents_that_change_kind() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("B1", "1").unwrap();
        sheet.set_contents_of_cell("C1", "=B1").unwrap();
        let b1 = CellName::parse("B1").unwrap();

        for contents in [
            CellContents::Text("=C1".into()),
            CellContents::Text("5".into()),
            CellContents::Number(f64::NAN),
            CellContents::Number(f64::INFINITY),
        ] {
            let err = sheet.set_cell_contents(b1.clone(), contents).unwrap_err();
            assert!(matches!(err, SpreadsheetError::InvalidContents(_)), "{err}");
        }

        // Nothing was stored and the edge to C1 survives
        assert_eq!(sheet.cell_contents("B1").unwrap(), CellContents::Number(1.0));
        assert_eq!(names(&sheet.set_contents_of_cell("B1", "2").unwrap()), vec!["B1", "C1"]);
    }

    #[test]
    fn test_set_cell_contents_survives_reload() {
        let mut sheet = Spreadsheet::new();
        sheet
            .set_cell_contents(CellName::parse("A1").unwrap(), CellContents::Text("note".into()))
            .unwrap();
        sheet
            .set_cell_contents(CellName::parse("A2").unwrap(), CellContents::Number(-0.25))
            .unwrap();

        let reloaded = Spreadsheet::from_json(&sheet.to_json().unwrap()).unwrap();
        for name in ["A1", "A2"] {
            assert_eq!(reloaded.cell_contents(name).unwrap(), sheet.cell_contents(name).unwrap());
        }
    }
}
