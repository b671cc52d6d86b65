//! Cell name type

use crate::error::{Error, Result};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// A validated cell name (e.g., "A1", "XY42")
///
/// Names are one or more ASCII letters followed by one or more ASCII digits.
/// They are case-insensitive: the stored form is always uppercase, so every
/// map and graph keyed by `CellName` sees a single spelling per cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellName(String);

impl CellName {
    /// Parse and normalize a cell name
    ///
    /// # Examples
    /// ```
    /// use gridcalc_core::CellName;
    ///
    /// let name = CellName::parse("b12").unwrap();
    /// assert_eq!(name.as_str(), "B12");
    ///
    /// assert!(CellName::parse("12B").is_err());
    /// assert!(CellName::parse("B").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        if !Self::is_valid(s) {
            return Err(Error::InvalidName(s.to_string()));
        }
        Ok(Self(s.to_ascii_uppercase()))
    }

    /// Check whether a string is a well-formed cell name (any case)
    pub fn is_valid(s: &str) -> bool {
        lazy_regex::regex_is_match!(r"^[A-Za-z]+[0-9]+$", s)
    }

    /// The normalized (uppercase) name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the name, returning the normalized string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CellName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CellName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for CellName {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for CellName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets maps keyed by `CellName` be queried with an already-normalized `&str`.
impl Borrow<str> for CellName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CellName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CellName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<CellName> for String {
    fn from(name: CellName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_normalizes_case() {
        assert_eq!(CellName::parse("a1").unwrap().as_str(), "A1");
        assert_eq!(CellName::parse("Ab10").unwrap().as_str(), "AB10");
        assert_eq!(CellName::parse("ZZZ999").unwrap().as_str(), "ZZZ999");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "A", "1", "1A", "A1A", "A_1", " A1", "A1 ", "A-1", "Ä1", "A١"] {
            assert_eq!(
                CellName::parse(bad),
                Err(Error::InvalidName(bad.to_string())),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn test_equal_regardless_of_input_case() {
        let upper: CellName = "XY42".parse().unwrap();
        let lower: CellName = "xy42".parse().unwrap();
        assert_eq!(upper, lower);
        assert!(upper == "XY42");
    }

    #[test]
    fn test_borrow_as_str_for_lookup() {
        let mut map = std::collections::HashMap::new();
        map.insert(CellName::parse("c3").unwrap(), 3);
        assert_eq!(map.get("C3"), Some(&3));
        assert_eq!(map.get("c3"), None);
    }

    #[test]
    fn test_display() {
        let name = CellName::parse("q7").unwrap();
        assert_eq!(name.to_string(), "Q7");
        assert_eq!(String::from(name), "Q7");
    }
}
