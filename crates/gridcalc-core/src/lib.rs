//! # gridcalc-core
//!
//! Core data structures for the gridcalc spreadsheet engine.
//!
//! This crate provides the fundamental types used throughout gridcalc:
//! - [`CellName`] - A validated, normalized cell name (e.g., "A1")
//! - [`DependencyGraph`] - The "depends-on" relation between named nodes
//! - [`Error`] - Errors raised for malformed cell names
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{CellName, DependencyGraph};
//!
//! let a1 = CellName::parse("a1").unwrap();
//! let b1 = CellName::parse("B1").unwrap();
//! assert_eq!(a1.as_str(), "A1");
//!
//! // B1's value requires A1's value
//! let mut graph = DependencyGraph::new();
//! graph.add_edge(a1.clone(), b1.clone());
//!
//! assert!(graph.dependents("A1").contains(&b1));
//! assert!(graph.dependees("B1").contains(&a1));
//! assert_eq!(graph.size(), 1);
//! ```

pub mod error;
pub mod graph;
pub mod name;

// Re-exports for convenience
pub use error::{Error, Result};
pub use graph::{DependencyGraph, NodeSet};
pub use name::CellName;
