//! Recalculation order
//!
//! After a cell changes, every cell that transitively depends on it must be
//! re-evaluated, each one after all the cells it reads. This module finds
//! that order with a depth-first walk over dependents, and detects cycles
//! along the way.
//!
//! The walk keeps its own stack instead of recursing, so a dependency chain
//! thousands of cells long costs heap, not call stack.

use std::vec;

use ahash::AHashMap;
use gridcalc_core::{CellName, DependencyGraph};

use crate::error::{Result, SpreadsheetError};

/// Visitation state; a node with no entry is unvisited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// On the current DFS path
    Visiting,
    /// All of its dependents have been emitted
    Finished,
}

/// Cells to recalculate after `start` changes, in dependency order
///
/// The result begins with `start` and contains every cell reachable from it
/// through dependents exactly once. A cell always comes after every cell it
/// depends on. Reaching a cell that is still on the current path means the
/// graph has a cycle through `start`, reported as
/// [`SpreadsheetError::CircularDependency`].
///
/// Runs in time linear in the number of reachable cells and edges.
pub fn recalc_order(graph: &DependencyGraph<CellName>, start: &CellName) -> Result<Vec<CellName>> {
    let mut marks: AHashMap<CellName, Mark> = AHashMap::new();
    let mut finished: Vec<CellName> = Vec::new();
    let mut stack: Vec<(CellName, vec::IntoIter<CellName>)> = Vec::new();

    marks.insert(start.clone(), Mark::Visiting);
    stack.push((start.clone(), sorted_dependents(graph, start)));

    while let Some((_, pending)) = stack.last_mut() {
        match pending.next() {
            Some(dependent) => match marks.get(&dependent) {
                Some(Mark::Visiting) => {
                    log::trace!("cycle: {} reaches {} again", start, dependent);
                    return Err(SpreadsheetError::CircularDependency(start.clone()));
                }
                Some(Mark::Finished) => {}
                None => {
                    marks.insert(dependent.clone(), Mark::Visiting);
                    let next = sorted_dependents(graph, &dependent);
                    stack.push((dependent, next));
                }
            },
            None => {
                if let Some((node, _)) = stack.pop() {
                    marks.insert(node.clone(), Mark::Finished);
                    finished.push(node);
                }
            }
        }
    }

    // Post-order puts every cell before the cells it depends on
    finished.reverse();
    Ok(finished)
}

/// Dependents in name order, so the result is deterministic
fn sorted_dependents(
    graph: &DependencyGraph<CellName>,
    node: &CellName,
) -> vec::IntoIter<CellName> {
    let mut dependents: Vec<CellName> = graph.dependents(node).into_iter().collect();
    dependents.sort_unstable();
    dependents.into_iter()
}
