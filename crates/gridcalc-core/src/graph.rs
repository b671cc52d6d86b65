//! Dependency graph
//!
//! Tracks the "depends-on" relation between named nodes. An edge
//! `(dependee, dependent)` means the dependent's value requires the
//! dependee's value. Both directions are indexed so that either side can be
//! queried in time proportional to its degree.

use ahash::{AHashMap, AHashSet};
use std::borrow::Borrow;
use std::hash::Hash;

use crate::CellName;

/// Owned set of nodes returned by graph queries
pub type NodeSet<N> = AHashSet<N>;

/// Dependency graph over nodes of type `N`
///
/// The two indexes are kept as mirror images of the edge set: `b` is in
/// `dependents[a]` exactly when `a` is in `dependees[b]`. Entries whose set
/// becomes empty are pruned, so `has_dependents`/`has_dependees` are plain
/// key lookups.
///
/// Queries never fail. A node the graph has not seen simply has no
/// dependents and no dependees.
#[derive(Debug, Clone)]
pub struct DependencyGraph<N = CellName> {
    /// Node → nodes that depend on it
    dependents: AHashMap<N, AHashSet<N>>,
    /// Node → nodes it depends on
    dependees: AHashMap<N, AHashSet<N>>,
    /// Number of distinct edges
    size: usize,
}

impl<N> Default for DependencyGraph<N> {
    fn default() -> Self {
        Self {
            dependents: AHashMap::new(),
            dependees: AHashMap::new(),
            size: 0,
        }
    }
}

impl<N> DependencyGraph<N>
where
    N: Eq + Hash + Clone,
{
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct (dependee, dependent) pairs
    pub fn size(&self) -> usize {
        self.size
    }

    /// True when the graph has no edges
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Whether any node depends on `node`
    pub fn has_dependents<Q>(&self, node: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.dependents.contains_key(node)
    }

    /// Whether `node` depends on any node
    pub fn has_dependees<Q>(&self, node: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.dependees.contains_key(node)
    }

    /// Snapshot of the nodes that depend on `node`
    pub fn dependents<Q>(&self, node: &Q) -> NodeSet<N>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.dependents.get(node).cloned().unwrap_or_default()
    }

    /// Snapshot of the nodes that `node` depends on
    pub fn dependees<Q>(&self, node: &Q) -> NodeSet<N>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.dependees.get(node).cloned().unwrap_or_default()
    }

    /// Whether the edge `(dependee, dependent)` is present
    pub fn contains_edge<Q>(&self, dependee: &Q, dependent: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.dependents
            .get(dependee)
            .is_some_and(|set| set.contains(dependent))
    }

    /// Add the edge `(dependee, dependent)`; no-op if already present
    pub fn add_edge(&mut self, dependee: N, dependent: N) {
        let inserted = self
            .dependents
            .entry(dependee.clone())
            .or_default()
            .insert(dependent.clone());

        if inserted {
            self.dependees.entry(dependent).or_default().insert(dependee);
            self.size += 1;
        }
    }

    /// Remove the edge `(dependee, dependent)`; no-op if absent
    pub fn remove_edge<Q>(&mut self, dependee: &Q, dependent: &Q)
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !remove_member(&mut self.dependents, dependee, dependent) {
            return;
        }
        remove_member(&mut self.dependees, dependent, dependee);
        self.size -= 1;
    }

    /// Replace every `(node, _)` edge with `(node, d)` for each `d` in `new_dependents`
    pub fn replace_dependents<I>(&mut self, node: &N, new_dependents: I)
    where
        I: IntoIterator<Item = N>,
    {
        if let Some(old) = self.dependents.remove(node) {
            for dependent in old {
                remove_member(&mut self.dependees, &dependent, node);
                self.size -= 1;
            }
        }

        for dependent in new_dependents {
            self.add_edge(node.clone(), dependent);
        }
    }

    /// Replace every `(_, node)` edge with `(d, node)` for each `d` in `new_dependees`
    pub fn replace_dependees<I>(&mut self, node: &N, new_dependees: I)
    where
        I: IntoIterator<Item = N>,
    {
        if let Some(old) = self.dependees.remove(node) {
            for dependee in old {
                remove_member(&mut self.dependents, &dependee, node);
                self.size -= 1;
            }
        }

        for dependee in new_dependees {
            self.add_edge(dependee, node.clone());
        }
    }

    /// Clear the entire graph
    pub fn clear(&mut self) {
        self.dependents.clear();
        self.dependees.clear();
        self.size = 0;
    }
}

/// Remove `member` from `index[key]`, pruning the entry once it is empty.
/// Returns whether `member` was present.
fn remove_member<N, Q>(index: &mut AHashMap<N, AHashSet<N>>, key: &Q, member: &Q) -> bool
where
    N: Eq + Hash + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    let Some(set) = index.get_mut(key) else {
        return false;
    };
    if !set.remove(member) {
        return false;
    }
    if set.is_empty() {
        index.remove(key);
    }
    true
}
