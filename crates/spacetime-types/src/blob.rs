//! Connected sets of live cells.

use std::collections::BTreeSet;
use std::collections::btree_set;

use serde::{Deserialize, Serialize};

/// A set of unique cell indices forming one structure at one tick.
///
/// Indices are kept ordered so traces and exported scenes are
/// deterministic for identical inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Blob(BTreeSet<usize>);

impl Blob {
    /// Create an empty blob.
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the blob has no cells.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the blob contains `index`.
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    /// Add a cell. Returns `false` if it was already present.
    pub fn insert(&mut self, index: usize) -> bool {
        self.0.insert(index)
    }

    /// Merge every cell of `other` into this blob.
    pub fn absorb(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Iterate over cell indices in ascending order.
    pub fn iter(&self) -> btree_set::Iter<'_, usize> {
        self.0.iter()
    }

    /// Borrow the underlying set.
    pub const fn as_set(&self) -> &BTreeSet<usize> {
        &self.0
    }
}

impl FromIterator<usize> for Blob {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<usize> for Blob {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Blob {
    type Item = usize;
    type IntoIter = btree_set::IntoIter<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Blob {
    type Item = &'a usize;
    type IntoIter = btree_set::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<BTreeSet<usize>> for Blob {
    fn from(cells: BTreeSet<usize>) -> Self {
        Self(cells)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn deduplicates_and_orders() {
        let blob: Blob = [5, 1, 5, 3].into_iter().collect();
        assert_eq!(blob.len(), 3);
        assert_eq!(blob.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
    }

    #[test]
    fn absorb_unions_cells() {
        let mut a: Blob = [1, 2].into_iter().collect();
        a.absorb([2, 9].into_iter().collect());
        assert_eq!(a.len(), 3);
        assert!(a.contains(9));
    }

    #[test]
    fn serializes_as_plain_array() {
        let blob: Blob = [4, 2].into_iter().collect();
        let json = serde_json::to_string(&blob).unwrap();
        assert_eq!(json, "[2,4]");
        let back: Blob = serde_json::from_str(&json).unwrap();
        assert_eq!(back, blob);
    }
}
