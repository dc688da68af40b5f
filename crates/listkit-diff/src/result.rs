//! The raw output of one diff pass.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use listkit_types::{IndexPath, MoveIndex, MoveIndexPath};

use crate::paths::PathDiff;

/// The structural difference between two sequences.
///
/// Every old index is exactly one of deleted, moved-from, or unchanged; every
/// new index is exactly one of inserted, moved-to, or unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffResult<K> {
    /// Old-space positions with no counterpart in the new sequence.
    pub deletes: BTreeSet<usize>,
    /// New-space positions with no counterpart in the old sequence.
    pub inserts: BTreeSet<usize>,
    /// Identities present in both sequences whose content changed.
    pub updates: BTreeSet<K>,
    /// Matched elements whose position changed.
    pub moves: BTreeSet<MoveIndex>,
    #[serde(skip)]
    pub(crate) matches: Vec<MoveIndex>,
    #[serde(skip)]
    pub(crate) updated_pairs: BTreeSet<MoveIndex>,
    #[serde(skip)]
    pub(crate) old_indices: BTreeMap<K, usize>,
    #[serde(skip)]
    pub(crate) new_indices: BTreeMap<K, usize>,
}

impl<K: Ord + Clone> DiffResult<K> {
    pub(crate) fn empty() -> Self {
        Self {
            deletes: BTreeSet::new(),
            inserts: BTreeSet::new(),
            updates: BTreeSet::new(),
            moves: BTreeSet::new(),
            matches: Vec::new(),
            updated_pairs: BTreeSet::new(),
            old_indices: BTreeMap::new(),
            new_indices: BTreeMap::new(),
        }
    }

    /// Returns `true` if anything was inserted, deleted, moved or updated.
    pub fn has_changes(&self) -> bool {
        self.change_count() > 0
    }

    /// Total number of inserts, deletes, moves and updates.
    pub fn change_count(&self) -> usize {
        self.inserts.len() + self.deletes.len() + self.moves.len() + self.updates.len()
    }

    /// Every matched `(old, new)` pair, in new-sequence order, whether or not
    /// it moved.
    pub fn matches(&self) -> &[MoveIndex] {
        &self.matches
    }

    /// Old position of the first element with this identity.
    pub fn old_index_for(&self, identity: &K) -> Option<usize> {
        self.old_indices.get(identity).copied()
    }

    /// New position of the first element with this identity.
    pub fn new_index_for(&self, identity: &K) -> Option<usize> {
        self.new_indices.get(identity).copied()
    }

    /// A copy of this result safe to hand to a surface that cannot reload
    /// and move the same element in one transaction.
    ///
    /// Every updated match becomes a delete of its old position plus an
    /// insert at its new position (dropping its move, if any), and
    /// `updates` is left empty.
    pub fn for_batch_updates(&self) -> Self {
        let mut result = self.clone();
        for pair in &self.updated_pairs {
            result.moves.remove(pair);
            result.deletes.insert(pair.from);
            result.inserts.insert(pair.to);
        }
        result
            .matches
            .retain(|pair| !self.updated_pairs.contains(pair));
        result.updates.clear();
        result.updated_pairs.clear();
        result
    }

    /// Lift this result into index paths: deletes and move origins land in
    /// `from_section`, inserts and move destinations in `to_section`.
    pub fn into_paths(self, from_section: usize, to_section: usize) -> PathDiff<K> {
        let from = |item| IndexPath::new(from_section, item);
        let to = |item| IndexPath::new(to_section, item);

        PathDiff {
            deletes: self.deletes.into_iter().map(from).collect(),
            inserts: self.inserts.into_iter().map(to).collect(),
            updates: self.updates,
            moves: self
                .moves
                .into_iter()
                .map(|mv| MoveIndexPath::new(from(mv.from), to(mv.to)))
                .collect(),
        }
    }
}
