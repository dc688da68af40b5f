//! Item-level diff addressed by index path.

use std::collections::BTreeSet;

use serde::Serialize;

use listkit_types::{Diffable, IndexPath, MoveIndexPath};

use crate::heckel::diff;

/// A [`DiffResult`](crate::DiffResult) lifted into `(section, item)` paths.
///
/// Deletes and move origins carry the old section index; inserts and move
/// destinations carry the new one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PathDiff<K> {
    pub deletes: BTreeSet<IndexPath>,
    pub inserts: BTreeSet<IndexPath>,
    pub updates: BTreeSet<K>,
    pub moves: BTreeSet<MoveIndexPath>,
}

impl<K> PathDiff<K> {
    /// Returns `true` if anything was inserted, deleted, moved or updated.
    pub fn has_changes(&self) -> bool {
        !(self.deletes.is_empty()
            && self.inserts.is_empty()
            && self.updates.is_empty()
            && self.moves.is_empty())
    }
}

/// Diff the items of one section that lives at `from_section` in the old
/// snapshot and at `to_section` in the new one.
pub fn diff_paths<T: Diffable>(
    from_section: usize,
    to_section: usize,
    old: &[T],
    new: &[T],
) -> PathDiff<T::Identity> {
    diff(old, new).into_paths(from_section, to_section)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_section_has_no_changes() {
        let result = diff_paths(1, 3, &[1u32, 2, 3], &[1, 2, 3]);
        assert!(!result.has_changes());
    }

    #[test]
    fn paths_follow_section_spaces() {
        let result = diff_paths(0, 1, &["a", "b"], &["b", "c"]);
        assert_eq!(result.deletes, BTreeSet::from([IndexPath::new(0, 0)]));
        assert_eq!(result.inserts, BTreeSet::from([IndexPath::new(1, 1)]));
        assert!(result.moves.is_empty());
    }
}
