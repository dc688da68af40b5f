//! The sanitized, immutable output of reconciliation.

use std::collections::BTreeSet;

use serde::Serialize;

use listkit_types::{IndexPath, ItemOperation, MoveIndex, MoveIndexPath, SectionOperation};

use crate::candidates::Candidates;
use crate::error::InvariantViolation;
use crate::reconcile::{ReconcileState, Reconciler};

/// One transaction of section and item operations, safe to hand to an
/// index-based list surface.
///
/// Deletes (and move origins) are expressed in the pre-update index space,
/// inserts (and move destinations) in the post-update index space. The
/// surface applies deletes, then moves, then inserts.
///
/// # Invariants
///
/// - No section is both deleted and moved from, or both inserted and moved to.
/// - No item path is both deleted and moved from, or both inserted and moved to.
/// - Item deletes and move origins never lie in a deleted section; item
///   inserts and move destinations never lie in an inserted section.
///
/// Disjointness is checked within one index space only. Delete `0` plus
/// insert `0` is a valid replacement, and a move origin may equal an insert
/// index (or a move destination a delete index), since those numbers
/// address different snapshots.
///
/// A value can only be obtained through reconciliation, and there is no way
/// to mutate it afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatchUpdateData {
    insert_sections: BTreeSet<usize>,
    delete_sections: BTreeSet<usize>,
    move_sections: BTreeSet<MoveIndex>,
    insert_item_paths: BTreeSet<IndexPath>,
    delete_item_paths: BTreeSet<IndexPath>,
    move_item_paths: BTreeSet<MoveIndexPath>,
}

impl BatchUpdateData {
    /// Sanitize raw section and item operations into a batch, using the
    /// default reconciler.
    pub fn new(
        insert_sections: impl IntoIterator<Item = usize>,
        delete_sections: impl IntoIterator<Item = usize>,
        move_sections: impl IntoIterator<Item = MoveIndex>,
        insert_item_paths: impl IntoIterator<Item = IndexPath>,
        delete_item_paths: impl IntoIterator<Item = IndexPath>,
        move_item_paths: impl IntoIterator<Item = MoveIndexPath>,
    ) -> Self {
        let section_ops = insert_sections
            .into_iter()
            .map(SectionOperation::insert)
            .chain(delete_sections.into_iter().map(SectionOperation::delete))
            .collect();
        let item_ops = insert_item_paths
            .into_iter()
            .map(ItemOperation::insert)
            .chain(delete_item_paths.into_iter().map(ItemOperation::delete))
            .collect();

        let candidates = Candidates {
            section_ops,
            section_moves: move_sections.into_iter().collect(),
            item_ops,
            item_moves: move_item_paths.into_iter().collect(),
        };
        Reconciler::default().reconcile(&candidates)
    }

    pub(crate) fn from_state(state: ReconcileState) -> Self {
        Self {
            insert_sections: state.insert_sections,
            delete_sections: state.delete_sections,
            move_sections: state.move_sections,
            insert_item_paths: state.insert_item_paths,
            delete_item_paths: state.delete_item_paths,
            move_item_paths: state.move_item_paths,
        }
    }

    /// Sections to insert (new index space).
    pub fn insert_sections(&self) -> &BTreeSet<usize> {
        &self.insert_sections
    }

    /// Sections to delete (old index space).
    pub fn delete_sections(&self) -> &BTreeSet<usize> {
        &self.delete_sections
    }

    /// Section moves.
    pub fn move_sections(&self) -> &BTreeSet<MoveIndex> {
        &self.move_sections
    }

    /// Item paths to insert (new index space).
    pub fn insert_item_paths(&self) -> &BTreeSet<IndexPath> {
        &self.insert_item_paths
    }

    /// Item paths to delete (old index space).
    pub fn delete_item_paths(&self) -> &BTreeSet<IndexPath> {
        &self.delete_item_paths
    }

    /// Item moves.
    pub fn move_item_paths(&self) -> &BTreeSet<MoveIndexPath> {
        &self.move_item_paths
    }

    /// Returns `true` if the batch carries no operation at all.
    pub fn is_empty(&self) -> bool {
        self.change_count() == 0
    }

    /// Total number of section and item operations.
    pub fn change_count(&self) -> usize {
        self.insert_sections.len()
            + self.delete_sections.len()
            + self.move_sections.len()
            + self.insert_item_paths.len()
            + self.delete_item_paths.len()
            + self.move_item_paths.len()
    }

    /// Check every batch invariant, reporting the first violation found.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        for mv in &self.move_sections {
            if self.delete_sections.contains(&mv.from) {
                return Err(InvariantViolation::SectionMoveFromDeleted { from: mv.from });
            }
            if self.insert_sections.contains(&mv.to) {
                return Err(InvariantViolation::SectionMoveToInserted { to: mv.to });
            }
        }

        for mv in &self.move_item_paths {
            if self.delete_item_paths.contains(&mv.from) {
                return Err(InvariantViolation::ItemMoveFromDeleted { from: mv.from });
            }
            if self.insert_item_paths.contains(&mv.to) {
                return Err(InvariantViolation::ItemMoveToInserted { to: mv.to });
            }
        }

        let origins = self
            .delete_item_paths
            .iter()
            .chain(self.move_item_paths.iter().map(|mv| &mv.from));
        for path in origins {
            if self.delete_sections.contains(&path.section) {
                return Err(InvariantViolation::ItemInDeletedSection { path: *path });
            }
        }

        let destinations = self
            .insert_item_paths
            .iter()
            .chain(self.move_item_paths.iter().map(|mv| &mv.to));
        for path in destinations {
            if self.insert_sections.contains(&path.section) {
                return Err(InvariantViolation::ItemInInsertedSection { path: *path });
            }
        }

        Ok(())
    }
}
