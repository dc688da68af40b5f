//! Raw section and item candidates derived from two sectioned snapshots.
//!
//! The builder diffs the sections once, then diffs the items of every
//! section pair present in both snapshots. Deleted sections and inserted
//! sections contribute no item diff: their contents go with them.
//!
//! Candidates are *not* guaranteed to be mutually consistent. An item move
//! may reference a section that a section move also touches; resolving that
//! is the reconciler's job.

use serde::Serialize;
use tracing::debug;

use listkit_diff::diff;
use listkit_types::{Diffable, ItemOperation, MoveIndex, MoveIndexPath, SectionOperation};

use crate::config::BatchConfig;

/// A top-level group in a two-level collection.
pub trait DiffableSection: Diffable {
    /// The element type of this section's items.
    type Item: Diffable;

    /// The ordered items of this section.
    fn items(&self) -> &[Self::Item];
}

/// Unreconciled section and item operations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Candidates {
    pub section_ops: Vec<SectionOperation>,
    pub section_moves: Vec<MoveIndex>,
    pub item_ops: Vec<ItemOperation>,
    pub item_moves: Vec<MoveIndexPath>,
}

impl Candidates {
    /// Returns `true` if there are no candidates at all.
    pub fn is_empty(&self) -> bool {
        self.section_ops.is_empty()
            && self.section_moves.is_empty()
            && self.item_ops.is_empty()
            && self.item_moves.is_empty()
    }
}

/// Build raw candidates for turning the `old` snapshot into `new`.
pub fn build_candidates<S: DiffableSection>(
    old: &[S],
    new: &[S],
    config: &BatchConfig,
) -> Candidates {
    let sections = diff(old, new);

    let mut candidates = Candidates {
        section_ops: sections
            .deletes
            .iter()
            .map(|&i| SectionOperation::delete(i))
            .chain(sections.inserts.iter().map(|&j| SectionOperation::insert(j)))
            .collect(),
        section_moves: sections.moves.iter().copied().collect(),
        ..Default::default()
    };

    for pair in sections.matches() {
        let mut items = diff(old[pair.from].items(), new[pair.to].items());
        if config.convert_item_updates {
            items = items.for_batch_updates();
        }
        let paths = items.into_paths(pair.from, pair.to);

        candidates
            .item_ops
            .extend(paths.deletes.into_iter().map(ItemOperation::delete));
        candidates
            .item_ops
            .extend(paths.inserts.into_iter().map(ItemOperation::insert));
        candidates.item_moves.extend(paths.moves);
    }

    debug!(
        old_sections = old.len(),
        new_sections = new.len(),
        section_ops = candidates.section_ops.len(),
        section_moves = candidates.section_moves.len(),
        item_ops = candidates.item_ops.len(),
        item_moves = candidates.item_moves.len(),
        "built batch candidates"
    );

    candidates
}
