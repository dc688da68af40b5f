use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use listkit_types::{
    IndexPath, ItemOperation, MoveIndex, MoveIndexPath, OperationKind, SectionOperation,
};

use crate::batch::BatchUpdateData;
use crate::candidates::{build_candidates, Candidates, DiffableSection};
use crate::config::BatchConfig;
use crate::rules::{
    DisjointnessRule, DuplicateSuppressionRule, ItemMoveRule, MovedSectionChangesRule,
    ReconcileRule, SectionMoveRule, SectionScopeRule,
};

// ---------------------------------------------------------------------------
// ReconcileState
// ---------------------------------------------------------------------------

/// The candidate sets exactly as the builder (or caller) produced them.
#[derive(Clone, Debug, Default)]
pub(crate) struct RawCandidates {
    pub insert_sections: BTreeSet<usize>,
    pub delete_sections: BTreeSet<usize>,
    pub insert_item_paths: BTreeSet<IndexPath>,
    pub delete_item_paths: BTreeSet<IndexPath>,
    pub move_item_paths: BTreeSet<MoveIndexPath>,
}

/// Working sets threaded through the rule pipeline.
///
/// Rules mutate the working sets; `raw` never changes after construction.
#[derive(Clone, Debug, Default)]
pub(crate) struct ReconcileState {
    pub raw: RawCandidates,
    pub insert_sections: BTreeSet<usize>,
    pub delete_sections: BTreeSet<usize>,
    pub move_sections: BTreeSet<MoveIndex>,
    pub insert_item_paths: BTreeSet<IndexPath>,
    pub delete_item_paths: BTreeSet<IndexPath>,
    pub move_item_paths: BTreeSet<MoveIndexPath>,
}

impl ReconcileState {
    pub fn from_candidates(candidates: &Candidates) -> Self {
        let mut state = Self::default();
        for op in &candidates.section_ops {
            match op.kind {
                OperationKind::Insert => state.insert_sections.insert(op.index),
                OperationKind::Delete => state.delete_sections.insert(op.index),
            };
        }
        for op in &candidates.item_ops {
            match op.kind {
                OperationKind::Insert => state.insert_item_paths.insert(op.path),
                OperationKind::Delete => state.delete_item_paths.insert(op.path),
            };
        }
        state.move_sections = candidates.section_moves.iter().copied().collect();
        state.move_item_paths = candidates.item_moves.iter().copied().collect();

        state.raw = RawCandidates {
            insert_sections: state.insert_sections.clone(),
            delete_sections: state.delete_sections.clone(),
            insert_item_paths: state.insert_item_paths.clone(),
            delete_item_paths: state.delete_item_paths.clone(),
            move_item_paths: state.move_item_paths.clone(),
        };
        state
    }

    /// Replace a section move with a delete of its origin and an insert of
    /// its destination.
    pub fn downgrade_section_move(&mut self, mv: MoveIndex) {
        self.move_sections.remove(&mv);
        self.delete_sections.insert(mv.from);
        self.insert_sections.insert(mv.to);
    }

    /// Replace an item move with a delete of its origin and an insert of its
    /// destination.
    pub fn downgrade_item_move(&mut self, mv: MoveIndexPath) {
        self.move_item_paths.remove(&mv);
        self.delete_item_paths.insert(mv.from);
        self.insert_item_paths.insert(mv.to);
    }

    /// Drop every item operation that a section delete or insert already
    /// accounts for. Returns the number of operations dropped.
    pub fn drop_items_in_replaced_sections(&mut self) -> usize {
        let Self {
            delete_sections,
            insert_sections,
            delete_item_paths,
            insert_item_paths,
            move_item_paths,
            ..
        } = self;
        let before = delete_item_paths.len() + insert_item_paths.len() + move_item_paths.len();

        delete_item_paths.retain(|path| !delete_sections.contains(&path.section));
        insert_item_paths.retain(|path| !insert_sections.contains(&path.section));
        move_item_paths.retain(|mv| {
            !delete_sections.contains(&mv.from.section) && !insert_sections.contains(&mv.to.section)
        });

        before - (delete_item_paths.len() + insert_item_paths.len() + move_item_paths.len())
    }
}

// ---------------------------------------------------------------------------
// RuleReport
// ---------------------------------------------------------------------------

/// What one reconciliation rule changed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RuleReport {
    /// Name of the rule that produced this report.
    pub rule: String,
    /// Moves replaced by a delete + insert pair.
    pub downgraded: usize,
    /// Operations removed outright.
    pub dropped: usize,
}

impl RuleReport {
    pub fn new(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            ..Default::default()
        }
    }

    /// Returns `true` if the rule left every set untouched.
    pub fn is_noop(&self) -> bool {
        self.downgraded == 0 && self.dropped == 0
    }
}

/// Per-rule results of one reconciliation, in evaluation order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub rules: Vec<RuleReport>,
}

impl ReconcileReport {
    /// Total number of moves downgraded across all rules.
    pub fn downgraded(&self) -> usize {
        self.rules.iter().map(|r| r.downgraded).sum()
    }

    /// Total number of operations dropped across all rules.
    pub fn dropped(&self) -> usize {
        self.rules.iter().map(|r| r.dropped).sum()
    }
}

// ---------------------------------------------------------------------------
// Reconciler
// ---------------------------------------------------------------------------

/// Turns raw, possibly conflicting candidates into a [`BatchUpdateData`].
///
/// The rule pipeline is fixed:
/// section moves -> (moved sections with changes) -> section scope ->
/// item moves -> duplicate suppression -> disjointness.
/// The second rule only runs when
/// [`BatchConfig::downgrade_moved_sections_with_changes`] is set.
///
/// Reconciliation never fails; conflicts are resolved by downgrading moves
/// to delete + insert pairs or by dropping operations already covered by a
/// section delete or insert.
pub struct Reconciler {
    config: BatchConfig,
    rules: Vec<Box<dyn ReconcileRule>>,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(BatchConfig::default())
    }
}

impl Reconciler {
    pub fn new(config: BatchConfig) -> Self {
        let mut rules: Vec<Box<dyn ReconcileRule>> = vec![Box::new(SectionMoveRule)];
        if config.downgrade_moved_sections_with_changes {
            rules.push(Box::new(MovedSectionChangesRule));
        }
        rules.push(Box::new(SectionScopeRule));
        rules.push(Box::new(ItemMoveRule));
        rules.push(Box::new(DuplicateSuppressionRule));
        rules.push(Box::new(DisjointnessRule));
        Self { config, rules }
    }

    /// The active configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Names of the rules in evaluation order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Reconcile `candidates` into a batch.
    pub fn reconcile(&self, candidates: &Candidates) -> BatchUpdateData {
        self.reconcile_with_report(candidates).0
    }

    /// Reconcile `candidates`, also reporting what every rule changed.
    pub fn reconcile_with_report(
        &self,
        candidates: &Candidates,
    ) -> (BatchUpdateData, ReconcileReport) {
        let mut state = ReconcileState::from_candidates(candidates);
        let mut report = ReconcileReport::default();

        for rule in &self.rules {
            let outcome = rule.apply(&mut state);
            if !outcome.is_noop() {
                debug!(
                    rule = rule.name(),
                    downgraded = outcome.downgraded,
                    dropped = outcome.dropped,
                    "reconcile rule changed candidates"
                );
            }
            report.rules.push(outcome);
        }

        let batch = BatchUpdateData::from_state(state);
        debug_assert_eq!(batch.validate(), Ok(()));
        (batch, report)
    }

    /// Diff two sectioned snapshots and reconcile the result.
    pub fn diff_sections<S: DiffableSection>(&self, old: &[S], new: &[S]) -> BatchUpdateData {
        self.reconcile(&build_candidates(old, new, &self.config))
    }
}

/// Reconcile raw candidate operations with the default configuration.
pub fn reconcile(
    section_ops: &[SectionOperation],
    section_moves: &[MoveIndex],
    item_ops: &[ItemOperation],
    item_moves: &[MoveIndexPath],
) -> BatchUpdateData {
    let candidates = Candidates {
        section_ops: section_ops.to_vec(),
        section_moves: section_moves.to_vec(),
        item_ops: item_ops.to_vec(),
        item_moves: item_moves.to_vec(),
    };
    Reconciler::default().reconcile(&candidates)
}

/// Diff two sectioned snapshots into a batch with the default configuration.
pub fn batch_updates<S: DiffableSection>(old: &[S], new: &[S]) -> BatchUpdateData {
    Reconciler::default().diff_sections(old, new)
}
