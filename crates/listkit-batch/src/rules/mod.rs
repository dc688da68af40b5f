//! The reconciliation rules, applied in a fixed order by the
//! [`Reconciler`](crate::Reconciler).

mod disjointness;
mod duplicates;
mod item_moves;
mod moved_sections;
mod section_moves;
mod section_scope;

pub(crate) use disjointness::DisjointnessRule;
pub(crate) use duplicates::DuplicateSuppressionRule;
pub(crate) use item_moves::ItemMoveRule;
pub(crate) use moved_sections::MovedSectionChangesRule;
pub(crate) use section_moves::SectionMoveRule;
pub(crate) use section_scope::SectionScopeRule;

use crate::reconcile::{ReconcileState, RuleReport};

/// A single step of the reconciliation pipeline.
///
/// Rules never fail. Each one rewrites the working sets of the state and
/// reports how many moves it downgraded and how many operations it dropped.
pub(crate) trait ReconcileRule: Send + Sync {
    /// Short kebab-case name used in logs and reports.
    fn name(&self) -> &str;

    fn apply(&self, state: &mut ReconcileState) -> RuleReport;
}
