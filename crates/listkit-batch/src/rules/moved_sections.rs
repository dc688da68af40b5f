use std::collections::BTreeSet;

use tracing::debug;

use crate::reconcile::{ReconcileState, RuleReport};
use crate::rules::ReconcileRule;

/// Replaces a moved section that also carries item changes with a section
/// delete + insert. Only installed under
/// [`BatchConfig::strict`](crate::BatchConfig::strict) or an equivalent
/// configuration.
///
/// Item deletes and move origins are matched against the move origin; item
/// inserts and move destinations against the move destination.
pub(crate) struct MovedSectionChangesRule;

impl ReconcileRule for MovedSectionChangesRule {
    fn name(&self) -> &str {
        "moved-section-changes"
    }

    fn apply(&self, state: &mut ReconcileState) -> RuleReport {
        let mut report = RuleReport::new(self.name());

        let changed_old: BTreeSet<usize> = state
            .delete_item_paths
            .iter()
            .chain(state.move_item_paths.iter().map(|mv| &mv.from))
            .map(|path| path.section)
            .collect();
        let changed_new: BTreeSet<usize> = state
            .insert_item_paths
            .iter()
            .chain(state.move_item_paths.iter().map(|mv| &mv.to))
            .map(|path| path.section)
            .collect();

        let changed: Vec<_> = state
            .move_sections
            .iter()
            .filter(|mv| changed_old.contains(&mv.from) || changed_new.contains(&mv.to))
            .copied()
            .collect();

        for mv in changed {
            debug!(section_move = %mv, "replacing moved section that has item changes");
            state.downgrade_section_move(mv);
            report.downgraded += 1;
        }
        report
    }
}
