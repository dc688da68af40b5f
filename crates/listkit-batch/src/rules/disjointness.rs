use tracing::warn;

use crate::reconcile::{ReconcileState, RuleReport};
use crate::rules::ReconcileRule;

/// Final pass guaranteeing every batch invariant on the working sets.
///
/// Earlier rules check moves against the raw candidates, so a downgrade can
/// still leave a move sharing an index with an operation another downgrade
/// introduced (malformed input with two moves from the same origin, for
/// instance). This pass repeats section downgrades until none collide,
/// drops item operations inside the resulting replaced sections, then does
/// the same for item moves.
pub(crate) struct DisjointnessRule;

impl ReconcileRule for DisjointnessRule {
    fn name(&self) -> &str {
        "disjointness"
    }

    fn apply(&self, state: &mut ReconcileState) -> RuleReport {
        let mut report = RuleReport::new(self.name());

        loop {
            let colliding = state.move_sections.iter().copied().find(|mv| {
                state.delete_sections.contains(&mv.from) || state.insert_sections.contains(&mv.to)
            });
            let Some(mv) = colliding else { break };
            state.downgrade_section_move(mv);
            report.downgraded += 1;
        }

        report.dropped = state.drop_items_in_replaced_sections();

        loop {
            let colliding = state.move_item_paths.iter().copied().find(|mv| {
                state.delete_item_paths.contains(&mv.from)
                    || state.insert_item_paths.contains(&mv.to)
            });
            let Some(mv) = colliding else { break };
            state.downgrade_item_move(mv);
            report.downgraded += 1;
        }

        if !report.is_noop() {
            warn!(
                downgraded = report.downgraded,
                dropped = report.dropped,
                "final disjointness pass had to repair candidates"
            );
        }
        report
    }
}
