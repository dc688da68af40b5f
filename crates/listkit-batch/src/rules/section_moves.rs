use tracing::debug;

use crate::reconcile::{ReconcileState, RuleReport};
use crate::rules::ReconcileRule;

/// Downgrades a section move whose origin is also a delete candidate or
/// whose destination is also an insert candidate.
///
/// Checks run against the raw candidates, so a downgrade never triggers a
/// second one within this rule.
pub(crate) struct SectionMoveRule;

impl ReconcileRule for SectionMoveRule {
    fn name(&self) -> &str {
        "section-moves"
    }

    fn apply(&self, state: &mut ReconcileState) -> RuleReport {
        let mut report = RuleReport::new(self.name());

        let conflicting: Vec<_> = state
            .move_sections
            .iter()
            .filter(|mv| {
                state.raw.delete_sections.contains(&mv.from)
                    || state.raw.insert_sections.contains(&mv.to)
            })
            .copied()
            .collect();

        for mv in conflicting {
            debug!(section_move = %mv, "downgrading section move that collides with a delete or insert");
            state.downgrade_section_move(mv);
            report.downgraded += 1;
        }
        report
    }
}
