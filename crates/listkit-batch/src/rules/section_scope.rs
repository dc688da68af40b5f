use tracing::debug;

use crate::reconcile::{ReconcileState, RuleReport};
use crate::rules::ReconcileRule;

/// Drops item operations inside deleted or inserted sections. The section
/// operation already removes or supplies every item there.
pub(crate) struct SectionScopeRule;

impl ReconcileRule for SectionScopeRule {
    fn name(&self) -> &str {
        "section-scope"
    }

    fn apply(&self, state: &mut ReconcileState) -> RuleReport {
        let mut report = RuleReport::new(self.name());
        report.dropped = state.drop_items_in_replaced_sections();
        if report.dropped > 0 {
            debug!(
                dropped = report.dropped,
                "dropped item operations covered by section deletes or inserts"
            );
        }
        report
    }
}
