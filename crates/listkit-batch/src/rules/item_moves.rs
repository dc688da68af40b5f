use tracing::debug;

use crate::reconcile::{ReconcileState, RuleReport};
use crate::rules::ReconcileRule;

/// Downgrades an item move whose origin path is also a delete candidate or
/// whose destination path is also an insert candidate.
pub(crate) struct ItemMoveRule;

impl ReconcileRule for ItemMoveRule {
    fn name(&self) -> &str {
        "item-moves"
    }

    fn apply(&self, state: &mut ReconcileState) -> RuleReport {
        let mut report = RuleReport::new(self.name());

        let conflicting: Vec<_> = state
            .move_item_paths
            .iter()
            .filter(|mv| {
                state.raw.delete_item_paths.contains(&mv.from)
                    || state.raw.insert_item_paths.contains(&mv.to)
            })
            .copied()
            .collect();

        for mv in conflicting {
            debug!(item_move = %mv, "downgrading item move that collides with a delete or insert");
            state.downgrade_item_move(mv);
            report.downgraded += 1;
        }
        report
    }
}
