use tracing::debug;

use crate::reconcile::{ReconcileState, RuleReport};
use crate::rules::ReconcileRule;

/// Removes an explicit delete that shares its index with a surviving move
/// origin, and an explicit insert that shares its index with a surviving
/// move destination. The move already accounts for that index.
///
/// Applies to both sections and item paths.
pub(crate) struct DuplicateSuppressionRule;

impl ReconcileRule for DuplicateSuppressionRule {
    fn name(&self) -> &str {
        "duplicate-suppression"
    }

    fn apply(&self, state: &mut ReconcileState) -> RuleReport {
        let mut report = RuleReport::new(self.name());
        let before = state.delete_sections.len()
            + state.insert_sections.len()
            + state.delete_item_paths.len()
            + state.insert_item_paths.len();

        for mv in &state.move_sections {
            state.delete_sections.remove(&mv.from);
            state.insert_sections.remove(&mv.to);
        }
        for mv in &state.move_item_paths {
            state.delete_item_paths.remove(&mv.from);
            state.insert_item_paths.remove(&mv.to);
        }

        report.dropped = before
            - (state.delete_sections.len()
                + state.insert_sections.len()
                + state.delete_item_paths.len()
                + state.insert_item_paths.len());
        if report.dropped > 0 {
            debug!(dropped = report.dropped, "removed operations duplicating a move");
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use listkit_types::MoveIndex;

    use super::*;
    use crate::rules::testing::{item_move, path};

    #[test]
    fn removes_explicit_ops_shadowed_by_moves() {
        let mut state = ReconcileState::default();
        state.move_sections.insert(MoveIndex::new(0, 2));
        state.delete_sections.extend([0, 1]);
        state.insert_sections.extend([2, 3]);
        state.move_item_paths.insert(item_move((4, 0), (4, 1)));
        state.delete_item_paths.insert(path(4, 0));
        state.insert_item_paths.insert(path(4, 0));

        let report = DuplicateSuppressionRule.apply(&mut state);

        assert_eq!(report.dropped, 3);
        assert_eq!(state.delete_sections, BTreeSet::from([1]));
        assert_eq!(state.insert_sections, BTreeSet::from([3]));
        assert!(state.delete_item_paths.is_empty());
        // Insert (4,0) is new-space and does not collide with the move origin.
        assert_eq!(state.insert_item_paths, BTreeSet::from([path(4, 0)]));
    }
}
