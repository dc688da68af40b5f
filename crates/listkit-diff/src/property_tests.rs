//! Property tests for the diff engine.
//!
//! Random old/new sequences (unique and duplicated identities) are diffed and
//! the result is checked for determinism, full index coverage, and that
//! replaying deletes, moves and inserts over `old` rebuilds `new`.

use std::collections::{BTreeSet, HashMap, HashSet};

use proptest::prelude::*;

use listkit_types::Diffable;

use crate::{diff, DiffResult};

fn unique_ids() -> impl Strategy<Value = Vec<u8>> {
    proptest::sample::subsequence((0u8..24).collect::<Vec<_>>(), 0..=24).prop_shuffle()
}

fn duplicated_ids() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(0u8..6, 0..16)
}

/// Replay `result` over `old`: drop deletes and move origins, then fill every
/// new slot with an insert, a moved element, or the next surviving element.
fn replay(old: &[u8], new: &[u8], result: &DiffResult<u8>) -> Vec<u8> {
    let move_from: HashSet<usize> = result.moves.iter().map(|m| m.from).collect();
    let move_to: HashMap<usize, usize> = result.moves.iter().map(|m| (m.to, m.from)).collect();

    let mut survivors = old
        .iter()
        .enumerate()
        .filter(|(i, _)| !result.deletes.contains(i) && !move_from.contains(i))
        .map(|(_, id)| *id);

    let mut rebuilt = Vec::with_capacity(new.len());
    for j in 0..new.len() {
        if result.inserts.contains(&j) {
            rebuilt.push(new[j]);
        } else if let Some(&from) = move_to.get(&j) {
            rebuilt.push(old[from]);
        } else {
            rebuilt.push(survivors.next().expect("a surviving element for every free slot"));
        }
    }
    assert!(survivors.next().is_none(), "surviving elements left over");
    rebuilt
}

fn assert_coverage(old_len: usize, new_len: usize, result: &DiffResult<u8>) {
    let froms: Vec<usize> = result.moves.iter().map(|m| m.from).collect();
    let tos: Vec<usize> = result.moves.iter().map(|m| m.to).collect();
    let unique_froms: BTreeSet<usize> = froms.iter().copied().collect();
    let unique_tos: BTreeSet<usize> = tos.iter().copied().collect();

    assert_eq!(froms.len(), unique_froms.len(), "an old index moved twice");
    assert_eq!(tos.len(), unique_tos.len(), "a new index received two moves");
    assert!(result.deletes.is_disjoint(&unique_froms));
    assert!(result.inserts.is_disjoint(&unique_tos));
    assert!(result.deletes.iter().chain(&unique_froms).all(|&i| i < old_len));
    assert!(result.inserts.iter().chain(&unique_tos).all(|&j| j < new_len));
}

#[derive(Clone, Debug)]
struct Versioned {
    id: u8,
    rev: u8,
}

impl Diffable for Versioned {
    type Identity = u8;

    fn identity(&self) -> u8 {
        self.id
    }

    fn is_equal(&self, other: &Self) -> bool {
        self.rev == other.rev
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn diff_is_deterministic(old in duplicated_ids(), new in duplicated_ids()) {
        prop_assert_eq!(diff(&old, &new), diff(&old, &new));
    }

    #[test]
    fn unique_sequences_round_trip(old in unique_ids(), new in unique_ids()) {
        let result = diff(&old, &new);
        assert_coverage(old.len(), new.len(), &result);
        prop_assert_eq!(replay(&old, &new, &result), new);
    }

    #[test]
    fn duplicated_sequences_round_trip(old in duplicated_ids(), new in duplicated_ids()) {
        let result = diff(&old, &new);
        assert_coverage(old.len(), new.len(), &result);
        prop_assert_eq!(replay(&old, &new, &result), new);
    }

    #[test]
    fn self_diff_is_empty(seq in duplicated_ids()) {
        let result = diff(&seq, &seq);
        prop_assert!(!result.has_changes());
    }

    #[test]
    fn matched_unique_ids_are_never_deleted(old in unique_ids(), new in unique_ids()) {
        let result = diff(&old, &new);
        let shared: HashSet<u8> = old.iter().filter(|id| new.contains(id)).copied().collect();
        for &i in &result.deletes {
            prop_assert!(!shared.contains(&old[i]));
        }
        for &j in &result.inserts {
            prop_assert!(!shared.contains(&new[j]));
        }
    }

    #[test]
    fn batch_updates_still_round_trip(
        old in unique_ids(),
        new in unique_ids(),
        bumps in proptest::collection::vec(any::<bool>(), 24),
    ) {
        let old_rows: Vec<Versioned> = old.iter().map(|&id| Versioned { id, rev: 0 }).collect();
        let new_rows: Vec<Versioned> = new
            .iter()
            .map(|&id| Versioned { id, rev: u8::from(bumps[usize::from(id)]) })
            .collect();

        let raw = diff(&old_rows, &new_rows);
        for id in &raw.updates {
            prop_assert!(bumps[usize::from(*id)]);
        }

        let result = raw.for_batch_updates();
        prop_assert!(result.updates.is_empty());
        assert_coverage(old.len(), new.len(), &result);
        prop_assert_eq!(replay(&old, &new, &result), new);
    }
}
