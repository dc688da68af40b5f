//! Heckel-style sequence diff over a per-call symbol table.
//!
//! The algorithm runs in a fixed number of linear passes:
//!
//! 1. Record every old position of each identity and count new occurrences.
//! 2. Pair each new position with the next unclaimed old occurrence of its
//!    identity. Unique identities pair exactly; duplicates pair k-th to k-th.
//! 3. Unpaired old positions are deletes, unpaired new positions are inserts.
//! 4. A pair whose rank among surviving old positions equals its rank among
//!    non-inserted new positions stays in place. Every other pair is a move,
//!    except that a pair sitting at the same literal index in both snapshots
//!    is kept in place when no in-place pair straddles that index.
//!
//! # Invariants
//!
//! - Pairs kept in place appear in the same relative order in both
//!   snapshots, so deleting, moving and inserting (in that order) and filling
//!   the remaining slots in order reproduces `new`.
//! - The symbol table lives only for the duration of one call.

use std::collections::HashMap;

use tracing::debug;

use listkit_types::{Diffable, MoveIndex};

use crate::result::DiffResult;

/// Symbol table entry for one identity.
#[derive(Default)]
struct Entry {
    /// Old positions of this identity, ascending.
    old_indices: Vec<usize>,
    /// First old position not yet paired with a new position.
    next: usize,
    new_count: usize,
}

impl Entry {
    fn is_duplicated(&self) -> bool {
        self.old_indices.len() > 1 || self.new_count > 1
    }
}

/// Compute the structural difference between `old` and `new`.
///
/// Deletes are reported in the old index space, inserts in the new index
/// space, and moves as `(old, new)` pairs. Elements that share an identity
/// but fail [`Diffable::is_equal`] are reported in
/// [`DiffResult::updates`] whether they moved or not.
///
/// Moves are rank-stable, not minimum-move: a matched pair stays in place
/// only when its rank among surviving old positions equals its rank among
/// non-inserted new positions. Rotating `[1, 2, 3, 4]` into `[2, 3, 4, 1]`
/// therefore reports four moves, not one.
///
/// The result is fully determined by the input order.
pub fn diff<T: Diffable>(old: &[T], new: &[T]) -> DiffResult<T::Identity> {
    let old_ids: Vec<T::Identity> = old.iter().map(Diffable::identity).collect();
    let new_ids: Vec<T::Identity> = new.iter().map(Diffable::identity).collect();

    let mut table: HashMap<&T::Identity, Entry> =
        HashMap::with_capacity(old_ids.len().max(new_ids.len()));
    for (i, id) in old_ids.iter().enumerate() {
        table.entry(id).or_default().old_indices.push(i);
    }
    for id in &new_ids {
        table.entry(id).or_default().new_count += 1;
    }

    let mut old_match: Vec<Option<usize>> = vec![None; old.len()];
    let mut new_match: Vec<Option<usize>> = vec![None; new.len()];
    for (j, id) in new_ids.iter().enumerate() {
        if let Some(entry) = table.get_mut(id) {
            if let Some(&i) = entry.old_indices.get(entry.next) {
                entry.next += 1;
                old_match[i] = Some(j);
                new_match[j] = Some(i);
            }
        }
    }
    let duplicated = table.values().filter(|e| e.is_duplicated()).count();
    drop(table);

    let mut result = DiffResult::empty();
    result.deletes = unmatched(&old_match);
    result.inserts = unmatched(&new_match);

    let old_rank = ranks(&old_match);
    let new_rank = ranks(&new_match);

    let mut in_place: Vec<MoveIndex> = Vec::new();
    let mut displaced: Vec<MoveIndex> = Vec::new();
    for (j, matched) in new_match.iter().enumerate() {
        let Some(i) = *matched else { continue };
        let pair = MoveIndex::new(i, j);
        result.matches.push(pair);

        if !old[i].is_equal(&new[j]) {
            result.updates.insert(new_ids[j].clone());
            result.updated_pairs.insert(pair);
        }

        if old_rank[i] == new_rank[j] {
            in_place.push(pair);
        } else {
            displaced.push(pair);
        }
    }

    let straddled = straddled_positions(&in_place, old.len().max(new.len()));
    for pair in displaced {
        if pair.from == pair.to && !straddled[pair.from] {
            continue;
        }
        result.moves.insert(pair);
    }

    for (i, id) in old_ids.into_iter().enumerate() {
        result.old_indices.entry(id).or_insert(i);
    }
    for (j, id) in new_ids.into_iter().enumerate() {
        result.new_indices.entry(id).or_insert(j);
    }

    debug!(
        old = old.len(),
        new = new.len(),
        deletes = result.deletes.len(),
        inserts = result.inserts.len(),
        moves = result.moves.len(),
        updates = result.updates.len(),
        duplicated,
        "computed diff"
    );

    result
}

fn unmatched(matches: &[Option<usize>]) -> std::collections::BTreeSet<usize> {
    matches
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_none())
        .map(|(i, _)| i)
        .collect()
}

/// For each position, the number of matched positions before it.
fn ranks(matches: &[Option<usize>]) -> Vec<usize> {
    let mut seen = 0;
    matches
        .iter()
        .map(|m| {
            let rank = seen;
            if m.is_some() {
                seen += 1;
            }
            rank
        })
        .collect()
}

/// Marks every index lying strictly between the old and new position of
/// some in-place pair. Such an index cannot host a same-index pair without
/// reordering it against that in-place pair.
fn straddled_positions(in_place: &[MoveIndex], len: usize) -> Vec<bool> {
    let mut delta = vec![0isize; len + 1];
    for pair in in_place {
        let (lo, hi) = if pair.from < pair.to {
            (pair.from, pair.to)
        } else {
            (pair.to, pair.from)
        };
        if hi > lo + 1 {
            delta[lo + 1] += 1;
            delta[hi] -= 1;
        }
    }

    let mut open = 0isize;
    delta
        .into_iter()
        .take(len)
        .map(|d| {
            open += d;
            open > 0
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[derive(Clone, Debug)]
    struct Row {
        id: &'static str,
        body: u32,
    }

    impl Diffable for Row {
        type Identity = &'static str;

        fn identity(&self) -> &'static str {
            self.id
        }

        fn is_equal(&self, other: &Self) -> bool {
            self.body == other.body
        }
    }

    fn rows(entries: &[(&'static str, u32)]) -> Vec<Row> {
        entries.iter().map(|&(id, body)| Row { id, body }).collect()
    }

    fn set(values: &[usize]) -> BTreeSet<usize> {
        values.iter().copied().collect()
    }

    fn moves(pairs: &[(usize, usize)]) -> BTreeSet<MoveIndex> {
        pairs.iter().map(|&(f, t)| MoveIndex::new(f, t)).collect()
    }

    #[test]
    fn empty_to_empty_has_no_changes() {
        let result = diff::<u32>(&[], &[]);
        assert!(!result.has_changes());
        assert_eq!(result.change_count(), 0);
    }

    #[test]
    fn empty_to_populated_all_inserts() {
        let result = diff(&[], &["a", "b", "c"]);
        assert_eq!(result.inserts, set(&[0, 1, 2]));
        assert!(result.deletes.is_empty());
        assert!(result.moves.is_empty());
    }

    #[test]
    fn populated_to_empty_all_deletes() {
        let result = diff(&["a", "b"], &[]);
        assert_eq!(result.deletes, set(&[0, 1]));
        assert!(result.inserts.is_empty());
    }

    #[test]
    fn identical_sequences_no_changes() {
        let seq = ["a", "b", "c", "d"];
        let result = diff(&seq, &seq);
        assert!(!result.has_changes());
        assert_eq!(result.matches().len(), 4);
    }

    #[test]
    fn sections_reorder_with_delete() {
        // [A, B, C] -> [C, A]
        let result = diff(&["A", "B", "C"], &["C", "A"]);
        assert_eq!(result.deletes, set(&[1]));
        assert!(result.inserts.is_empty());
        assert_eq!(result.moves, moves(&[(0, 1), (2, 0)]));
    }

    #[test]
    fn items_reorder_keeps_same_index_element() {
        // [x, y, z] -> [z, y, w]
        let result = diff(&["x", "y", "z"], &["z", "y", "w"]);
        assert_eq!(result.deletes, set(&[0]));
        assert_eq!(result.inserts, set(&[2]));
        assert_eq!(result.moves, moves(&[(2, 0)]));
    }

    #[test]
    fn shift_after_delete_is_not_a_move() {
        let result = diff(&["a", "b", "c"], &["b", "c"]);
        assert_eq!(result.deletes, set(&[0]));
        assert!(result.moves.is_empty());
    }

    #[test]
    fn shift_after_insert_is_not_a_move() {
        let result = diff(&["a", "b"], &["new", "a", "b"]);
        assert_eq!(result.inserts, set(&[0]));
        assert!(result.moves.is_empty());
    }

    #[test]
    fn swap_produces_two_moves() {
        let result = diff(&["a", "b"], &["b", "a"]);
        assert_eq!(result.moves, moves(&[(0, 1), (1, 0)]));
    }

    #[test]
    fn reversal_keeps_the_middle_element() {
        let result = diff(&["a", "b", "c"], &["c", "b", "a"]);
        assert_eq!(result.moves, moves(&[(0, 2), (2, 0)]));
    }

    #[test]
    fn same_index_pair_straddled_by_in_place_pair_still_moves() {
        // `u` keeps its rank while `v` sits at index 2 in both snapshots but
        // must cross `u`; keeping `v` in place would reorder the two.
        let result = diff(&["a", "u", "v"], &["i1", "i2", "v", "u", "a"]);
        assert_eq!(result.inserts, set(&[0, 1]));
        assert_eq!(result.moves, moves(&[(0, 4), (2, 2)]));
    }

    #[test]
    fn content_change_is_an_update_not_a_move() {
        let old = rows(&[("a", 1), ("b", 1)]);
        let new = rows(&[("a", 1), ("b", 2)]);
        let result = diff(&old, &new);
        assert!(result.moves.is_empty());
        assert!(result.deletes.is_empty());
        assert_eq!(result.updates, BTreeSet::from(["b"]));
    }

    #[test]
    fn moved_and_changed_is_both() {
        let old = rows(&[("a", 1), ("b", 1)]);
        let new = rows(&[("b", 9), ("a", 1)]);
        let result = diff(&old, &new);
        assert_eq!(result.moves, moves(&[(0, 1), (1, 0)]));
        assert_eq!(result.updates, BTreeSet::from(["b"]));
    }

    #[test]
    fn duplicates_pair_in_sequence_order() {
        let result = diff(&["a", "a", "b"], &["a", "b", "a", "a"]);
        // First two `a`s pair with the first two old `a`s; the third is new.
        assert_eq!(result.inserts, set(&[3]));
        assert!(result.deletes.is_empty());
        assert_eq!(result.matches().len(), 3);
    }

    #[test]
    fn surplus_duplicates_are_deleted() {
        let result = diff(&["a", "a", "a"], &["a"]);
        assert_eq!(result.deletes, set(&[1, 2]));
        assert!(result.inserts.is_empty());
        assert!(result.moves.is_empty());
    }

    #[test]
    fn index_lookups_use_first_occurrence() {
        let result = diff(&["a", "b", "a"], &["b", "c"]);
        assert_eq!(result.old_index_for(&"a".to_string()), Some(0));
        assert_eq!(result.old_index_for(&"b".to_string()), Some(1));
        assert_eq!(result.new_index_for(&"b".to_string()), Some(0));
        assert_eq!(result.new_index_for(&"c".to_string()), Some(1));
        assert_eq!(result.new_index_for(&"a".to_string()), None);
    }

    #[test]
    fn index_lookups_on_integer_identities() {
        let result = diff(&[7u32, 8, 7], &[8, 9]);
        assert_eq!(result.old_index_for(&7), Some(0));
        assert_eq!(result.new_index_for(&9), Some(1));
        assert_eq!(result.new_index_for(&7), None);
    }

    #[test]
    fn rotation_moves_every_element() {
        // Rank-stable alignment: every element changes rank, so all four
        // are reported as moves even though one move would suffice.
        let result = diff(&[1u32, 2, 3, 4], &[2, 3, 4, 1]);
        assert_eq!(result.moves, moves(&[(0, 3), (1, 0), (2, 1), (3, 2)]));
        assert!(result.deletes.is_empty());
        assert!(result.inserts.is_empty());
    }

    #[test]
    fn straddle_marks_strict_interior_only() {
        let marks = straddled_positions(&[MoveIndex::new(1, 4)], 6);
        assert_eq!(marks, vec![false, false, true, true, false, false]);

        let adjacent = straddled_positions(&[MoveIndex::new(3, 2)], 5);
        assert!(adjacent.iter().all(|m| !m));
    }

    #[test]
    fn ranks_count_matched_predecessors() {
        let matches = [Some(0), None, Some(1), None, Some(2)];
        assert_eq!(ranks(&matches), vec![0, 1, 1, 2, 2]);
    }
}
