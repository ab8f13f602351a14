//! Sequence diff engine implementation.

use super::result::{Added, Moved, Removed, SequenceChanges, Unchanged, Updated};
use crate::key::{Diffable, KeyQueues, Keyed};
use crate::lis;
use std::hash::Hash;

/// Diff two sequences of [`Diffable`] elements.
///
/// Identity, content comparison and move hints come from the element's
/// trait implementation. See [`diff_with`] for the closure-driven variant.
pub fn diff<E: Diffable>(old: &[E], new: &[E]) -> SequenceChanges<E, E::Key> {
    diff_with(
        old,
        new,
        Keyed::key,
        Diffable::content_changed,
        Diffable::move_hint,
    )
}

/// Diff two sequences with caller-supplied semantics.
///
/// `key_of` extracts the identity that defines "the same element" across
/// versions; duplicate keys are paired oldest-first. `content_changed`
/// splits surviving position-stable pairs into updated vs unchanged.
/// `move_hint` forces a matched pair to be reported as moved even when
/// position analysis alone would keep it stable.
///
/// All three must be pure and deterministic; the engine cannot detect a
/// violation and its guarantees do not hold under one.
pub fn diff_with<E, K>(
    old: &[E],
    new: &[E],
    key_of: impl Fn(&E) -> K,
    content_changed: impl Fn(&E, &E) -> bool,
    move_hint: impl Fn(&E, &E) -> bool,
) -> SequenceChanges<E, K>
where
    E: Clone,
    K: Hash + Eq + Clone,
{
    let changes = match fast_path(old, new, &key_of, &content_changed) {
        Some(changes) => changes,
        None => general_path(old, new, &key_of, &content_changed, &move_hint),
    };

    tracing::debug!(
        old_len = old.len(),
        new_len = new.len(),
        change_count = changes.change_count,
        used_fast_path = changes.used_fast_path,
        "computed sequence diff"
    );

    changes
}

/// Index-aligned identity pre-check.
///
/// When both sequences have equal length and identical keys at every
/// index, no structural change is possible and each position classifies
/// by content alone. Move hints are not consulted here: an aligned layout
/// has no moves to force.
fn fast_path<E, K>(
    old: &[E],
    new: &[E],
    key_of: &impl Fn(&E) -> K,
    content_changed: &impl Fn(&E, &E) -> bool,
) -> Option<SequenceChanges<E, K>>
where
    E: Clone,
    K: Eq,
{
    if old.len() != new.len() {
        return None;
    }

    let mut updated = Vec::new();
    let mut unchanged = Vec::new();

    for (index, (old_value, new_value)) in old.iter().zip(new).enumerate() {
        let key = key_of(new_value);
        if key_of(old_value) != key {
            return None;
        }

        if content_changed(old_value, new_value) {
            updated.push(Updated {
                key,
                old_index: index,
                new_index: index,
                old_value: old_value.clone(),
                new_value: new_value.clone(),
            });
        } else {
            unchanged.push(Unchanged {
                key,
                old_index: index,
                new_index: index,
                old_value: old_value.clone(),
                new_value: new_value.clone(),
            });
        }
    }

    Some(SequenceChanges {
        added: Vec::new(),
        removed: Vec::new(),
        moved: Vec::new(),
        change_count: updated.len(),
        updated,
        unchanged,
        used_fast_path: true,
    })
}

/// Full matching pass.
///
/// FIFO identity matching pairs each new element with the oldest
/// unconsumed old occurrence of its key; leftovers become additions and
/// removals. A longest strictly-increasing subsequence over the matched
/// old indices (taken in new-index order) separates position-stable pairs
/// from moved ones.
fn general_path<E, K>(
    old: &[E],
    new: &[E],
    key_of: &impl Fn(&E) -> K,
    content_changed: &impl Fn(&E, &E) -> bool,
    move_hint: &impl Fn(&E, &E) -> bool,
) -> SequenceChanges<E, K>
where
    E: Clone,
    K: Hash + Eq + Clone,
{
    let old_keys: Vec<K> = old.iter().map(key_of).collect();
    let new_keys: Vec<K> = new.iter().map(key_of).collect();

    let mut queues = KeyQueues::with_capacity(old.len());
    for (index, key) in old_keys.iter().enumerate() {
        queues.push(key.clone(), index);
    }

    let mut pairs = Vec::with_capacity(new.len().min(old.len()));
    let mut added = Vec::new();
    let mut consumed = vec![false; old.len()];

    for (new_index, new_value) in new.iter().enumerate() {
        match queues.pop(&new_keys[new_index]) {
            Some(old_index) => {
                consumed[old_index] = true;
                pairs.push(MatchedPair {
                    old_index,
                    new_index,
                    hinted: move_hint(&old[old_index], new_value),
                    changed: content_changed(&old[old_index], new_value),
                });
            }
            None => added.push(Added {
                key: new_keys[new_index].clone(),
                new_index,
                new_value: new_value.clone(),
            }),
        }
    }

    // Old occurrences never paired are removals, collected descending.
    let removed: Vec<Removed<E, K>> = (0..old.len())
        .rev()
        .filter(|&old_index| !consumed[old_index])
        .map(|old_index| Removed {
            key: old_keys[old_index].clone(),
            old_index,
            old_value: old[old_index].clone(),
        })
        .collect();

    // Hinted pairs are forced moves and sit outside the stability
    // analysis, so a hint never displaces a genuinely stable pair.
    let unhinted: Vec<usize> = (0..pairs.len()).filter(|&i| !pairs[i].hinted).collect();
    let old_index_run: Vec<usize> = unhinted.iter().map(|&i| pairs[i].old_index).collect();

    let mut stable = vec![false; pairs.len()];
    for position in lis::longest_increasing(&old_index_run) {
        stable[unhinted[position]] = true;
    }

    tracing::trace!(
        matched = pairs.len(),
        hinted = pairs.len() - unhinted.len(),
        stable = stable.iter().filter(|&&s| s).count(),
        "analyzed pair stability"
    );

    let mut moved = Vec::new();
    let mut updated = Vec::new();
    let mut unchanged = Vec::new();

    for (i, pair) in pairs.iter().enumerate() {
        let key = new_keys[pair.new_index].clone();
        let old_value = old[pair.old_index].clone();
        let new_value = new[pair.new_index].clone();

        if !stable[i] {
            moved.push(Moved {
                key,
                old_index: pair.old_index,
                old_value,
                new_index: pair.new_index,
                new_value,
            });
        } else if pair.changed {
            updated.push(Updated {
                key,
                old_index: pair.old_index,
                new_index: pair.new_index,
                old_value,
                new_value,
            });
        } else {
            unchanged.push(Unchanged {
                key,
                old_index: pair.old_index,
                new_index: pair.new_index,
                old_value,
                new_value,
            });
        }
    }

    // The classification loop runs in new-index order; re-sort to the
    // published old-index orders.
    moved.sort_by_key(|record| record.old_index);
    updated.sort_by_key(|record| record.old_index);
    unchanged.sort_by_key(|record| record.old_index);

    let change_count = added.len() + removed.len() + moved.len() + updated.len();

    SequenceChanges {
        added,
        removed,
        moved,
        updated,
        unchanged,
        change_count,
        used_fast_path: false,
    }
}

struct MatchedPair {
    old_index: usize,
    new_index: usize,
    hinted: bool,
    changed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(e: &&str) -> String {
        e.to_lowercase()
    }

    fn changed(a: &&str, b: &&str) -> bool {
        a != b
    }

    fn no_hint(_: &&str, _: &&str) -> bool {
        false
    }

    #[test]
    fn test_fast_path_matches_general_path() {
        let old = vec!["a", "b", "c", "d"];
        let new = vec!["a", "B", "c", "D"];

        let fast = diff_with(&old, &new, key, changed, no_hint);
        assert!(fast.used_fast_path);

        let general = general_path(&old, &new, &key, &changed, &no_hint);
        assert!(!general.used_fast_path);

        assert_eq!(fast.added, general.added);
        assert_eq!(fast.removed, general.removed);
        assert_eq!(fast.moved, general.moved);
        assert_eq!(fast.updated, general.updated);
        assert_eq!(fast.unchanged, general.unchanged);
        assert_eq!(fast.change_count, general.change_count);
    }

    #[test]
    fn test_fast_path_not_taken_when_reordered() {
        let old = vec!["a", "b"];
        let new = vec!["b", "a"];

        let changes = diff_with(&old, &new, key, changed, no_hint);
        assert!(!changes.used_fast_path);
        assert_eq!(changes.moved.len(), 1);
    }

    #[test]
    fn test_both_sequences_empty() {
        let old: Vec<&str> = Vec::new();
        let new: Vec<&str> = Vec::new();

        let changes = diff_with(&old, &new, key, changed, no_hint);
        assert!(changes.is_empty());
        assert!(changes.used_fast_path);
        assert_eq!(changes.old_len(), 0);
        assert_eq!(changes.new_len(), 0);
    }

    #[test]
    fn test_hint_forces_move_and_stays_out_of_stability() {
        let old = vec!["a", "b"];
        let new = vec!["a", "b", "c"];
        let hint = |old_value: &&str, _: &&str| *old_value == "a";

        let changes = diff_with(&old, &new, key, changed, hint);

        assert_eq!(changes.moved.len(), 1);
        assert_eq!(changes.moved[0].key, "a");
        assert_eq!(changes.moved[0].old_index, 0);
        assert_eq!(changes.moved[0].new_index, 0);

        // The unhinted pair keeps its stability.
        assert_eq!(changes.unchanged.len(), 1);
        assert_eq!(changes.unchanged[0].key, "b");

        assert_eq!(changes.added.len(), 1);
        assert_eq!(changes.change_count, 2);
    }

    #[test]
    fn test_trait_entry_point_uses_defaults() {
        use crate::key::{Diffable, Keyed};

        #[derive(Debug, Clone, PartialEq)]
        struct Row {
            id: u32,
            text: &'static str,
        }

        impl Keyed for Row {
            type Key = u32;
            fn key(&self) -> u32 {
                self.id
            }
        }

        impl Diffable for Row {}

        let old = vec![
            Row { id: 1, text: "one" },
            Row { id: 2, text: "two" },
        ];
        let new = vec![
            Row { id: 1, text: "one" },
            Row { id: 2, text: "TWO" },
        ];

        let changes = diff(&old, &new);
        assert!(changes.used_fast_path);
        assert_eq!(changes.updated.len(), 1);
        assert_eq!(changes.updated[0].key, 2);
        assert_eq!(changes.unchanged.len(), 1);
        assert_eq!(changes.change_count, 1);
    }
}
