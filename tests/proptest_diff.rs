//! Property-based tests for the diff engines.
//!
//! Small key spaces are deliberate: they force duplicate identities,
//! partial matches and reorders into almost every generated case, which
//! is where the matching and move-detection invariants earn their keep.

use keyed_diff::{Diffable, DiffableSection, Keyed, SequenceChanges, sequence};
use proptest::prelude::*;

/// Element with a deliberately collision-prone key and a small content
/// space so updates are common.
type Elem = (u8, u8);

fn elems() -> impl Strategy<Value = Vec<Elem>> {
    prop::collection::vec((0u8..8, 0u8..4), 0..24)
}

fn diff_elems(old: &[Elem], new: &[Elem]) -> SequenceChanges<Elem, u8> {
    sequence::diff_with(old, new, |e| e.0, |a, b| a.1 != b.1, |_, _| false)
}

proptest! {
    // 512 cases: each diff is cheap and the interesting structure lives
    // in key collisions, which the narrow key space hits constantly.
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn replay_reproduces_the_new_sequence(old in elems(), new in elems()) {
        let changes = diff_elems(&old, &new);
        prop_assert!(changes.verify_replay(&old, &new).is_ok());
    }

    #[test]
    fn every_index_is_classified_exactly_once(old in elems(), new in elems()) {
        let changes = diff_elems(&old, &new);

        let mut old_seen = vec![0u8; old.len()];
        for r in &changes.removed {
            old_seen[r.old_index] += 1;
        }
        for r in &changes.moved {
            old_seen[r.old_index] += 1;
        }
        for r in &changes.updated {
            old_seen[r.old_index] += 1;
        }
        for r in &changes.unchanged {
            old_seen[r.old_index] += 1;
        }
        prop_assert!(old_seen.iter().all(|&n| n == 1), "old partition: {:?}", old_seen);

        let mut new_seen = vec![0u8; new.len()];
        for r in &changes.added {
            new_seen[r.new_index] += 1;
        }
        for r in &changes.moved {
            new_seen[r.new_index] += 1;
        }
        for r in &changes.updated {
            new_seen[r.new_index] += 1;
        }
        for r in &changes.unchanged {
            new_seen[r.new_index] += 1;
        }
        prop_assert!(new_seen.iter().all(|&n| n == 1), "new partition: {:?}", new_seen);
    }

    #[test]
    fn change_count_is_the_sum_of_its_parts(old in elems(), new in elems()) {
        let changes = diff_elems(&old, &new);
        prop_assert_eq!(
            changes.change_count,
            changes.added.len()
                + changes.removed.len()
                + changes.moved.len()
                + changes.updated.len()
        );
        prop_assert_eq!(changes.old_len(), old.len());
        prop_assert_eq!(changes.new_len(), new.len());
    }

    #[test]
    fn published_orderings_hold(old in elems(), new in elems()) {
        let changes = diff_elems(&old, &new);

        prop_assert!(changes.added.windows(2).all(|w| w[0].new_index < w[1].new_index));
        prop_assert!(changes.removed.windows(2).all(|w| w[0].old_index > w[1].old_index));
        prop_assert!(changes.moved.windows(2).all(|w| w[0].old_index < w[1].old_index));
        prop_assert!(changes.updated.windows(2).all(|w| w[0].old_index < w[1].old_index));
        prop_assert!(changes.unchanged.windows(2).all(|w| w[0].old_index < w[1].old_index));
    }

    #[test]
    fn diffing_a_sequence_against_itself_changes_nothing(input in elems()) {
        let changes = diff_elems(&input, &input);
        prop_assert!(changes.used_fast_path);
        prop_assert!(changes.is_empty());
        prop_assert_eq!(changes.unchanged.len(), input.len());
    }

    #[test]
    fn fast_path_implies_aligned_keys(old in elems(), new in elems()) {
        let changes = diff_elems(&old, &new);
        if changes.used_fast_path {
            prop_assert_eq!(old.len(), new.len());
            prop_assert!(old.iter().zip(&new).all(|(a, b)| a.0 == b.0));
            prop_assert!(changes.added.is_empty());
            prop_assert!(changes.removed.is_empty());
            prop_assert!(changes.moved.is_empty());
        }
    }

    #[test]
    fn forced_hints_never_break_replay(old in elems(), new in elems()) {
        let changes = sequence::diff_with(&old, &new, |e| e.0, |a, b| a.1 != b.1, |_, _| true);
        // Off the fast path every matched pair is forced into the moved
        // class, which must not affect what the script reproduces.
        if !changes.used_fast_path {
            prop_assert!(changes.updated.is_empty());
            prop_assert!(changes.unchanged.is_empty());
        }
        prop_assert!(changes.verify_replay(&old, &new).is_ok());
    }

    #[test]
    fn wide_key_spaces_replay_too(
        old in prop::collection::vec((0u16..100, 0u8..4), 0..40),
        new in prop::collection::vec((0u16..100, 0u8..4), 0..40),
    ) {
        // Mostly-unique keys: the opposite regime from the narrow
        // alphabet, dominated by additions and removals.
        let changes = sequence::diff_with(&old, &new, |e| e.0, |a, b| a.1 != b.1, |_, _| false);
        prop_assert!(changes.verify_replay(&old, &new).is_ok());
    }

    #[test]
    fn moved_elements_keep_their_key(old in elems(), new in elems()) {
        let changes = diff_elems(&old, &new);
        for r in &changes.moved {
            prop_assert_eq!(old[r.old_index].0, new[r.new_index].0);
        }
        for r in &changes.updated {
            prop_assert_eq!(old[r.old_index].0, new[r.new_index].0);
            prop_assert!(old[r.old_index].1 != new[r.new_index].1);
        }
        for r in &changes.unchanged {
            prop_assert_eq!(old[r.old_index].0, new[r.new_index].0);
            prop_assert_eq!(old[r.old_index].1, new[r.new_index].1);
        }
    }
}

// ============================================================================
// Sectioned Properties
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct PItem {
    key: u8,
    body: u8,
}

impl Keyed for PItem {
    type Key = u8;
    fn key(&self) -> u8 {
        self.key
    }
}

impl Diffable for PItem {}

#[derive(Debug, Clone, PartialEq)]
struct PSection {
    key: u8,
    items: Vec<PItem>,
}

impl Keyed for PSection {
    type Key = u8;
    fn key(&self) -> u8 {
        self.key
    }
}

impl DiffableSection for PSection {
    type Item = PItem;
    fn items(&self) -> &[PItem] {
        &self.items
    }
}

fn sections() -> impl Strategy<Value = Vec<PSection>> {
    prop::collection::vec(
        (
            0u8..4,
            prop::collection::vec((0u8..6, 0u8..3), 0..6),
        ),
        0..5,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .map(|(key, items)| PSection {
                key,
                items: items
                    .into_iter()
                    .map(|(key, body)| PItem { key, body })
                    .collect(),
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn sectioned_replay_reproduces_the_new_structure(old in sections(), new in sections()) {
        let changes = keyed_diff::sectioned::diff(&old, &new);
        prop_assert!(changes.verify_replay(&old, &new).is_ok());
        prop_assert_eq!(changes.old_len(), old.len());
        prop_assert_eq!(changes.new_len(), new.len());
    }

    #[test]
    fn aggregate_key_sets_stay_within_the_inputs(old in sections(), new in sections()) {
        let changes = keyed_diff::sectioned::diff(&old, &new);

        for key in &changes.added_item_keys {
            prop_assert!(
                new.iter().flat_map(|s| s.items.iter()).any(|i| i.key == *key),
                "added key {} not present in the new structure",
                key
            );
        }
        for key in &changes.removed_item_keys {
            prop_assert!(
                old.iter().flat_map(|s| s.items.iter()).any(|i| i.key == *key),
                "removed key {} not present in the old structure",
                key
            );
        }
    }

    #[test]
    fn sectioned_counts_add_up(old in sections(), new in sections()) {
        let changes = keyed_diff::sectioned::diff(&old, &new);

        prop_assert_eq!(
            changes.section_change_count,
            changes.added.len()
                + changes.removed.len()
                + changes.moved.len()
                + changes.updated.len()
        );

        let nested: usize = changes
            .moved
            .iter()
            .map(|r| r.item_changes.change_count)
            .chain(changes.updated.iter().map(|r| r.item_changes.change_count))
            .chain(changes.unchanged.iter().map(|r| r.item_changes.change_count))
            .sum();
        prop_assert_eq!(changes.item_change_count, nested);
        prop_assert_eq!(
            changes.total_change_count(),
            changes.section_change_count + changes.item_change_count
        );
    }
}
