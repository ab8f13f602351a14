//! Two-level diff over sections of items.

use crate::key::{DiffableSection, Keyed};
use crate::sectioned::result::{MovedSection, SectionedChanges, UnchangedSection, UpdatedSection};
use crate::sequence::{self, SequenceChanges};
use indexmap::IndexSet;

/// Diffs two sectioned structures.
///
/// Sections are matched by key with the same identity-first pass as
/// [`sequence::diff`], including the aligned fast path and move
/// detection. Every surviving section pair (moved, updated or
/// unchanged) then gets an item-level diff between its two versions.
/// Added and removed sections contribute their items wholesale to
/// `added_item_keys` and `removed_item_keys`.
///
/// A section's `content_changed` covers its own payload only, never its
/// items; a section whose items changed but whose payload did not is
/// reported as unchanged, with the item script carrying the difference.
pub fn diff<S: DiffableSection>(
    old: &[S],
    new: &[S],
) -> SectionedChanges<S, S::Key, S::Item, <S::Item as Keyed>::Key> {
    let SequenceChanges {
        added,
        removed,
        moved,
        updated,
        unchanged,
        change_count: section_change_count,
        used_fast_path,
    } = sequence::diff_with(
        old,
        new,
        Keyed::key,
        DiffableSection::content_changed,
        DiffableSection::move_hint,
    );

    let mut added_item_keys = IndexSet::new();
    let mut removed_item_keys = IndexSet::new();
    let mut item_change_count = 0;

    for record in &added {
        for item in record.new_value.items() {
            added_item_keys.insert(item.key());
        }
    }
    for record in &removed {
        for item in record.old_value.items() {
            removed_item_keys.insert(item.key());
        }
    }

    let moved = moved
        .into_iter()
        .map(|record| {
            let item_changes = items_diff(
                &record.old_value,
                &record.new_value,
                &mut added_item_keys,
                &mut removed_item_keys,
            );
            item_change_count += item_changes.change_count;
            MovedSection {
                key: record.key,
                old_index: record.old_index,
                old_value: record.old_value,
                new_index: record.new_index,
                new_value: record.new_value,
                item_changes,
            }
        })
        .collect();

    let updated = updated
        .into_iter()
        .map(|record| {
            let item_changes = items_diff(
                &record.old_value,
                &record.new_value,
                &mut added_item_keys,
                &mut removed_item_keys,
            );
            item_change_count += item_changes.change_count;
            UpdatedSection {
                key: record.key,
                old_index: record.old_index,
                new_index: record.new_index,
                old_value: record.old_value,
                new_value: record.new_value,
                item_changes,
            }
        })
        .collect();

    let unchanged = unchanged
        .into_iter()
        .map(|record| {
            let item_changes = items_diff(
                &record.old_value,
                &record.new_value,
                &mut added_item_keys,
                &mut removed_item_keys,
            );
            item_change_count += item_changes.change_count;
            UnchangedSection {
                key: record.key,
                old_index: record.old_index,
                new_index: record.new_index,
                old_value: record.old_value,
                new_value: record.new_value,
                item_changes,
            }
        })
        .collect();

    tracing::debug!(
        old_sections = old.len(),
        new_sections = new.len(),
        section_change_count,
        item_change_count,
        used_fast_path,
        "computed sectioned diff"
    );

    SectionedChanges {
        added,
        removed,
        moved,
        updated,
        unchanged,
        added_item_keys,
        removed_item_keys,
        section_change_count,
        item_change_count,
        used_fast_path,
    }
}

/// Runs the item-level diff for a surviving section pair and folds its
/// added and removed keys into the aggregate sets.
fn items_diff<S: DiffableSection>(
    old_section: &S,
    new_section: &S,
    added_item_keys: &mut IndexSet<<S::Item as Keyed>::Key>,
    removed_item_keys: &mut IndexSet<<S::Item as Keyed>::Key>,
) -> SequenceChanges<S::Item, <S::Item as Keyed>::Key> {
    let item_changes = sequence::diff(old_section.items(), new_section.items());
    for record in &item_changes.added {
        added_item_keys.insert(record.key.clone());
    }
    for record in &item_changes.removed {
        removed_item_keys.insert(record.key.clone());
    }
    item_changes
}
