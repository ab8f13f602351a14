//! Applying a sectioned edit script: mapped-state transform, replay,
//! verification.

use crate::error::{KeyedDiffError, ReplayErrorKind, Result, StaleInputKind};
use crate::key::DiffableSection;
use crate::sectioned::result::SectionedChanges;
use crate::sequence::SequenceChanges;

impl<S, SK, I, IK> SectionedChanges<S, SK, I, IK> {
    /// Apply the section-level edit script to a parallel array of
    /// caller-owned per-section state.
    ///
    /// `old` holds one mapped entry per old section, in order. Removed
    /// entries are handed to `removed` for disposal; `added` builds a
    /// fresh entry per added section; `moved`, `updated` and `unchanged`
    /// receive the surviving entry seeded with its old state, along with
    /// the item-level script for that pair so item state inside the entry
    /// can be migrated with the same discipline. Returns the mapped array
    /// in new-structure order.
    ///
    /// `mapped_item_count` reports how many items a mapped entry
    /// currently represents. It is compared against the item counts the
    /// diff recorded for the old sections before any surgery happens, so
    /// a diff applied to state that drifted since it was computed fails
    /// loudly instead of corrupting indices.
    ///
    /// # Panics
    ///
    /// Panics if the mapped entries do not match the old structure the
    /// diff was computed against, either in section count or in any
    /// per-section item count.
    pub fn transform<M>(
        &self,
        old: Vec<M>,
        mut removed: impl FnMut(&S, M),
        mut added: impl FnMut(&S) -> M,
        mut moved: impl FnMut(&S, &S, &SequenceChanges<I, IK>, &mut M),
        mut updated: impl FnMut(&S, &S, &SequenceChanges<I, IK>, &mut M),
        mut unchanged: impl FnMut(&S, &S, &SequenceChanges<I, IK>, &mut M),
        mut mapped_item_count: impl FnMut(&M) -> usize,
    ) -> Vec<M>
    where
        S: DiffableSection,
    {
        let old_counts = self.old_item_counts();
        let input_counts: Vec<usize> = old.iter().map(&mut mapped_item_count).collect();
        assert!(
            old_counts == input_counts,
            "stale diff input: mapped section item counts {input_counts:?} do not match the \
             recorded old counts {old_counts:?}"
        );

        let mut result = old;

        // Same surgery as the sequence transform: removals descending by
        // old index, move state lifted out and re-entered as insertions
        // ascending by new index, stable slots notified last.
        let mut removals: Vec<(usize, RemovalKind)> =
            Vec::with_capacity(self.removed.len() + self.moved.len());
        removals.extend(
            self.removed
                .iter()
                .enumerate()
                .map(|(i, record)| (record.old_index, RemovalKind::Discard(i))),
        );
        removals.extend(
            self.moved
                .iter()
                .enumerate()
                .map(|(i, record)| (record.old_index, RemovalKind::Relocate(i))),
        );
        removals.sort_by(|a, b| b.0.cmp(&a.0));

        let mut relocated: Vec<Option<M>> = Vec::with_capacity(self.moved.len());
        relocated.resize_with(self.moved.len(), || None);

        for (old_index, kind) in removals {
            let mapped = result.remove(old_index);
            match kind {
                RemovalKind::Discard(i) => removed(&self.removed[i].old_value, mapped),
                RemovalKind::Relocate(i) => relocated[i] = Some(mapped),
            }
        }

        let mut insertions: Vec<(usize, M)> =
            Vec::with_capacity(self.added.len() + self.moved.len());

        for record in &self.added {
            insertions.push((record.new_index, added(&record.new_value)));
        }

        for (i, record) in self.moved.iter().enumerate() {
            let mut mapped = relocated[i]
                .take()
                .expect("every moved old index is removed exactly once");
            moved(
                &record.old_value,
                &record.new_value,
                &record.item_changes,
                &mut mapped,
            );
            insertions.push((record.new_index, mapped));
        }

        insertions.sort_by_key(|entry| entry.0);

        for (new_index, mapped) in insertions {
            result.insert(new_index, mapped);
        }

        for record in &self.updated {
            updated(
                &record.old_value,
                &record.new_value,
                &record.item_changes,
                &mut result[record.new_index],
            );
        }

        for record in &self.unchanged {
            unchanged(
                &record.old_value,
                &record.new_value,
                &record.item_changes,
                &mut result[record.new_index],
            );
        }

        result
    }

    /// Reproduce the new sectioned structure from the old one.
    ///
    /// Self-specialization of [`transform`](Self::transform): added slots
    /// take the added section, surviving slots are overwritten with the
    /// new section, items included.
    ///
    /// # Panics
    ///
    /// Panics if `old` does not match the structure the diff was
    /// computed against.
    pub fn replay(&self, old: &[S]) -> Vec<S>
    where
        S: DiffableSection,
    {
        self.transform(
            old.to_vec(),
            |_, _| {},
            |new_section| new_section.clone(),
            |_, new_section, _, slot| *slot = new_section.clone(),
            |_, new_section, _, slot| *slot = new_section.clone(),
            |_, new_section, _, slot| *slot = new_section.clone(),
            |section| section.items().len(),
        )
    }

    /// Check that replaying the script against `old` reproduces `new`
    /// exactly, section order and content included.
    ///
    /// The shape of `old` is validated up front so a stale input comes
    /// back as an error instead of a panic.
    pub fn verify_replay(&self, old: &[S], new: &[S]) -> Result<()>
    where
        S: DiffableSection + PartialEq,
    {
        if old.len() != self.old_len() {
            return Err(KeyedDiffError::stale_length(
                "sectioned replay",
                self.old_len(),
                old.len(),
            ));
        }

        for (section_index, (section, expected)) in
            old.iter().zip(self.old_item_counts()).enumerate()
        {
            let actual = section.items().len();
            if actual != expected {
                return Err(KeyedDiffError::stale_input(
                    "sectioned replay",
                    StaleInputKind::SectionItemCount {
                        section_index,
                        expected,
                        actual,
                    },
                ));
            }
        }

        let replayed = self.replay(old);
        if replayed.len() != new.len() {
            return Err(KeyedDiffError::replay(
                "sectioned replay",
                ReplayErrorKind::LengthMismatch {
                    expected: new.len(),
                    actual: replayed.len(),
                },
            ));
        }

        for (index, (got, want)) in replayed.iter().zip(new).enumerate() {
            if got != want {
                return Err(KeyedDiffError::replay(
                    "sectioned replay",
                    ReplayErrorKind::ElementMismatch { index },
                ));
            }
        }

        Ok(())
    }

    /// Item counts of the old sections, reconstructed from the records.
    fn old_item_counts(&self) -> Vec<usize>
    where
        S: DiffableSection,
    {
        let mut counts = vec![0usize; self.old_len()];
        for record in &self.removed {
            counts[record.old_index] = record.old_value.items().len();
        }
        for record in &self.moved {
            counts[record.old_index] = record.old_value.items().len();
        }
        for record in &self.updated {
            counts[record.old_index] = record.old_value.items().len();
        }
        for record in &self.unchanged {
            counts[record.old_index] = record.old_value.items().len();
        }
        counts
    }
}

enum RemovalKind {
    /// Removal record at this index in the removed list; state is dropped.
    Discard(usize),
    /// Moved record at this index in the moved list; state re-enters at
    /// the move's new position.
    Relocate(usize),
}
