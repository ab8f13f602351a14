//! Applying an edit script: mapped-state transform, replay, verification.

use super::result::SequenceChanges;
use crate::error::{KeyedDiffError, ReplayErrorKind, Result};

impl<E, K> SequenceChanges<E, K> {
    /// Apply the edit script to a parallel array of caller-owned state.
    ///
    /// `old` holds one mapped entry per old-sequence element, in order.
    /// Removed entries are handed to `removed` for disposal; `added`
    /// builds a fresh entry per added element; `moved`, `updated` and
    /// `unchanged` receive the surviving entry seeded with its old state
    /// so the caller can migrate it in place instead of rebuilding it.
    /// Returns the mapped array in new-sequence order.
    ///
    /// This is the state-migration primitive: a presentation layer keeps
    /// a parallel array of per-element state and moves it in lock-step
    /// with the data, preserving identity for surviving elements.
    ///
    /// # Panics
    ///
    /// Panics if `old.len()` differs from [`old_len`](Self::old_len),
    /// which means the diff is stale with respect to the input.
    pub fn transform<M>(
        &self,
        old: Vec<M>,
        mut removed: impl FnMut(&E, M),
        mut added: impl FnMut(&E) -> M,
        mut moved: impl FnMut(&E, &E, &mut M),
        mut updated: impl FnMut(&E, &E, &mut M),
        mut unchanged: impl FnMut(&E, &E, &mut M),
    ) -> Vec<M> {
        assert!(
            old.len() == self.old_len(),
            "stale diff input: {} mapped entries for a diff computed over {} old elements",
            old.len(),
            self.old_len()
        );

        let mut result = old;

        // Removals first, descending by old index, so each removal leaves
        // the remaining indices valid. The old side of every move is
        // lifted out here and re-enters as an insertion below.
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

        // Insertions next, ascending by final position: added elements get
        // fresh state, moved elements re-enter with migrated state.
        let mut insertions: Vec<(usize, M)> =
            Vec::with_capacity(self.added.len() + self.moved.len());

        for record in &self.added {
            insertions.push((record.new_index, added(&record.new_value)));
        }

        for (i, record) in self.moved.iter().enumerate() {
            let mut mapped = relocated[i]
                .take()
                .expect("every moved old index is removed exactly once");
            moved(&record.old_value, &record.new_value, &mut mapped);
            insertions.push((record.new_index, mapped));
        }

        insertions.sort_by_key(|entry| entry.0);

        for (new_index, mapped) in insertions {
            result.insert(new_index, mapped);
        }

        // Index surgery is complete; notify the position-stable entries.
        for record in &self.updated {
            updated(
                &record.old_value,
                &record.new_value,
                &mut result[record.new_index],
            );
        }

        for record in &self.unchanged {
            unchanged(
                &record.old_value,
                &record.new_value,
                &mut result[record.new_index],
            );
        }

        result
    }

    /// Reproduce the new sequence from the old one.
    ///
    /// Self-specialization of [`transform`](Self::transform): added slots
    /// take the added value, surviving slots are overwritten with the new
    /// value.
    ///
    /// # Panics
    ///
    /// Panics if `old.len()` differs from [`old_len`](Self::old_len).
    pub fn replay(&self, old: &[E]) -> Vec<E>
    where
        E: Clone,
    {
        self.transform(
            old.to_vec(),
            |_, _| {},
            |new_value| new_value.clone(),
            |_, new_value, slot| *slot = new_value.clone(),
            |_, new_value, slot| *slot = new_value.clone(),
            |_, new_value, slot| *slot = new_value.clone(),
        )
    }

    /// Check that replaying the script against `old` reproduces `new`
    /// exactly, order included.
    ///
    /// A failure means the diff is stale relative to the inputs or, if
    /// the inputs are the very ones the diff was computed from, an engine
    /// defect. This is the primary internal correctness check.
    pub fn verify_replay(&self, old: &[E], new: &[E]) -> Result<()>
    where
        E: Clone + PartialEq,
    {
        if old.len() != self.old_len() {
            return Err(KeyedDiffError::stale_length(
                "sequence replay",
                self.old_len(),
                old.len(),
            ));
        }

        let replayed = self.replay(old);
        if replayed.len() != new.len() {
            return Err(KeyedDiffError::replay(
                "sequence replay",
                ReplayErrorKind::LengthMismatch {
                    expected: new.len(),
                    actual: replayed.len(),
                },
            ));
        }

        for (index, (got, want)) in replayed.iter().zip(new).enumerate() {
            if got != want {
                return Err(KeyedDiffError::replay(
                    "sequence replay",
                    ReplayErrorKind::ElementMismatch { index },
                ));
            }
        }

        Ok(())
    }
}

enum RemovalKind {
    /// Removal record at this index in the removed list; state is dropped.
    Discard(usize),
    /// Moved record at this index in the moved list; state re-enters at
    /// the move's new position.
    Relocate(usize),
}
