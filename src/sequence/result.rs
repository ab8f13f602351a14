//! Sequence diff result structures.

use serde::{Deserialize, Serialize};

/// Classified edit script transforming an old sequence into a new one.
///
/// The five lists are disjoint: every old index appears in exactly one of
/// removed / moved (old side) / updated / unchanged, and every new index in
/// exactly one of added / moved (new side) / updated / unchanged. List
/// ordering is part of the contract, so callers can replay edits against
/// live, order-sensitive buffers without re-validating order:
///
/// - `removed` descends by old index, so sequential deletion never
///   invalidates a pending index.
/// - `added` ascends by new index, so sequential insertion is safe.
/// - `updated` and `unchanged` ascend by old index.
/// - `moved` ascends by old index; callers may rely on the order being
///   deterministic but not on this particular choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct SequenceChanges<E, K> {
    /// Elements present only in the new sequence, ascending by `new_index`
    pub added: Vec<Added<E, K>>,
    /// Elements present only in the old sequence, descending by `old_index`
    pub removed: Vec<Removed<E, K>>,
    /// Matched elements whose position changed, ascending by `old_index`
    pub moved: Vec<Moved<E, K>>,
    /// Position-stable matched elements with changed content, ascending by `old_index`
    pub updated: Vec<Updated<E, K>>,
    /// Position-stable matched elements with identical content, ascending by `old_index`
    pub unchanged: Vec<Unchanged<E, K>>,
    /// Added + removed + moved + updated counts; unchanged entries excluded
    pub change_count: usize,
    /// True when the index-aligned identity pre-check skipped full matching
    pub used_fast_path: bool,
}

/// An element that exists only in the new sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Added<E, K> {
    pub key: K,
    pub new_index: usize,
    pub new_value: E,
}

/// An element that exists only in the old sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Removed<E, K> {
    pub key: K,
    pub old_index: usize,
    pub old_value: E,
}

/// A matched element that changed position.
///
/// One record stands for a single element: its old occurrence is the
/// removal side of the move, its new occurrence the insertion side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moved<E, K> {
    pub key: K,
    pub old_index: usize,
    pub old_value: E,
    pub new_index: usize,
    pub new_value: E,
}

/// A position-stable matched element whose content changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Updated<E, K> {
    pub key: K,
    pub old_index: usize,
    pub new_index: usize,
    pub old_value: E,
    pub new_value: E,
}

/// A position-stable matched element whose content is identical.
///
/// Carries both values anyway so callers can migrate attached state and
/// re-index position metadata without consulting the input sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unchanged<E, K> {
    pub key: K,
    pub old_index: usize,
    pub new_index: usize,
    pub old_value: E,
    pub new_value: E,
}

impl<E, K> SequenceChanges<E, K> {
    /// Whether the diff carries no structural or content changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.change_count == 0
    }

    /// Length of the old sequence the diff was computed against.
    #[must_use]
    pub fn old_len(&self) -> usize {
        self.removed.len() + self.moved.len() + self.updated.len() + self.unchanged.len()
    }

    /// Length of the new sequence the diff was computed against.
    #[must_use]
    pub fn new_len(&self) -> usize {
        self.added.len() + self.moved.len() + self.updated.len() + self.unchanged.len()
    }
}
