//! Sectioned diff result structures.

use crate::sequence::{Added, Removed, SequenceChanges};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Classified edit script over a sectioned structure.
///
/// The section-level lists follow the same partition and ordering
/// contract as [`SequenceChanges`]; surviving section pairs additionally
/// carry the item-level script between their two versions. Added and
/// removed sections carry no nested script; their items are implicitly
/// all new or all gone, and are folded into the aggregate key sets
/// instead.
///
/// Type parameters: `S` is the section, `SK` its key, `I` the item, `IK`
/// the item key. [`diff`](super::diff) fills them from the
/// [`DiffableSection`](crate::key::DiffableSection) implementation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize, SK: Serialize, I: Serialize, IK: Serialize + Hash + Eq",
    deserialize = "S: Deserialize<'de>, SK: Deserialize<'de>, I: Deserialize<'de>, \
                   IK: Deserialize<'de> + Hash + Eq"
))]
#[must_use]
pub struct SectionedChanges<S, SK, I, IK> {
    /// Sections present only in the new structure, ascending by `new_index`
    pub added: Vec<Added<S, SK>>,
    /// Sections present only in the old structure, descending by `old_index`
    pub removed: Vec<Removed<S, SK>>,
    /// Matched sections whose position changed, ascending by `old_index`
    pub moved: Vec<MovedSection<S, SK, I, IK>>,
    /// Position-stable sections whose own content changed, ascending by `old_index`
    pub updated: Vec<UpdatedSection<S, SK, I, IK>>,
    /// Position-stable sections with identical content, ascending by `old_index`
    pub unchanged: Vec<UnchangedSection<S, SK, I, IK>>,
    /// Keys of every item that is new relative to the old structure,
    /// whether its section is added, retained or moved. Insertion order
    /// follows the classified lists: added sections first, then nested
    /// scripts in list order.
    pub added_item_keys: IndexSet<IK>,
    /// Keys of every item gone relative to the old structure, symmetric
    /// to `added_item_keys`.
    pub removed_item_keys: IndexSet<IK>,
    /// Added + removed + moved + updated section counts
    pub section_change_count: usize,
    /// Sum of the nested item scripts' change counts
    pub item_change_count: usize,
    /// True when the section-level pass took the aligned fast path
    pub used_fast_path: bool,
}

/// A matched section that changed position, with its item-level script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovedSection<S, SK, I, IK> {
    pub key: SK,
    pub old_index: usize,
    pub old_value: S,
    pub new_index: usize,
    pub new_value: S,
    /// Item-level edit script between the two versions of this section
    pub item_changes: SequenceChanges<I, IK>,
}

/// A position-stable section whose own content changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatedSection<S, SK, I, IK> {
    pub key: SK,
    pub old_index: usize,
    pub new_index: usize,
    pub old_value: S,
    pub new_value: S,
    /// Item-level edit script between the two versions of this section
    pub item_changes: SequenceChanges<I, IK>,
}

/// A position-stable section with identical content.
///
/// Its items may still have changed; the nested script says how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnchangedSection<S, SK, I, IK> {
    pub key: SK,
    pub old_index: usize,
    pub new_index: usize,
    pub old_value: S,
    pub new_value: S,
    /// Item-level edit script between the two versions of this section
    pub item_changes: SequenceChanges<I, IK>,
}

impl<S, SK, I, IK> SectionedChanges<S, SK, I, IK> {
    /// Section-level plus item-level change count.
    #[must_use]
    pub fn total_change_count(&self) -> usize {
        self.section_change_count + self.item_change_count
    }

    /// Whether the diff carries no changes at either level.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_change_count() == 0
    }

    /// Number of sections in the old structure the diff was computed
    /// against.
    #[must_use]
    pub fn old_len(&self) -> usize {
        self.removed.len() + self.moved.len() + self.updated.len() + self.unchanged.len()
    }

    /// Number of sections in the new structure the diff was computed
    /// against.
    #[must_use]
    pub fn new_len(&self) -> usize {
        self.added.len() + self.moved.len() + self.updated.len() + self.unchanged.len()
    }
}

impl<S, SK, I, IK> PartialEq for SectionedChanges<S, SK, I, IK>
where
    S: PartialEq,
    SK: PartialEq,
    I: PartialEq,
    IK: Hash + Eq,
{
    fn eq(&self, other: &Self) -> bool {
        self.added == other.added
            && self.removed == other.removed
            && self.moved == other.moved
            && self.updated == other.updated
            && self.unchanged == other.unchanged
            && self.added_item_keys == other.added_item_keys
            && self.removed_item_keys == other.removed_item_keys
            && self.section_change_count == other.section_change_count
            && self.item_change_count == other.item_change_count
            && self.used_fast_path == other.used_fast_path
    }
}
