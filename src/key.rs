//! Identity traits and duplicate-aware index bookkeeping.
//!
//! Identity, not equality, defines "the same logical element" across two
//! versions of a sequence: two elements with equal keys are treated as one
//! element whose content may have changed. Duplicate keys within a single
//! sequence are legal; occurrences are paired oldest-first (FIFO per key).

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// A value with a stable identity key.
///
/// The key must be stable across versions of the element: renaming an
/// element's key makes it a different element (one removal plus one
/// addition) rather than an update.
pub trait Keyed {
    /// Identity type. Equality and hashing on this type define sameness.
    type Key: Hash + Eq + Clone;

    /// Extract the identity key.
    fn key(&self) -> Self::Key;
}

/// An element that can be diffed by [`sequence::diff`](crate::sequence::diff).
///
/// The provided defaults make any `Keyed + Clone + PartialEq` type diffable
/// for free: content comparison falls back to `!=`, and no moves are forced.
/// Override [`content_changed`](Diffable::content_changed) when only part of
/// the element counts as content, and [`move_hint`](Diffable::move_hint)
/// when external knowledge (such as a changed parent) should force a pair
/// to be reported as moved.
///
/// Types that cannot implement `PartialEq` can use
/// [`sequence::diff_with`](crate::sequence::diff_with) instead, which takes
/// the comparison as a closure.
pub trait Diffable: Keyed + Clone + PartialEq {
    /// Whether content differs between the old (`self`) and new versions
    /// of the same keyed element. Drives the Updated vs Unchanged split.
    fn content_changed(&self, new: &Self) -> bool {
        self != new
    }

    /// Force a matched pair to be classified as moved even when position
    /// analysis alone would keep it stable.
    fn move_hint(&self, _new: &Self) -> bool {
        false
    }
}

/// A section owning an ordered run of diffable items, for
/// [`sectioned::diff`](crate::sectioned::diff).
///
/// Sections default to never reporting content changes of their own: most
/// callers treat a section as a structural grouping whose interesting
/// content lives in its items. Override
/// [`content_changed`](DiffableSection::content_changed) for sections
/// carrying their own data (headers, footers) that should surface as an
/// updated section.
pub trait DiffableSection: Keyed + Clone {
    /// Item type owned by the section.
    type Item: Diffable;

    /// The section's items, in order.
    fn items(&self) -> &[Self::Item];

    /// Whether the section's own content (not its items) differs.
    fn content_changed(&self, _new: &Self) -> bool {
        false
    }

    /// Force the section pair to be classified as moved.
    fn move_hint(&self, _new: &Self) -> bool {
        false
    }
}

/// FIFO queues of sequence indices, one queue per identity key.
///
/// Matching walks the new sequence and pops the oldest unconsumed old
/// index with the same key, which is what makes duplicate keys behave
/// deterministically (first available, left to right).
pub(crate) struct KeyQueues<K> {
    queues: HashMap<K, VecDeque<usize>>,
}

impl<K: Hash + Eq> KeyQueues<K> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            queues: HashMap::with_capacity(capacity),
        }
    }

    /// Append an index to the queue for `key`. Indices must be pushed in
    /// ascending order for the FIFO contract to mean oldest-first.
    pub(crate) fn push(&mut self, key: K, index: usize) {
        self.queues.entry(key).or_default().push_back(index);
    }

    /// Pop the oldest unconsumed index for `key`, if any remains.
    pub(crate) fn pop(&mut self, key: &K) -> Option<usize> {
        self.queues.get_mut(key).and_then(VecDeque::pop_front)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queues_pop_oldest_first() {
        let mut queues = KeyQueues::with_capacity(4);
        queues.push("a", 0);
        queues.push("b", 1);
        queues.push("a", 2);
        queues.push("a", 5);

        assert_eq!(queues.pop(&"a"), Some(0));
        assert_eq!(queues.pop(&"a"), Some(2));
        assert_eq!(queues.pop(&"b"), Some(1));
        assert_eq!(queues.pop(&"a"), Some(5));
        assert_eq!(queues.pop(&"a"), None);
        assert_eq!(queues.pop(&"b"), None);
    }

    #[test]
    fn test_queues_missing_key() {
        let mut queues: KeyQueues<&str> = KeyQueues::with_capacity(0);
        assert_eq!(queues.pop(&"never-pushed"), None);
    }

    #[test]
    fn test_diffable_defaults() {
        #[derive(Clone, PartialEq)]
        struct Row {
            id: u32,
            text: String,
        }

        impl Keyed for Row {
            type Key = u32;
            fn key(&self) -> u32 {
                self.id
            }
        }

        impl Diffable for Row {}

        let old = Row {
            id: 1,
            text: "hello".into(),
        };
        let same = old.clone();
        let edited = Row {
            id: 1,
            text: "goodbye".into(),
        };

        assert!(!old.content_changed(&same));
        assert!(old.content_changed(&edited));
        assert!(!old.move_hint(&edited));
    }
}
