//! Sequence diff engine.
//!
//! Diffs two ordered sequences of keyed elements into a classified edit
//! script: additions, removals, moves, content updates and unchanged
//! entries, each carrying enough information to apply the edit without
//! re-consulting the input sequences.
//!
//! Matching is identity-first: elements pair by key (oldest occurrence
//! first when keys repeat), then a longest strictly-increasing
//! subsequence over the matched old indices determines which pairs kept
//! their relative order. Everything outside that subsequence moved. An
//! index-aligned fast path skips matching entirely for the common case of
//! a sequence re-rendered with only content edits.
//!
//! # Example
//!
//! ```
//! use keyed_diff::sequence;
//!
//! let old = vec!["a", "b", "c"];
//! let new = vec!["b", "c", "a"];
//!
//! let changes = sequence::diff_with(
//!     &old,
//!     &new,
//!     |e| e.to_string(),
//!     |old, new| old != new,
//!     |_, _| false,
//! );
//!
//! assert_eq!(changes.moved.len(), 1);
//! assert_eq!(changes.change_count, 1);
//! changes.verify_replay(&old, &new).unwrap();
//! ```

mod engine;
mod result;
mod transform;

pub use engine::{diff, diff_with};
pub use result::{Added, Moved, Removed, SequenceChanges, Unchanged, Updated};
