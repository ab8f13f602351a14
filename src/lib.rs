//! **Keyed diffing and reconciliation for ordered collections.**
//!
//! `keyed-diff` computes classified edit scripts between two snapshots of an
//! ordered collection whose elements carry stable identities. Where a textual
//! diff reports positional edits, the result here says what happened to each
//! element: it was added, removed, moved, updated in place, or left alone.
//! That is the contract a reconciliation layer needs whenever per-element
//! state has to survive a data refresh, whether the elements back a list UI,
//! a cache, or any other structure keyed by identity.
//!
//! ## Key Features
//!
//! - **Identity-first matching**: elements pair up by key, never by equality,
//!   so a reordered element is a move and an edited element is an update
//!   rather than a remove/add pair. Duplicate keys are supported with
//!   deterministic oldest-first pairing.
//! - **Minimal moves**: move detection keeps a longest increasing subsequence
//!   of the matched pairs in place, so only elements genuinely out of order
//!   are reported as moved.
//! - **Aligned fast path**: when both snapshots carry the same keys in the
//!   same order, matching and move detection are skipped entirely in favor of
//!   a linear content scan.
//! - **Replayable scripts**: every result can be applied back to the old
//!   snapshot, either to reproduce the new one or to migrate a parallel array
//!   of caller-owned state in lock-step with the data.
//! - **Two levels**: [`sequence`] diffs a flat collection; [`sectioned`]
//!   composes it over sections of items and aggregates which item keys
//!   entered or left the structure across all sections.
//!
//! ## Core Concepts & Modules
//!
//! - **[`key`]**: the [`Keyed`], [`Diffable`] and [`DiffableSection`] traits
//!   describing how element types expose identity, detect content change, and
//!   optionally force move treatment.
//! - **[`sequence`]**: the flat engine. [`sequence::diff`] works on types
//!   implementing [`Diffable`]; [`sequence::diff_with`] takes closures so ad
//!   hoc types can be diffed without trait impls. Results land in
//!   [`SequenceChanges`].
//! - **[`sectioned`]**: the hierarchical engine for sections of items,
//!   producing [`SectionedChanges`] with a nested item script per surviving
//!   section.
//! - **[`error`]**: error types for the replay verification surface.
//!
//! ## Getting Started: Diffing a Sequence
//!
//! ```
//! use keyed_diff::{sequence, Diffable, Keyed};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Task {
//!     id: u64,
//!     title: String,
//! }
//!
//! impl Keyed for Task {
//!     type Key = u64;
//!     fn key(&self) -> u64 {
//!         self.id
//!     }
//! }
//!
//! impl Diffable for Task {}
//!
//! let old = vec![
//!     Task { id: 1, title: "write".into() },
//!     Task { id: 2, title: "review".into() },
//!     Task { id: 3, title: "ship".into() },
//! ];
//! let new = vec![
//!     Task { id: 3, title: "ship".into() },
//!     Task { id: 1, title: "write tests".into() },
//! ];
//!
//! let changes = sequence::diff(&old, &new);
//!
//! assert_eq!(changes.moved.len(), 1); // task 3 jumped to the front
//! assert_eq!(changes.updated.len(), 1); // task 1 changed its title
//! assert_eq!(changes.removed.len(), 1); // task 2 is gone
//! assert_eq!(changes.change_count, 3);
//!
//! // The script reproduces the new snapshot from the old one.
//! changes.verify_replay(&old, &new)?;
//! # Ok::<(), keyed_diff::KeyedDiffError>(())
//! ```
//!
//! ## Examples
//!
//! ### Migrating Derived State
//!
//! [`SequenceChanges::transform`] moves a parallel array of caller-owned
//! state into new-snapshot order, preserving the entry of every surviving
//! element and handing removed entries back for disposal.
//!
//! ```
//! use keyed_diff::sequence;
//!
//! let old = vec!["a", "b", "c"];
//! let new = vec!["c", "a"];
//!
//! let changes = sequence::diff_with(
//!     &old,
//!     &new,
//!     |element| element.to_string(),
//!     |old, new| old != new,
//!     |_, _| false,
//! );
//!
//! let mut dropped = Vec::new();
//! let views = changes.transform(
//!     vec!["view-a".to_string(), "view-b".to_string(), "view-c".to_string()],
//!     |_, view| dropped.push(view),
//!     |element| format!("view-{element}"),
//!     |_, _, _| {},
//!     |_, _, _| {},
//!     |_, _, _| {},
//! );
//!
//! assert_eq!(views, vec!["view-c", "view-a"]);
//! assert_eq!(dropped, vec!["view-b"]);
//! ```
//!
//! ### Diffing Sections of Items
//!
//! See the [`sectioned`] module documentation for a grouped-list example
//! covering nested item scripts and the aggregate key sets.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Variable names like `old`/`new` are the vocabulary of a diff engine
    clippy::similar_names,
    // # Errors / # Panics coverage is selective; the replay surface documents
    // its failure modes where they matter
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod error;
pub mod key;
mod lis;
pub mod sectioned;
pub mod sequence;

// Re-export main types for convenience
pub use error::{KeyedDiffError, ReplayErrorKind, Result, StaleInputKind};
pub use key::{Diffable, DiffableSection, Keyed};
pub use sectioned::{MovedSection, SectionedChanges, UnchangedSection, UpdatedSection};
pub use sequence::{Added, Moved, Removed, SequenceChanges, Unchanged, Updated};
