//! Hierarchical diffing for sections of items.
//!
//! A sectioned structure is an ordered list of sections, each carrying an
//! ordered list of items, the shape of a grouped list or a table with
//! headers. [`diff`] runs the sequence engine twice: once over the
//! sections themselves, then over the items of every section pair that
//! survives, and aggregates the item keys that entered or left the
//! structure at any level.
//!
//! ```
//! use keyed_diff::{sectioned, Diffable, DiffableSection, Keyed};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Row {
//!     id: u32,
//! }
//!
//! impl Keyed for Row {
//!     type Key = u32;
//!     fn key(&self) -> u32 {
//!         self.id
//!     }
//! }
//!
//! impl Diffable for Row {}
//!
//! #[derive(Debug, Clone)]
//! struct Group {
//!     name: &'static str,
//!     rows: Vec<Row>,
//! }
//!
//! impl Keyed for Group {
//!     type Key = &'static str;
//!     fn key(&self) -> &'static str {
//!         self.name
//!     }
//! }
//!
//! impl DiffableSection for Group {
//!     type Item = Row;
//!     fn items(&self) -> &[Row] {
//!         &self.rows
//!     }
//! }
//!
//! let old = vec![Group { name: "a", rows: vec![Row { id: 1 }] }];
//! let new = vec![
//!     Group { name: "a", rows: vec![Row { id: 1 }, Row { id: 2 }] },
//!     Group { name: "b", rows: vec![Row { id: 3 }] },
//! ];
//!
//! let changes = sectioned::diff(&old, &new);
//! assert_eq!(changes.added.len(), 1);
//! assert_eq!(changes.section_change_count, 1);
//! assert_eq!(changes.item_change_count, 1);
//! assert!(changes.added_item_keys.contains(&2));
//! assert!(changes.added_item_keys.contains(&3));
//! ```

mod engine;
mod result;
mod transform;

pub use engine::diff;
pub use result::{MovedSection, SectionedChanges, UnchangedSection, UpdatedSection};
