/// In-memory storage for weather records.
///
/// Submodules:
/// - `tree` — generic unbalanced binary search tree (canonical date order).
/// - `collection` — `RecordCollection`, pairing the tree with a month index.

pub mod collection;
pub mod tree;

pub use collection::{MonthIndex, RecordCollection};
pub use tree::OrderedTree;
