//! Stable multi-key sorting of structured records
//!
//! Records are sorted by an ordered list of field names, each with its own
//! ascending or descending direction. Directions are matched to keys by
//! position: missing trailing directions default to ascending and surplus
//! directions are ignored. Records that compare equal on every key keep their
//! input order.
//!
//! ```
//! use record_sort::{sort, SortOrder, SortSpec};
//! use serde_json::json;
//!
//! let records = vec![json!({"a": 2, "b": 1}), json!({"a": 1, "b": 5}), json!({"a": 2, "b": 7})];
//! let spec = SortSpec::by(["a", "b"]).with_directions([SortOrder::Ascending, SortOrder::Descending]);
//!
//! let sorted = sort(&records, &spec).unwrap();
//! assert_eq!(sorted[0]["b"], 5);
//! assert_eq!(sorted[1]["b"], 7);
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

pub mod error;
pub mod config;
pub mod value;
pub mod compare;
pub mod core_sort;
pub mod json_io;

// Re-export commonly used types
pub use compare::{KeyComparator, RecordComparator};
pub use config::{reconcile, MissingPolicy, SortOrder, SortSpec, SortSpecBuilder};
pub use core_sort::Sorter;
pub use error::{SortError, SortResult};
pub use value::{Field, FieldValue, Record};

/// Exit codes for the command-line tool
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const SORT_FAILURE: i32 = 2;

/// Return `records` sorted according to `spec`, leaving the input untouched
pub fn sort<R>(records: &[R], spec: &SortSpec) -> SortResult<Vec<R>>
where
    R: Record + Clone + Sync,
{
    Sorter::new(spec.clone())?.sort(records)
}

/// Like [`sort`], but returns references into `records` instead of clones
pub fn sort_refs<'a, R>(records: &'a [R], spec: &SortSpec) -> SortResult<Vec<&'a R>>
where
    R: Record + Sync,
{
    Sorter::new(spec.clone())?.sort_refs(records)
}

/// The stable permutation of indices that sorts `records`
pub fn sort_indices<R>(records: &[R], spec: &SortSpec) -> SortResult<Vec<usize>>
where
    R: Record + Sync,
{
    Sorter::new(spec.clone())?.sort_indices(records)
}

/// Index of the first out-of-order record, or `None` if `records` is sorted
pub fn check_sorted<R: Record>(records: &[R], spec: &SortSpec) -> SortResult<Option<usize>> {
    Sorter::new(spec.clone())?.check_sorted(records)
}
