use crate::compare::RecordComparator;
use crate::config::{MissingPolicy, SortSpec};
use crate::error::{SortError, SortResult};
use crate::value::Record;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Inputs at least this large are sorted on the rayon pool
const PARALLEL_THRESHOLD: usize = 8192;

/// Stable multi-key sorter
///
/// Holds a validated specification and the comparator built from it. One
/// `Sorter` can be reused for any number of inputs and shared between threads.
#[derive(Debug, Clone)]
pub struct Sorter {
    spec: SortSpec,
    comparator: RecordComparator,
}

impl Sorter {
    /// Validate `spec` and build its comparator
    pub fn new(spec: SortSpec) -> SortResult<Self> {
        spec.validate()?;

        let key_count = spec.keys.len();
        let direction_count = spec.directions.len();
        if direction_count < key_count {
            trace!(
                key_count,
                direction_count,
                "padding missing directions with ascending"
            );
        } else if direction_count > key_count {
            trace!(
                key_count,
                direction_count,
                "ignoring directions beyond the last key"
            );
        }

        let comparator = RecordComparator::from_spec(&spec);
        Ok(Self { spec, comparator })
    }

    pub fn spec(&self) -> &SortSpec {
        &self.spec
    }

    /// Compare two records under this sorter's ordering
    #[inline]
    pub fn compare<R: Record + ?Sized>(&self, a: &R, b: &R) -> Ordering {
        self.comparator.compare(a, b)
    }

    /// Return a sorted copy of `records`
    pub fn sort<R>(&self, records: &[R]) -> SortResult<Vec<R>>
    where
        R: Record + Clone + Sync,
    {
        let order = self.sort_indices(records)?;
        Ok(order.into_iter().map(|i| records[i].clone()).collect())
    }

    /// Return references to `records` in sorted order
    pub fn sort_refs<'a, R>(&self, records: &'a [R]) -> SortResult<Vec<&'a R>>
    where
        R: Record + Sync,
    {
        let order = self.sort_indices(records)?;
        Ok(order.into_iter().map(|i| &records[i]).collect())
    }

    /// Return the stable permutation that sorts `records`
    pub fn sort_indices<R>(&self, records: &[R]) -> SortResult<Vec<usize>>
    where
        R: Record + Sync,
    {
        self.ensure_fields_present(records)?;

        debug!(
            records = records.len(),
            keys = self.spec.keys.len(),
            "sorting records"
        );

        let mut order: Vec<usize> = (0..records.len()).collect();
        let compare = |a: &usize, b: &usize| self.comparator.compare(&records[*a], &records[*b]);

        // Both sort_by and par_sort_by are stable merge sorts
        if order.len() >= PARALLEL_THRESHOLD && num_cpus::get() > 1 {
            use rayon::prelude::*;
            order.par_sort_by(compare);
        } else {
            order.sort_by(compare);
        }

        Ok(order)
    }

    /// Index of the first record that sorts before its predecessor
    ///
    /// `None` means the sequence is already in order.
    pub fn check_sorted<R: Record>(&self, records: &[R]) -> SortResult<Option<usize>> {
        self.ensure_fields_present(records)?;

        let first_unsorted = records
            .windows(2)
            .position(|pair| self.comparator.compare(&pair[0], &pair[1]) == Ordering::Greater)
            .map(|position| position + 1);

        if let Some(index) = first_unsorted {
            debug!(index, "input is not sorted");
        }
        Ok(first_unsorted)
    }

    /// Enforce `MissingPolicy::Error` before any comparison work
    fn ensure_fields_present<R: Record>(&self, records: &[R]) -> SortResult<()> {
        if self.spec.missing != MissingPolicy::Error {
            return Ok(());
        }

        for (index, record) in records.iter().enumerate() {
            if let Some(key) = self.spec.keys.iter().find(|key| record.field(key).is_none()) {
                return Err(SortError::missing_field(key, index));
            }
        }
        Ok(())
    }
}
