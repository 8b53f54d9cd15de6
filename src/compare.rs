//! Multi-key record comparator
//!
//! A [`RecordComparator`] is built once per sort call. Direction
//! reconciliation and missing-field placement are resolved at construction so
//! the per-pair comparison only walks the key list.

use crate::config::{MissingPolicy, SortOrder, SortSpec};
use crate::value::{FieldValue, Record};
use std::cmp::Ordering;

/// Comparison of a single key with its effective direction
#[derive(Debug, Clone)]
pub struct KeyComparator {
    key: String,
    order: SortOrder,
    missing: MissingPolicy,
}

impl KeyComparator {
    pub fn new(key: impl Into<String>, order: SortOrder, missing: MissingPolicy) -> Self {
        Self {
            key: key.into(),
            order,
            missing,
        }
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Compare the field this key selects on two records
    #[inline]
    pub fn compare<R: Record + ?Sized>(&self, a: &R, b: &R) -> Ordering {
        self.compare_values(a.field(&self.key), b.field(&self.key))
    }

    /// Compare two (possibly absent) field values under this key's direction
    pub fn compare_values(&self, a: Option<FieldValue<'_>>, b: Option<FieldValue<'_>>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => self.order.apply(a.natural_cmp(&b)),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => self.missing_first(),
            (Some(_), None) => self.missing_first().reverse(),
        }
    }

    /// Ordering of a missing value relative to a present one
    fn missing_first(&self) -> Ordering {
        match self.missing {
            // Error is enforced before sorting; behave like Lowest if reached
            MissingPolicy::Lowest | MissingPolicy::Error => self.order.apply(Ordering::Less),
            MissingPolicy::First => Ordering::Less,
            MissingPolicy::Last => Ordering::Greater,
        }
    }
}

/// Composite comparator over all keys of a specification
#[derive(Debug, Clone)]
pub struct RecordComparator {
    keys: Vec<KeyComparator>,
}

impl RecordComparator {
    /// Build from a specification; directions are reconciled here
    pub fn from_spec(spec: &SortSpec) -> Self {
        let keys = spec
            .keys
            .iter()
            .zip(spec.effective_directions())
            .map(|(key, order)| KeyComparator::new(key.as_str(), order, spec.missing))
            .collect();
        Self { keys }
    }

    pub fn keys(&self) -> &[KeyComparator] {
        &self.keys
    }

    /// Compare two records key by key; the first unequal key decides
    #[inline]
    pub fn compare<R: Record + ?Sized>(&self, a: &R, b: &R) -> Ordering {
        for key in &self.keys {
            match key.compare(a, b) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(keys: &[&str], directions: &[SortOrder]) -> SortSpec {
        SortSpec::by(keys.iter().copied()).with_directions(directions.iter().copied())
    }

    #[test]
    fn test_first_unequal_key_decides() {
        let cmp = RecordComparator::from_spec(&spec(&["a", "b"], &[]));
        let x = json!({"a": 1, "b": 9});
        let y = json!({"a": 2, "b": 0});
        assert_eq!(cmp.compare(&x, &y), Ordering::Less);

        let z = json!({"a": 1, "b": 10});
        assert_eq!(cmp.compare(&x, &z), Ordering::Less);
        assert_eq!(cmp.compare(&x, &x), Ordering::Equal);
    }

    #[test]
    fn test_descending_reverses_only_its_key() {
        let cmp = RecordComparator::from_spec(&spec(
            &["a", "b"],
            &[SortOrder::Ascending, SortOrder::Descending],
        ));
        let x = json!({"a": 1, "b": 1});
        let y = json!({"a": 1, "b": 2});
        let z = json!({"a": 0, "b": 0});
        assert_eq!(cmp.compare(&x, &y), Ordering::Greater);
        assert_eq!(cmp.compare(&z, &x), Ordering::Less);
    }

    #[test]
    fn test_reconciled_key_count() {
        let cmp = RecordComparator::from_spec(&spec(
            &["a"],
            &[SortOrder::Descending, SortOrder::Ascending, SortOrder::Ascending],
        ));
        assert_eq!(cmp.keys().len(), 1);
        assert_eq!(cmp.keys()[0].order(), SortOrder::Descending);

        let cmp = RecordComparator::from_spec(&spec(&["a", "b", "c"], &[]));
        assert!(cmp
            .keys()
            .iter()
            .all(|key| key.order() == SortOrder::Ascending));
    }

    #[test]
    fn test_missing_policies() {
        let present = Some(FieldValue::Int(0));

        let lowest_asc = KeyComparator::new("k", SortOrder::Ascending, MissingPolicy::Lowest);
        let lowest_desc = KeyComparator::new("k", SortOrder::Descending, MissingPolicy::Lowest);
        assert_eq!(lowest_asc.compare_values(None, present), Ordering::Less);
        assert_eq!(lowest_desc.compare_values(None, present), Ordering::Greater);

        let first = KeyComparator::new("k", SortOrder::Descending, MissingPolicy::First);
        assert_eq!(first.compare_values(None, present), Ordering::Less);
        assert_eq!(first.compare_values(present, None), Ordering::Greater);

        let last = KeyComparator::new("k", SortOrder::Ascending, MissingPolicy::Last);
        assert_eq!(last.compare_values(None, present), Ordering::Greater);
        assert_eq!(last.compare_values(None, None), Ordering::Equal);
    }
}
