//! Sort specification: keys, directions and the missing-field policy

use crate::error::{SortError, SortResult};
use itertools::Itertools;
use serde::Deserialize;
use std::str::FromStr;

/// Sort order enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Apply this direction to a natural-order comparison result
    #[inline]
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(SortError::invalid_spec(&format!("unknown sort direction: {s}"))),
        }
    }
}

impl TryFrom<String> for SortOrder {
    type Error = SortError;

    fn try_from(value: String) -> Result<Self, SortError> {
        value.parse()
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        };
        write!(f, "{name}")
    }
}

/// Placement of records that lack a sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum MissingPolicy {
    /// Missing is smaller than any present value: first ascending, last descending
    #[default]
    Lowest,
    /// Missing always sorts first, whatever the direction
    First,
    /// Missing always sorts last, whatever the direction
    Last,
    /// Fail with `MissingField` before sorting
    Error,
}

impl FromStr for MissingPolicy {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lowest" | "low" | "default" => Ok(MissingPolicy::Lowest),
            "first" => Ok(MissingPolicy::First),
            "last" => Ok(MissingPolicy::Last),
            "error" | "fail" => Ok(MissingPolicy::Error),
            _ => Err(SortError::invalid_spec(&format!(
                "unknown missing-field policy: {s}"
            ))),
        }
    }
}

impl TryFrom<String> for MissingPolicy {
    type Error = SortError;

    fn try_from(value: String) -> Result<Self, SortError> {
        value.parse()
    }
}

impl std::fmt::Display for MissingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MissingPolicy::Lowest => "lowest",
            MissingPolicy::First => "first",
            MissingPolicy::Last => "last",
            MissingPolicy::Error => "error",
        };
        write!(f, "{name}")
    }
}

/// Sort specification: ordered keys with positional directions
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SortSpec {
    /// Field names in precedence order; the first key is primary
    #[serde(alias = "by")]
    pub keys: Vec<String>,
    /// Per-key directions; reconciled against `keys` before use
    #[serde(alias = "order")]
    pub directions: Vec<SortOrder>,
    /// How records without a key are placed
    pub missing: MissingPolicy,
}

impl SortSpec {
    /// Create an empty specification
    pub fn new() -> Self {
        Self::default()
    }

    /// Specification sorting ascending on the given keys
    pub fn by<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the directions
    pub fn with_directions<I>(mut self, directions: I) -> Self
    where
        I: IntoIterator<Item = SortOrder>,
    {
        self.directions = directions.into_iter().collect();
        self
    }

    /// Set the missing-field policy
    pub fn with_missing(mut self, missing: MissingPolicy) -> Self {
        self.missing = missing;
        self
    }

    /// Validate the specification before any sorting work
    pub fn validate(&self) -> SortResult<()> {
        if self.keys.is_empty() {
            return Err(SortError::invalid_spec("at least one sort key is required"));
        }

        Ok(())
    }

    /// Directions with exactly one entry per key
    pub fn effective_directions(&self) -> Vec<SortOrder> {
        reconcile(self.keys.len(), &self.directions)
    }
}

/// Pad or truncate `directions` to exactly `key_count` entries
///
/// Missing trailing entries default to ascending; entries past the last key
/// are dropped.
pub fn reconcile(key_count: usize, directions: &[SortOrder]) -> Vec<SortOrder> {
    directions
        .iter()
        .copied()
        .pad_using(key_count, |_| SortOrder::Ascending)
        .take(key_count)
        .collect()
}

/// Builder pattern for creating specifications
#[derive(Debug, Default)]
pub struct SortSpecBuilder {
    spec: SortSpec,
}

impl SortSpecBuilder {
    /// Start building a new specification
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing specification, e.g. one loaded from a file
    pub fn from_spec(spec: SortSpec) -> Self {
        Self { spec }
    }

    /// Append a key with the default direction
    pub fn key(mut self, key: &str) -> Self {
        self.spec.keys.push(key.to_string());
        self
    }

    /// Append an ascending key, keeping directions positional
    pub fn asc(self, key: &str) -> Self {
        self.key_with(key, SortOrder::Ascending)
    }

    /// Append a descending key, keeping directions positional
    pub fn desc(self, key: &str) -> Self {
        self.key_with(key, SortOrder::Descending)
    }

    fn key_with(mut self, key: &str, order: SortOrder) -> Self {
        // Fill directions of earlier keys so the new one lands at its position
        let position = self.spec.keys.len();
        self.spec.directions = reconcile(position, &self.spec.directions);
        self.spec.directions.push(order);
        self.spec.keys.push(key.to_string());
        self
    }

    /// Replace the keys
    pub fn keys(mut self, keys: Vec<String>) -> Self {
        self.spec.keys = keys;
        self
    }

    /// Replace the directions
    pub fn directions(mut self, directions: Vec<SortOrder>) -> Self {
        self.spec.directions = directions;
        self
    }

    /// Set the missing-field policy
    pub fn missing(mut self, missing: MissingPolicy) -> Self {
        self.spec.missing = missing;
        self
    }

    /// Build the final specification
    pub fn build(self) -> SortResult<SortSpec> {
        self.spec.validate()?;
        Ok(self.spec)
    }
}

/// Parse a comma-separated list of direction tokens
pub fn parse_directions(list: &str) -> SortResult<Vec<SortOrder>> {
    list.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use SortOrder::{Ascending as Asc, Descending as Desc};

    #[test]
    fn test_reconcile_pads_with_ascending() {
        assert_eq!(reconcile(3, &[Asc, Desc]), vec![Asc, Desc, Asc]);
        assert_eq!(reconcile(1, &[]), vec![Asc]);
        assert_eq!(reconcile(2, &[Desc]), vec![Desc, Asc]);
    }

    #[test]
    fn test_reconcile_truncates_extras() {
        assert_eq!(reconcile(3, &[Asc, Desc, Asc, Desc, Desc]), vec![Asc, Desc, Asc]);
        assert_eq!(reconcile(0, &[Desc]), Vec::<SortOrder>::new());
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!("asc".parse::<SortOrder>().expect("Failed to parse asc"), Asc);
        assert_eq!(
            "Descending".parse::<SortOrder>().expect("Failed to parse descending"),
            Desc
        );
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_validate_requires_keys() {
        let err = SortSpec::new().validate().expect_err("empty keys must fail");
        assert!(matches!(err, SortError::InvalidSpecification { .. }));

        assert!(SortSpec::by([""]).validate().is_ok());
        assert!(SortSpec::by(["a", "a"]).validate().is_ok());
    }

    #[test]
    fn test_blank_field_names_are_valid_keys() {
        let records = vec![
            serde_json::json!({"": 2, " ": 9}),
            serde_json::json!({"": 1, " ": 0}),
        ];

        let by_empty = crate::sort(&records, &SortSpec::by([""])).expect("sort failed");
        assert_eq!(by_empty[0][""], 1);

        let by_space = crate::sort(&records, &SortSpec::by([" "]).with_directions([Desc]))
            .expect("sort failed");
        assert_eq!(by_space[0][" "], 9);
    }

    #[test]
    fn test_builder_keeps_directions_positional() {
        let spec = SortSpecBuilder::new()
            .key("a")
            .desc("b")
            .key("c")
            .build()
            .expect("Failed to build test spec");

        assert_eq!(spec.keys, vec!["a", "b", "c"]);
        assert_eq!(spec.effective_directions(), vec![Asc, Desc, Asc]);
    }

    #[test]
    fn test_builder_rejects_empty() {
        assert!(SortSpecBuilder::new().build().is_err());
    }

    #[test]
    fn test_deserialize_with_aliases() {
        let spec: SortSpec = serde_json::from_str(
            r#"{"by": ["a", "b"], "order": ["asc", "desc"], "missing": "last"}"#,
        )
        .expect("Failed to parse test spec");

        assert_eq!(spec.keys, vec!["a", "b"]);
        assert_eq!(spec.directions, vec![Asc, Desc]);
        assert_eq!(spec.missing, MissingPolicy::Last);

        let spec: SortSpec =
            serde_json::from_str(r#"{"keys": ["x"]}"#).expect("Failed to parse test spec");
        assert!(spec.directions.is_empty());
        assert_eq!(spec.missing, MissingPolicy::Lowest);

        assert!(serde_json::from_str::<SortSpec>(r#"{"by": ["a"], "order": ["up"]}"#).is_err());
    }

    #[test]
    fn test_parse_directions_list() {
        assert_eq!(
            parse_directions("asc, desc,,asc").expect("Failed to parse directions"),
            vec![Asc, Desc, Asc]
        );
        assert!(parse_directions("asc,nope").is_err());
    }
}
