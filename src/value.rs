//! Comparable views of record fields
//!
//! Records are accessed by field name only. Each field is viewed as a
//! [`FieldValue`], which carries the natural ordering used by the sort
//! comparator. Values of different kinds are ordered by a fixed type rank
//! (`Null < Bool < Number < String < Composite`) so that every pair of values
//! is comparable and the resulting order is total.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Borrowed view of a single field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Null,
    Bool(bool),
    Int(i128),
    Float(f64),
    Str(&'a str),
    /// Arrays and nested objects; ordered after every scalar, equal to each other
    Composite,
}

impl<'a> FieldValue<'a> {
    /// Rank used when two values are of different kinds
    fn type_rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Bool(_) => 1,
            FieldValue::Int(_) | FieldValue::Float(_) => 2,
            FieldValue::Str(_) => 3,
            FieldValue::Composite => 4,
        }
    }

    /// Natural ordering of two field values
    pub fn natural_cmp(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => compare_floats(*a, *b),
            (FieldValue::Int(a), FieldValue::Float(b)) => compare_int_float(*a, *b),
            (FieldValue::Float(a), FieldValue::Int(b)) => compare_int_float(*b, *a).reverse(),
            (FieldValue::Str(a), FieldValue::Str(b)) => a.cmp(b),
            (FieldValue::Composite, FieldValue::Composite) => Ordering::Equal,
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

/// Float comparison where NaN sorts after every number and equals itself
#[inline]
fn compare_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Exact comparison of an integer against a float
fn compare_int_float(a: i128, b: f64) -> Ordering {
    if b.is_nan() {
        return Ordering::Less;
    }
    // 2^127 is exactly representable; any float at or beyond it exceeds every i128
    const LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;
    if b >= LIMIT {
        return Ordering::Less;
    }
    if b < -LIMIT {
        return Ordering::Greater;
    }

    let whole = b.trunc();
    match a.cmp(&(whole as i128)) {
        Ordering::Equal => {
            let fraction = b - whole;
            if fraction > 0.0 {
                Ordering::Less
            } else if fraction < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        other => other,
    }
}

/// A value that can be viewed as a [`FieldValue`]
pub trait Field {
    fn as_field(&self) -> FieldValue<'_>;
}

/// A record whose fields can be looked up by name
///
/// `None` means the field is absent, which is distinct from a present null.
pub trait Record {
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

impl Field for serde_json::Value {
    fn as_field(&self) -> FieldValue<'_> {
        use serde_json::Value;

        match self {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i as i128)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::Int(u as i128)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => FieldValue::Str(s),
            Value::Array(_) | Value::Object(_) => FieldValue::Composite,
        }
    }
}

impl Field for String {
    fn as_field(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

impl Field for &str {
    fn as_field(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

impl Field for bool {
    fn as_field(&self) -> FieldValue<'_> {
        FieldValue::Bool(*self)
    }
}

impl Field for f32 {
    fn as_field(&self) -> FieldValue<'_> {
        FieldValue::Float(*self as f64)
    }
}

impl Field for f64 {
    fn as_field(&self) -> FieldValue<'_> {
        FieldValue::Float(*self)
    }
}

macro_rules! impl_int_field {
    ($($t:ty),*) => {
        $(
            impl Field for $t {
                fn as_field(&self) -> FieldValue<'_> {
                    FieldValue::Int(*self as i128)
                }
            }
        )*
    };
}

impl_int_field!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl<T: Field> Field for Option<T> {
    fn as_field(&self) -> FieldValue<'_> {
        match self {
            Some(value) => value.as_field(),
            None => FieldValue::Null,
        }
    }
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).map(Field::as_field)
    }
}

impl Record for serde_json::Value {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.as_object().and_then(|object| object.field(name))
    }
}

impl<V: Field, S: BuildHasher> Record for HashMap<String, V, S> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).map(Field::as_field)
    }
}

impl<V: Field> Record for BTreeMap<String, V> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).map(Field::as_field)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        (**self).field(name)
    }
}
