//! Field value types used by shaped records and the sorting comparator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// A polymorphic field value that can hold different attribute types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Total ordering used by multi-key comparators.
    ///
    /// Null sorts first. Values of the same variant compare naturally
    /// (integers and floats compare numerically across the two variants);
    /// otherwise variants compare by a fixed rank so the ordering stays total.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        use FieldValue::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Less,
            (_, Null) => Ordering::Greater,
            (String(a), String(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Integer(a), Float(b)) => (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal),
            (Float(a), Integer(b)) => a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal),
            (Boolean(a), Boolean(b)) => a.cmp(b),
            (Uuid(a), Uuid(b)) => a.cmp(b),
            (DateTime(a), DateTime(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Boolean(_) => 1,
            FieldValue::Integer(_) => 2,
            FieldValue::Float(_) => 2,
            FieldValue::String(_) => 3,
            FieldValue::Uuid(_) => 4,
            FieldValue::DateTime(_) => 5,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_string() {
        let value = FieldValue::String("test".to_string());
        assert_eq!(value.as_string(), Some("test"));
        assert_eq!(value.as_integer(), None);
        assert!(!value.is_null());
    }

    #[test]
    fn test_field_value_null() {
        let value = FieldValue::Null;
        assert!(value.is_null());
        assert_eq!(value.as_string(), None);
    }

    #[test]
    fn test_compare_same_variant() {
        assert_eq!(
            FieldValue::from("Ada").compare(&FieldValue::from("Grace")),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::from(7i64).compare(&FieldValue::from(3i64)),
            Ordering::Greater
        );
        assert_eq!(
            FieldValue::from(1.5).compare(&FieldValue::from(1.5)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_compare_null_sorts_first() {
        assert_eq!(
            FieldValue::Null.compare(&FieldValue::from("anything")),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::from(0i64).compare(&FieldValue::Null),
            Ordering::Greater
        );
    }

    #[test]
    fn test_compare_mixed_numeric() {
        assert_eq!(
            FieldValue::Integer(2).compare(&FieldValue::Float(2.5)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Float(3.0).compare(&FieldValue::Integer(3)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_compare_datetimes() {
        let earlier = "1990-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let later = "2000-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(
            FieldValue::DateTime(earlier).compare(&FieldValue::DateTime(later)),
            Ordering::Less
        );
    }

    #[test]
    fn test_from_option() {
        let some: FieldValue = Some("value").into();
        assert_eq!(some, FieldValue::String("value".to_string()));

        let none: FieldValue = Option::<&str>::None.into();
        assert!(none.is_null());
    }

    #[test]
    fn test_serde_untagged() {
        let json = serde_json::to_string(&FieldValue::Integer(42)).unwrap();
        assert_eq!(json, "42");

        let json = serde_json::to_string(&FieldValue::from("Ada")).unwrap();
        assert_eq!(json, "\"Ada\"");

        let json = serde_json::to_string(&FieldValue::Null).unwrap();
        assert_eq!(json, "null");
    }
}
