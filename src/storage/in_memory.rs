//! In-memory implementation of DataSource for testing and development

use crate::core::shape::Shaped;
use crate::core::sorting::OrderTerm;
use crate::core::source::{DataSource, SourceQuery};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::{Arc, RwLock};

/// In-memory data source over a vector of shaped records
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Filtering is exact-match over the record's attribute values; ordering is a
/// stable multi-key sort driven by compiled [`OrderTerm`]s, so the natural
/// insertion order survives for ties and unsorted queries.
#[derive(Clone)]
pub struct InMemorySource<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T: Shaped + Clone> InMemorySource<T> {
    /// Create an empty source
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a source seeded with records
    pub fn from_records(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Append a record
    pub fn push(&self, record: T) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        records.push(record);
        Ok(())
    }

    fn matching(&self, filter: Option<&Value>) -> Result<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records
            .iter()
            .filter(|record| matches_filter(*record, filter))
            .cloned()
            .collect())
    }
}

impl<T: Shaped + Clone> Default for InMemorySource<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Exact-match filtering: every key of the filter object must resolve to an
/// attribute whose value serializes to the filter value. An unresolvable key
/// matches nothing.
fn matches_filter<T: Shaped>(record: &T, filter: Option<&Value>) -> bool {
    let Some(Value::Object(criteria)) = filter else {
        return true;
    };

    criteria.iter().all(|(key, expected)| {
        let Some(canonical) = T::shape().resolve(key) else {
            return false;
        };
        let Some(actual) = record.attribute(canonical) else {
            return false;
        };
        serde_json::to_value(&actual)
            .map(|v| &v == expected)
            .unwrap_or(false)
    })
}

fn compare_by_terms<T: Shaped>(a: &T, b: &T, order: &[OrderTerm]) -> Ordering {
    use crate::core::field::FieldValue;

    for term in order {
        let left = a.attribute(&term.attribute).unwrap_or(FieldValue::Null);
        let right = b.attribute(&term.attribute).unwrap_or(FieldValue::Null);
        let mut ordering = left.compare(&right);
        if term.direction.is_descending() {
            ordering = ordering.reverse();
        }
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

#[async_trait]
impl<T> DataSource<T> for InMemorySource<T>
where
    T: Shaped + Clone + Send + Sync + 'static,
{
    async fn count(&self, query: &SourceQuery) -> Result<usize> {
        Ok(self.matching(query.filter.as_ref())?.len())
    }

    async fn slice(&self, query: &SourceQuery, offset: usize, limit: usize) -> Result<Vec<T>> {
        let mut rows = self.matching(query.filter.as_ref())?;

        if !query.order.is_empty() {
            // sort_by is stable, ties keep insertion order
            rows.sort_by(|a, b| compare_by_terms(a, b, &query.order));
        }

        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }
}
