//! Abstract data-source contract consumed by the pager
//!
//! Any backend that can count and slice a filtered, ordered sequence plugs in
//! here: an in-memory list, a SQL-backed queryable, anything. The engine is
//! agnostic to how the backend executes the filter and the compiled ordering.

use crate::core::pagination::Page;
use crate::core::sorting::OrderTerm;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// The filter and ordering a source applies before counting or slicing
///
/// The filter is an opaque JSON object owned entirely by the source; the
/// ordering is the compiler's output.
#[derive(Debug, Clone, Default)]
pub struct SourceQuery {
    pub filter: Option<Value>,
    pub order: Vec<OrderTerm>,
}

impl SourceQuery {
    pub fn new(filter: Option<Value>, order: Vec<OrderTerm>) -> Self {
        Self { filter, order }
    }
}

/// Trait for backends offering countable, sliceable, ordered access
///
/// `count` and `slice` are two independent passes over the source. Under
/// concurrent mutation they may disagree unless the backend offers a
/// consistent snapshot; no cross-call consistency is guaranteed and none is
/// compensated for.
#[async_trait]
pub trait DataSource<T>: Send + Sync {
    /// Number of items matching the filter, before any slicing
    async fn count(&self, query: &SourceQuery) -> Result<usize>;

    /// The items in `[offset, offset + limit)` of the filtered, ordered
    /// sequence. An out-of-range window yields an empty vector, not an error.
    async fn slice(&self, query: &SourceQuery, offset: usize, limit: usize) -> Result<Vec<T>>;
}

/// Materialize one page of a source and compute its metadata.
///
/// Expects `page_number >= 1` and a positive, already-clamped `page_size`;
/// both are enforced by the request-parameter layer before this point. The
/// offset saturates, so an absurdly large page number still yields a valid
/// empty page rather than wrapping around.
pub async fn paginate<T, S>(
    source: &S,
    query: &SourceQuery,
    page_number: usize,
    page_size: usize,
) -> Result<Page<T>>
where
    S: DataSource<T> + ?Sized,
{
    let total_count = source.count(query).await?;
    let offset = page_number.saturating_sub(1).saturating_mul(page_size);
    let items = source.slice(query, offset, page_size).await?;
    Ok(Page::new(items, total_count, page_number, page_size))
}
