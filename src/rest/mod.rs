//! HTTP boundary glue
//!
//! The engine computes pagination metadata; this module encodes it the way
//! REST clients expect: an `X-Pagination` response header carrying
//! `{totalCount, pageSize, currentPage, totalPages}`. Previous/next page URIs
//! are a link-construction concern left to the application.
//!
//! [`CarveError`](crate::core::error::CarveError) implements
//! `axum::response::IntoResponse`, and
//! [`ResourceQuery`](crate::core::query::ResourceQuery) deserializes straight
//! from `axum::extract::Query`, so handlers stay thin.

use crate::core::error::{CarveError, CarveResult};
use crate::core::pagination::PageMeta;
use axum::http::{HeaderName, HeaderValue};

/// Name of the pagination metadata response header
pub const PAGINATION_HEADER: &str = "x-pagination";

/// Build the `X-Pagination` header for a page's metadata
pub fn pagination_header(meta: &PageMeta) -> CarveResult<(HeaderName, HeaderValue)> {
    let body = serde_json::json!({
        "totalCount": meta.total_count,
        "pageSize": meta.page_size,
        "currentPage": meta.current_page,
        "totalPages": meta.total_pages,
    });

    let value = HeaderValue::from_str(&body.to_string())
        .map_err(|e| CarveError::Internal(format!("pagination header encoding: {}", e)))?;

    Ok((HeaderName::from_static(PAGINATION_HEADER), value))
}
