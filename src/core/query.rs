//! Request parameters for resource collection endpoints
//!
//! This structure is extracted from URL query strings by the boundary layer
//! (it works directly with `axum::extract::Query`). All parameters are
//! optional with sensible defaults.
//!
//! # Example
//! ```rust,ignore
//! // In handler:
//! pub async fn list_authors(
//!     Query(query): Query<ResourceQuery>,
//! ) -> Result<Response, CarveError> {
//!     // query.page_number() defaults to 1
//!     // query.page_size(&policy) defaults to 10, clamped to the policy max
//! }
//!
//! // Usage:
//! GET /authors?pageNumber=2&pageSize=10
//! GET /authors?orderBy=name desc,age&fields=id,name
//! GET /authors?filter={"mainCategory": "Singing"}
//! ```

use crate::core::pagination::PagingPolicy;
use serde::Deserialize;
use serde_json::Value;

/// Query parameters for paging, sorting, field selection and filtering
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceQuery {
    /// Comma-separated field selection (data shaping)
    pub fields: Option<String>,

    /// Comma-separated sort expression, e.g. `name desc, age`
    pub order_by: Option<String>,

    /// Page number (starts at 1)
    #[serde(default = "default_page_number")]
    pub page_number: usize,

    /// Number of items per page; clamped against the [`PagingPolicy`]
    pub page_size: Option<usize>,

    /// Domain filters as a JSON object, opaque to the engine
    ///
    /// # Example
    /// ```text
    /// filter={"mainCategory": "Singing", "searchQuery": "sea"}
    /// ```
    pub filter: Option<String>,
}

fn default_page_number() -> usize {
    1
}

impl ResourceQuery {
    /// The raw field selection; empty string means "all fields"
    pub fn fields(&self) -> &str {
        self.fields.as_deref().unwrap_or("")
    }

    /// The raw sort expression; empty string means natural order
    pub fn order_by(&self) -> &str {
        self.order_by.as_deref().unwrap_or("")
    }

    /// Page number, ensuring a minimum of 1
    pub fn page_number(&self) -> usize {
        self.page_number.max(1)
    }

    /// Page size resolved against the policy
    pub fn page_size(&self, policy: &PagingPolicy) -> usize {
        policy.page_size(self.page_size)
    }

    /// Parse the filter JSON string into a Value
    pub fn filter_value(&self) -> Option<Value> {
        self.filter
            .as_ref()
            .and_then(|s| serde_json::from_str(s).ok())
    }
}
