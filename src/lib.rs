//! # Carve
//!
//! A resource-shaping and query-customization toolkit for building RESTful APIs in Rust.
//!
//! ## Features
//!
//! - **Data Shaping**: Project any record down to a caller-selected subset of its attributes
//! - **Sort-Key Mapping**: Declarative tables translating external sort keys into one or
//!   more internal storage attributes, with optional direction reversal
//! - **Offset Pagination**: One-page materialization with full metadata (total count,
//!   total pages, hasNext, hasPrevious)
//! - **Eager Validation**: Field and sort expressions are checked against a shape's
//!   attribute table before any data access
//! - **Storage Agnostic**: Any backend that can count and slice a filtered, ordered
//!   sequence plugs in through the `DataSource` trait
//! - **Typed Errors**: Client input failures, configuration defects and internal
//!   defects are distinct kinds, mapped to HTTP status codes at the boundary
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use carve::prelude::*;
//!
//! // Describe the outward-facing representation
//! impl_shaped!(AuthorDto, "AuthorDto", {
//!     "Id" => id,
//!     "Name" => name,
//!     "Age" => age,
//!     "MainCategory" => main_category,
//! });
//!
//! // Declare how external sort keys map onto storage attributes
//! let mut registry = SortMappingRegistry::new();
//! registry.register(
//!     Author::shape().name(),
//!     AuthorDto::shape().name(),
//!     SortMapping::new()
//!         .map("Id", &["Id"])
//!         .map("Name", &["FirstName", "LastName"])
//!         .map_reversed("Age", &["DateOfBirth"]),
//! )?;
//!
//! // Run the whole pipeline for a request
//! let engine = ResourceEngine::new(Arc::new(registry));
//! let page = engine.shaped_page(&source, &query, AuthorDto::from).await?;
//! ```

pub mod core;
pub mod rest;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        engine::ResourceEngine,
        error::{CarveError, CarveResult, ConfigError, QueryError},
        field::FieldValue,
        pagination::{Page, PageMeta, PagingPolicy},
        projection::{FieldSelection, ShapedRecord, shape, shape_many},
        query::ResourceQuery,
        registry::SortMappingRegistry,
        shape::{ShapeDescriptor, Shaped},
        sorting::{OrderTerm, SortClause, SortDirection, SortMapping},
        source::{DataSource, SourceQuery},
    };

    // === Macros ===
    pub use crate::impl_shaped;

    // === Boundary glue ===
    pub use crate::rest::{PAGINATION_HEADER, pagination_header};

    // === Storage ===
    pub use crate::storage::InMemorySource;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
