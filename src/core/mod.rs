//! Core module containing the resource-shaping and query-customization engine

pub mod engine;
pub mod error;
pub mod field;
pub mod pagination;
pub mod projection;
pub mod query;
pub mod registry;
pub mod shape;
pub mod sorting;
pub mod source;
pub mod validate;

pub use engine::ResourceEngine;
pub use error::{CarveError, CarveResult, ConfigError, QueryError};
pub use field::FieldValue;
pub use pagination::{Page, PageMeta, PagingPolicy};
pub use projection::{FieldSelection, ShapedRecord};
pub use query::ResourceQuery;
pub use registry::SortMappingRegistry;
pub use shape::{ShapeDescriptor, Shaped};
pub use sorting::{OrderTerm, SortClause, SortDirection, SortMapping};
pub use source::{DataSource, SourceQuery};
