//! The per-request pipeline tying validation, sorting, paging and shaping
//! together
//!
//! Flow for a collection request: resolve the sort mapping for the
//! (entity, representation) pair → validate the sort and field expressions →
//! compile the ordering → count and slice through the data source → map each
//! entity to its representation → shape each representation down to the
//! requested fields. Validation short-circuits before any source access.

use crate::core::error::CarveResult;
use crate::core::pagination::{Page, PagingPolicy};
use crate::core::projection::{FieldSelection, ShapedRecord};
use crate::core::query::ResourceQuery;
use crate::core::registry::SortMappingRegistry;
use crate::core::shape::Shaped;
use crate::core::source::{self, DataSource, SourceQuery};
use crate::core::{sorting, validate};
use std::sync::Arc;
use tracing::debug;

/// The query-customization engine, built once and shared across requests
#[derive(Clone)]
pub struct ResourceEngine {
    registry: Arc<SortMappingRegistry>,
    policy: PagingPolicy,
}

impl ResourceEngine {
    /// Create an engine over a fully registered mapping registry
    pub fn new(registry: Arc<SortMappingRegistry>) -> Self {
        Self {
            registry,
            policy: PagingPolicy::default(),
        }
    }

    /// Override the default paging policy
    pub fn with_policy(mut self, policy: PagingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn registry(&self) -> &SortMappingRegistry {
        &self.registry
    }

    pub fn policy(&self) -> &PagingPolicy {
        &self.policy
    }

    /// Run the full pipeline for a collection request.
    ///
    /// `convert` maps a stored entity to its outward representation; the
    /// object-mapping itself is the caller's concern.
    pub async fn shaped_page<E, D, S, F>(
        &self,
        source: &S,
        query: &ResourceQuery,
        convert: F,
    ) -> CarveResult<Page<ShapedRecord>>
    where
        E: Shaped,
        D: Shaped,
        S: DataSource<E> + ?Sized,
        F: Fn(E) -> D,
    {
        let mapping = self
            .registry
            .resolve(E::shape().name(), D::shape().name())?;

        // Reject bad input before touching the source
        validate::check_sort(mapping, query.order_by())?;
        validate::check_fields(D::shape(), query.fields())?;

        let order = sorting::compile(query.order_by(), mapping)?;
        let source_query = SourceQuery::new(query.filter_value(), order);

        let page_number = query.page_number();
        let page_size = query.page_size(&self.policy);
        debug!(
            entity = E::shape().name(),
            representation = D::shape().name(),
            page_number,
            page_size,
            "running resource query"
        );

        let page = source::paginate(source, &source_query, page_number, page_size).await?;

        let selection = FieldSelection::parse(D::shape(), query.fields())?;
        let meta = page.meta;
        let mut items = Vec::with_capacity(page.items.len());
        for entity in page.items {
            items.push(selection.apply(&convert(entity))?);
        }

        Ok(Page { items, meta })
    }

    /// Validate a field selection and shape a single representation.
    ///
    /// Used by single-resource endpoints, where no sorting or paging applies.
    pub fn shaped_one<D: Shaped>(&self, record: &D, fields: &str) -> CarveResult<ShapedRecord> {
        validate::check_fields(D::shape(), fields)?;
        FieldSelection::parse(D::shape(), fields)?.apply(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::CarveError;
    use crate::core::sorting::SortMapping;
    use crate::impl_shaped;
    use anyhow::Result;
    use async_trait::async_trait;

    #[derive(Clone)]
    struct Record {
        id: i64,
        label: String,
    }

    impl_shaped!(Record, "EngineRecord", {
        "Id" => id,
        "Label" => label,
    });

    #[derive(Clone)]
    struct RecordDto {
        id: i64,
        label: String,
    }

    impl_shaped!(RecordDto, "EngineRecordDto", {
        "Id" => id,
        "Label" => label,
    });

    /// Source that fails the test if the engine touches it
    struct UntouchableSource;

    #[async_trait]
    impl DataSource<Record> for UntouchableSource {
        async fn count(&self, _query: &SourceQuery) -> Result<usize> {
            panic!("validation must run before any data access");
        }

        async fn slice(
            &self,
            _query: &SourceQuery,
            _offset: usize,
            _limit: usize,
        ) -> Result<Vec<Record>> {
            panic!("validation must run before any data access");
        }
    }

    fn engine() -> ResourceEngine {
        let mut registry = SortMappingRegistry::new();
        registry
            .register_for::<Record, RecordDto>(
                SortMapping::new().map("Id", &["Id"]).map("Label", &["Label"]),
            )
            .unwrap();
        ResourceEngine::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_bad_sort_key_short_circuits_before_source_access() {
        let query = ResourceQuery {
            order_by: Some("Rank".to_string()),
            ..Default::default()
        };
        let err = engine()
            .shaped_page(&UntouchableSource, &query, |r: Record| RecordDto {
                id: r.id,
                label: r.label,
            })
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_SORT_KEY");
    }

    #[tokio::test]
    async fn test_bad_field_short_circuits_before_source_access() {
        let query = ResourceQuery {
            fields: Some("Unknown".to_string()),
            ..Default::default()
        };
        let err = engine()
            .shaped_page(&UntouchableSource, &query, |r: Record| RecordDto {
                id: r.id,
                label: r.label,
            })
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_FIELD");
    }

    #[tokio::test]
    async fn test_missing_mapping_is_config_error() {
        let engine = ResourceEngine::new(Arc::new(SortMappingRegistry::new()));
        let err = engine
            .shaped_page(&UntouchableSource, &ResourceQuery::default(), |r: Record| {
                RecordDto {
                    id: r.id,
                    label: r.label,
                }
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CarveError::Config(_)));
    }

    #[test]
    fn test_shaped_one_validates_first() {
        let dto = RecordDto {
            id: 1,
            label: "one".to_string(),
        };
        let err = engine().shaped_one(&dto, "Bogus").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_FIELD");

        let shaped = engine().shaped_one(&dto, "Label").unwrap();
        assert_eq!(shaped.keys().collect::<Vec<_>>(), vec!["Label"]);
    }
}
