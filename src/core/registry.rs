//! Keyed registry of sort mappings
//!
//! One [`SortMapping`] per (source shape, destination shape) pair, registered
//! during process initialization and shared read-only afterwards. Concurrent
//! lookups need no locking; wrap the built registry in an `Arc` and hand it to
//! whatever needs it.

use crate::core::error::{CarveResult, ConfigError};
use crate::core::shape::Shaped;
use crate::core::sorting::SortMapping;
use std::collections::HashMap;
use tracing::debug;

/// Registry keyed by (source shape tag, destination shape tag)
#[derive(Debug, Default)]
pub struct SortMappingRegistry {
    mappings: HashMap<(String, String), SortMapping>,
}

impl SortMappingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the mapping for a (source, destination) pair.
    ///
    /// Exactly one mapping may exist per pair; a second registration is a
    /// configuration defect.
    pub fn register(
        &mut self,
        source: &str,
        destination: &str,
        mapping: SortMapping,
    ) -> CarveResult<()> {
        let key = (source.to_string(), destination.to_string());
        if self.mappings.contains_key(&key) {
            return Err(ConfigError::DuplicateMapping {
                source: source.to_string(),
                destination: destination.to_string(),
            }
            .into());
        }

        debug!(source, destination, "registered sort mapping");
        self.mappings.insert(key, mapping);
        Ok(())
    }

    /// Register using the shape descriptors of the two types
    pub fn register_for<S: Shaped, D: Shaped>(&mut self, mapping: SortMapping) -> CarveResult<()> {
        self.register(S::shape().name(), D::shape().name(), mapping)
    }

    /// Resolve the mapping for a (source, destination) pair
    pub fn resolve(&self, source: &str, destination: &str) -> CarveResult<&SortMapping> {
        self.mappings
            .get(&(source.to_string(), destination.to_string()))
            .ok_or_else(|| {
                ConfigError::MissingMapping {
                    source: source.to_string(),
                    destination: destination.to_string(),
                }
                .into()
            })
    }

    /// Resolve using the shape descriptors of the two types
    pub fn resolve_for<S: Shaped, D: Shaped>(&self) -> CarveResult<&SortMapping> {
        self.resolve(S::shape().name(), D::shape().name())
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
