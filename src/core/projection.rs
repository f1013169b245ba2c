//! Data shaping: projecting records down to a caller-selected attribute subset
//!
//! A [`ShapedRecord`] is an ordered sparse map from canonical attribute name to
//! value. Serialization order equals insertion order, which equals either the
//! request order of the field list or the shape's declaration order when no
//! field list is given.
//!
//! The projection engine re-checks field existence even though the validator
//! runs first: an unknown field at this stage means validation was bypassed,
//! which is an internal defect rather than a client error.

use crate::core::error::{CarveError, CarveResult};
use crate::core::field::FieldValue;
use crate::core::shape::{ShapeDescriptor, Shaped};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::error;

/// An ordered sparse record holding only the selected attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShapedRecord {
    fields: IndexMap<String, FieldValue>,
}

impl ShapedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute value.
    ///
    /// Inserting a name that is already present indicates an invalid field
    /// list slipped past earlier rejection; it is treated as a construction
    /// defect, not a client error.
    pub fn insert(&mut self, name: &str, value: FieldValue) -> CarveResult<()> {
        if self.fields.contains_key(name) {
            error!(field = name, "duplicate field inserted into shaped record");
            return Err(CarveError::Internal(format!(
                "field '{}' is already present in the shaped record",
                name
            )));
        }
        self.fields.insert(name.to_string(), value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Attribute names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A resolved field selection: canonical names in request order, deduplicated
///
/// Parsing once and reusing the selection avoids re-resolving the field list
/// for every record of a collection.
#[derive(Debug, Clone)]
pub struct FieldSelection {
    fields: Vec<&'static str>,
}

impl FieldSelection {
    /// Resolve a raw field list against a shape descriptor.
    ///
    /// Empty or whitespace-only input selects every attribute in declaration
    /// order. Tokens are trimmed, resolved case-insensitively to canonical
    /// names, and deduplicated while preserving first-occurrence order. An
    /// unresolvable token is an internal defect here; the validator is meant
    /// to reject it with a client error first.
    pub fn parse(shape: &'static ShapeDescriptor, fields: &str) -> CarveResult<Self> {
        if fields.trim().is_empty() {
            return Ok(Self {
                fields: shape.attributes().to_vec(),
            });
        }

        let mut selected: Vec<&'static str> = Vec::new();
        for token in fields.split(',') {
            let name = token.trim();
            if name.is_empty() {
                continue;
            }
            match shape.resolve(name) {
                Some(canonical) => {
                    if !selected.contains(&canonical) {
                        selected.push(canonical);
                    }
                }
                None => {
                    error!(
                        shape = shape.name(),
                        field = name,
                        "unvalidated field reached the projection engine"
                    );
                    return Err(CarveError::Internal(format!(
                        "field '{}' does not exist on shape '{}'",
                        name,
                        shape.name()
                    )));
                }
            }
        }

        Ok(Self { fields: selected })
    }

    /// Canonical names in selection order
    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    /// Project one record through this selection
    pub fn apply<T: Shaped>(&self, record: &T) -> CarveResult<ShapedRecord> {
        let mut shaped = ShapedRecord::new();
        for name in &self.fields {
            let value = record.attribute(name).ok_or_else(|| {
                error!(field = name, "shape descriptor and accessor table disagree");
                CarveError::Internal(format!(
                    "attribute '{}' is declared but not accessible",
                    name
                ))
            })?;
            shaped.insert(name, value)?;
        }
        Ok(shaped)
    }
}

/// Shape a single record down to the requested fields
pub fn shape<T: Shaped>(record: &T, fields: &str) -> CarveResult<ShapedRecord> {
    FieldSelection::parse(T::shape(), fields)?.apply(record)
}

/// Shape every record of a finite sequence independently
pub fn shape_many<T: Shaped>(records: &[T], fields: &str) -> CarveResult<Vec<ShapedRecord>> {
    let selection = FieldSelection::parse(T::shape(), fields)?;
    records.iter().map(|r| selection.apply(r)).collect()
}
