//! Shape descriptors: the per-representation attribute table
//!
//! Every representation that can be projected or validated exposes a
//! [`ShapeDescriptor`] built once per type. Lookups are case-insensitive and
//! resolve to the canonical attribute name, so the engine never probes field
//! names at runtime by reflection-style guessing.

use crate::core::field::FieldValue;

/// The set of externally nameable attributes for a representation type
///
/// Declaration order is significant: it is the order an unrestricted
/// projection emits attributes in.
#[derive(Debug)]
pub struct ShapeDescriptor {
    name: &'static str,
    attributes: &'static [&'static str],
}

impl ShapeDescriptor {
    /// Create a descriptor. Intended to be stored in a `static` per type.
    pub const fn new(name: &'static str, attributes: &'static [&'static str]) -> Self {
        Self { name, attributes }
    }

    /// Tag identifying this shape, used as a registry key
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Canonical attribute names in declaration order
    pub fn attributes(&self) -> &'static [&'static str] {
        self.attributes
    }

    /// Resolve a requested name to its canonical form, case-insensitively
    pub fn resolve(&self, requested: &str) -> Option<&'static str> {
        let requested = requested.trim();
        self.attributes
            .iter()
            .find(|a| a.eq_ignore_ascii_case(requested))
            .copied()
    }

    /// Check whether an attribute exists on this shape
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }
}

/// Trait for types that expose a shape descriptor and typed attribute access
///
/// Implement via the [`impl_shaped!`](crate::impl_shaped) macro rather than by
/// hand: the macro keeps the descriptor and the accessor dispatch in sync.
pub trait Shaped {
    /// The descriptor for this type, built once
    fn shape() -> &'static ShapeDescriptor
    where
        Self: Sized;

    /// Get an attribute value by canonical name
    fn attribute(&self, name: &str) -> Option<FieldValue>;
}

/// Macro implementing [`Shaped`] for a struct
///
/// Maps each external attribute name onto a struct field. Field types must
/// convert into [`FieldValue`] via `From`.
///
/// # Example
/// ```rust,ignore
/// impl_shaped!(AuthorDto, "AuthorDto", {
///     "Id" => id,
///     "Name" => name,
///     "MainCategory" => main_category,
///     "Age" => age,
/// });
/// ```
#[macro_export]
macro_rules! impl_shaped {
    ($type:ident, $tag:literal, { $($attr:literal => $field:ident),+ $(,)? }) => {
        impl $crate::core::shape::Shaped for $type {
            fn shape() -> &'static $crate::core::shape::ShapeDescriptor {
                static SHAPE: $crate::core::shape::ShapeDescriptor =
                    $crate::core::shape::ShapeDescriptor::new($tag, &[$($attr),+]);
                &SHAPE
            }

            fn attribute(&self, name: &str) -> Option<$crate::core::field::FieldValue> {
                $(
                    if name.eq_ignore_ascii_case($attr) {
                        return Some($crate::core::field::FieldValue::from(
                            self.$field.clone(),
                        ));
                    }
                )+
                None
            }
        }
    };
}
