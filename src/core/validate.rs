//! Eager validation of field and sort expressions
//!
//! Both checks run before any data access so a bad request never touches the
//! source. Each token of a comma-separated expression is validated
//! independently; failure reports the first offending token and performs no
//! partial work.

use crate::core::error::QueryError;
use crate::core::shape::ShapeDescriptor;
use crate::core::sorting::SortMapping;

/// Check that every token of a field-selection expression names an attribute
/// of the shape.
///
/// Empty or whitespace-only input means "no restriction" and is always valid.
pub fn check_fields(shape: &ShapeDescriptor, fields: &str) -> Result<(), QueryError> {
    if fields.trim().is_empty() {
        return Ok(());
    }

    for token in fields.split(',') {
        let name = token.trim();
        if name.is_empty() {
            continue;
        }
        if !shape.contains(name) {
            return Err(QueryError::UnknownField {
                shape: shape.name().to_string(),
                field: name.to_string(),
            });
        }
    }

    Ok(())
}

/// Check that every key of a sort expression has an entry in the mapping.
///
/// A direction suffix (`asc`/`desc` or anything after the first whitespace)
/// never invalidates a clause; only the key itself is checked.
pub fn check_sort(mapping: &SortMapping, order_by: &str) -> Result<(), QueryError> {
    if order_by.trim().is_empty() {
        return Ok(());
    }

    for clause in order_by.split(',') {
        let trimmed = clause.trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = trimmed.split_whitespace().next().unwrap_or(trimmed);
        if !mapping.contains_key(key) {
            return Err(QueryError::UnknownSortKey {
                key: key.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    static AUTHOR_DTO: ShapeDescriptor =
        ShapeDescriptor::new("AuthorDto", &["Id", "Name", "MainCategory", "Age"]);

    fn author_mapping() -> SortMapping {
        SortMapping::new()
            .map("Id", &["Id"])
            .map("Name", &["FirstName", "LastName"])
            .map_reversed("Age", &["DateOfBirth"])
    }

    #[test]
    fn test_empty_field_list_is_valid() {
        assert!(check_fields(&AUTHOR_DTO, "").is_ok());
        assert!(check_fields(&AUTHOR_DTO, "   ").is_ok());
    }

    #[test]
    fn test_known_fields_are_valid() {
        assert!(check_fields(&AUTHOR_DTO, "Id, Name").is_ok());
        assert!(check_fields(&AUTHOR_DTO, "id,NAME,  mainCategory").is_ok());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = check_fields(&AUTHOR_DTO, "Unknown").unwrap_err();
        assert_eq!(
            err,
            QueryError::UnknownField {
                shape: "AuthorDto".to_string(),
                field: "Unknown".to_string(),
            }
        );
    }

    #[test]
    fn test_each_token_is_validated_independently() {
        // A valid first token must not mask an invalid later one
        let err = check_fields(&AUTHOR_DTO, "Id, Bogus, Name").unwrap_err();
        assert!(matches!(err, QueryError::UnknownField { field, .. } if field == "Bogus"));
    }

    #[test]
    fn test_empty_sort_expression_is_valid() {
        assert!(check_sort(&author_mapping(), "").is_ok());
    }

    #[test]
    fn test_direction_suffix_never_invalidates() {
        let mapping = author_mapping();
        assert!(check_sort(&mapping, "Name desc").is_ok());
        assert!(check_sort(&mapping, "Name whatever-trailing-noise").is_ok());
    }

    #[test]
    fn test_unknown_sort_key_is_rejected() {
        let err = check_sort(&author_mapping(), "Name, Rank desc").unwrap_err();
        assert_eq!(
            err,
            QueryError::UnknownSortKey {
                key: "Rank".to_string(),
            }
        );
    }

    #[test]
    fn test_sort_keys_are_case_insensitive() {
        assert!(check_sort(&author_mapping(), "age DESC, name").is_ok());
    }
}
