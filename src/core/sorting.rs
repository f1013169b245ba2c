//! Sort expression parsing, sort-key mapping and the ordering compiler
//!
//! A client orders a collection with a comma-separated expression such as
//! `"name desc, age"`. Each clause names an external sort key, optionally
//! followed by a direction. The compiler expands every clause through a
//! [`SortMapping`] into one or more internal storage attributes, flipping the
//! direction for entries declared `reversed` (e.g. an external `Age` backed by
//! a stored `DateOfBirth`).

use crate::core::error::{CarveResult, QueryError};
use serde::Serialize;

/// Direction of a sort clause or compiled order term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn is_descending(self) -> bool {
        matches!(self, SortDirection::Descending)
    }
}

/// A parsed `"key [asc|desc]"` clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortClause {
    pub key: String,
    pub direction: SortDirection,
}

impl SortClause {
    /// Parse a comma-separated sort expression into clauses, in caller order.
    ///
    /// An empty or whitespace-only expression parses to no clauses (natural
    /// order). A trailing `desc` token, case-insensitive and preceded by
    /// whitespace, selects descending; the key is the text before the first
    /// whitespace of the trimmed clause.
    pub fn parse_list(expression: &str) -> Vec<SortClause> {
        if expression.trim().is_empty() {
            return Vec::new();
        }

        expression
            .split(',')
            .map(str::trim)
            .filter(|clause| !clause.is_empty())
            .map(|clause| {
                let descending = clause.to_ascii_lowercase().ends_with(" desc");
                let key = clause
                    .split_whitespace()
                    .next()
                    .unwrap_or(clause)
                    .to_string();
                SortClause {
                    key,
                    direction: if descending {
                        SortDirection::Descending
                    } else {
                        SortDirection::Ascending
                    },
                }
            })
            .collect()
    }
}

/// One entry of a [`SortMapping`]: an external key expanding to one or more
/// internal storage attributes
#[derive(Debug, Clone)]
pub struct MappingEntry {
    key: String,
    targets: Vec<String>,
    reversed: bool,
}

impl MappingEntry {
    /// Internal attribute names, in expansion order
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Whether the effective direction flips for this entry's attributes
    pub fn reversed(&self) -> bool {
        self.reversed
    }
}

/// Declarative mapping from external sort keys to internal storage attributes
///
/// Keys are matched case-insensitively. Built once at startup and shared
/// read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct SortMapping {
    entries: Vec<MappingEntry>,
}

impl SortMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map an external key onto internal attributes
    pub fn map(self, key: &str, targets: &[&str]) -> Self {
        self.add(key, targets, false)
    }

    /// Map an external key onto internal attributes with direction reversal
    pub fn map_reversed(self, key: &str, targets: &[&str]) -> Self {
        self.add(key, targets, true)
    }

    fn add(mut self, key: &str, targets: &[&str], reversed: bool) -> Self {
        debug_assert!(!targets.is_empty(), "a sort key must map to at least one attribute");
        self.entries.push(MappingEntry {
            key: key.to_string(),
            targets: targets.iter().map(|t| t.to_string()).collect(),
            reversed,
        });
        self
    }

    /// Look up an entry by external key, case-insensitively
    pub fn entry(&self, key: &str) -> Option<&MappingEntry> {
        self.entries
            .iter()
            .find(|e| e.key.eq_ignore_ascii_case(key))
    }

    /// Check whether an external key is mapped
    pub fn contains_key(&self, key: &str) -> bool {
        self.entry(key).is_some()
    }
}

/// A compiled (internal attribute, direction) pair ready for the data source's
/// ordering primitive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderTerm {
    pub attribute: String,
    pub direction: SortDirection,
}

impl OrderTerm {
    pub fn ascending(attribute: &str) -> Self {
        Self {
            attribute: attribute.to_string(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(attribute: &str) -> Self {
        Self {
            attribute: attribute.to_string(),
            direction: SortDirection::Descending,
        }
    }
}

/// Compile a sort expression into ordered terms using a mapping.
///
/// Clause order is preserved exactly as given: the first clause is the primary
/// sort key, and within one clause the mapped attributes keep their declared
/// expansion order. An unmapped key is rejected even though validation should
/// have caught it earlier.
pub fn compile(order_by: &str, mapping: &SortMapping) -> CarveResult<Vec<OrderTerm>> {
    let clauses = SortClause::parse_list(order_by);
    let mut terms = Vec::with_capacity(clauses.len());

    for clause in clauses {
        let entry = mapping
            .entry(&clause.key)
            .ok_or_else(|| QueryError::UnknownSortKey {
                key: clause.key.clone(),
            })?;

        for target in entry.targets() {
            let direction = if entry.reversed() {
                clause.direction.flip()
            } else {
                clause.direction
            };
            terms.push(OrderTerm {
                attribute: target.clone(),
                direction,
            });
        }
    }

    Ok(terms)
}
