//! Shared model types for the semantic graph.
//!
//! The graph itself (arenas, edge lists, name maps) lives in
//! `semgraph-catalog`; this module only defines the identities that cross
//! crate boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weight marking a concept as *elevated* (the canonical meaning) for an
/// (intent, perspective, field) resolution. Any other non-negative weight
/// means the concept is reachable but *suppressed*.
pub const ELEVATED_WEIGHT: f64 = 1.0;

/// Whether an elevation-edge weight marks the canonical meaning.
///
/// Weights come from the catalog as literal `1.0` markers, not computed
/// floats, so exact comparison is the contract here.
pub fn is_elevated(weight: f64) -> bool {
    weight == ELEVATED_WEIGHT
}

/// A physical column, identified as `(table, column)`.
///
/// Identity is immutable; many fields may bind to the same concept.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldRef {
    pub table: String,
    pub column: String,
}

impl FieldRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Parse a `table.column` token. Extra dots belong to the column part
    /// (some backends use dotted column names).
    pub fn parse(token: &str) -> Option<Self> {
        let (table, column) = token.split_once('.')?;
        if table.is_empty() || column.is_empty() {
            return None;
        }
        Some(Self::new(table, column))
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// A business-level concept a field may represent.
///
/// Carried by value across crate boundaries (e.g. inside a `QueryPlan` or
/// a solder manifest) so downstream consumers never need the graph arena
/// to interpret a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptRef {
    pub name: String,
    pub description: String,
}

impl ConceptRef {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}
