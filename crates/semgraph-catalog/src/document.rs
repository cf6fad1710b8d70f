//! Catalog document: the wire/file shape of the five logical relations.
//!
//! A backend serves these rows however it likes (JSON file, fixture,
//! a real database adapter); the snapshot builder is where referential
//! integrity is enforced, so rows here are plain serde structs.

use serde::{Deserialize, Serialize};

/// One named business question/operation, and the perspectives it
/// operates within.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRow {
    pub name: String,
    pub perspectives: Vec<String>,
}

/// One named viewpoint and the concepts visible through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerspectiveRow {
    pub name: String,
    pub concepts: Vec<String>,
}

/// One business-level definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptRow {
    pub name: String,
    pub description: String,
}

/// One candidate meaning of a physical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBindingRow {
    pub table: String,
    pub column: String,
    pub concept: String,
}

/// One weighted (intent, perspective, concept) edge. Weight 1.0 marks
/// the concept elevated; any other non-negative value marks it
/// suppressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevationRow {
    pub intent: String,
    pub perspective: String,
    pub concept: String,
    pub weight: f64,
}

/// The full catalog: all five relations, in backend-declared order.
/// Row order is meaningful — snapshot iteration orders and tie-breaks
/// all derive from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub intents: Vec<IntentRow>,
    pub perspectives: Vec<PerspectiveRow>,
    pub concepts: Vec<ConceptRow>,
    pub field_bindings: Vec<FieldBindingRow>,
    pub elevations: Vec<ElevationRow>,
}
