//! Immutable in-memory semantic graph.
//!
//! The catalog's relational shape (intents ↔ perspectives ↔ concepts ↔
//! fields, joined by name) is rebuilt here as an explicit arena:
//! `Vec`-backed node tables addressed by `usize` ids, plus typed edge
//! lists and name→id maps. Built once per load, never mutated by the
//! resolution algorithms.
//!
//! All referential integrity is enforced at build time, so resolution
//! code can index the arenas without re-checking:
//!
//! - every name referenced by an edge must exist (`CatalogMalformed`
//!   otherwise);
//! - an elevation edge's perspective must be declared by its intent, and
//!   its concept must be visible through that perspective — this is what
//!   keeps a concept from ever leaking outside its granted perspective;
//! - weights must be non-negative.

use crate::document::CatalogDocument;
use semgraph_core::{ConceptRef, FieldRef, SemanticError};
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub type IntentId = usize;
pub type PerspectiveId = usize;
pub type ConceptId = usize;

#[derive(Debug, Clone)]
pub struct IntentNode {
    pub name: String,
    /// Perspectives the intent operates within, in declaration order.
    pub perspectives: Vec<PerspectiveId>,
}

#[derive(Debug, Clone)]
pub struct PerspectiveNode {
    pub name: String,
    /// Concepts visible through this perspective.
    pub concepts: Vec<ConceptId>,
}

/// One weighted (intent, perspective, concept) edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationEdge {
    pub intent: IntentId,
    pub perspective: PerspectiveId,
    pub concept: ConceptId,
    pub weight: f64,
}

#[derive(Debug)]
pub struct GraphSnapshot {
    intents: Vec<IntentNode>,
    perspectives: Vec<PerspectiveNode>,
    concepts: Vec<ConceptRef>,

    intent_by_name: HashMap<String, IntentId>,
    perspective_by_name: HashMap<String, PerspectiveId>,
    concept_by_name: HashMap<String, ConceptId>,

    /// Field → candidate concepts, in catalog binding order.
    bindings: HashMap<FieldRef, Vec<ConceptId>>,
    /// Table → its bound fields.
    fields_by_table: BTreeMap<String, BTreeSet<FieldRef>>,

    /// All elevation edges, in catalog order.
    elevations: Vec<ElevationEdge>,
    /// Intent → indices into `elevations`, preserving catalog order.
    elevations_by_intent: HashMap<IntentId, Vec<usize>>,
    /// Concept → indices into `elevations`, preserving catalog order.
    elevations_by_concept: HashMap<ConceptId, Vec<usize>>,
}

impl GraphSnapshot {
    /// Build and validate a snapshot from a catalog document.
    pub fn build(doc: &CatalogDocument) -> Result<Self, SemanticError> {
        let mut concepts = Vec::with_capacity(doc.concepts.len());
        let mut concept_by_name = HashMap::new();
        for row in &doc.concepts {
            if concept_by_name
                .insert(row.name.clone(), concepts.len())
                .is_some()
            {
                return Err(SemanticError::catalog_malformed(format!(
                    "duplicate concept `{}`",
                    row.name
                )));
            }
            concepts.push(ConceptRef::new(&row.name, &row.description));
        }

        let mut perspectives = Vec::with_capacity(doc.perspectives.len());
        let mut perspective_by_name = HashMap::new();
        for row in &doc.perspectives {
            let mut ids = Vec::with_capacity(row.concepts.len());
            for concept in &row.concepts {
                let id = *concept_by_name.get(concept).ok_or_else(|| {
                    SemanticError::catalog_malformed(format!(
                        "perspective `{}` references unknown concept `{concept}`",
                        row.name
                    ))
                })?;
                ids.push(id);
            }
            if perspective_by_name
                .insert(row.name.clone(), perspectives.len())
                .is_some()
            {
                return Err(SemanticError::catalog_malformed(format!(
                    "duplicate perspective `{}`",
                    row.name
                )));
            }
            perspectives.push(PerspectiveNode {
                name: row.name.clone(),
                concepts: ids,
            });
        }

        let mut intents = Vec::with_capacity(doc.intents.len());
        let mut intent_by_name = HashMap::new();
        for row in &doc.intents {
            let mut ids = Vec::with_capacity(row.perspectives.len());
            for perspective in &row.perspectives {
                let id = *perspective_by_name.get(perspective).ok_or_else(|| {
                    SemanticError::catalog_malformed(format!(
                        "intent `{}` references unknown perspective `{perspective}`",
                        row.name
                    ))
                })?;
                ids.push(id);
            }
            if intent_by_name
                .insert(row.name.clone(), intents.len())
                .is_some()
            {
                return Err(SemanticError::catalog_malformed(format!(
                    "duplicate intent `{}`",
                    row.name
                )));
            }
            intents.push(IntentNode {
                name: row.name.clone(),
                perspectives: ids,
            });
        }

        let mut bindings: HashMap<FieldRef, Vec<ConceptId>> = HashMap::new();
        let mut fields_by_table: BTreeMap<String, BTreeSet<FieldRef>> = BTreeMap::new();
        for row in &doc.field_bindings {
            let concept = *concept_by_name.get(&row.concept).ok_or_else(|| {
                SemanticError::catalog_malformed(format!(
                    "binding `{}.{}` references unknown concept `{}`",
                    row.table, row.column, row.concept
                ))
            })?;
            let field = FieldRef::new(&row.table, &row.column);
            fields_by_table
                .entry(row.table.clone())
                .or_default()
                .insert(field.clone());
            let candidates = bindings.entry(field).or_default();
            if !candidates.contains(&concept) {
                candidates.push(concept);
            }
        }

        let mut elevations = Vec::with_capacity(doc.elevations.len());
        let mut elevations_by_intent: HashMap<IntentId, Vec<usize>> = HashMap::new();
        let mut elevations_by_concept: HashMap<ConceptId, Vec<usize>> = HashMap::new();
        for row in &doc.elevations {
            let intent = *intent_by_name.get(&row.intent).ok_or_else(|| {
                SemanticError::catalog_malformed(format!(
                    "elevation references unknown intent `{}`",
                    row.intent
                ))
            })?;
            let perspective = *perspective_by_name.get(&row.perspective).ok_or_else(|| {
                SemanticError::catalog_malformed(format!(
                    "elevation references unknown perspective `{}`",
                    row.perspective
                ))
            })?;
            let concept = *concept_by_name.get(&row.concept).ok_or_else(|| {
                SemanticError::catalog_malformed(format!(
                    "elevation references unknown concept `{}`",
                    row.concept
                ))
            })?;
            if !row.weight.is_finite() || row.weight < 0.0 {
                return Err(SemanticError::catalog_malformed(format!(
                    "elevation `{}`/`{}`/`{}` has invalid weight {}",
                    row.intent, row.perspective, row.concept, row.weight
                )));
            }
            if !intents[intent].perspectives.contains(&perspective) {
                return Err(SemanticError::catalog_malformed(format!(
                    "intent `{}` does not operate in perspective `{}`",
                    row.intent, row.perspective
                )));
            }
            if !perspectives[perspective].concepts.contains(&concept) {
                return Err(SemanticError::catalog_malformed(format!(
                    "concept `{}` is not visible through perspective `{}`",
                    row.concept, row.perspective
                )));
            }

            let index = elevations.len();
            elevations.push(ElevationEdge {
                intent,
                perspective,
                concept,
                weight: row.weight,
            });
            elevations_by_intent.entry(intent).or_default().push(index);
            elevations_by_concept.entry(concept).or_default().push(index);
        }

        Ok(Self {
            intents,
            perspectives,
            concepts,
            intent_by_name,
            perspective_by_name,
            concept_by_name,
            bindings,
            fields_by_table,
            elevations,
            elevations_by_intent,
            elevations_by_concept,
        })
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    pub fn intent_id(&self, name: &str) -> Option<IntentId> {
        self.intent_by_name.get(name).copied()
    }

    pub fn perspective_id(&self, name: &str) -> Option<PerspectiveId> {
        self.perspective_by_name.get(name).copied()
    }

    pub fn concept_id(&self, name: &str) -> Option<ConceptId> {
        self.concept_by_name.get(name).copied()
    }

    pub fn intent(&self, id: IntentId) -> &IntentNode {
        &self.intents[id]
    }

    pub fn perspective(&self, id: PerspectiveId) -> &PerspectiveNode {
        &self.perspectives[id]
    }

    pub fn concept(&self, id: ConceptId) -> &ConceptRef {
        &self.concepts[id]
    }

    /// All intents, in catalog declaration order. Scoring iterates this,
    /// which is what makes tie order stable.
    pub fn intents(&self) -> impl Iterator<Item = (IntentId, &IntentNode)> {
        self.intents.iter().enumerate()
    }

    /// All tables with at least one bound field.
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.fields_by_table.keys().map(String::as_str)
    }

    /// Bound fields of a table (empty set for unknown tables).
    pub fn fields_of(&self, table: &str) -> BTreeSet<FieldRef> {
        self.fields_by_table.get(table).cloned().unwrap_or_default()
    }

    /// Whether the field has at least one concept binding.
    pub fn knows_field(&self, field: &FieldRef) -> bool {
        self.bindings.contains_key(field)
    }

    /// Candidate concepts of a field, in catalog binding order.
    pub fn candidate_concepts(&self, field: &FieldRef) -> &[ConceptId] {
        self.bindings.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All weighted edges reachable from a field: for each candidate
    /// concept (binding order), every elevation edge touching it
    /// (catalog order), as `(concept, intent, weight)`.
    pub fn edges_of(&self, field: &FieldRef) -> Vec<(ConceptId, IntentId, f64)> {
        let mut out = Vec::new();
        for &concept in self.candidate_concepts(field) {
            if let Some(indices) = self.elevations_by_concept.get(&concept) {
                for &i in indices {
                    let edge = self.elevations[i];
                    out.push((edge.concept, edge.intent, edge.weight));
                }
            }
        }
        out
    }

    /// Elevation edges for one field under one intent, in catalog order,
    /// optionally restricted to one perspective.
    pub fn field_elevations(
        &self,
        field: &FieldRef,
        intent: IntentId,
        perspective: Option<PerspectiveId>,
    ) -> Vec<ElevationEdge> {
        let candidates = self.candidate_concepts(field);
        let Some(indices) = self.elevations_by_intent.get(&intent) else {
            return Vec::new();
        };
        indices
            .iter()
            .map(|&i| self.elevations[i])
            .filter(|edge| candidates.contains(&edge.concept))
            .filter(|edge| perspective.map_or(true, |p| edge.perspective == p))
            .collect()
    }

    /// Tables (other than `exclude`) with at least one field elevated
    /// under the intent, sorted by name.
    pub fn tables_elevated_under(&self, intent: IntentId, exclude: &str) -> Vec<String> {
        let mut out = Vec::new();
        for (table, fields) in &self.fields_by_table {
            if table == exclude {
                continue;
            }
            let elevated = fields.iter().any(|field| {
                self.field_elevations(field, intent, None)
                    .iter()
                    .any(|edge| semgraph_core::is_elevated(edge.weight))
            });
            if elevated {
                out.push(table.clone());
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // Stats (CLI `check` output)
    // ------------------------------------------------------------------

    pub fn intent_count(&self) -> usize {
        self.intents.len()
    }

    pub fn perspective_count(&self) -> usize {
        self.perspectives.len()
    }

    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.values().map(Vec::len).sum()
    }

    pub fn elevation_count(&self) -> usize {
        self.elevations.len()
    }
}
