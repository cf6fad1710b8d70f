//! Query plan resolution.
//!
//! A resolution answers: under this intent, what does this physical
//! column *mean*? The algorithm intersects three edge sets — field →
//! concept bindings, the intent's elevation edges, and the perspectives
//! the intent operates within — then partitions the matches by weight:
//! exactly 1.0 is the elevated (canonical) concept, everything else is
//! suppressed.
//!
//! Zero elevated matches is not an error: `FieldMapping::Unresolved`
//! means "this intent has no opinion about this field". Two elevated
//! matches is a data-integrity violation (`AmbiguousElevation`) and is
//! surfaced, never silently picked from.

use semgraph_catalog::{GraphSnapshot, IntentId, PerspectiveId};
use semgraph_core::{is_elevated, ConceptRef, FieldRef, SemanticError};
use serde::{Deserialize, Serialize};

/// Resolution outcome for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldMapping {
    /// The unique elevated concept for this (field, intent, perspective).
    Resolved { concept: ConceptRef },
    /// Legitimate terminal state: the intent has no opinion here.
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMappingEntry {
    pub field: FieldRef,
    pub mapping: FieldMapping,
}

/// The resolved interpretation of one (table, column, intent) request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryPlan {
    pub intent: String,
    pub perspective: String,
    pub field_mappings: Vec<FieldMappingEntry>,
    pub elevated_concepts: Vec<ConceptRef>,
    pub suppressed_concepts: Vec<ConceptRef>,
    /// Other tables with at least one field elevated under the same
    /// intent — candidates to bring into the same query.
    pub suggested_joins: Vec<String>,
    /// Deterministic audit sentence; never used for control flow.
    pub explanation: String,
}

impl QueryPlan {
    /// The field this plan was resolved for. The resolver always emits
    /// exactly one mapping, but the fields are public, so a
    /// hand-constructed plan with none yields `None` rather than a panic.
    pub fn field(&self) -> Option<&FieldRef> {
        self.field_mappings.first().map(|entry| &entry.field)
    }

    /// The elevated concept, if the mapping resolved.
    pub fn resolved_concept(&self) -> Option<&ConceptRef> {
        self.field_mappings
            .first()
            .and_then(|entry| match &entry.mapping {
                FieldMapping::Resolved { concept } => Some(concept),
                FieldMapping::Unresolved => None,
            })
    }
}

/// Resolve one (table, column, intent) triple to a single plan.
///
/// When `perspective` is `None` and the pair is valid under more than
/// one of the intent's perspectives, this returns
/// `AmbiguousPerspective` rather than guessing a priority order; use
/// [`compare_query_plans`] to see every candidate. A perspective name
/// the catalog does not know, or one the intent does not operate in, is
/// `UnknownPerspective` — bad caller input, same class as
/// `UnknownIntent`; `Unresolved` is reserved for perspectives that
/// exist but hold no elevation edge for the field.
pub fn resolve(
    snapshot: &GraphSnapshot,
    table: &str,
    column: &str,
    intent: &str,
    perspective: Option<&str>,
) -> Result<QueryPlan, SemanticError> {
    let field = FieldRef::new(table, column);
    let intent_id = lookup(snapshot, &field, intent)?;

    match perspective {
        Some(name) => {
            let perspective_id = snapshot
                .perspective_id(name)
                .filter(|id| snapshot.intent(intent_id).perspectives.contains(id))
                .ok_or_else(|| SemanticError::UnknownPerspective {
                    name: name.to_string(),
                    intent: intent.to_string(),
                    known: snapshot
                        .intent(intent_id)
                        .perspectives
                        .iter()
                        .map(|&id| snapshot.perspective(id).name.clone())
                        .collect(),
                })?;
            build_plan(snapshot, &field, intent_id, Some(perspective_id), name)
        }
        None => {
            let candidates = candidate_perspectives(snapshot, &field, intent_id);
            match candidates.as_slice() {
                [] => {
                    // No perspective has an opinion; report Unresolved
                    // under the intent's first declared perspective.
                    let fallback = snapshot
                        .intent(intent_id)
                        .perspectives
                        .first()
                        .map(|&id| snapshot.perspective(id).name.clone())
                        .unwrap_or_default();
                    build_plan(snapshot, &field, intent_id, None, &fallback)
                }
                [only] => {
                    let name = snapshot.perspective(*only).name.clone();
                    build_plan(snapshot, &field, intent_id, Some(*only), &name)
                }
                several => Err(SemanticError::AmbiguousPerspective {
                    field,
                    intent: intent.to_string(),
                    perspectives: several
                        .iter()
                        .map(|&id| snapshot.perspective(id).name.clone())
                        .collect(),
                }),
            }
        }
    }
}

/// Resolve one triple under *every* perspective in which it is valid,
/// returning one plan per perspective (intent declaration order).
///
/// If no perspective has an opinion, a single `Unresolved` plan is
/// returned so callers still get the join suggestions and audit text.
pub fn compare_query_plans(
    snapshot: &GraphSnapshot,
    table: &str,
    column: &str,
    intent: &str,
) -> Result<Vec<QueryPlan>, SemanticError> {
    let field = FieldRef::new(table, column);
    let intent_id = lookup(snapshot, &field, intent)?;

    let candidates = candidate_perspectives(snapshot, &field, intent_id);
    if candidates.is_empty() {
        let fallback = snapshot
            .intent(intent_id)
            .perspectives
            .first()
            .map(|&id| snapshot.perspective(id).name.clone())
            .unwrap_or_default();
        return Ok(vec![build_plan(snapshot, &field, intent_id, None, &fallback)?]);
    }

    candidates
        .into_iter()
        .map(|id| {
            let name = snapshot.perspective(id).name.clone();
            build_plan(snapshot, &field, intent_id, Some(id), &name)
        })
        .collect()
}

fn lookup(
    snapshot: &GraphSnapshot,
    field: &FieldRef,
    intent: &str,
) -> Result<IntentId, SemanticError> {
    let intent_id = snapshot
        .intent_id(intent)
        .ok_or_else(|| SemanticError::UnknownIntent {
            name: intent.to_string(),
        })?;
    if !snapshot.knows_field(field) {
        return Err(SemanticError::UnknownField {
            field: field.clone(),
        });
    }
    Ok(intent_id)
}

/// Perspectives of the intent under which the field has at least one
/// elevation edge, in intent declaration order.
fn candidate_perspectives(
    snapshot: &GraphSnapshot,
    field: &FieldRef,
    intent: IntentId,
) -> Vec<PerspectiveId> {
    let edges = snapshot.field_elevations(field, intent, None);
    snapshot
        .intent(intent)
        .perspectives
        .iter()
        .copied()
        .filter(|&p| edges.iter().any(|edge| edge.perspective == p))
        .collect()
}

fn build_plan(
    snapshot: &GraphSnapshot,
    field: &FieldRef,
    intent: IntentId,
    perspective: Option<PerspectiveId>,
    perspective_name: &str,
) -> Result<QueryPlan, SemanticError> {
    let edges = match perspective {
        Some(p) => snapshot.field_elevations(field, intent, Some(p)),
        None => Vec::new(),
    };

    let mut elevated = Vec::new();
    let mut suppressed = Vec::new();
    for edge in &edges {
        let concept = snapshot.concept(edge.concept).clone();
        if is_elevated(edge.weight) {
            elevated.push(concept);
        } else {
            suppressed.push(concept);
        }
    }

    let intent_name = snapshot.intent(intent).name.clone();
    if elevated.len() > 1 {
        return Err(SemanticError::AmbiguousElevation {
            field: field.clone(),
            intent: intent_name,
            perspective: perspective_name.to_string(),
            concepts: elevated.into_iter().map(|c| c.name).collect(),
        });
    }

    let mapping = match elevated.first() {
        Some(concept) => FieldMapping::Resolved {
            concept: concept.clone(),
        },
        None => FieldMapping::Unresolved,
    };

    let explanation = format!(
        "Resolved `{field}` under intent `{intent_name}` in perspective `{perspective_name}`: \
         {} elevated, {} suppressed concept(s).",
        elevated.len(),
        suppressed.len()
    );
    tracing::debug!(%field, intent = %intent_name, perspective = %perspective_name,
        elevated = elevated.len(), suppressed = suppressed.len(), "resolved field");

    Ok(QueryPlan {
        intent: intent_name,
        perspective: perspective_name.to_string(),
        field_mappings: vec![FieldMappingEntry {
            field: field.clone(),
            mapping,
        }],
        elevated_concepts: elevated,
        suppressed_concepts: suppressed,
        suggested_joins: snapshot.tables_elevated_under(intent, &field.table),
        explanation,
    })
}
