//! Probabilistic intent scoring.
//!
//! Given an unordered set of (table, column) pairs, rank every known
//! intent by how well it explains the set. For each intent, each field
//! is matched exactly as the resolver does, restricted to elevated
//! (weight 1.0) edges; confidence is
//!
//! ```text
//! (matched / total) * (total_weight / matched)
//! ```
//!
//! The second factor is 1.0 under the current binary weight scheme and
//! exists so a future non-binary scheme changes the math in one place.
//!
//! This is a **heuristic**, not statistical inference: it claims a
//! monotonic ranking signal, not a calibrated probability. Intents with
//! zero matches are omitted from the result, not scored as zero —
//! absence is not evidence. Ties keep catalog declaration order (stable
//! sort, no hidden randomness).

use semgraph_catalog::{ElevationEdge, GraphSnapshot};
use semgraph_core::{is_elevated, FieldRef};
use serde::{Deserialize, Serialize};

/// One ranked intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentScore {
    pub intent: String,
    pub confidence: f64,
    pub matched_concepts: Vec<String>,
    pub matched_fields: Vec<FieldRef>,
    /// Audit trail; boosts from the inferencer append to it.
    pub explanation: String,
}

/// Per-field annotation for inputs that could not be scored normally.
/// Individual field failures never abort the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNote {
    pub field: FieldRef,
    pub note: String,
}

/// A ranked list plus the per-field annotations of spec'd partial
/// results: unknown fields are noted and excluded from the coverage
/// denominator instead of zeroing the whole ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub ranked: Vec<IntentScore>,
    pub field_notes: Vec<FieldNote>,
}

/// Rank all known intents against a field set.
///
/// An empty input (after dropping unknown fields) yields an empty
/// ranked list — there is nothing to explain, and no division-by-zero
/// fallback score.
pub fn score_intents(snapshot: &GraphSnapshot, fields: &[FieldRef]) -> ScoreReport {
    let mut notes = Vec::new();

    // Dedupe while keeping first-seen order; the input is a set.
    let mut known: Vec<FieldRef> = Vec::new();
    for field in fields {
        if known.contains(field) {
            continue;
        }
        if snapshot.knows_field(field) {
            known.push(field.clone());
        } else {
            notes.push(FieldNote {
                field: field.clone(),
                note: "unknown field; excluded from scoring".to_string(),
            });
        }
    }

    let total = known.len();
    if total == 0 {
        return ScoreReport {
            ranked: Vec::new(),
            field_notes: notes,
        };
    }

    let mut ranked = Vec::new();
    for (intent_id, intent) in snapshot.intents() {
        let mut matched_fields = Vec::new();
        let mut matched_concepts: Vec<String> = Vec::new();
        let mut total_weight = 0.0;

        for field in &known {
            let elevated: Vec<ElevationEdge> = snapshot
                .field_elevations(field, intent_id, None)
                .into_iter()
                .filter(|edge| is_elevated(edge.weight))
                .collect();

            if let Some(ambiguous) = per_perspective_ambiguity(&elevated) {
                notes.push(FieldNote {
                    field: field.clone(),
                    note: format!(
                        "ambiguous elevation under intent `{}` in perspective `{}`; \
                         field not matched",
                        intent.name,
                        snapshot.perspective(ambiguous).name
                    ),
                });
                continue;
            }

            let Some(first) = elevated.first() else {
                continue;
            };
            matched_fields.push(field.clone());
            total_weight += first.weight;
            for edge in &elevated {
                let name = &snapshot.concept(edge.concept).name;
                if !matched_concepts.contains(name) {
                    matched_concepts.push(name.clone());
                }
            }
        }

        let matched = matched_fields.len();
        if matched == 0 {
            continue;
        }

        let coverage = matched as f64 / total as f64;
        let quality = total_weight / matched as f64;
        let confidence = coverage * quality;
        let explanation = format!(
            "matched {matched}/{total} field(s) with mean elevated weight {quality:.2}"
        );
        ranked.push(IntentScore {
            intent: intent.name.clone(),
            confidence,
            matched_concepts,
            matched_fields,
            explanation,
        });
    }

    // Stable: equal confidences keep catalog declaration order.
    ranked.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ScoreReport {
        ranked,
        field_notes: notes,
    }
}

/// If any single perspective carries two elevated edges for this field,
/// that perspective's id — the resolver would refuse this resolution,
/// and so does the scorer.
fn per_perspective_ambiguity(elevated: &[ElevationEdge]) -> Option<usize> {
    for (i, edge) in elevated.iter().enumerate() {
        if elevated[..i].iter().any(|e| e.perspective == edge.perspective) {
            return Some(edge.perspective);
        }
    }
    None
}
