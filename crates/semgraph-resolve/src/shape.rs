//! Shape-based intent inference over raw query text.
//!
//! This is intentionally **not** a SQL parser: it is a small set of
//! regex heuristics that pull (table, column) references and structural
//! signals out of already-drafted query text, feed them to the scorer,
//! and re-weight the result with deterministic boosts.
//!
//! Accuracy caveat (by contract): bare identifiers in the projection
//! clause are re-associated with *every* discovered table, which can
//! over-associate columns to tables that don't own them. Unknown fields
//! are discarded by the scorer with per-field notes, so the failure
//! mode is noise in the notes, not wrong scores. Keep this module at
//! the boundary; the resolver and scorer stay free of text-parsing
//! concerns.
//!
//! Extracted identifiers keep their original case: catalog lookups
//! downstream are exact-match, so lowercasing here would cut off any
//! catalog with mixed-case table or column names. Only SQL keywords are
//! recognized case-insensitively.

use crate::scorer::{score_intents, ScoreReport};
use regex::Regex;
use semgraph_catalog::GraphSnapshot;
use semgraph_core::FieldRef;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:from|join)\s+([A-Za-z_][A-Za-z0-9_]*)").expect("valid table regex")
});
static DOTTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\.([A-Za-z_][A-Za-z0-9_]*)").expect("valid column regex")
});
static PROJECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bselect\b(.*?)\bfrom\b").expect("valid projection regex")
});
static IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("valid identifier regex"));
static AGGREGATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:count|sum|avg|average)\b").expect("valid aggregation regex")
});
static GROUPING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bgroup\s+by\b").expect("valid grouping regex"));

/// Identifiers never treated as projected columns.
const NOISE_WORDS: &[&str] = &[
    "select", "distinct", "all", "as", "from", "where", "group", "by", "order", "join", "on",
    "and", "or", "count", "sum", "avg", "average", "min", "max",
];

/// Structural signals extracted from query text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryShape {
    pub tables: Vec<String>,
    pub fields: Vec<FieldRef>,
    pub has_aggregation: bool,
    pub has_grouping: bool,
    /// Domain terms found in the text ("supplier", "quality", "defect").
    pub domain_terms: Vec<String>,
}

/// Extract tables, column references, and structural signals from raw
/// query text. Best-effort; see the module docs for the accuracy caveat.
pub fn extract_fields_from_text(text: &str) -> QueryShape {
    let mut tables: Vec<String> = Vec::new();
    for capture in TABLE_RE.captures_iter(text) {
        let table = capture[1].to_string();
        if !tables.contains(&table) {
            tables.push(table);
        }
    }

    let mut fields: Vec<FieldRef> = Vec::new();
    let mut push_field = |field: FieldRef| {
        if !fields.contains(&field) {
            fields.push(field);
        }
    };

    // Explicit `table.column` references, anywhere in the text.
    for capture in DOTTED_RE.captures_iter(text) {
        push_field(FieldRef::new(&capture[1], &capture[2]));
    }

    // Bare identifiers in the projection clause, re-associated with each
    // discovered table when no explicit prefix exists.
    if let Some(capture) = PROJECTION_RE.captures(text) {
        for item in capture[1].split(',') {
            if item.contains('.') {
                continue;
            }
            for ident in IDENT_RE.find_iter(item) {
                let column = ident.as_str();
                if NOISE_WORDS.contains(&column.to_ascii_lowercase().as_str()) {
                    continue;
                }
                for table in &tables {
                    push_field(FieldRef::new(table.clone(), column));
                }
            }
        }
    }

    let lower = text.to_ascii_lowercase();
    let mut domain_terms = Vec::new();
    if lower.contains("supplier") {
        domain_terms.push("supplier".to_string());
    }
    if lower.contains("quality") {
        domain_terms.push("quality".to_string());
    }
    if lower.contains("defect") {
        domain_terms.push("defect".to_string());
    }

    QueryShape {
        tables,
        fields,
        has_aggregation: AGGREGATION_RE.is_match(text),
        has_grouping: GROUPING_RE.is_match(text),
        domain_terms,
    }
}

/// Infer intents from raw query text: extract the field set, score it,
/// then apply deterministic confidence boosts for structural and domain
/// signals. Each boost is capped so confidence never exceeds 1.0, and
/// appends an audit string to the intent's explanation.
pub fn infer_intents(snapshot: &GraphSnapshot, text: &str) -> ScoreReport {
    let shape = extract_fields_from_text(text);
    tracing::debug!(
        tables = shape.tables.len(),
        fields = shape.fields.len(),
        aggregation = shape.has_aggregation,
        grouping = shape.has_grouping,
        "extracted query shape"
    );

    let mut report = score_intents(snapshot, &shape.fields);

    for score in &mut report.ranked {
        let name = score.intent.to_ascii_lowercase();
        let analytic = name.contains("analysis") || name.contains("trending");

        if shape.has_aggregation && analytic {
            apply_boost(score, 1.2, "aggregation signal");
        }
        if shape.has_grouping && analytic {
            apply_boost(score, 1.1, "grouping signal");
        }
        for term in &shape.domain_terms {
            if name.contains(term.as_str()) {
                apply_boost(score, 1.3, &format!("domain keyword `{term}`"));
            }
        }
    }

    // Boosts can reorder; re-sort with the same stable tie policy.
    report.ranked.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    report
}

fn apply_boost(score: &mut crate::scorer::IntentScore, factor: f64, reason: &str) {
    score.confidence = (score.confidence * factor).min(1.0);
    score
        .explanation
        .push_str(&format!("; boost {factor:.1}x ({reason})"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_tables_from_from_and_join() {
        let shape = extract_fields_from_text(
            "SELECT s.ontime_rate FROM suppliers s JOIN purchase_orders po ON s.id = po.supplier_id",
        );
        assert_eq!(shape.tables, vec!["suppliers", "purchase_orders"]);
    }

    #[test]
    fn extracts_dotted_references() {
        let shape = extract_fields_from_text("SELECT ncm.severity FROM non_conformant_materials ncm");
        assert!(shape
            .fields
            .contains(&FieldRef::new("ncm", "severity")));
    }

    #[test]
    fn bare_projection_columns_associate_with_every_table() {
        let shape = extract_fields_from_text("SELECT severity FROM non_conformant_materials");
        assert!(shape
            .fields
            .contains(&FieldRef::new("non_conformant_materials", "severity")));
    }

    #[test]
    fn aggregate_keywords_are_not_columns() {
        let shape = extract_fields_from_text("SELECT COUNT(severity) FROM t GROUP BY severity");
        assert!(shape.has_aggregation);
        assert!(shape.has_grouping);
        assert!(!shape.fields.contains(&FieldRef::new("t", "count")));
        assert!(!shape.fields.contains(&FieldRef::new("t", "COUNT")));
    }

    #[test]
    fn mixed_case_identifiers_keep_their_case() {
        let shape =
            extract_fields_from_text("SELECT OnTimeRate, Po.OrderDate FROM Suppliers JOIN Po");
        assert_eq!(shape.tables, vec!["Suppliers", "Po"]);
        assert!(shape.fields.contains(&FieldRef::new("Po", "OrderDate")));
        assert!(shape.fields.contains(&FieldRef::new("Suppliers", "OnTimeRate")));
        assert!(!shape.fields.contains(&FieldRef::new("suppliers", "ontimerate")));
    }

    #[test]
    fn domain_terms_are_detected() {
        let shape = extract_fields_from_text("select defect_description from ncm -- quality check");
        assert!(shape.domain_terms.contains(&"quality".to_string()));
        assert!(shape.domain_terms.contains(&"defect".to_string()));
    }
}
