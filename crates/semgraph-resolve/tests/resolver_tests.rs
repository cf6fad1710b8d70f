//! Resolver behavior against the built-in quality-domain catalog.

use semgraph_catalog::{sample, GraphSnapshot};
use semgraph_core::{FieldRef, SemanticError};
use semgraph_resolve::{compare_query_plans, resolve, FieldMapping, QueryPlan};

fn snapshot() -> GraphSnapshot {
    GraphSnapshot::build(&sample::quality_demo()).unwrap()
}

#[test]
fn severity_under_audit_quality_resolves_to_material_non_conformance() {
    let snapshot = snapshot();
    let plan = resolve(
        &snapshot,
        "non_conformant_materials",
        "severity",
        "audit",
        Some("Quality"),
    )
    .unwrap();

    assert_eq!(plan.intent, "audit");
    assert_eq!(plan.perspective, "Quality");
    assert_eq!(
        plan.resolved_concept().unwrap().name,
        "MATERIAL_NON_CONFORMANCE"
    );
    assert_eq!(plan.elevated_concepts.len(), 1);
    assert_eq!(plan.suppressed_concepts.len(), 1);
    assert_eq!(plan.suppressed_concepts[0].name, "OPERATIONAL_DISRUPTION");
}

#[test]
fn severity_under_audit_finance_resolves_to_financial_liability() {
    let snapshot = snapshot();
    let plan = resolve(
        &snapshot,
        "non_conformant_materials",
        "severity",
        "audit",
        Some("Finance"),
    )
    .unwrap();
    assert_eq!(plan.resolved_concept().unwrap().name, "FINANCIAL_LIABILITY_NCM");
}

#[test]
fn suppressed_never_equals_the_resolved_mapping() {
    let snapshot = snapshot();
    for table in ["non_conformant_materials", "suppliers"] {
        for field in snapshot.fields_of(table) {
            for intent in ["audit", "cost_trend_analysis", "supplier_review"] {
                let Ok(plans) =
                    compare_query_plans(&snapshot, &field.table, &field.column, intent)
                else {
                    continue;
                };
                for plan in plans {
                    if let Some(resolved) = plan.resolved_concept() {
                        assert!(
                            !plan.suppressed_concepts.contains(resolved),
                            "{field} under {intent}: resolved concept also suppressed"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn multi_perspective_field_without_hint_is_ambiguous() {
    let snapshot = snapshot();
    let err = resolve(
        &snapshot,
        "non_conformant_materials",
        "severity",
        "audit",
        None,
    )
    .unwrap_err();
    match err {
        SemanticError::AmbiguousPerspective { perspectives, .. } => {
            assert_eq!(perspectives, vec!["Quality", "Finance"]);
        }
        other => panic!("expected AmbiguousPerspective, got {other:?}"),
    }
}

#[test]
fn misspelled_perspective_is_an_error_not_a_fabricated_plan() {
    let snapshot = snapshot();
    let err = resolve(
        &snapshot,
        "non_conformant_materials",
        "severity",
        "audit",
        Some("Qality"),
    )
    .unwrap_err();
    match err {
        SemanticError::UnknownPerspective { name, intent, known } => {
            assert_eq!(name, "Qality");
            assert_eq!(intent, "audit");
            assert_eq!(known, vec!["Quality", "Finance"]);
        }
        other => panic!("expected UnknownPerspective, got {other:?}"),
    }
}

#[test]
fn perspective_outside_the_intent_is_an_error() {
    let snapshot = snapshot();
    // `Quality` exists in the catalog, but `cost_trend_analysis` only
    // declares `Finance`; resolving under an undeclared perspective
    // would be as misleading as a typo.
    let err = resolve(
        &snapshot,
        "non_conformant_materials",
        "cost_impact",
        "cost_trend_analysis",
        Some("Quality"),
    )
    .unwrap_err();
    match err {
        SemanticError::UnknownPerspective { known, .. } => {
            assert_eq!(known, vec!["Finance"]);
        }
        other => panic!("expected UnknownPerspective, got {other:?}"),
    }
}

#[test]
fn compare_returns_one_plan_per_perspective() {
    let snapshot = snapshot();
    let plans = compare_query_plans(
        &snapshot,
        "non_conformant_materials",
        "severity",
        "audit",
    )
    .unwrap();
    assert_eq!(plans.len(), 2);
    assert_eq!(plans[0].perspective, "Quality");
    assert_eq!(plans[1].perspective, "Finance");
    assert_ne!(
        plans[0].resolved_concept().unwrap().name,
        plans[1].resolved_concept().unwrap().name
    );
}

#[test]
fn single_perspective_field_resolves_without_hint() {
    let snapshot = snapshot();
    let plan = resolve(
        &snapshot,
        "non_conformant_materials",
        "cost_impact",
        "cost_trend_analysis",
        None,
    )
    .unwrap();
    assert_eq!(plan.perspective, "Finance");
    assert_eq!(plan.resolved_concept().unwrap().name, "FINANCIAL_LIABILITY_NCM");
}

#[test]
fn intent_with_no_opinion_is_unresolved_not_an_error() {
    let snapshot = snapshot();
    // supplier_review has no elevation touching cost_impact's concepts
    // in any perspective where they are bound... cost_impact binds only
    // FINANCIAL_LIABILITY_NCM, which supplier_review never elevates.
    let plan = resolve(
        &snapshot,
        "non_conformant_materials",
        "cost_impact",
        "supplier_review",
        None,
    )
    .unwrap();
    assert_eq!(
        plan.field_mappings[0].mapping,
        FieldMapping::Unresolved
    );
    assert!(plan.elevated_concepts.is_empty());
}

#[test]
fn suggested_joins_cover_other_elevated_tables() {
    let snapshot = snapshot();
    let plan = resolve(
        &snapshot,
        "non_conformant_materials",
        "severity",
        "audit",
        Some("Quality"),
    )
    .unwrap();
    // audit also elevates SUPPLIER_PERFORMANCE, bound in `suppliers`.
    assert_eq!(plan.suggested_joins, vec!["suppliers"]);

    let plan = resolve(&snapshot, "suppliers", "ontime_rate", "supplier_review", Some("Quality"))
        .unwrap();
    assert!(!plan.suggested_joins.contains(&"suppliers".to_string()));
}

#[test]
fn unknown_intent_and_field_are_reported() {
    let snapshot = snapshot();
    assert!(matches!(
        resolve(&snapshot, "suppliers", "ontime_rate", "no_such_intent", None),
        Err(SemanticError::UnknownIntent { .. })
    ));
    assert!(matches!(
        resolve(&snapshot, "suppliers", "no_such_column", "audit", None),
        Err(SemanticError::UnknownField { .. })
    ));
}

#[test]
fn double_elevation_is_a_hard_error() {
    let mut doc = sample::quality_demo();
    // Second elevated concept for severity under (audit, Quality):
    // severity already binds OPERATIONAL_DISRUPTION, so raising that
    // edge to 1.0 violates the uniqueness invariant.
    for row in &mut doc.elevations {
        if row.concept == "OPERATIONAL_DISRUPTION" {
            row.weight = 1.0;
        }
    }
    let snapshot = GraphSnapshot::build(&doc).unwrap();
    let err = resolve(
        &snapshot,
        "non_conformant_materials",
        "severity",
        "audit",
        Some("Quality"),
    )
    .unwrap_err();
    match err {
        SemanticError::AmbiguousElevation { concepts, .. } => {
            assert_eq!(concepts.len(), 2);
        }
        other => panic!("expected AmbiguousElevation, got {other:?}"),
    }
}

#[test]
fn accessors_tolerate_a_plan_with_no_mappings() {
    // The struct's fields are public; a caller can build a plan the
    // resolver never would. Accessors must stay total.
    let plan = QueryPlan {
        intent: "audit".to_string(),
        perspective: "Quality".to_string(),
        field_mappings: Vec::new(),
        elevated_concepts: Vec::new(),
        suppressed_concepts: Vec::new(),
        suggested_joins: Vec::new(),
        explanation: String::new(),
    };
    assert_eq!(plan.field(), None);
    assert_eq!(plan.resolved_concept(), None);
}

#[test]
fn explanation_counts_are_deterministic() {
    let snapshot = snapshot();
    let a = resolve(&snapshot, "non_conformant_materials", "severity", "audit", Some("Quality"))
        .unwrap();
    let b = resolve(&snapshot, "non_conformant_materials", "severity", "audit", Some("Quality"))
        .unwrap();
    assert_eq!(a.explanation, b.explanation);
    assert!(a.explanation.contains("1 elevated"));
    assert!(a.explanation.contains("1 suppressed"));
}
