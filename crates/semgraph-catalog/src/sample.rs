//! Built-in sample catalog: a small quality-management domain.
//!
//! Used by the CLI `demo` command and by the test suites across the
//! workspace. It is deliberately small but exercises every resolution
//! shape: elevated and suppressed concepts, a field that is valid under
//! two perspectives of the same intent, suggested joins, and intents
//! with overlapping vocabulary for the scorer.

use crate::document::{
    CatalogDocument, ConceptRow, ElevationRow, FieldBindingRow, IntentRow, PerspectiveRow,
};

fn concept(name: &str, description: &str) -> ConceptRow {
    ConceptRow {
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn binding(table: &str, column: &str, concept: &str) -> FieldBindingRow {
    FieldBindingRow {
        table: table.to_string(),
        column: column.to_string(),
        concept: concept.to_string(),
    }
}

fn elevation(intent: &str, perspective: &str, concept: &str, weight: f64) -> ElevationRow {
    ElevationRow {
        intent: intent.to_string(),
        perspective: perspective.to_string(),
        concept: concept.to_string(),
        weight,
    }
}

/// The quality-management demo catalog.
pub fn quality_demo() -> CatalogDocument {
    CatalogDocument {
        intents: vec![
            IntentRow {
                name: "audit".to_string(),
                perspectives: vec!["Quality".to_string(), "Finance".to_string()],
            },
            IntentRow {
                name: "cost_trend_analysis".to_string(),
                perspectives: vec!["Finance".to_string()],
            },
            IntentRow {
                name: "supplier_review".to_string(),
                perspectives: vec!["Quality".to_string(), "Finance".to_string()],
            },
        ],
        perspectives: vec![
            PerspectiveRow {
                name: "Quality".to_string(),
                concepts: vec![
                    "MATERIAL_NON_CONFORMANCE".to_string(),
                    "OPERATIONAL_DISRUPTION".to_string(),
                    "SUPPLIER_PERFORMANCE".to_string(),
                ],
            },
            PerspectiveRow {
                name: "Finance".to_string(),
                concepts: vec![
                    "FINANCIAL_LIABILITY_NCM".to_string(),
                    "SUPPLIER_SPEND".to_string(),
                ],
            },
        ],
        concepts: vec![
            concept(
                "MATERIAL_NON_CONFORMANCE",
                "Defective material event, tracked by severity and disposition",
            ),
            concept(
                "OPERATIONAL_DISRUPTION",
                "Production interruption caused by a quality escape",
            ),
            concept(
                "FINANCIAL_LIABILITY_NCM",
                "Cost impact of non-conformances, aggregated by severity",
            ),
            concept(
                "SUPPLIER_PERFORMANCE",
                "On-time delivery and defect record of a supplier",
            ),
            concept(
                "SUPPLIER_SPEND",
                "Contract value committed per supplier",
            ),
        ],
        field_bindings: vec![
            binding("non_conformant_materials", "ncm_id", "MATERIAL_NON_CONFORMANCE"),
            binding(
                "non_conformant_materials",
                "defect_description",
                "MATERIAL_NON_CONFORMANCE",
            ),
            binding("non_conformant_materials", "severity", "MATERIAL_NON_CONFORMANCE"),
            binding("non_conformant_materials", "severity", "FINANCIAL_LIABILITY_NCM"),
            binding("non_conformant_materials", "severity", "OPERATIONAL_DISRUPTION"),
            binding("non_conformant_materials", "cost_impact", "FINANCIAL_LIABILITY_NCM"),
            binding(
                "non_conformant_materials",
                "product_line",
                "MATERIAL_NON_CONFORMANCE",
            ),
            binding("suppliers", "supplier_name", "SUPPLIER_PERFORMANCE"),
            binding("suppliers", "ontime_rate", "SUPPLIER_PERFORMANCE"),
            binding("suppliers", "contract_value", "SUPPLIER_SPEND"),
        ],
        elevations: vec![
            elevation("audit", "Quality", "MATERIAL_NON_CONFORMANCE", 1.0),
            elevation("audit", "Quality", "OPERATIONAL_DISRUPTION", 0.4),
            elevation("audit", "Quality", "SUPPLIER_PERFORMANCE", 1.0),
            elevation("audit", "Finance", "FINANCIAL_LIABILITY_NCM", 1.0),
            elevation("cost_trend_analysis", "Finance", "FINANCIAL_LIABILITY_NCM", 1.0),
            elevation("cost_trend_analysis", "Finance", "SUPPLIER_SPEND", 0.6),
            elevation("supplier_review", "Quality", "SUPPLIER_PERFORMANCE", 1.0),
            elevation("supplier_review", "Finance", "SUPPLIER_SPEND", 1.0),
        ],
    }
}
