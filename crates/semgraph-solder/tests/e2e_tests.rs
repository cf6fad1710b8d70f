//! End-to-end: file-backed catalog → cached snapshot → resolution →
//! soldered query text → dialect renderings.

use semgraph_catalog::{sample, GraphStore, JsonCatalogReader};
use semgraph_core::firewall_digest_v1;
use semgraph_solder::{compile_dialects, solder, AggregateFn, BuildManifest, Projection};
use std::collections::BTreeMap;
use std::io::Write;

#[test]
fn catalog_file_to_query_text() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "{}",
        serde_json::to_string(&sample::quality_demo()).unwrap()
    )
    .unwrap();

    let store = GraphStore::new(JsonCatalogReader::new(file.path()));
    let snapshot = store.snapshot().unwrap();

    // Quality reading of severity: audit manifest, hashed filter.
    let plan = semgraph_resolve::resolve(
        &snapshot,
        "non_conformant_materials",
        "severity",
        "audit",
        Some("Quality"),
    )
    .unwrap();
    let concept = plan.resolved_concept().unwrap().clone();
    assert_eq!(concept.name, "MATERIAL_NON_CONFORMANCE");

    let manifest = BuildManifest {
        target_schema: "quality_mart".to_string(),
        model_name: "non_conformant_materials".to_string(),
        alias: "ncm".to_string(),
        concept,
        projections: vec![
            Projection::column("ncm_id"),
            Projection::column("severity"),
        ],
        parameters: BTreeMap::from([("product_line".to_string(), "Electronics".to_string())]),
    };
    let text = solder(&manifest).unwrap();
    assert!(text.contains(&firewall_digest_v1("Electronics")));
    assert!(!text.contains("Electronics"));

    // Finance reading of the same field: aggregate manifest, GROUP BY.
    let plan = semgraph_resolve::resolve(
        &snapshot,
        "non_conformant_materials",
        "severity",
        "audit",
        Some("Finance"),
    )
    .unwrap();
    let concept = plan.resolved_concept().unwrap().clone();
    assert_eq!(concept.name, "FINANCIAL_LIABILITY_NCM");

    let manifest = BuildManifest {
        target_schema: "finance_mart".to_string(),
        model_name: "non_conformant_materials".to_string(),
        alias: "ncm".to_string(),
        concept,
        projections: vec![
            Projection::aggregate(AggregateFn::Sum, "cost_impact", "total_liability"),
            Projection::column("severity"),
        ],
        parameters: BTreeMap::new(),
    };
    let text = solder(&manifest).unwrap();
    assert!(text.ends_with("GROUP BY ncm.severity"));

    // Dialect renderings agree on the path.
    let renderings = compile_dialects(&plan);
    assert!(renderings.relational.contains("audit"));
    assert!(renderings.property_graph.contains("Finance"));
    assert!(renderings.document_graph.contains("severity"));

    // Invalidate and reload keeps answering identically.
    store.invalidate();
    let reloaded = store.snapshot().unwrap();
    let again = semgraph_resolve::resolve(
        &reloaded,
        "non_conformant_materials",
        "severity",
        "audit",
        Some("Finance"),
    )
    .unwrap();
    assert_eq!(again.resolved_concept().unwrap().name, "FINANCIAL_LIABILITY_NCM");
}
