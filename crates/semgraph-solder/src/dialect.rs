//! Cross-dialect rendering of one resolved path.
//!
//! Three textual representations of the same resolution — relational,
//! property-graph, document-graph — so operators can eyeball that a
//! catalog change reads consistently regardless of which storage engine
//! ultimately backs the graph. Pure template expansion over an
//! already-resolved `QueryPlan`; no new resolution happens here and
//! nothing is executed.

use semgraph_core::ELEVATED_WEIGHT;
use semgraph_resolve::QueryPlan;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectRenderings {
    pub relational: String,
    pub property_graph: String,
    pub document_graph: String,
}

/// Render the plan's resolution path in all three dialects.
pub fn compile_dialects(plan: &QueryPlan) -> DialectRenderings {
    let (table, column) = match plan.field() {
        Some(field) => (field.table.as_str(), field.column.as_str()),
        None => ("", ""),
    };
    let intent = &plan.intent;
    let perspective = &plan.perspective;

    let relational = format!(
        "SELECT c.name FROM concepts c \
         JOIN field_bindings fb ON fb.concept = c.name \
         JOIN elevations e ON e.concept = c.name \
         WHERE fb.table_name = '{table}' AND fb.column_name = '{column}' \
         AND e.intent = '{intent}' AND e.perspective = '{perspective}' \
         AND e.weight = {weight}",
        weight = ELEVATED_WEIGHT,
    );

    let property_graph = format!(
        "MATCH (f:Field {{table: '{table}', column: '{column}'}})-[:MEANS]->(c:Concept)\
         <-[e:ELEVATES {{weight: {weight}}}]-(i:Intent {{name: '{intent}'}}) \
         WHERE e.perspective = '{perspective}' RETURN c.name",
        weight = ELEVATED_WEIGHT,
    );

    let document_graph = format!(
        "g.V().hasLabel('field').has('table', '{table}').has('column', '{column}')\
         .out('means').where(__.in('elevates')\
         .has('name', '{intent}').outE('elevates')\
         .has('perspective', '{perspective}').has('weight', {weight})).values('name')",
        weight = ELEVATED_WEIGHT,
    );

    DialectRenderings {
        relational,
        property_graph,
        document_graph,
    }
}
