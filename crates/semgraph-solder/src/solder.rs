//! Deterministic query-text assembly.
//!
//! Assembly order is fixed: projections, FROM, WHERE predicates in
//! parameter-name order, then GROUP BY if any projection aggregates.
//! Identical manifests produce byte-identical text.
//!
//! The software firewall: equality filters on sensitive dimensions
//! (`HASHED_DIMENSIONS`) are emitted as
//! `<alias>.<dim>_hash = '<digest>'` using the versioned
//! `firewall_digest_v1`, against a hash column the backing store is
//! contractually required to populate with the same function. The raw
//! value never appears in the output.

use crate::manifest::{BuildManifest, Projection, HASHED_DIMENSIONS};
use semgraph_core::{firewall_digest_v1, SemanticError};

/// Compile a build manifest into final query text (primary relational
/// dialect). Pure; the only failure mode is an invalid manifest.
pub fn solder(manifest: &BuildManifest) -> Result<String, SemanticError> {
    manifest.validate()?;

    let alias = &manifest.alias;
    let mut text = String::from("SELECT ");

    let rendered: Vec<String> = manifest
        .projections
        .iter()
        .map(|projection| match projection {
            Projection::Column { name } => format!("{alias}.{name}"),
            Projection::Aggregate {
                func,
                column,
                alias: out,
            } => format!("{func}({alias}.{column}) AS {out}"),
        })
        .collect();
    text.push_str(&rendered.join(", "));

    text.push_str(" FROM ");
    if !manifest.target_schema.is_empty() {
        text.push_str(&manifest.target_schema);
        text.push('.');
    }
    text.push_str(&manifest.model_name);
    text.push_str(" AS ");
    text.push_str(alias);

    // BTreeMap iteration gives deterministic predicate order.
    let predicates: Vec<String> = manifest
        .parameters
        .iter()
        .map(|(name, value)| {
            if HASHED_DIMENSIONS.contains(&name.as_str()) {
                format!("{alias}.{name}_hash = '{}'", firewall_digest_v1(value))
            } else {
                format!("{alias}.{name} = '{}'", value.replace('\'', "''"))
            }
        })
        .collect();
    if !predicates.is_empty() {
        text.push_str(" WHERE ");
        text.push_str(&predicates.join(" AND "));
    }

    if manifest.projections.iter().any(Projection::is_aggregate) {
        let dimension = grouping_dimension(manifest)?;
        text.push_str(&format!(" GROUP BY {alias}.{dimension}"));
    }

    tracing::debug!(
        model = %manifest.model_name,
        projections = manifest.projections.len(),
        predicates = predicates.len(),
        "soldered manifest"
    );
    Ok(text)
}

/// The non-aggregated dimension to group an aggregate query by: the
/// plain projected column that appears in the elevated concept's
/// description, falling back to the first plain column. A manifest
/// that aggregates everything has no grouping dimension and is
/// rejected.
fn grouping_dimension(manifest: &BuildManifest) -> Result<&str, SemanticError> {
    let plain: Vec<&str> = manifest
        .projections
        .iter()
        .filter_map(|projection| match projection {
            Projection::Column { name } => Some(name.as_str()),
            Projection::Aggregate { .. } => None,
        })
        .collect();

    let description = manifest.concept.description.to_ascii_lowercase();
    plain
        .iter()
        .find(|name| description.contains(&name.to_ascii_lowercase()))
        .or_else(|| plain.first())
        .copied()
        .ok_or_else(|| {
            SemanticError::invalid_manifest(
                "aggregate projections require at least one plain column to group by",
            )
        })
}
