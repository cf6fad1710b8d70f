//! Build-order manifests.
//!
//! A manifest is produced upstream by whatever picked an intent and
//! perspective (a planner, an LLM-driven caller); the solder treats it
//! as data. The projection surface is deliberately closed: a column
//! name or one of three aggregate templates. Anything else does not
//! deserialize, which is the first line of the no-raw-fragments
//! guarantee.

use semgraph_core::{ConceptRef, SemanticError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Parameter names treated as sensitive product/category dimensions.
/// Equality filters on these are emitted as firewall-digest
/// comparisons against the backing store's `<name>_hash` column.
pub const HASHED_DIMENSIONS: &[&str] = &[
    "product_line",
    "product_category",
    "product_family",
    "category",
];

/// The closed aggregate template set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateFn {
    Count,
    Sum,
    Avg,
}

impl fmt::Display for AggregateFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            AggregateFn::Count => "COUNT",
            AggregateFn::Sum => "SUM",
            AggregateFn::Avg => "AVG",
        };
        f.write_str(keyword)
    }
}

/// One projected expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Projection {
    /// A plain column of the target model.
    Column { name: String },
    /// An aggregate over a column, with an output alias.
    Aggregate {
        func: AggregateFn,
        column: String,
        alias: String,
    },
}

impl Projection {
    pub fn column(name: impl Into<String>) -> Self {
        Projection::Column { name: name.into() }
    }

    pub fn aggregate(func: AggregateFn, column: impl Into<String>, alias: impl Into<String>) -> Self {
        Projection::Aggregate {
            func,
            column: column.into(),
            alias: alias.into(),
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Projection::Aggregate { .. })
    }
}

/// A resolved build order: everything the solder needs to emit final
/// query text, and nothing it would have to resolve itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildManifest {
    pub target_schema: String,
    pub model_name: String,
    pub alias: String,
    /// The elevated concept this build order serves. Its description
    /// drives GROUP BY dimension selection.
    pub concept: ConceptRef,
    pub projections: Vec<Projection>,
    /// Filter parameters, name → raw value. Kept in a `BTreeMap` so
    /// predicate order is deterministic.
    pub parameters: BTreeMap<String, String>,
}

impl BuildManifest {
    /// Structural validation: identifiers must be identifier-shaped
    /// (the second line of the no-raw-fragments guarantee) and the
    /// manifest must actually describe a query.
    pub fn validate(&self) -> Result<(), SemanticError> {
        if self.model_name.is_empty() || self.alias.is_empty() {
            return Err(SemanticError::invalid_manifest(
                "model name and alias must be non-empty",
            ));
        }
        if self.projections.is_empty() {
            return Err(SemanticError::invalid_manifest("no projections"));
        }
        for name in [&self.model_name, &self.alias] {
            check_identifier(name)?;
        }
        if !self.target_schema.is_empty() {
            check_identifier(&self.target_schema)?;
        }
        for projection in &self.projections {
            match projection {
                Projection::Column { name } => check_identifier(name)?,
                Projection::Aggregate { column, alias, .. } => {
                    check_identifier(column)?;
                    check_identifier(alias)?;
                }
            }
        }
        for name in self.parameters.keys() {
            check_identifier(name)?;
        }
        Ok(())
    }
}

fn check_identifier(name: &str) -> Result<(), SemanticError> {
    let mut chars = name.chars();
    let head_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if head_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(SemanticError::invalid_manifest(format!(
            "`{name}` is not a valid identifier"
        )))
    }
}
