//! Typed error taxonomy for the resolution engine.
//!
//! Everything here is a *returned* result, never a panic, so callers that
//! compose many resolutions (the scorer over many fields) can continue
//! past individual failures and report partial results.
//!
//! Note what is **not** here: an unresolved field mapping. "This intent
//! has no opinion about this field" is a legitimate terminal state
//! (`FieldMapping::Unresolved` in `semgraph-resolve`), not an error.

use crate::model::FieldRef;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    /// The backing catalog cannot be reached. Transient; retryable by the
    /// caller with backoff. Never retried internally.
    #[error("catalog unavailable: {reason}")]
    CatalogUnavailable { reason: String },

    /// The catalog was reached but its contents violate the schema
    /// (missing relations, dangling references, negative weights). Fatal
    /// for the snapshot; no partial graph is ever used.
    #[error("catalog malformed: {reason}")]
    CatalogMalformed { reason: String },

    /// Caller named an intent the catalog does not know.
    #[error("unknown intent `{name}`")]
    UnknownIntent { name: String },

    /// Caller named a field the catalog does not know.
    #[error("unknown field `{field}`")]
    UnknownField { field: FieldRef },

    /// Caller named a perspective the catalog does not know, or one the
    /// named intent does not operate in. `known` lists the intent's
    /// declared perspectives so the caller can correct the request.
    #[error("unknown perspective `{name}` for intent `{intent}`; intent operates in {known:?}")]
    UnknownPerspective {
        name: String,
        intent: String,
        known: Vec<String>,
    },

    /// Data-integrity violation: two concepts both carry the elevated
    /// weight for one (intent, perspective, field) resolution. Surfaced
    /// as a hard error, never silently resolved by picking one.
    #[error(
        "ambiguous elevation for `{field}` under intent `{intent}` in perspective \
         `{perspective}`: {concepts:?} all carry weight 1.0"
    )]
    AmbiguousElevation {
        field: FieldRef,
        intent: String,
        perspective: String,
        concepts: Vec<String>,
    },

    /// A (field, intent) pair is valid under more than one perspective and
    /// the caller supplied none. The resolver refuses to guess; use
    /// `compare_query_plans` or pass a perspective.
    #[error(
        "field `{field}` under intent `{intent}` is valid in multiple perspectives \
         {perspectives:?}; supply one, or compare plans"
    )]
    AmbiguousPerspective {
        field: FieldRef,
        intent: String,
        perspectives: Vec<String>,
    },

    /// A solder manifest that cannot be assembled (empty alias, empty
    /// model name, no projections).
    #[error("invalid manifest: {reason}")]
    InvalidManifest { reason: String },
}

impl SemanticError {
    pub fn catalog_unavailable(reason: impl Into<String>) -> Self {
        Self::CatalogUnavailable {
            reason: reason.into(),
        }
    }

    pub fn catalog_malformed(reason: impl Into<String>) -> Self {
        Self::CatalogMalformed {
            reason: reason.into(),
        }
    }

    pub fn invalid_manifest(reason: impl Into<String>) -> Self {
        Self::InvalidManifest {
            reason: reason.into(),
        }
    }
}
