//! Semgraph core: the shared vocabulary of the semantic graph engine.
//!
//! This crate is deliberately a leaf: it holds the types every other
//! semgraph crate speaks in, and nothing that does I/O.
//!
//! - `model`: fields, concepts, elevation weights
//! - `error`: the typed error taxonomy (`SemanticError`)
//! - `digest`: the versioned one-way digest used by the solder's
//!   "software firewall" predicates

pub mod digest;
pub mod error;
pub mod model;

pub use digest::{firewall_digest_v1, FIREWALL_DIGEST_V1_HEX_LEN, FIREWALL_DIGEST_V1_SCHEME};
pub use error::SemanticError;
pub use model::{is_elevated, ConceptRef, FieldRef, ELEVATED_WEIGHT};
