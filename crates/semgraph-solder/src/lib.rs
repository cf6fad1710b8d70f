//! Semgraph solder: deterministic compilation of resolved build orders
//! into final query text.
//!
//! - `manifest`: the closed build-order input shape. Projections are a
//!   typed enum (column or a fixed set of aggregates), never raw SQL
//!   fragments, so the emitted text contains only verbs this crate
//!   chooses to write: `SELECT`, `WHERE`, `GROUP BY`.
//! - `solder`: the assembly itself. Pure and deterministic — identical
//!   manifests produce byte-identical text (cacheable, audit-diffable).
//!   Sensitive dimension filters are rewritten through the versioned
//!   firewall digest so raw business values never appear in emitted or
//!   logged query text.
//! - `dialect`: three labeled renderings (relational, property-graph,
//!   document-graph) of one already-resolved path, for operators
//!   verifying that a graph change reads the same regardless of the
//!   backing engine. Documentation/audit output; never executed.

pub mod dialect;
pub mod manifest;
pub mod solder;

pub use dialect::{compile_dialects, DialectRenderings};
pub use manifest::{AggregateFn, BuildManifest, Projection, HASHED_DIMENSIONS};
pub use solder::solder;
