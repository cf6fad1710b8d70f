//! Semgraph resolution algorithms.
//!
//! Three pure functions over an immutable `GraphSnapshot`:
//!
//! - `resolver`: one (table, column, intent) triple → its canonical
//!   business meaning (`QueryPlan`), or one plan per perspective via
//!   `compare_query_plans` when the pair is valid under several.
//! - `scorer`: an unordered field set → a ranked list of intents by how
//!   well each explains the set. A heuristic ranking signal, not a
//!   calibrated probability.
//! - `shape`: best-effort regex extraction of (table, column) references
//!   and structural signals from raw query text, feeding the scorer and
//!   re-weighting its output with deterministic boosts.
//!
//! Nothing here mutates the graph or blocks on I/O; concurrent callers
//! can resolve against the same snapshot freely.

pub mod resolver;
pub mod scorer;
pub mod shape;

pub use resolver::{compare_query_plans, resolve, FieldMapping, FieldMappingEntry, QueryPlan};
pub use scorer::{score_intents, FieldNote, IntentScore, ScoreReport};
pub use shape::{extract_fields_from_text, infer_intents, QueryShape};
