//! Semgraph catalog layer: from a backing catalog to an immutable,
//! cached in-memory semantic graph.
//!
//! Three pieces, read-mostly by design:
//!
//! - `document`: the five logical relations a catalog backend serves
//!   (intents, perspectives, concepts, field bindings, elevations),
//!   parsed with serde and then semantically checked.
//! - `reader`: the `CatalogReader` capability trait, one implementation
//!   per backend, selected at construction time — never branched on at
//!   call time.
//! - `snapshot` / `store`: the arena-shaped `GraphSnapshot` built once
//!   per load, and the `GraphStore` cache around it
//!   (load-on-first-use, explicit `invalidate()`, single writer /
//!   many readers sharing one `Arc` snapshot).
//!
//! No automatic staleness detection: when the backing catalog changes,
//! the owner calls `invalidate()`.

pub mod document;
pub mod reader;
pub mod sample;
pub mod snapshot;
pub mod store;

pub use document::{
    CatalogDocument, ConceptRow, ElevationRow, FieldBindingRow, IntentRow, PerspectiveRow,
};
pub use reader::{CatalogReader, InMemoryCatalog, JsonCatalogReader};
pub use snapshot::{
    ConceptId, ElevationEdge, GraphSnapshot, IntentId, IntentNode, PerspectiveId, PerspectiveNode,
};
pub use store::GraphStore;
