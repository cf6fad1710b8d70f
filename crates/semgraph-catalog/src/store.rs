//! Cached graph store.
//!
//! Lifecycle: load on first use, cache for the process lifetime,
//! explicit `invalidate()` when the backing catalog changes. Readers
//! take an `Arc` to the snapshot current at call start; a concurrent
//! invalidate-and-reload never retroactively affects an in-flight
//! resolution.

use crate::reader::CatalogReader;
use crate::snapshot::GraphSnapshot;
use parking_lot::RwLock;
use semgraph_core::SemanticError;
use std::sync::Arc;

pub struct GraphStore<R: CatalogReader> {
    reader: R,
    cached: RwLock<Option<Arc<GraphSnapshot>>>,
}

impl<R: CatalogReader> GraphStore<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            cached: RwLock::new(None),
        }
    }

    /// The current snapshot, loading from the backing catalog if no
    /// snapshot is cached. A failed load caches nothing; no partial
    /// graph is ever visible.
    pub fn snapshot(&self) -> Result<Arc<GraphSnapshot>, SemanticError> {
        if let Some(snapshot) = self.cached.read().clone() {
            return Ok(snapshot);
        }

        // Writer path: losing the race to another loader is fine, use
        // whatever they installed.
        let mut slot = self.cached.write();
        if let Some(snapshot) = slot.clone() {
            return Ok(snapshot);
        }

        let document = self.reader.read_catalog()?;
        let snapshot = Arc::new(GraphSnapshot::build(&document)?);
        tracing::info!(
            backend = %self.reader.describe(),
            intents = snapshot.intent_count(),
            perspectives = snapshot.perspective_count(),
            concepts = snapshot.concept_count(),
            bindings = snapshot.binding_count(),
            elevations = snapshot.elevation_count(),
            "loaded semantic graph snapshot"
        );
        *slot = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Drop the cached snapshot; the next `snapshot()` call reloads.
    /// In-flight readers keep their `Arc` untouched.
    pub fn invalidate(&self) {
        tracing::debug!(backend = %self.reader.describe(), "invalidating snapshot cache");
        *self.cached.write() = None;
    }
}
