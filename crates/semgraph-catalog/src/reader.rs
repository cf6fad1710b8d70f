//! Catalog backends.
//!
//! `CatalogReader` is a capability interface: one implementation per
//! backend, chosen when the `GraphStore` is constructed. There is no
//! "try X, else Y, else empty" fallback chain anywhere — a store reads
//! from exactly the backend it was built with.

use crate::document::CatalogDocument;
use semgraph_core::SemanticError;
use std::fs;
use std::path::{Path, PathBuf};

/// Read access to the five catalog relations.
///
/// Errors split along the spec taxonomy: a backend that cannot be
/// reached is `CatalogUnavailable` (transient, caller may retry with
/// backoff); a backend that answers with unparseable content is
/// `CatalogMalformed` (fatal for the snapshot).
pub trait CatalogReader: Send + Sync {
    fn read_catalog(&self) -> Result<CatalogDocument, SemanticError>;

    /// Human-readable backend identity, for log lines.
    fn describe(&self) -> String;
}

/// File-backed catalog: one JSON document holding all five relations.
///
/// The read is a single bounded filesystem operation; any I/O failure
/// (missing file, permissions) surfaces as `CatalogUnavailable`, any
/// parse failure as `CatalogMalformed`.
#[derive(Debug, Clone)]
pub struct JsonCatalogReader {
    path: PathBuf,
}

impl JsonCatalogReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CatalogReader for JsonCatalogReader {
    fn read_catalog(&self) -> Result<CatalogDocument, SemanticError> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            SemanticError::catalog_unavailable(format!("{}: {e}", self.path.display()))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            SemanticError::catalog_malformed(format!("{}: {e}", self.path.display()))
        })
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}

/// In-memory catalog, for tests and the built-in demo.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    document: CatalogDocument,
}

impl InMemoryCatalog {
    pub fn new(document: CatalogDocument) -> Self {
        Self { document }
    }
}

impl CatalogReader for InMemoryCatalog {
    fn read_catalog(&self) -> Result<CatalogDocument, SemanticError> {
        Ok(self.document.clone())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_unavailable() {
        let reader = JsonCatalogReader::new("/nonexistent/semgraph-catalog.json");
        match reader.read_catalog() {
            Err(SemanticError::CatalogUnavailable { .. }) => {}
            other => panic!("expected CatalogUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_file_is_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{ not json").unwrap();
        let reader = JsonCatalogReader::new(file.path());
        match reader.read_catalog() {
            Err(SemanticError::CatalogMalformed { .. }) => {}
            other => panic!("expected CatalogMalformed, got {other:?}"),
        }
    }

    #[test]
    fn round_trips_a_document() {
        let doc = crate::sample::quality_demo();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&doc).unwrap()).unwrap();
        let reader = JsonCatalogReader::new(file.path());
        assert_eq!(reader.read_catalog().unwrap(), doc);
    }
}
