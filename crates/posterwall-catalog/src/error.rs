//! Catalog errors.

use std::path::PathBuf;

use thiserror::Error;

use posterwall_core::ItemId;

/// Errors that can occur while loading or saving a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file not found.
    #[error("Catalog not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid catalog.
    #[error("Invalid catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two entries share an id.
    #[error("Duplicate item id {id} in catalog")]
    DuplicateId { id: ItemId },

    /// Unsupported catalog version.
    #[error("Unsupported catalog version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

impl CatalogError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_io() {
        let err = CatalogError::io(
            "/missing/catalog.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, CatalogError::NotFound { .. }));

        let err = CatalogError::io(
            "/locked/catalog.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
