//! Error types for catalog construction and dataset loading

use crate::procedure::ProcedureKey;
use std::path::PathBuf;

/// Errors raised while building a [`Catalog`](crate::Catalog)
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Key is blank after normalization
    #[error("procedure key is empty")]
    EmptyKey,

    /// Two definitions normalize to the same key
    #[error("duplicate procedure key: '{0}'")]
    DuplicateKey(ProcedureKey),

    /// Definition has no steps
    #[error("procedure '{0}' has no steps")]
    EmptySteps(ProcedureKey),

    /// Step ordinal does not match its 1-based position
    #[error("procedure '{key}': step at position {position} carries ordinal {ordinal}")]
    OrdinalMismatch {
        /// Offending procedure
        key: ProcedureKey,
        /// 1-based position in the step list
        position: usize,
        /// Ordinal the step carries
        ordinal: usize,
    },

    /// Dataset file extension is not recognised
    #[error("unsupported dataset format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Dataset document is malformed
    #[error("malformed dataset: {0}")]
    Parse(String),

    /// IO error while reading a dataset file
    #[error("io error reading {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value.to_string())
    }
}

impl From<serde_yaml::Error> for CatalogError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Parse(value.to_string())
    }
}
