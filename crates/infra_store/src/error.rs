//! Store errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by project stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("Store I/O error on {path}: {source}")]
    Io {
        /// Backing file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The backing file does not hold a project list.
    #[error("Corrupt project store {path}: {source}")]
    Corrupt {
        /// Backing file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// The project holds numbers that cannot be stored.
    #[error("Project holds non-finite values in {}", fields.join(", "))]
    NonFinite {
        /// Offending fields
        fields: Vec<String>,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
