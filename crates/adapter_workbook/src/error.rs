//! Workbook IO errors.
//!
//! Ingestion itself never fails; only reading and writing workbook files
//! does.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or saving a workbook.
#[derive(Error, Debug)]
pub enum WorkbookError {
    /// Filesystem failure on a specific path.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed or unwritable CSV.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: csv::Error,
    },

    /// Malformed JSON workbook.
    #[error("JSON error in {path}: {source}")]
    Json {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// The workbook path is not in a supported format.
    #[error("Unsupported workbook path: {0} (expected a directory of CSV files or a .json file)")]
    UnsupportedFormat(PathBuf),

    /// A sheet name cannot be used as a file name.
    #[error("Sheet name cannot be stored as a file: {0:?}")]
    InvalidSheetName(String),
}

impl WorkbookError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
