//! CLI error types.

use adapter_workbook::WorkbookError;
use infra_store::StoreError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file or directory does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A selected position is not in the ingested catalog.
    #[error("Unknown position: {0}")]
    UnknownPosition(String),

    /// No saved project has the given id.
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Workbook could not be read or written.
    #[error(transparent)]
    Workbook(#[from] WorkbookError),

    /// Project store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Output could not be written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV output failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
