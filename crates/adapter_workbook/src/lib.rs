//! # Adapter Workbook (Adapter Layer)
//!
//! Spreadsheet ingestion and export for the quotation engine.
//!
//! This crate provides:
//! - An in-memory [`Workbook`] model of named cell grids
//! - Header detection for loosely laid out position tables ([`header`])
//! - The ordered parameter mapping rules ([`parameters`])
//! - [`ingest_workbook`]: positions, clients, parameters and pre-selected
//!   quantities from one workbook
//! - Master-data, blank-template and P&L exports ([`export`])
//! - Workbook files as CSV directories ([`csv_store`]) or JSON
//!   ([`json_store`])
//!
//! ## Design Principles
//!
//! - **Best-effort ingestion**: missing sheets or headers contribute
//!   nothing, unreadable numbers read as zero; ingestion never fails
//! - **Round-trip exports**: master data is written with the exact keys the
//!   ingestion rules recognise

#![deny(missing_docs)]

pub mod clients;
pub mod csv_store;
pub mod error;
pub mod export;
pub mod header;
pub mod ingest;
pub mod json_store;
pub mod parameters;
pub mod positions;
pub mod workbook;

use std::path::Path;

pub use error::WorkbookError;
pub use export::{blank_template, export_master_data, export_profit_and_loss, ReportHeader};
pub use header::{HeaderMatch, HeaderSchema, RowClass};
pub use ingest::{ingest_workbook, IngestedData};
pub use parameters::{ParameterPatch, ParameterRule, PARAMETER_RULES};
pub use workbook::{Cell, Sheet, Workbook};

/// Loads a workbook from a CSV directory or a `.json` file.
pub fn load_workbook(path: &Path) -> Result<Workbook, WorkbookError> {
    if path.is_dir() {
        csv_store::load_dir(path)
    } else if is_json(path) {
        json_store::load(path)
    } else {
        Err(WorkbookError::UnsupportedFormat(path.to_path_buf()))
    }
}

/// Saves a workbook to a `.json` file, or otherwise as a CSV directory.
pub fn save_workbook(workbook: &Workbook, path: &Path) -> Result<(), WorkbookError> {
    if is_json(path) {
        json_store::save(workbook, path)
    } else {
        csv_store::save_dir(workbook, path)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
