//! Master-data command implementation
//!
//! Re-exports the positions, clients and parameters ingested from a
//! workbook in the canonical layout.

use std::path::Path;

use adapter_workbook::{export_master_data, ingest_workbook, load_workbook, save_workbook};
use tracing::info;

use crate::config::QuotationConfig;
use crate::{CliError, Result};

/// Run the master-data command
pub fn run(workbook: &Path, output: &Path, config: &QuotationConfig) -> Result<()> {
    if !workbook.exists() {
        return Err(CliError::FileNotFound(workbook.display().to_string()));
    }

    let data = ingest_workbook(&load_workbook(workbook)?);
    let params = data.params(&config.parameters);
    save_workbook(&export_master_data(&data.catalog, &data.clients, &params), output)?;

    info!(
        "Master data exported: {} positions, {} clients",
        data.catalog.len(),
        data.clients.len()
    );
    println!("Master data written to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::write_sample_workbook;

    #[test]
    fn test_master_data_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let workbook = write_sample_workbook(dir.path());
        let output = dir.path().join("master.json");
        let config = QuotationConfig::default();

        run(&workbook, &output, &config).unwrap();

        let data = ingest_workbook(&load_workbook(&output).unwrap());
        assert_eq!(data.catalog.len(), 2);
        assert_eq!(data.params(&config.parameters).margin, 20.0);
        // Quantities are not part of master data
        assert!(data.initial_selections.is_empty());
    }
}
