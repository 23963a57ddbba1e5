//! Export command implementation
//!
//! Computes a quotation and writes the P&L statement and detailed matrix.

use std::path::Path;

use adapter_workbook::{export_profit_and_loss, save_workbook, ReportHeader};
use chrono::Utc;
use quote_engine::calculate_quotation;
use tracing::info;

use super::{prepare_quotation, Selection};
use crate::config::QuotationConfig;
use crate::Result;

/// Run the export command
pub fn run(
    workbook: &Path,
    output: &Path,
    selections: &[Selection],
    reference: &str,
    client: &str,
    config: &QuotationConfig,
) -> Result<()> {
    let quotation = prepare_quotation(workbook, selections, &config.parameters)?;
    let result = calculate_quotation(&quotation.params, quotation.roster.as_slice());

    let header = ReportHeader {
        reference: reference.to_string(),
        client: client.to_string(),
        duration: quotation.params.duration,
        date: Utc::now().date_naive(),
    };
    save_workbook(&export_profit_and_loss(&result, &header), output)?;

    info!(
        "P&L exported: revenue {:.2}, cost {:.2}",
        result.total_revenue, result.total_cost
    );
    println!(
        "P&L statement written to {} (revenue {})",
        output.display(),
        config.currency.format_money(result.total_revenue)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::write_sample_workbook;
    use adapter_workbook::export::{DETAILED_MATRIX_SHEET, PNL_SHEET};
    use adapter_workbook::load_workbook;

    #[test]
    fn test_export_writes_both_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let workbook = write_sample_workbook(dir.path());
        let output = dir.path().join("pnl");

        run(&workbook, &output, &[], "Q-7", "Acme", &QuotationConfig::default()).unwrap();

        let exported = load_workbook(&output).unwrap();
        let pnl = exported.sheet(PNL_SHEET).unwrap();
        assert_eq!(pnl.cell(1, 1).as_text(), "Q-7");
        assert_eq!(pnl.cell(2, 1).as_text(), "Acme");
        let matrix = exported.sheet(DETAILED_MATRIX_SHEET).unwrap();
        assert_eq!(matrix.cell(1, 0).as_text(), "Welder");
    }
}
