//! Quote command implementation
//!
//! Ingests a workbook, computes the quotation and prints it.

use std::io::{self, Write};
use std::path::Path;

use adapter_workbook::export::DETAILED_MATRIX_HEADERS;
use clap::ValueEnum;
use quote_core::currency::{format_number, format_percent};
use quote_core::Currency;
use quote_engine::{calculate_quotation, CalculationResult, MatrixRow, RowKind};
use tracing::info;

use super::{prepare_quotation, Selection};
use crate::config::QuotationConfig;
use crate::Result;

/// Output formats of the quote command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Cost and revenue matrix with a summary
    Table,
    /// Full calculation result
    Json,
    /// Detailed per-line breakdown
    Csv,
}

/// Run the quote command
pub fn run(
    workbook: &Path,
    selections: &[Selection],
    format: OutputFormat,
    currency: Option<Currency>,
    config: &QuotationConfig,
) -> Result<()> {
    info!("Computing quotation for {}", workbook.display());

    let quotation = prepare_quotation(workbook, selections, &config.parameters)?;
    let result = calculate_quotation(&quotation.params, quotation.roster.as_slice());
    let currency = currency.unwrap_or(config.currency);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => write_table(&mut out, &result, currency)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &result)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_breakdown_csv(&mut out, &result)?,
    }
    Ok(())
}

fn cell_text(row: &MatrixRow, value: Option<f64>, currency: Currency) -> String {
    match (row.kind, value) {
        (_, None) => String::new(),
        (RowKind::Money, Some(v)) => currency.format_money(v),
        (_, Some(v)) => format_number(v),
    }
}

fn border(out: &mut impl Write, widths: &[usize], left: char, mid: char, right: char) -> io::Result<()> {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    writeln!(out, "{left}{}{right}", segments.join(&mid.to_string()))
}

fn line(out: &mut impl Write, widths: &[usize], cells: &[String]) -> io::Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &w))| {
            if i == 0 {
                format!(" {cell:<w$} ")
            } else {
                format!(" {cell:>w$} ")
            }
        })
        .collect();
    writeln!(out, "│{}│", padded.join("│"))
}

/// Writes the matrix as a box-drawn table followed by the totals.
pub fn write_table(out: &mut impl Write, result: &CalculationResult, currency: Currency) -> io::Result<()> {
    if result.detailed_breakdown.is_empty() {
        writeln!(out, "No positions selected.")?;
        return Ok(());
    }

    let mut header = vec!["Item".to_string()];
    header.extend(result.detailed_breakdown.iter().map(|r| r.position.clone()));
    header.push("Total".to_string());

    let body: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.label.clone()];
            cells.extend(row.values.iter().map(|v| match v.as_f64() {
                Some(n) => cell_text(row, Some(n), currency),
                None => v.to_string(),
            }));
            cells.push(cell_text(row, row.total, currency));
            cells
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for cells in &body {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.chars().count());
        }
    }

    border(out, &widths, '┌', '┬', '┐')?;
    line(out, &widths, &header)?;
    border(out, &widths, '├', '┼', '┤')?;
    for cells in &body {
        line(out, &widths, cells)?;
    }
    border(out, &widths, '└', '┴', '┘')?;

    writeln!(out)?;
    writeln!(out, "Total revenue:  {}", currency.format_money(result.total_revenue))?;
    writeln!(out, "Total cost:     {}", currency.format_money(result.total_cost))?;
    writeln!(out, "Gross profit:   {}", currency.format_money(result.gross_profit))?;
    writeln!(out, "Margin:         {}", format_percent(result.margin_percent))?;
    Ok(())
}

/// Writes the detailed breakdown as CSV.
pub fn write_breakdown_csv(out: &mut impl Write, result: &CalculationResult) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(DETAILED_MATRIX_HEADERS)?;
    for row in &result.detailed_breakdown {
        let numbers = [
            f64::from(row.qty),
            row.duration,
            row.working_days,
            row.base_salary,
            row.allowances_total,
            row.benefits_total,
            row.company_overheads_total,
            row.sub_con_alloc_total,
            row.coordination_total,
            row.one_off_total,
            row.total_cost,
            row.target_margin,
            row.bg_rate,
            row.unit_rate,
            row.revenue,
            row.profit,
        ];
        let mut record = vec![row.position.clone()];
        record.extend(numbers.iter().map(|n| n.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
