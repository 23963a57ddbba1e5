//! Project command implementation
//!
//! Saves quotations to the project store and lists, shows or deletes them.

use std::io::{self, Write};
use std::path::Path;

use infra_store::{JsonFileProjectStore, ProjectStore};
use quote_core::currency::format_percent;
use quote_core::{total_headcount, Currency, ProjectDraft, ProjectId, SavedProject};
use quote_engine::calculate_quotation;
use tracing::info;

use super::{prepare_quotation, Selection};
use crate::config::QuotationConfig;
use crate::{CliError, Result};

/// Inputs of `project save`.
#[derive(Debug)]
pub struct SaveRequest<'a> {
    /// Workbook to quote from
    pub workbook: &'a Path,
    /// Project name
    pub name: &'a str,
    /// Client name
    pub client: &'a str,
    /// Quotation reference
    pub reference: &'a str,
    /// Explicit roster selections
    pub selections: &'a [Selection],
}

/// Saves a quotation built from a workbook as a new project.
pub fn save(request: &SaveRequest<'_>, config: &QuotationConfig) -> Result<SavedProject> {
    let quotation = prepare_quotation(request.workbook, request.selections, &config.parameters)?;
    let draft = ProjectDraft {
        name: request.name.to_string(),
        client: request.client.to_string(),
        reference: request.reference.to_string(),
        params: quotation.params,
        positions: quotation.roster.into_lines(),
    };

    let mut store = JsonFileProjectStore::new(&config.store_path);
    let saved = store.save(draft)?;
    info!("Project '{}' saved as {}", saved.name, saved.id);
    println!("Saved project {} ({})", saved.name, saved.id);
    Ok(saved)
}

/// Lists saved projects, newest first.
pub fn list(config: &QuotationConfig) -> Result<()> {
    let projects = JsonFileProjectStore::new(&config.store_path).list()?;
    write_list(&mut io::stdout().lock(), &projects)?;
    Ok(())
}

/// Recomputes and summarises a saved project.
pub fn show(id: &str, config: &QuotationConfig) -> Result<()> {
    let store = JsonFileProjectStore::new(&config.store_path);
    let project = store
        .get(&ProjectId::new(id))?
        .ok_or_else(|| CliError::ProjectNotFound(id.to_string()))?;
    write_summary(&mut io::stdout().lock(), &project, config.currency)?;
    Ok(())
}

/// Deletes a saved project.
pub fn delete(id: &str, config: &QuotationConfig) -> Result<()> {
    let mut store = JsonFileProjectStore::new(&config.store_path);
    if !store.delete(&ProjectId::new(id))? {
        return Err(CliError::ProjectNotFound(id.to_string()));
    }
    println!("Deleted project {id}");
    Ok(())
}

fn write_list(out: &mut impl Write, projects: &[SavedProject]) -> io::Result<()> {
    if projects.is_empty() {
        return writeln!(out, "No saved projects.");
    }
    writeln!(
        out,
        "{:<36}  {:<16}  {:<24}  {:<16}  {:>5}  {}",
        "ID", "Modified", "Name", "Client", "Lines", "Reference"
    )?;
    for p in projects {
        writeln!(
            out,
            "{:<36}  {:<16}  {:<24}  {:<16}  {:>5}  {}",
            p.id.as_str(),
            p.last_modified.format("%Y-%m-%d %H:%M").to_string(),
            p.name,
            p.client,
            p.positions.len(),
            p.reference
        )?;
    }
    Ok(())
}

fn write_summary(out: &mut impl Write, project: &SavedProject, currency: Currency) -> io::Result<()> {
    let result = calculate_quotation(&project.params, &project.positions);
    let headcount = total_headcount(&project.positions);

    writeln!(out, "Project:      {}", project.name)?;
    writeln!(out, "Client:       {}", project.client)?;
    writeln!(out, "Reference:    {}", project.reference)?;
    writeln!(out, "Modified:     {}", project.last_modified.format("%Y-%m-%d %H:%M UTC"))?;
    writeln!(out, "Duration:     {} months", project.params.duration)?;
    writeln!(out, "Headcount:    {}", headcount)?;
    writeln!(out, "Revenue:      {}", currency.format_money(result.total_revenue))?;
    writeln!(out, "Cost:         {}", currency.format_money(result.total_cost))?;
    writeln!(out, "Gross profit: {}", currency.format_money(result.gross_profit))?;
    writeln!(out, "Margin:       {}", format_percent(result.margin_percent))?;
    Ok(())
}
