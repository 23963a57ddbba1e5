//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands that work
//! from a workbook share [`prepare_quotation`].

pub mod check;
pub mod export;
pub mod master_data;
pub mod project;
pub mod quote;
pub mod template;

use std::path::Path;
use std::str::FromStr;

use adapter_workbook::{ingest_workbook, load_workbook, IngestedData};
use quote_core::{ParameterSet, SelectionList};
use tracing::{info, warn};

use crate::{CliError, Result};

/// A `NAME=QTY` roster selection given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Position name as it appears in the workbook
    pub name: String,
    /// Headcount
    pub qty: u32,
}

impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (name, qty) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("expected NAME=QTY, got '{s}'"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("missing position name in '{s}'"));
        }
        let qty = qty
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("invalid quantity in '{s}'"))?;
        if qty == 0 {
            return Err(format!("quantity must be at least 1 in '{s}'"));
        }
        Ok(Self {
            name: name.to_string(),
            qty,
        })
    }
}

/// Ingested workbook plus the inputs ready for the engine.
#[derive(Debug)]
pub struct Quotation {
    /// Everything read from the workbook
    pub data: IngestedData,
    /// Base parameters with the workbook's patch applied
    pub params: ParameterSet,
    /// Ingested quantities followed by explicit selections
    pub roster: SelectionList,
}

/// Loads and ingests a workbook and builds the roster.
pub fn prepare_quotation(workbook: &Path, selections: &[Selection], base: &ParameterSet) -> Result<Quotation> {
    if !workbook.exists() {
        return Err(CliError::FileNotFound(workbook.display().to_string()));
    }

    let data = ingest_workbook(&load_workbook(workbook)?);
    let params = data.params(base);
    for problem in params.validate() {
        warn!("Parameter problem: {}", problem);
    }

    let mut roster = data.initial_roster();
    for selection in selections {
        let position = data
            .catalog
            .find_by_name(&selection.name)
            .ok_or_else(|| CliError::UnknownPosition(selection.name.clone()))?;
        roster.add(position.clone(), selection.qty);
    }

    info!(
        "Roster: {} lines, {} people",
        roster.len(),
        roster.total_headcount()
    );
    Ok(Quotation { data, params, roster })
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapter_workbook::{save_workbook, Cell, Sheet, Workbook};

    pub(crate) fn write_sample_workbook(dir: &Path) -> std::path::PathBuf {
        let mut wb = Workbook::new();
        wb.add_sheet(Sheet::from_rows(
            "Positions",
            vec![
                vec![Cell::from("Position"), Cell::from("Salary"), Cell::from("Qty")],
                vec![Cell::from("Welder"), Cell::from(4000.0), Cell::from(2.0)],
                vec![Cell::from("Fitter"), Cell::from(3500.0), Cell::Empty],
            ],
        ));
        wb.add_sheet(Sheet::from_rows(
            "Parameters",
            vec![
                vec![Cell::from("Parameter"), Cell::from("Value"), Cell::from("Enabled")],
                vec![Cell::from("Margin"), Cell::from(20.0), Cell::Empty],
            ],
        ));
        let path = dir.join("workbook.json");
        save_workbook(&wb, &path).unwrap();
        path
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(
            "Welder=3".parse::<Selection>(),
            Ok(Selection {
                name: "Welder".into(),
                qty: 3
            })
        );
        assert_eq!(
            "Pipe Fitter (A=1) = 2".parse::<Selection>().map(|s| s.name),
            Ok("Pipe Fitter (A=1)".to_string())
        );
        assert!("Welder".parse::<Selection>().is_err());
        assert!("=2".parse::<Selection>().is_err());
        assert!("Welder=0".parse::<Selection>().is_err());
        assert!("Welder=two".parse::<Selection>().is_err());
    }

    #[test]
    fn test_prepare_quotation() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample_workbook(dir.path());
        let selections = vec!["Fitter=1".parse().unwrap()];

        let quotation = prepare_quotation(&path, &selections, &ParameterSet::default()).unwrap();

        assert_eq!(quotation.params.margin, 20.0);
        assert_eq!(quotation.roster.len(), 2);
        assert_eq!(quotation.roster.total_headcount(), 3);
        assert_eq!(quotation.roster.as_slice()[1].name(), "Fitter");
    }

    #[test]
    fn test_prepare_quotation_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            prepare_quotation(&missing, &[], &ParameterSet::default()),
            Err(CliError::FileNotFound(_))
        ));

        let path = write_sample_workbook(dir.path());
        let selections = vec!["Scaffolder=1".parse().unwrap()];
        assert!(matches!(
            prepare_quotation(&path, &selections, &ParameterSet::default()),
            Err(CliError::UnknownPosition(name)) if name == "Scaffolder"
        ));
    }
}
