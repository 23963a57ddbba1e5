//! Workbook ingestion.
//!
//! Turns a loosely structured workbook into the engine's inputs. Ingestion
//! is best-effort: absent sheets, missing headers and unreadable numbers
//! never fail, they simply contribute nothing (or zero).

use quote_core::{Client, ParameterSet, PositionCatalog, PreSelection, SelectionList};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clients::{read_clients, CLIENTS_SHEET};
use crate::parameters::{read_parameters, ParameterPatch, PARAMETERS_SHEET};
use crate::positions::{read_position_sheet, POSITION_SHEETS};
use crate::workbook::Workbook;

/// Everything read from one workbook.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestedData {
    /// Positions, sorted by name
    pub catalog: PositionCatalog,
    /// Clients in sheet order
    pub clients: Vec<Client>,
    /// Parameters the workbook provided
    pub patch: ParameterPatch,
    /// Quantities found next to positions
    pub initial_selections: Vec<PreSelection>,
    /// Position sheets that had a usable table
    pub position_sheets: Vec<String>,
}

impl IngestedData {
    /// Parameters: `base` with the ingested patch layered on top.
    pub fn params(&self, base: &ParameterSet) -> ParameterSet {
        self.patch.applied(base)
    }

    /// Roster built from the ingested quantities.
    pub fn initial_roster(&self) -> SelectionList {
        let mut roster = SelectionList::new();
        roster.materialize(&self.initial_selections, &self.catalog);
        roster
    }
}

/// Reads positions, clients and parameters from a workbook.
///
/// # Examples
///
/// ```
/// use adapter_workbook::{ingest_workbook, Cell, Sheet, Workbook};
///
/// let mut wb = Workbook::new();
/// wb.add_sheet(Sheet::from_rows(
///     "Positions",
///     vec![
///         vec![Cell::from("Position"), Cell::from("Salary"), Cell::from("Qty")],
///         vec![Cell::from("Welder"), Cell::from(4000.0), Cell::from(2.0)],
///     ],
/// ));
///
/// let data = ingest_workbook(&wb);
/// assert_eq!(data.catalog.len(), 1);
/// assert_eq!(data.initial_selections[0].qty, 2);
/// ```
pub fn ingest_workbook(workbook: &Workbook) -> IngestedData {
    let mut data = IngestedData::default();

    for name in POSITION_SHEETS {
        let Some(sheet) = workbook.sheet(name) else {
            debug!(sheet = name, "Position sheet absent");
            continue;
        };
        if let Some(rows) = read_position_sheet(sheet, &mut data.catalog, &mut data.initial_selections) {
            debug!(sheet = name, rows, "Position rows read");
            data.position_sheets.push(name.to_string());
        }
    }
    data.catalog.sort_by_name();

    if let Some(sheet) = workbook.sheet(CLIENTS_SHEET) {
        data.clients = read_clients(sheet);
    }
    if let Some(sheet) = workbook.sheet(PARAMETERS_SHEET) {
        data.patch = read_parameters(sheet);
    }

    info!(
        positions = data.catalog.len(),
        clients = data.clients.len(),
        preselected = data.initial_selections.len(),
        parameters = !data.patch.is_empty(),
        "Workbook ingested"
    );
    data
}
