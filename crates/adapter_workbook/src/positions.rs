//! Position-table reading.

use quote_core::{Position, PositionCatalog, PreSelection};
use tracing::debug;

use crate::header::{scan_header, HeaderMatch, HeaderSchema};
use crate::workbook::{Cell, Sheet};

/// Sheets that may hold a position table, in the order they are read.
pub const POSITION_SHEETS: [&str; 4] = [
    "Salary Ref (Base)",
    "Reference Salary (A)",
    "Salary Ref (Reliever)",
    "Positions",
];

/// Converts an ingested quantity to a headcount.
///
/// Fractions round to the nearest whole person; any positive quantity is at
/// least one. Zero, negative and unreadable quantities give `None`.
pub fn headcount(qty: f64) -> Option<u32> {
    if qty.is_finite() && qty > 0.0 {
        Some(qty.round().clamp(1.0, f64::from(u32::MAX)) as u32)
    } else {
        None
    }
}

/// Reads the rows under `schema` into `catalog`, recording pre-selections
/// for rows with a positive quantity.
///
/// Reading stops at the first row whose name cell is empty or blank. A name
/// already in the catalog keeps its first salary and tool cost; its
/// quantity still produces a pre-selection against the existing id.
/// Returns the number of rows read.
pub fn read_position_rows(
    sheet: &Sheet,
    schema: &HeaderSchema,
    catalog: &mut PositionCatalog,
    selections: &mut Vec<PreSelection>,
) -> usize {
    let mut read = 0;
    for row_idx in schema.row + 1..sheet.rows.len() {
        let name_cell = sheet.cell(row_idx, schema.name_col);
        if name_cell.is_blank() {
            break;
        }
        let name = name_cell.as_text().trim().to_string();
        let base_salary = sheet.cell(row_idx, schema.salary_col).as_number();
        let tool_cost = schema
            .tool_col
            .map(|col| sheet.cell(row_idx, col).as_number())
            .filter(|&cost| cost != 0.0);
        let qty = schema
            .qty_col
            .map(|col| sheet.cell(row_idx, col))
            .map_or(0.0, Cell::as_number);

        let id = catalog.add(Position::new(name, base_salary, tool_cost));
        if let Some(qty) = headcount(qty) {
            selections.push(PreSelection { position_id: id, qty });
        }
        read += 1;
    }
    read
}

/// Reads the position table of one sheet, if it has one.
///
/// Returns the number of rows read, or `None` when the sheet has no usable
/// header.
pub fn read_position_sheet(
    sheet: &Sheet,
    catalog: &mut PositionCatalog,
    selections: &mut Vec<PreSelection>,
) -> Option<usize> {
    match scan_header(sheet) {
        HeaderMatch::Found(schema) => {
            debug!(sheet = %sheet.name, header_row = schema.row, "Position header found");
            Some(read_position_rows(sheet, &schema, catalog, selections))
        }
        HeaderMatch::MissingSalary { row } => {
            debug!(sheet = %sheet.name, header_row = row, "Position header has no salary column, skipping");
            None
        }
        HeaderMatch::NotFound => {
            debug!(sheet = %sheet.name, "No position header, skipping");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: Vec<Vec<Cell>>) -> Sheet {
        Sheet::from_rows("Positions", rows)
    }

    #[test]
    fn test_headcount_rounding() {
        assert_eq!(headcount(0.0), None);
        assert_eq!(headcount(-2.0), None);
        assert_eq!(headcount(f64::NAN), None);
        assert_eq!(headcount(0.2), Some(1));
        assert_eq!(headcount(2.5), Some(3));
        assert_eq!(headcount(3.0), Some(3));
    }

    #[test]
    fn test_rows_stop_at_blank_name() {
        let sheet = sheet(vec![
            vec!["Position".into(), "Salary".into(), "Tools".into(), "Qty".into()],
            vec!["Welder".into(), 4000.0.into(), 500.0.into(), 2.0.into()],
            vec![" Fitter ".into(), "3,500".into(), Cell::Empty, Cell::Empty],
            vec!["  ".into(), 1.0.into()],
            vec!["Rigger".into(), 3000.0.into()],
        ]);
        let mut catalog = PositionCatalog::new();
        let mut selections = Vec::new();

        let read = read_position_sheet(&sheet, &mut catalog, &mut selections);

        assert_eq!(read, Some(2));
        assert_eq!(catalog.len(), 2);
        let fitter = catalog.find_by_name("Fitter").expect("trimmed name");
        assert_eq!(fitter.base_salary, 3.0);
        assert_eq!(fitter.specific_tool_cost, None);
        assert_eq!(selections.len(), 1);
        assert_eq!(selections[0].qty, 2);
    }

    #[test]
    fn test_duplicate_name_reuses_first_id() {
        let sheet = sheet(vec![
            vec!["Title".into(), "Basic".into(), "Qty".into()],
            vec!["Welder".into(), 4000.0.into(), 1.0.into()],
            vec!["Welder".into(), 9999.0.into(), 4.0.into()],
        ]);
        let mut catalog = PositionCatalog::new();
        let mut selections = Vec::new();

        read_position_sheet(&sheet, &mut catalog, &mut selections);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find_by_name("Welder").map(|p| p.base_salary), Some(4000.0));
        assert_eq!(selections.len(), 2);
        assert_eq!(selections[0].position_id, selections[1].position_id);
    }

    #[test]
    fn test_missing_salary_column_skips_sheet() {
        let sheet = sheet(vec![
            vec!["Position".into(), "Qty".into()],
            vec!["Welder".into(), 1.0.into()],
        ]);
        let mut catalog = PositionCatalog::new();
        let mut selections = Vec::new();

        assert_eq!(read_position_sheet(&sheet, &mut catalog, &mut selections), None);
        assert!(catalog.is_empty());
    }
}
