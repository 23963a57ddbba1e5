//! Header-row detection for position tables.
//!
//! Position tables sit anywhere in the first rows of a sheet, under loosely
//! worded headers. Each row is classified on its own by [`classify_row`];
//! [`scan_header`] walks the first [`HEADER_SCAN_LIMIT`] rows and stops at
//! the first row that looks like a header.

use crate::workbook::{Cell, Sheet};

/// Number of leading rows searched for a header.
pub const HEADER_SCAN_LIMIT: usize = 20;

/// Column mapping of a recognised position table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderSchema {
    /// Index of the header row
    pub row: usize,
    /// Position title column
    pub name_col: usize,
    /// Monthly salary column
    pub salary_col: usize,
    /// Per-unit tool cost column
    pub tool_col: Option<usize>,
    /// Quantity column
    pub qty_col: Option<usize>,
}

/// Classification of a single row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowClass {
    /// A usable header row
    Header(HeaderSchema),
    /// Looks like a header but has no salary column
    HeaderWithoutSalary,
    /// Anything else
    Data,
}

/// Outcome of scanning a sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderMatch {
    /// A usable header row was found
    Found(HeaderSchema),
    /// The first header-like row at `row` lacks a salary column
    MissingSalary {
        /// Index of the header-like row
        row: usize,
    },
    /// No header-like row in the scanned range
    NotFound,
}

fn find_col(cells: &[String], needles: &[&str]) -> Option<usize> {
    cells.iter().position(|c| needles.iter().any(|n| c.contains(n)))
}

/// Classifies row `index` of a sheet by its lower-cased cell text.
pub fn classify_row(index: usize, row: &[Cell]) -> RowClass {
    let cells: Vec<String> = row.iter().map(|c| c.as_text().to_lowercase()).collect();

    let Some(name_col) = find_col(&cells, &["position", "title"]) else {
        return RowClass::Data;
    };
    let Some(salary_col) = find_col(&cells, &["basic", "salary", "rate"]) else {
        return RowClass::HeaderWithoutSalary;
    };

    RowClass::Header(HeaderSchema {
        row: index,
        name_col,
        salary_col,
        tool_col: find_col(&cells, &["tools", "ppe"]),
        qty_col: find_col(&cells, &["qty", "quantity"]),
    })
}

/// Finds the position-table header of a sheet.
///
/// # Examples
///
/// ```
/// use adapter_workbook::header::{scan_header, HeaderMatch};
/// use adapter_workbook::{Cell, Sheet};
///
/// let sheet = Sheet::from_rows(
///     "Positions",
///     vec![
///         vec![Cell::from("Rate card 2024")],
///         vec![Cell::from("Position Title"), Cell::from("Basic Salary")],
///         vec![Cell::from("Welder"), Cell::from(4000.0)],
///     ],
/// );
///
/// match scan_header(&sheet) {
///     HeaderMatch::Found(schema) => assert_eq!((schema.row, schema.salary_col), (1, 1)),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub fn scan_header(sheet: &Sheet) -> HeaderMatch {
    for (index, row) in sheet.rows.iter().take(HEADER_SCAN_LIMIT).enumerate() {
        match classify_row(index, row) {
            RowClass::Header(schema) => return HeaderMatch::Found(schema),
            RowClass::HeaderWithoutSalary => return HeaderMatch::MissingSalary { row: index },
            RowClass::Data => {}
        }
    }
    HeaderMatch::NotFound
}
