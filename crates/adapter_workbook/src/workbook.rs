//! In-memory workbook model.
//!
//! A [`Workbook`] is a list of named [`Sheet`]s, each a ragged 2-D grid of
//! [`Cell`]s. Readers never assume a rectangular grid: a missing cell reads
//! as [`Cell::Empty`].

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

static EMPTY_CELL: Cell = Cell::Empty;

/// One spreadsheet cell.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// No content
    #[default]
    Empty,
    /// Boolean
    Bool(bool),
    /// Numeric value
    Number(f64),
    /// Free text
    Text(String),
}

impl Cell {
    /// Text as a spreadsheet shows it: numbers without trailing zeros,
    /// booleans as `true`/`false`, empty as the empty string.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Bool(b) => b.to_string(),
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }

    /// Numeric reading of the cell.
    ///
    /// Text is read by its leading numeric prefix (`"5000 QAR"` is 5000);
    /// anything unreadable, booleans and empty cells read as zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use adapter_workbook::Cell;
    ///
    /// assert_eq!(Cell::from(" 12.5kg").as_number(), 12.5);
    /// assert_eq!(Cell::from("n/a").as_number(), 0.0);
    /// assert_eq!(Cell::from(7.0).as_number(), 7.0);
    /// ```
    pub fn as_number(&self) -> f64 {
        match self {
            Cell::Number(n) if n.is_finite() => *n,
            Cell::Text(s) => numeric_prefix(s)
                .map(|(v, _)| v)
                .filter(|v| v.is_finite())
                .unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Whether the cell has no content or only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Reads a raw text field. Empty fields become [`Cell::Empty`]; anything
    /// else is kept verbatim as text so names like `007` or `TRUE` survive a
    /// save and reload. Numbers are parsed where they are read, through
    /// [`Cell::as_number`].
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(field.to_string())
        }
    }
}

/// Parses the longest leading decimal number of `s`, after leading
/// whitespace. Returns the value and the byte length consumed.
fn numeric_prefix(s: &str) -> Option<(f64, usize)> {
    let start = s.len() - s.trim_start().len();
    let bytes = s.as_bytes();
    let mut i = start;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }
    if digits == 0 {
        return None;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    let value: f64 = s[start..i].parse().ok()?;
    value.is_finite().then_some((value, i))
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Number(f64::from(value))
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

/// A named grid of cells.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name
    pub name: String,
    /// Rows, possibly of differing lengths
    #[serde(default)]
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Creates an empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Creates a sheet from rows.
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Appends a row.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Cell at `(row, col)`, empty when out of range.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Reads the sheet as a record list keyed by the first row.
    ///
    /// Rows in which every cell is blank are skipped. When a header repeats,
    /// its first column wins.
    pub fn records(&self) -> Records<'_> {
        let Some((header, body)) = self.rows.split_first() else {
            return Records::default();
        };
        let mut columns = HashMap::new();
        for (i, cell) in header.iter().enumerate() {
            if !cell.is_blank() {
                columns.entry(cell.as_text()).or_insert(i);
            }
        }
        let rows = body
            .iter()
            .filter(|row| !row.iter().all(Cell::is_blank))
            .map(Vec::as_slice)
            .collect();
        Records { columns, rows }
    }
}

/// A sheet read as header-keyed records.
#[derive(Clone, Debug, Default)]
pub struct Records<'a> {
    columns: HashMap<String, usize>,
    rows: Vec<&'a [Cell]>,
}

impl<'a> Records<'a> {
    /// Number of non-blank data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Records in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(|&cells| Record {
            columns: &self.columns,
            cells,
        })
    }
}

/// One data row of a [`Records`] view.
#[derive(Clone, Copy, Debug)]
pub struct Record<'r> {
    columns: &'r HashMap<String, usize>,
    cells: &'r [Cell],
}

impl<'r> Record<'r> {
    /// Cell under the header `key`, empty when the column or cell is absent.
    pub fn get(&self, key: &str) -> &'r Cell {
        self.columns
            .get(key)
            .and_then(|&i| self.cells.get(i))
            .unwrap_or(&EMPTY_CELL)
    }
}

/// A collection of named sheets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    /// Sheets in order
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Creates an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks a sheet up by exact name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Adds a sheet, replacing any sheet with the same name.
    pub fn add_sheet(&mut self, sheet: Sheet) {
        match self.sheets.iter_mut().find(|s| s.name == sheet.name) {
            Some(existing) => *existing = sheet,
            None => self.sheets.push(sheet),
        }
    }

    /// Names of all sheets in order.
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|s| s.name.as_str())
    }
}
