//! Workbooks as directories of CSV files.
//!
//! Each sheet is stored as `<sheet name>.csv`. Rows may differ in length.
//! Fields are loaded as text with [`Cell::from_field`]; numbers are parsed
//! where they are read.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::WorkbookError;
use crate::workbook::{Cell, Sheet, Workbook};

const EXTENSION: &str = "csv";

fn check_sheet_name(name: &str) -> Result<(), WorkbookError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(WorkbookError::InvalidSheetName(name.to_string()));
    }
    Ok(())
}

fn field(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        other => other.as_text(),
    }
}

/// Reads one CSV file as a sheet.
pub fn load_sheet(path: &Path, name: impl Into<String>) -> Result<Sheet, WorkbookError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| WorkbookError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut sheet = Sheet::new(name);
    for record in reader.records() {
        let record = record.map_err(|source| WorkbookError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let mut row: Vec<Cell> = record.iter().map(Cell::from_field).collect();
        if sheet.rows.is_empty() {
            // Spreadsheet tools prefix UTF-8 exports with a byte-order mark
            if let Some(first) = record.get(0).and_then(|f| f.strip_prefix('\u{feff}')) {
                row[0] = Cell::from_field(first);
            }
        }
        sheet.push_row(row);
    }
    Ok(sheet)
}

/// Loads every `*.csv` file of a directory, in file-name order.
pub fn load_dir(dir: &Path) -> Result<Workbook, WorkbookError> {
    let entries = fs::read_dir(dir).map_err(|e| WorkbookError::io(dir, e))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| WorkbookError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case(EXTENSION)) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut workbook = Workbook::new();
    for path in paths {
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            debug!(path = %path.display(), "Skipping file with non UTF-8 name");
            continue;
        };
        let sheet = load_sheet(&path, name)?;
        debug!(sheet = %sheet.name, rows = sheet.rows.len(), "CSV sheet loaded");
        workbook.add_sheet(sheet);
    }
    Ok(workbook)
}

/// Writes each sheet to `<dir>/<sheet name>.csv`, creating `dir` if needed.
pub fn save_dir(workbook: &Workbook, dir: &Path) -> Result<(), WorkbookError> {
    for sheet in &workbook.sheets {
        check_sheet_name(&sheet.name)?;
    }
    fs::create_dir_all(dir).map_err(|e| WorkbookError::io(dir, e))?;

    for sheet in &workbook.sheets {
        let path = dir.join(format!("{}.{EXTENSION}", sheet.name));
        let csv_err = |source| WorkbookError::Csv {
            path: path.clone(),
            source,
        };
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(csv_err)?;
        for row in &sheet.rows {
            if row.is_empty() {
                // csv refuses zero-field records; one empty field reads back blank
                writer.write_record([""]).map_err(csv_err)?;
            } else {
                writer.write_record(row.iter().map(field)).map_err(csv_err)?;
            }
        }
        writer.flush().map_err(|e| WorkbookError::io(&path, e))?;
        debug!(sheet = %sheet.name, path = %path.display(), "CSV sheet written");
    }
    Ok(())
}
