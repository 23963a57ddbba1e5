//! Workbooks as single JSON documents.
//!
//! The document is `{"sheets": [{"name": ..., "rows": [[...], ...]}]}` with
//! cells as JSON `null`, booleans, numbers or strings.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::WorkbookError;
use crate::workbook::Workbook;

/// Reads a JSON workbook.
pub fn load(path: &Path) -> Result<Workbook, WorkbookError> {
    let file = File::open(path).map_err(|e| WorkbookError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| WorkbookError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a JSON workbook, creating parent directories as needed.
pub fn save(workbook: &Workbook, path: &Path) -> Result<(), WorkbookError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| WorkbookError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| WorkbookError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, workbook).map_err(|source| WorkbookError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|e| WorkbookError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::{Cell, Sheet};

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/master.json");
        let mut wb = Workbook::new();
        wb.add_sheet(Sheet::from_rows(
            "Positions",
            vec![vec!["Position".into(), "Salary".into()], vec!["Welder".into(), 4000.0.into(), Cell::Empty]],
        ));

        save(&wb, &path).unwrap();

        assert_eq!(load(&path).unwrap(), wb);
    }

    #[test]
    fn test_load_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{\"sheets\": 3}").unwrap();

        assert!(matches!(load(&path), Err(WorkbookError::Json { .. })));
    }
}
