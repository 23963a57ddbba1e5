//! Template command implementation
//!
//! Writes the blank master-data workbook users fill in.

use std::path::Path;

use adapter_workbook::{blank_template, save_workbook};
use tracing::info;

use crate::Result;

/// Run the template command
pub fn run(output: &Path) -> Result<()> {
    save_workbook(&blank_template(), output)?;
    info!("Blank template written to {}", output.display());
    println!("Template written to {}", output.display());
    Ok(())
}
