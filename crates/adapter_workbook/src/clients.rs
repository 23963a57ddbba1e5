//! Client sheet reading.

use quote_core::Client;

use crate::workbook::Sheet;

/// Name of the client sheet.
pub const CLIENTS_SHEET: &str = "Clients";

/// Name given to clients whose name cell is blank.
pub const UNKNOWN_CLIENT: &str = "Unknown Client";

/// Reads the client sheet. Blank rows are skipped; the ordinal of each
/// remaining row becomes the client id.
pub fn read_clients(sheet: &Sheet) -> Vec<Client> {
    sheet
        .records()
        .iter()
        .enumerate()
        .map(|(id, record)| {
            let name = record.get("Client Name");
            let name = if name.is_blank() {
                UNKNOWN_CLIENT.to_string()
            } else {
                name.as_text()
            };
            Client::new(
                id,
                name,
                record.get("Address").as_text(),
                record.get("Attention").as_text(),
            )
        })
        .collect()
}
