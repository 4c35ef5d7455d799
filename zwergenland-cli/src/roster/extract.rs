//! Header search and the row scan that turns a sheet into contacts

use std::path::Path;

use super::columns::column_label;
use super::layout::RecordIndices;
use super::{Contact, Grid, RosterError, SheetConfiguration, load_sheet};

/// Find the row after the first cell in `anchor_column` equal to `header_label`.
///
/// Blank cells never match.
pub fn locate_first_data_row(grid: &Grid, anchor_column: usize, header_label: &str) -> Option<usize> {
    let row = (0..grid.row_count()).find(|&row| grid.cell(row, anchor_column) == Some(header_label))?;
    log::info!(
        "Header '{}' found in column {} at row {}",
        header_label,
        column_label(anchor_column),
        row + 1
    );
    Some(row + 1)
}

/// Admit a record when its email cell is filled. Blank names are kept as
/// empty strings.
pub fn admit(
    first_name: Option<&str>,
    last_name: Option<&str>,
    email: Option<&str>,
    row: usize,
) -> Option<Contact> {
    match email {
        Some(email) => Some(Contact::new(
            first_name.unwrap_or_default(),
            last_name.unwrap_or_default(),
            email,
        )),
        None => {
            log::debug!("Skipping record in row {}: no email address", row + 1);
            None
        }
    }
}

/// Extract all contacts from `grid`.
///
/// The scan starts at the configured (or discovered) first data row and
/// stops at the first row where both email cells are blank.
pub fn extract_contacts(grid: &Grid, config: &SheetConfiguration) -> Result<Vec<Contact>, RosterError> {
    let config = config.resolve_first_data_row(grid)?;
    let first_row = config.first_data_row.unwrap_or_default();
    let slots = [
        RecordIndices::resolve(&config.record_1)?,
        RecordIndices::resolve(&config.record_2)?,
    ];

    let mut contacts = Vec::new();

    for row in first_row..grid.row_count() {
        let emails = slots.map(|slot| grid.cell(row, slot.email));
        if emails.iter().all(Option::is_none) {
            log::info!("Stopping at row {}: no email address in either record", row + 1);
            break;
        }

        for slot in &slots {
            let contact = admit(
                grid.cell(row, slot.first_name),
                grid.cell(row, slot.last_name),
                grid.cell(row, slot.email),
                row,
            );
            contacts.extend(contact);
        }
    }

    log::info!("Extracted {} contacts", contacts.len());
    Ok(contacts)
}

/// Load the configured sheet from `path` and extract its contacts.
pub fn read_contacts<P: AsRef<Path>>(
    path: P,
    config: &SheetConfiguration,
) -> Result<Vec<Contact>, RosterError> {
    let grid = load_sheet(path, config.sheet.as_ref())?;
    extract_contacts(&grid, config)
}
