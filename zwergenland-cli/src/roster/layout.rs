//! Sheet layouts: which columns hold the two parent records of a row

use serde::{Deserialize, Serialize};

use super::columns::column_index;
use super::extract::locate_first_data_row;
use super::{Grid, RosterError, SheetSelector};

/// Column letters of one parent record within a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordColumns {
    pub first_name_column: String,
    pub last_name_column: String,
    pub email_column: String,
}

impl RecordColumns {
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            first_name_column: first_name.to_string(),
            last_name_column: last_name.to_string(),
            email_column: email.to_string(),
        }
    }
}

/// Description of a roster sheet layout
///
/// The built-in layouts differ only in their values, so both are plain
/// instances of this struct. Custom layouts can be declared in the settings
/// file under `[layouts.<name>]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetConfiguration {
    /// Tab to read, the first one when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<SheetSelector>,
    /// Zero-based row where data starts; searched via `header_label` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_data_row: Option<usize>,
    /// Text of the header cell in `anchor_column`, data starts on the row below
    pub header_label: String,
    pub anchor_column: String,
    pub record_1: RecordColumns,
    pub record_2: RecordColumns,
}

impl SheetConfiguration {
    /// Kindergarten child list: mother in W..X/AM, father in Y..Z/AN
    pub fn kindergarten() -> Self {
        Self {
            sheet: None,
            first_data_row: None,
            header_label: "namem".to_string(),
            anchor_column: "W".to_string(),
            record_1: RecordColumns::new("X", "W", "AM"),
            record_2: RecordColumns::new("Z", "Y", "AN"),
        }
    }

    /// Association member list: member in A..C, partner in D..F
    pub fn association() -> Self {
        Self {
            sheet: None,
            first_data_row: None,
            header_label: "Nachname".to_string(),
            anchor_column: "A".to_string(),
            record_1: RecordColumns::new("B", "A", "C"),
            record_2: RecordColumns::new("E", "D", "F"),
        }
    }

    /// Look up a built-in layout by name
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "kindergarten" | "kita" => Some(Self::kindergarten()),
            "association" | "verein" => Some(Self::association()),
            _ => None,
        }
    }

    pub fn preset_names() -> &'static [&'static str] {
        &["kindergarten", "association"]
    }

    pub fn with_sheet(mut self, sheet: Option<SheetSelector>) -> Self {
        if sheet.is_some() {
            self.sheet = sheet;
        }
        self
    }

    pub fn with_first_data_row(mut self, row: Option<usize>) -> Self {
        if row.is_some() {
            self.first_data_row = row;
        }
        self
    }

    /// Return a copy with `first_data_row` filled in, searching the anchor
    /// column for the header label if the row is not pinned already.
    pub fn resolve_first_data_row(&self, grid: &Grid) -> Result<Self, RosterError> {
        if self.first_data_row.is_some() {
            return Ok(self.clone());
        }

        let anchor = column_index(&self.anchor_column)?;
        let row = locate_first_data_row(grid, anchor, &self.header_label).ok_or_else(|| {
            RosterError::HeaderNotFound {
                label: self.header_label.clone(),
                column: self.anchor_column.clone(),
            }
        })?;

        Ok(Self {
            first_data_row: Some(row),
            ..self.clone()
        })
    }
}

/// Zero-based column indices of one record, resolved once per read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RecordIndices {
    pub first_name: usize,
    pub last_name: usize,
    pub email: usize,
}

impl RecordIndices {
    pub fn resolve(columns: &RecordColumns) -> Result<Self, RosterError> {
        Ok(Self {
            first_name: column_index(&columns.first_name_column)?,
            last_name: column_index(&columns.last_name_column)?,
            email: column_index(&columns.email_column)?,
        })
    }
}
