//! Roster extraction from the association's Excel workbooks
//!
//! The workbook layouts are fixed: every data row holds up to two parent
//! records side by side. A [`SheetConfiguration`] names the columns of both
//! records and how to find the first data row; [`extract_contacts`] walks the
//! sheet and returns the admitted [`Contact`]s in row and slot order.

mod columns;
mod contact;
mod error;
mod export;
mod extract;
mod grid;
mod layout;

pub use contact::Contact;
pub use error::RosterError;
pub use export::{ExportFormat, write_contacts};
pub use extract::read_contacts;
pub use grid::{Grid, SheetSelector, load_sheet};
pub use layout::SheetConfiguration;
