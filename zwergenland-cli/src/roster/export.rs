//! Write extracted contacts as JSON or CSV

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;

use super::Contact;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

pub fn write_contacts<W: Write>(contacts: &[Contact], format: ExportFormat, mut writer: W) -> Result<()> {
    match format {
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, contacts).context("Failed to write JSON")?;
            writeln!(writer)?;
        }
        ExportFormat::Csv => {
            let mut csv = csv::Writer::from_writer(writer);
            for contact in contacts {
                csv.serialize(contact).context("Failed to write CSV row")?;
            }
            csv.flush()?;
        }
    }
    Ok(())
}
