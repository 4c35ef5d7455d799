//! `read-users` and `layouts`

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use colored::*;

use crate::cli::RosterArgs;
use crate::config::Settings;
use crate::roster::{Contact, ExportFormat, SheetConfiguration, read_contacts, write_contacts};

/// Resolve the layout and overrides given on the command line
pub(crate) fn sheet_configuration(settings: &Settings, args: &RosterArgs) -> Result<SheetConfiguration> {
    Ok(settings
        .layout(&args.layout)?
        .with_sheet(args.sheet.clone())
        .with_first_data_row(args.first_data_row))
}

/// Read the contacts described by `args`
pub(crate) fn load_contacts(settings: &Settings, args: &RosterArgs) -> Result<Vec<Contact>> {
    let config = sheet_configuration(settings, args)?;
    read_contacts(&args.input, &config)
        .with_context(|| format!("Failed to read contacts from {}", args.input.display()))
}

pub fn handle_read_users(
    settings: &Settings,
    args: &RosterArgs,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let contacts = load_contacts(settings, args)?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_contacts(&contacts, format, BufWriter::new(file))?;
            eprintln!(
                "{} contacts written to {}",
                contacts.len().to_string().bright_green(),
                path.display().to_string().cyan()
            );
        }
        None => {
            write_contacts(&contacts, format, io::stdout().lock())?;
            eprintln!("{} contacts read", contacts.len().to_string().bright_green());
        }
    }

    Ok(())
}

pub fn handle_layouts(settings: &Settings) -> Result<()> {
    let builtin = SheetConfiguration::preset_names()
        .iter()
        .filter_map(|name| SheetConfiguration::preset(name).map(|c| (name.to_string(), c, "built-in")));
    let configured = settings
        .layouts
        .iter()
        .map(|(name, c)| (name.clone(), c.clone(), "settings"));

    for (name, config, source) in builtin.chain(configured) {
        println!("{} ({})", name.bold(), source.dimmed());
        match config.first_data_row {
            Some(row) => println!("  data starts at row {}", row),
            None => println!(
                "  header '{}' in column {}",
                config.header_label, config.anchor_column
            ),
        }
        for (label, record) in [("record 1", &config.record_1), ("record 2", &config.record_2)] {
            println!(
                "  {}: first name {}, last name {}, email {}",
                label, record.first_name_column, record.last_name_column, record.email_column
            );
        }
    }

    Ok(())
}
