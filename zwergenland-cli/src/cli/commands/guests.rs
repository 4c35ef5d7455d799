//! Guest listing and cleanup

use anyhow::Result;
use colored::*;

use super::{confirm, connect};
use crate::api::DirectoryUser;
use crate::config::Settings;
use crate::services::{find_orphaned_guests, remove_guests};

fn print_guest(guest: &DirectoryUser) {
    println!(
        "{}  {}  {}",
        guest.id.dimmed(),
        guest.display_name.as_deref().unwrap_or("-").bold(),
        guest.address()
    );
}

pub async fn handle_list_guests(settings: &Settings, without_group: bool) -> Result<()> {
    let client = connect(settings).await?;

    let guests = if without_group {
        find_orphaned_guests(&client).await?
    } else {
        client.list_guests().await?
    };

    println!("{} guest user(s)", guests.len().to_string().bright_green());
    guests.iter().for_each(print_guest);
    Ok(())
}

pub async fn handle_cleanup_guests(settings: &Settings, dry_run: bool, yes: bool) -> Result<()> {
    let client = connect(settings).await?;
    let orphans = find_orphaned_guests(&client).await?;

    if orphans.is_empty() {
        println!("No guest users without group found.");
        return Ok(());
    }

    println!(
        "{} guest user(s) without group:",
        orphans.len().to_string().yellow()
    );
    orphans.iter().for_each(print_guest);

    if dry_run {
        println!("{}", "Dry run, nothing deleted.".dimmed());
        return Ok(());
    }

    if !confirm(&format!("Delete {} guest user(s)?", orphans.len()), yes)? {
        println!("Exit on user request.");
        return Ok(());
    }

    let removed = remove_guests(&client, &orphans).await?;
    println!("{} guest user(s) deleted", removed.to_string().bright_green());
    Ok(())
}
