//! `sync`: roster to group

use anyhow::Result;
use colored::*;

use super::roster::load_contacts;
use super::{confirm, connect};
use crate::api::{AddMemberOutcome, GroupDetails};
use crate::cli::SyncArgs;
use crate::config::Settings;
use crate::services::{SyncOptions, SyncReport, UserAction, sync_roster};

pub async fn handle_sync(settings: &Settings, args: SyncArgs) -> Result<()> {
    let contacts = load_contacts(settings, &args.roster)?;
    println!(
        "{} contacts read from {}",
        contacts.len().to_string().bright_green(),
        args.roster.input.display().to_string().cyan()
    );

    if contacts.is_empty() {
        return Ok(());
    }

    let prompt = format!("Sync {} contacts into group '{}'?", contacts.len(), args.group);
    if !args.dry_run && !confirm(&prompt, args.yes)? {
        println!("Exit on user request.");
        return Ok(());
    }

    let client = connect(settings).await?;
    let group = GroupDetails::new(args.group, args.mail_nickname, args.unified);
    let options = SyncOptions {
        dry_run: args.dry_run,
        update_profiles: args.update_profiles,
    };
    let report = sync_roster(&client, &group, &contacts, &settings.invitation, options).await?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &SyncReport) {
    for outcome in &report.outcomes {
        let user = match &outcome.user {
            UserAction::Existing(_) => "existing".normal(),
            UserAction::Invited(_) => "invited".green(),
            UserAction::WouldInvite => "would invite".yellow(),
        };
        let membership = match (outcome.membership, report.dry_run) {
            (AddMemberOutcome::Added, false) => "added".green(),
            (AddMemberOutcome::Added, true) => "would add".yellow(),
            (AddMemberOutcome::AlreadyMember, _) => "member".normal(),
        };
        let profile = if outcome.profile_updated { "profile updated" } else { "" };
        println!("{:<40} {:<14} {:<10} {}", outcome.email, user, membership, profile);
    }

    println!();
    if report.dry_run {
        println!("{}", "Dry run, nothing changed.".dimmed());
        if report.group_id.is_none() {
            println!("The group does not exist yet and would be created.");
        }
    }
    println!(
        "{} invited, {} existing, {} added, {} already members, {} profiles updated, {} duplicate addresses skipped",
        report.invited().to_string().bright_green(),
        report.existing(),
        report.added().to_string().bright_green(),
        report.already_member(),
        report.profiles_updated(),
        report.duplicates
    );
}
