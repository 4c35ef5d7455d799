//! Command handlers

pub mod directory;
pub mod guests;
pub mod roster;
pub mod sync;

use anyhow::{Context, Result};
use dialoguer::Confirm;

use crate::api::GraphClient;
use crate::cli::Commands;
use crate::config::{Credentials, Settings};

/// Dispatch a parsed command
pub async fn run(command: Commands, settings: Settings) -> Result<()> {
    match command {
        Commands::ReadUsers { roster, format, output } => {
            roster::handle_read_users(&settings, &roster, format, output.as_deref())
        }
        Commands::Layouts => roster::handle_layouts(&settings),
        Commands::ListGroups { prefixes } => directory::handle_list_groups(&settings, prefixes).await,
        Commands::CreateGroup {
            name,
            mail_nickname,
            unified,
        } => directory::handle_create_group(&settings, name, mail_nickname, unified).await,
        Commands::AddUser { group_id, user_id } => {
            directory::handle_add_user(&settings, group_id, user_id).await
        }
        Commands::ListMembers { group_id } => directory::handle_list_members(&settings, group_id).await,
        Commands::FindUser { email } => directory::handle_find_user(&settings, &email).await,
        Commands::ListGuests { without_group } => guests::handle_list_guests(&settings, without_group).await,
        Commands::CleanupGuests { dry_run, yes } => {
            guests::handle_cleanup_guests(&settings, dry_run, yes).await
        }
        Commands::Sync(args) => sync::handle_sync(&settings, args).await,
    }
}

/// Authenticate with the credentials from the environment
pub(crate) async fn connect(settings: &Settings) -> Result<GraphClient> {
    let credentials = Credentials::from_env()?;
    GraphClient::connect(&settings.graph, &credentials)
        .await
        .context("Failed to connect to Microsoft Graph")
}

/// Ask for confirmation unless `assume_yes`
pub(crate) fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}
