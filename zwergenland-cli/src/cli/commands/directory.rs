//! Group and user commands

use anyhow::Result;
use colored::*;
use uuid::Uuid;

use super::connect;
use crate::api::{AddMemberOutcome, DirectoryGroup, GroupDetails};
use crate::config::Settings;
use crate::services::get_or_create_group;

fn print_group(group: &DirectoryGroup) {
    println!(
        "{}  {}  {}",
        group.id.dimmed(),
        group.display_name.as_deref().unwrap_or("-").bold(),
        group.mail.as_deref().unwrap_or("")
    );
}

pub async fn handle_list_groups(settings: &Settings, prefixes: Vec<String>) -> Result<()> {
    let prefixes = if prefixes.is_empty() {
        settings.group_prefixes.clone()
    } else {
        prefixes
    };

    let client = connect(settings).await?;

    if prefixes.is_empty() {
        let groups = client.list_groups().await?;
        println!("{} group(s)", groups.len().to_string().bright_green());
        groups.iter().for_each(print_group);
        return Ok(());
    }

    for prefix in &prefixes {
        let groups = client.find_groups_by_prefix(prefix).await?;
        if groups.is_empty() {
            println!("No groups found starting with '{}'.", prefix.yellow());
            continue;
        }
        println!(
            "{} group(s) starting with '{}'",
            groups.len().to_string().bright_green(),
            prefix.cyan()
        );
        groups.iter().for_each(print_group);
    }

    Ok(())
}

pub async fn handle_create_group(
    settings: &Settings,
    name: String,
    mail_nickname: String,
    unified: bool,
) -> Result<()> {
    let client = connect(settings).await?;
    let details = GroupDetails::new(name, mail_nickname, unified);
    let group = get_or_create_group(&client, &details).await?;
    print_group(&group);
    Ok(())
}

pub async fn handle_add_user(settings: &Settings, group_id: Uuid, user_id: Uuid) -> Result<()> {
    let client = connect(settings).await?;
    let outcome = client
        .add_member(&group_id.to_string(), &user_id.to_string())
        .await?;

    match outcome {
        AddMemberOutcome::Added => println!(
            "User {} added to group {}",
            user_id.to_string().cyan(),
            group_id.to_string().cyan()
        ),
        AddMemberOutcome::AlreadyMember => println!(
            "User {} is already a member of group {}",
            user_id.to_string().cyan(),
            group_id.to_string().cyan()
        ),
    }
    Ok(())
}

pub async fn handle_list_members(settings: &Settings, group_id: Uuid) -> Result<()> {
    let client = connect(settings).await?;
    let members = client.list_members(&group_id.to_string()).await?;

    println!(
        "{} member(s) in group {}",
        members.len().to_string().bright_green(),
        group_id.to_string().cyan()
    );
    for member in &members {
        println!(
            "{}  {}  {}",
            member.id.dimmed(),
            member.display_name.as_deref().unwrap_or("-").bold(),
            member.mail.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

pub async fn handle_find_user(settings: &Settings, email: &str) -> Result<()> {
    let client = connect(settings).await?;

    match client.find_user_by_email(email).await? {
        Some(user) => println!("{}", serde_json::to_string_pretty(&user)?),
        None => println!("No user found with address {}", email.yellow()),
    }
    Ok(())
}
