//! Roster to group synchronization
//!
//! For every contact: look the user up by mail, invite a guest when there is
//! none, then add the user to the group. Running the sync again only adds
//! what is missing.

use std::collections::HashSet;

use anyhow::{Context, Result};

use super::groups::{find_group, get_or_create_group};
use crate::api::{AddMemberOutcome, Directory, DirectoryUser, GroupDetails, UserDetails};
use crate::config::InvitationSettings;
use crate::roster::Contact;

/// What happened to the directory user of a contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Existing(String),
    Invited(String),
    /// Dry run: no user with that mail yet
    WouldInvite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactOutcome {
    pub email: String,
    pub user: UserAction,
    pub membership: AddMemberOutcome,
    /// Name fields of an existing user were rewritten from the roster
    pub profile_updated: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Look up only, change nothing
    pub dry_run: bool,
    /// Overwrite names of existing users that differ from the roster
    pub update_profiles: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub dry_run: bool,
    /// `None` only in a dry run when the group does not exist yet
    pub group_id: Option<String>,
    pub outcomes: Vec<ContactOutcome>,
    /// Contacts skipped because their address was already processed
    pub duplicates: usize,
}

impl SyncReport {
    pub fn invited(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| !matches!(o.user, UserAction::Existing(_)))
            .count()
    }

    pub fn existing(&self) -> usize {
        self.outcomes.len() - self.invited()
    }

    pub fn added(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.membership == AddMemberOutcome::Added)
            .count()
    }

    pub fn already_member(&self) -> usize {
        self.outcomes.len() - self.added()
    }

    pub fn profiles_updated(&self) -> usize {
        self.outcomes.iter().filter(|o| o.profile_updated).count()
    }
}

/// Make every contact a member of the group described by `group`.
///
/// In a dry run nothing is created, invited, updated or added; lookups still
/// run so the report shows what a real run would do.
pub async fn sync_roster(
    directory: &dyn Directory,
    group: &GroupDetails,
    contacts: &[Contact],
    invitation: &InvitationSettings,
    options: SyncOptions,
) -> Result<SyncReport> {
    let dry_run = options.dry_run;
    let group_id = if dry_run {
        find_group(directory, &group.name).await?.map(|g| g.id)
    } else {
        Some(get_or_create_group(directory, group).await?.id)
    };

    let mut report = SyncReport {
        dry_run,
        group_id: group_id.clone(),
        ..SyncReport::default()
    };
    let mut seen = HashSet::new();

    for contact in contacts {
        if !seen.insert(contact.email().to_lowercase()) {
            log::debug!("Skipping duplicate address {}", contact.email());
            report.duplicates += 1;
            continue;
        }

        let outcome = sync_contact(directory, group_id.as_deref(), contact, invitation, options)
            .await
            .with_context(|| format!("Failed to sync {}", contact.email()))?;
        report.outcomes.push(outcome);
    }

    log::info!(
        "Sync finished: {} invited, {} existing, {} added, {} already members, {} duplicates",
        report.invited(),
        report.existing(),
        report.added(),
        report.already_member(),
        report.duplicates
    );
    Ok(report)
}

async fn sync_contact(
    directory: &dyn Directory,
    group_id: Option<&str>,
    contact: &Contact,
    invitation: &InvitationSettings,
    options: SyncOptions,
) -> Result<ContactOutcome> {
    let dry_run = options.dry_run;
    let existing = directory.find_user_by_email(contact.email()).await?;

    let mut profile_updated = false;
    if let Some(user) = &existing {
        if options.update_profiles && !dry_run && profile_differs(user, contact) {
            directory.update_user(&user.id, &UserDetails::from(contact)).await?;
            profile_updated = true;
        }
    }

    let user = match existing {
        Some(user) => UserAction::Existing(user.id),
        None if dry_run => UserAction::WouldInvite,
        None => UserAction::Invited(directory.invite(contact, invitation).await?),
    };

    let membership = match (&user, group_id) {
        (UserAction::Existing(id) | UserAction::Invited(id), Some(group_id)) if !dry_run => {
            directory.add_member(group_id, id).await?
        }
        (UserAction::Existing(id), Some(group_id)) => {
            let groups = directory.member_of(id).await?;
            if groups.iter().any(|g| g.id == group_id) {
                AddMemberOutcome::AlreadyMember
            } else {
                AddMemberOutcome::Added
            }
        }
        _ => AddMemberOutcome::Added,
    };

    Ok(ContactOutcome {
        email: contact.email().to_string(),
        user,
        membership,
        profile_updated,
    })
}

/// Whether the roster names differ from the directory. Contacts without any
/// name never overwrite a profile.
fn profile_differs(user: &DirectoryUser, contact: &Contact) -> bool {
    if contact.first_name().is_empty() && contact.last_name().is_empty() {
        return false;
    }
    user.given_name.as_deref() != Some(contact.first_name())
        || user.surname.as_deref() != Some(contact.last_name())
        || user.display_name.as_deref() != Some(contact.display_name())
}
