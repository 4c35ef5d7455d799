//! Cleanup of guest accounts that no longer belong to any group

use anyhow::{Context, Result};

use crate::api::{Directory, DirectoryObject, DirectoryUser};

const GROUP_TYPE: &str = "#microsoft.graph.group";

fn is_group(object: &DirectoryObject) -> bool {
    object.odata_type.as_deref().is_none_or(|t| t == GROUP_TYPE)
}

/// Guests without membership in any group
pub async fn find_orphaned_guests(directory: &dyn Directory) -> Result<Vec<DirectoryUser>> {
    let guests = directory.list_guests().await?;
    let mut orphans = Vec::new();

    for guest in guests {
        let memberships = directory
            .member_of(&guest.id)
            .await
            .with_context(|| format!("Failed to read group memberships of {}", guest.address()))?;

        if !memberships.iter().any(is_group) {
            log::debug!("Guest {} has no group memberships", guest.address());
            orphans.push(guest);
        }
    }

    log::info!("{} orphaned guest(s) found", orphans.len());
    Ok(orphans)
}

/// Delete the given guests, returning how many were removed
pub async fn remove_guests(directory: &dyn Directory, guests: &[DirectoryUser]) -> Result<usize> {
    for guest in guests {
        directory
            .delete_user(&guest.id)
            .await
            .with_context(|| format!("Failed to delete guest {}", guest.address()))?;
    }
    Ok(guests.len())
}
