use anyhow::Result;

use crate::api::{Directory, DirectoryGroup, GroupDetails};

/// Find a group by display name, creating it when nothing matches.
///
/// Prefers an exact display name match among the prefix results and
/// otherwise takes the first one.
pub async fn get_or_create_group(
    directory: &dyn Directory,
    details: &GroupDetails,
) -> Result<DirectoryGroup> {
    match find_group(directory, &details.name).await? {
        Some(group) => Ok(group),
        None => {
            log::info!("No group named '{}', creating it", details.name);
            directory.create_group(details).await
        }
    }
}

/// Existing group for `name`, without creating anything
pub async fn find_group(directory: &dyn Directory, name: &str) -> Result<Option<DirectoryGroup>> {
    let found = directory.find_groups_by_prefix(name).await?;
    let candidates = found.len();

    let Some((group, exact)) = choose_group(found, name) else {
        return Ok(None);
    };
    if !exact {
        log::warn!(
            "No group named '{}', using '{}' ({}) out of {} starting with that name",
            name,
            group.display_name.as_deref().unwrap_or_default(),
            group.id,
            candidates
        );
    }
    Ok(Some(group))
}

/// Exact display name match if any, else the first prefix match. The flag
/// tells whether the name matched exactly.
fn choose_group(mut found: Vec<DirectoryGroup>, name: &str) -> Option<(DirectoryGroup, bool)> {
    if let Some(pos) = found
        .iter()
        .position(|g| g.display_name.as_deref() == Some(name))
    {
        return Some((found.swap_remove(pos), true));
    }
    found.into_iter().next().map(|g| (g, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fake::FakeDirectory;

    #[tokio::test]
    async fn test_creates_missing_group() {
        let directory = FakeDirectory::new();
        let details = GroupDetails::new("Kita Eltern", "kita-eltern", false);

        let group = get_or_create_group(&directory, &details).await.unwrap();
        assert_eq!(group.display_name.as_deref(), Some("Kita Eltern"));
        assert_eq!(directory.group_count(), 1);

        // Second call finds it instead of creating another one
        let again = get_or_create_group(&directory, &details).await.unwrap();
        assert_eq!(again.id, group.id);
        assert_eq!(directory.group_count(), 1);
    }

    #[tokio::test]
    async fn test_prefers_exact_name() {
        let directory = FakeDirectory::new();
        directory.add_group("Kita Eltern 2023");
        let exact = directory.add_group("Kita Eltern");

        let details = GroupDetails::new("Kita Eltern", "kita-eltern", false);
        let group = get_or_create_group(&directory, &details).await.unwrap();
        assert_eq!(group.id, exact);
    }

    #[tokio::test]
    async fn test_takes_first_prefix_match() {
        let directory = FakeDirectory::new();
        let first = directory.add_group("Kita Eltern 2023");
        directory.add_group("Kita Eltern 2024");

        let group = find_group(&directory, "Kita Eltern").await.unwrap().unwrap();
        assert_eq!(group.id, first);
        assert!(find_group(&directory, "Hort").await.unwrap().is_none());
    }

    fn group(id: &str, name: &str) -> DirectoryGroup {
        DirectoryGroup {
            id: id.to_string(),
            display_name: Some(name.to_string()),
            description: None,
            mail: None,
            mail_nickname: None,
            group_types: Vec::new(),
        }
    }

    #[test]
    fn test_choose_group_flags_inexact_match() {
        let (chosen, exact) = choose_group(vec![group("g1", "Kita Eltern 2023")], "Kita").unwrap();
        assert_eq!(chosen.id, "g1");
        assert!(!exact);

        let found = vec![group("g1", "Kita Eltern 2023"), group("g2", "Kita")];
        let (chosen, exact) = choose_group(found, "Kita").unwrap();
        assert_eq!(chosen.id, "g2");
        assert!(exact);

        assert!(choose_group(Vec::new(), "Kita").is_none());
    }
}
