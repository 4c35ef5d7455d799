//! `/groups` endpoints

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use serde_json::json;

use super::client::{error_message, segment};
use super::models::{AddMemberOutcome, DirectoryGroup, DirectoryObject, GroupDetails};
use super::{GraphClient, query};

impl GraphClient {
    /// All groups of the tenant
    pub async fn list_groups(&self) -> Result<Vec<DirectoryGroup>> {
        self.get_collection("groups", &[]).await
    }

    /// Groups whose display name starts with `prefix`
    pub async fn find_groups_by_prefix(&self, prefix: &str) -> Result<Vec<DirectoryGroup>> {
        let filter = query::starts_with("displayName", prefix);
        let groups: Vec<DirectoryGroup> = self.get_collection("groups", &[("$filter", filter.as_str())]).await?;
        log::info!("{} group(s) found starting with '{}'", groups.len(), prefix);
        Ok(groups)
    }

    pub async fn create_group(&self, details: &GroupDetails) -> Result<DirectoryGroup> {
        let response = self
            .send_json(Method::POST, "groups", &details.to_payload(), StatusCode::CREATED)
            .await?;
        let group: DirectoryGroup = response.json().await.context("Unreadable group response")?;
        log::info!("Created group '{}' ({})", details.name, group.id);
        Ok(group)
    }

    /// Add a user to a group. Adding an existing member is not an error.
    pub async fn add_member(&self, group_id: &str, user_id: &str) -> Result<AddMemberOutcome> {
        let path = format!("groups/{}/members/$ref", segment(group_id));
        let body = json!({
            "@odata.id": self.url(&format!("directoryObjects/{}", segment(user_id))),
        });

        let response = self
            .send(self.request(Method::POST, &self.url(&path)).json(&body))
            .await?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let outcome = add_member_outcome(status, &text)
            .with_context(|| format!("Adding user {} to group {} failed", user_id, group_id))?;

        match outcome {
            AddMemberOutcome::Added => log::info!("User {} added to group {}", user_id, group_id),
            AddMemberOutcome::AlreadyMember => {
                log::info!("User {} is already a member of group {}", user_id, group_id)
            }
        }
        Ok(outcome)
    }

    pub async fn list_members(&self, group_id: &str) -> Result<Vec<DirectoryObject>> {
        self.get_collection(&format!("groups/{}/members", segment(group_id)), &[])
            .await
    }
}

/// Map the response of `POST members/$ref`. Graph answers 400 with an
/// "already exist" message when the reference is present.
fn add_member_outcome(status: StatusCode, body: &str) -> Result<AddMemberOutcome> {
    match status {
        StatusCode::NO_CONTENT => Ok(AddMemberOutcome::Added),
        StatusCode::BAD_REQUEST if is_already_member(body) => Ok(AddMemberOutcome::AlreadyMember),
        _ => anyhow::bail!("HTTP {}: {}", status, error_message(body)),
    }
}

fn is_already_member(body: &str) -> bool {
    body.contains("already exist")
}
