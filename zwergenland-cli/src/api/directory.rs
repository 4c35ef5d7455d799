//! Directory operations used by the sync and cleanup services

use anyhow::Result;
use async_trait::async_trait;

use super::GraphClient;
use super::models::{
    AddMemberOutcome, DirectoryGroup, DirectoryObject, DirectoryUser, GroupDetails, UserDetails,
};
use crate::config::InvitationSettings;
use crate::roster::Contact;

#[async_trait]
pub trait Directory: Send + Sync {
    async fn find_groups_by_prefix(&self, prefix: &str) -> Result<Vec<DirectoryGroup>>;

    async fn create_group(&self, details: &GroupDetails) -> Result<DirectoryGroup>;

    async fn add_member(&self, group_id: &str, user_id: &str) -> Result<AddMemberOutcome>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<DirectoryUser>>;

    async fn update_user(&self, user_id: &str, details: &UserDetails) -> Result<Option<DirectoryUser>>;

    /// Invite a guest and return the new user id
    async fn invite(&self, contact: &Contact, settings: &InvitationSettings) -> Result<String>;

    async fn list_guests(&self) -> Result<Vec<DirectoryUser>>;

    async fn member_of(&self, user_id: &str) -> Result<Vec<DirectoryObject>>;

    async fn delete_user(&self, user_id: &str) -> Result<()>;
}

#[async_trait]
impl Directory for GraphClient {
    async fn find_groups_by_prefix(&self, prefix: &str) -> Result<Vec<DirectoryGroup>> {
        GraphClient::find_groups_by_prefix(self, prefix).await
    }

    async fn create_group(&self, details: &GroupDetails) -> Result<DirectoryGroup> {
        GraphClient::create_group(self, details).await
    }

    async fn add_member(&self, group_id: &str, user_id: &str) -> Result<AddMemberOutcome> {
        GraphClient::add_member(self, group_id, user_id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<DirectoryUser>> {
        GraphClient::find_user_by_email(self, email).await
    }

    async fn update_user(&self, user_id: &str, details: &UserDetails) -> Result<Option<DirectoryUser>> {
        GraphClient::update_user(self, user_id, details).await
    }

    async fn invite(&self, contact: &Contact, settings: &InvitationSettings) -> Result<String> {
        GraphClient::invite(self, contact, settings).await
    }

    async fn list_guests(&self) -> Result<Vec<DirectoryUser>> {
        GraphClient::list_guests(self).await
    }

    async fn member_of(&self, user_id: &str) -> Result<Vec<DirectoryObject>> {
        GraphClient::member_of(self, user_id).await
    }

    async fn delete_user(&self, user_id: &str) -> Result<()> {
        GraphClient::delete_user(self, user_id).await
    }
}
