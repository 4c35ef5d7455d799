//! `/users` endpoints

use anyhow::Result;
use reqwest::{Method, StatusCode};

use super::client::{api_error, segment};
use super::models::{DirectoryObject, DirectoryUser, UserDetails};
use super::{GraphClient, query};

impl GraphClient {
    /// First user whose `mail` equals `email`
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<DirectoryUser>> {
        let filter = query::equals("mail", email);
        let users: Vec<DirectoryUser> = self.get_collection("users", &[("$filter", filter.as_str())]).await?;

        if users.len() > 1 {
            log::warn!("{} users share the address {}, using the first", users.len(), email);
        }
        Ok(users.into_iter().next())
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<DirectoryUser>> {
        self.get_optional(&format!("users/{}", segment(user_id))).await
    }

    /// Overwrite name and mail of a user and return the updated record
    pub async fn update_user(&self, user_id: &str, details: &UserDetails) -> Result<Option<DirectoryUser>> {
        let body = serde_json::to_value(details)?;
        self.send_json(
            Method::PATCH,
            &format!("users/{}", segment(user_id)),
            &body,
            StatusCode::NO_CONTENT,
        )
        .await?;
        log::info!("Updated user {} ({})", user_id, details.mail);
        self.get_user(user_id).await
    }

    /// All users of type Guest
    pub async fn list_guests(&self) -> Result<Vec<DirectoryUser>> {
        let filter = query::equals("userType", "Guest");
        let guests: Vec<DirectoryUser> = self.get_collection("users", &[("$filter", filter.as_str())]).await?;
        log::info!("{} guest user(s) found", guests.len());
        Ok(guests)
    }

    /// Groups and directory roles the user is a direct member of
    pub async fn member_of(&self, user_id: &str) -> Result<Vec<DirectoryObject>> {
        self.get_collection(&format!("users/{}/memberOf", segment(user_id)), &[])
            .await
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<()> {
        let path = format!("users/{}", segment(user_id));
        let response = self.send(self.request(Method::DELETE, &self.url(&path))).await?;

        if response.status() != StatusCode::NO_CONTENT {
            return Err(api_error(response, &format!("DELETE {}", path)).await);
        }
        log::info!("Deleted user {}", user_id);
        Ok(())
    }
}
