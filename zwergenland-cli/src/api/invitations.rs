//! `/invitations` endpoint for B2B guest invites

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use serde::Deserialize;

use super::GraphClient;
use super::models::invitation_payload;
use crate::config::InvitationSettings;
use crate::roster::Contact;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvitationResponse {
    invited_user: InvitedUser,
}

#[derive(Debug, Deserialize)]
struct InvitedUser {
    id: String,
}

impl GraphClient {
    /// Invite a contact as guest user and return the new user's id
    pub async fn invite(&self, contact: &Contact, settings: &InvitationSettings) -> Result<String> {
        let payload = invitation_payload(contact, settings);
        let response = self
            .send_json(Method::POST, "invitations", &payload, StatusCode::CREATED)
            .await
            .with_context(|| format!("Failed to invite {}", contact.email()))?;

        let invitation: InvitationResponse =
            response.json().await.context("Unreadable invitation response")?;
        log::info!(
            "Invited {} as guest user {}",
            contact.email(),
            invitation.invited_user.id
        );
        Ok(invitation.invited_user.id)
    }
}
