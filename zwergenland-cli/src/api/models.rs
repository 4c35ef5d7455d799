//! Graph resource models and request payloads

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::InvitationSettings;
use crate::roster::Contact;

/// A user object as returned by `/users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub mail: Option<String>,
    #[serde(default)]
    pub user_principal_name: Option<String>,
    #[serde(default)]
    pub user_type: Option<String>,
}

impl DirectoryUser {
    /// Mail address, falling back to the principal name
    pub fn address(&self) -> &str {
        self.mail
            .as_deref()
            .or(self.user_principal_name.as_deref())
            .unwrap_or("")
    }
}

/// A group object as returned by `/groups`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryGroup {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub mail: Option<String>,
    #[serde(default)]
    pub mail_nickname: Option<String>,
    #[serde(default)]
    pub group_types: Vec<String>,
}

/// Entry of a `members` or `memberOf` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryObject {
    #[serde(rename = "@odata.type", default)]
    pub odata_type: Option<String>,
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub mail: Option<String>,
}

/// Result of adding a member to a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddMemberOutcome {
    Added,
    AlreadyMember,
}

/// Group to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDetails {
    pub name: String,
    pub mail_nickname: String,
    /// Microsoft 365 ("Unified") group instead of a plain distribution group
    pub unified: bool,
}

impl GroupDetails {
    pub fn new(name: impl Into<String>, mail_nickname: impl Into<String>, unified: bool) -> Self {
        Self {
            name: name.into(),
            mail_nickname: mail_nickname.into(),
            unified,
        }
    }

    pub fn to_payload(&self) -> Value {
        let mut group = json!({
            "displayName": self.name,
            "description": self.name,
            "mailEnabled": true,
            "mailNickname": self.mail_nickname,
            "securityEnabled": false,
            "visibility": "Private",
        });

        if self.unified {
            group["groupTypes"] = json!(["Unified"]);
        }

        group
    }
}

/// Profile fields written with `PATCH /users/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub given_name: String,
    pub surname: String,
    pub display_name: String,
    pub mail: String,
}

impl From<&Contact> for UserDetails {
    fn from(contact: &Contact) -> Self {
        Self {
            given_name: contact.first_name().to_string(),
            surname: contact.last_name().to_string(),
            display_name: contact.display_name().to_string(),
            mail: contact.email().to_string(),
        }
    }
}

/// Body of `POST /invitations`
pub fn invitation_payload(contact: &Contact, settings: &InvitationSettings) -> Value {
    let cc_recipients: Vec<Value> = settings
        .cc_recipients
        .iter()
        .map(|cc| json!({ "emailAddress": { "name": cc.name, "address": cc.address } }))
        .collect();

    let message = format!(
        "Hallo {}, willkommen im Email-Verteiler von {}!",
        contact.display_name(),
        settings.organization
    );

    json!({
        "invitedUserEmailAddress": contact.email(),
        "inviteRedirectUrl": settings.redirect_url,
        "sendInvitationMessage": settings.send_message,
        "invitedUserDisplayName": contact.display_name(),
        "invitedUserMessageInfo": {
            "customizedMessageBody": message,
            "ccRecipients": cc_recipients,
        },
    })
}
