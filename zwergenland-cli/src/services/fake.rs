//! In-memory directory for service tests

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::api::{
    AddMemberOutcome, Directory, DirectoryGroup, DirectoryObject, DirectoryUser, GroupDetails,
    UserDetails,
};
use crate::config::InvitationSettings;
use crate::roster::Contact;

#[derive(Default)]
struct State {
    next_id: usize,
    groups: Vec<DirectoryGroup>,
    users: Vec<DirectoryUser>,
    members: HashMap<String, Vec<String>>,
    invited: Vec<String>,
    deleted: Vec<String>,
    updated: Vec<String>,
    fail_invites: bool,
}

impl State {
    fn id(&mut self, kind: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", kind, self.next_id)
    }
}

#[derive(Default)]
pub(crate) struct FakeDirectory {
    state: Mutex<State>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_group(&self, name: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.id("group");
        state.groups.push(DirectoryGroup {
            id: id.clone(),
            display_name: Some(name.to_string()),
            description: None,
            mail: None,
            mail_nickname: None,
            group_types: Vec::new(),
        });
        id
    }

    pub fn add_user(&self, mail: &str, user_type: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.id("user");
        state.users.push(DirectoryUser {
            id: id.clone(),
            display_name: None,
            given_name: None,
            surname: None,
            mail: Some(mail.to_string()),
            user_principal_name: None,
            user_type: Some(user_type.to_string()),
        });
        id
    }

    pub fn add_membership(&self, group_id: &str, user_id: &str) {
        let mut state = self.state.lock().unwrap();
        state
            .members
            .entry(group_id.to_string())
            .or_default()
            .push(user_id.to_string());
    }

    pub fn fail_invites(&self) {
        self.state.lock().unwrap().fail_invites = true;
    }

    pub fn group_count(&self) -> usize {
        self.state.lock().unwrap().groups.len()
    }

    pub fn members(&self, group_id: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .members
            .get(group_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn invited(&self) -> Vec<String> {
        self.state.lock().unwrap().invited.clone()
    }

    pub fn updated(&self) -> Vec<String> {
        self.state.lock().unwrap().updated.clone()
    }

    pub fn add_named_user(&self, mail: &str, given_name: &str, surname: &str) -> String {
        let id = self.add_user(mail, "Guest");
        let mut state = self.state.lock().unwrap();
        if let Some(user) = state.users.iter_mut().find(|u| u.id == id) {
            user.given_name = Some(given_name.to_string());
            user.surname = Some(surname.to_string());
            user.display_name = Some(format!("{} {}", given_name, surname));
        }
        id
    }

    pub fn deleted(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted.clone()
    }
}

#[async_trait]
impl Directory for FakeDirectory {
    async fn find_groups_by_prefix(&self, prefix: &str) -> Result<Vec<DirectoryGroup>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .groups
            .iter()
            .filter(|g| g.display_name.as_deref().is_some_and(|n| n.starts_with(prefix)))
            .cloned()
            .collect())
    }

    async fn create_group(&self, details: &GroupDetails) -> Result<DirectoryGroup> {
        let id = self.add_group(&details.name);
        let state = self.state.lock().unwrap();
        Ok(state.groups.iter().find(|g| g.id == id).cloned().unwrap())
    }

    async fn add_member(&self, group_id: &str, user_id: &str) -> Result<AddMemberOutcome> {
        let mut state = self.state.lock().unwrap();
        let members = state.members.entry(group_id.to_string()).or_default();
        if members.iter().any(|m| m == user_id) {
            return Ok(AddMemberOutcome::AlreadyMember);
        }
        members.push(user_id.to_string());
        Ok(AddMemberOutcome::Added)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<DirectoryUser>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .find(|u| u.mail.as_deref() == Some(email))
            .cloned())
    }

    async fn update_user(&self, user_id: &str, details: &UserDetails) -> Result<Option<DirectoryUser>> {
        let mut state = self.state.lock().unwrap();
        let Some(user) = state.users.iter_mut().find(|u| u.id == user_id) else {
            bail!("PATCH users/{} failed (HTTP 404)", user_id);
        };
        user.given_name = Some(details.given_name.clone());
        user.surname = Some(details.surname.clone());
        user.display_name = Some(details.display_name.clone());
        user.mail = Some(details.mail.clone());
        let updated = user.clone();
        state.updated.push(user_id.to_string());
        Ok(Some(updated))
    }

    async fn invite(&self, contact: &Contact, _settings: &InvitationSettings) -> Result<String> {
        if self.state.lock().unwrap().fail_invites {
            bail!("POST invitations failed (HTTP 403): Authorization_RequestDenied");
        }
        let id = self.add_user(contact.email(), "Guest");
        self.state
            .lock()
            .unwrap()
            .invited
            .push(contact.email().to_string());
        Ok(id)
    }

    async fn list_guests(&self) -> Result<Vec<DirectoryUser>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .filter(|u| u.user_type.as_deref() == Some("Guest"))
            .cloned()
            .collect())
    }

    async fn member_of(&self, user_id: &str) -> Result<Vec<DirectoryObject>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .members
            .iter()
            .filter(|(_, members)| members.iter().any(|m| m == user_id))
            .map(|(group_id, _)| DirectoryObject {
                odata_type: Some("#microsoft.graph.group".to_string()),
                id: group_id.clone(),
                display_name: None,
                mail: None,
            })
            .collect())
    }

    async fn delete_user(&self, user_id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.users.len();
        state.users.retain(|u| u.id != user_id);
        if state.users.len() == before {
            bail!("DELETE users/{} failed (HTTP 404)", user_id);
        }
        state.deleted.push(user_id.to_string());
        Ok(())
    }
}
