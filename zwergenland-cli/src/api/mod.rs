//! Microsoft Graph API module
//!
//! Client-credential authentication plus the handful of group, user and
//! invitation endpoints the roster sync needs. All endpoints are reachable
//! through [`GraphClient`]; the subset used by the services is also exposed
//! as the [`Directory`] trait.

pub mod auth;
pub mod client;
pub mod directory;
pub mod groups;
pub mod invitations;
pub mod models;
pub mod query;
pub mod users;

pub use client::GraphClient;
pub use directory::Directory;
pub use models::{
    AddMemberOutcome, DirectoryGroup, DirectoryObject, DirectoryUser, GroupDetails, UserDetails,
};
