// Business logic services layer
//
// Roster sync and guest cleanup, written against the `Directory` trait so
// they can run on the Graph client or an in-memory directory in tests.

pub mod groups;
pub mod guests;
pub mod sync;

#[cfg(test)]
pub(crate) mod fake;

pub use groups::get_or_create_group;
pub use guests::{find_orphaned_guests, remove_guests};
pub use sync::{SyncOptions, SyncReport, UserAction, sync_roster};
