//! Application settings
//!
//! Credentials come from the environment (and `.env` files); everything else
//! from an optional TOML file, by default `<config dir>/zwergenland/config.toml`.

pub mod credentials;
pub mod settings;

pub use credentials::Credentials;
pub use settings::{GraphSettings, InvitationSettings, Settings};
