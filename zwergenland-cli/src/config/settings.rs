//! TOML settings file

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::roster::SheetConfiguration;

pub const GROUP_PREFIXES_VAR: &str = "GROUP_PREFIXES";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub graph: GraphSettings,
    pub invitation: InvitationSettings,
    /// Display name prefixes used by `list-groups` without arguments
    pub group_prefixes: Vec<String>,
    /// Custom sheet layouts, selectable with `--layout <name>`
    pub layouts: BTreeMap<String, SheetConfiguration>,
}

/// Endpoints and request timeout for the Microsoft identity platform and Graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
    pub login_url: String,
    pub api_url: String,
    pub timeout_secs: u64,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            login_url: "https://login.microsoftonline.com".to_string(),
            api_url: "https://graph.microsoft.com/v1.0".to_string(),
            timeout_secs: 30,
        }
    }
}

impl GraphSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// How guest invitations are sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvitationSettings {
    /// Where the guest lands after redeeming the invitation
    pub redirect_url: String,
    /// Name used in the welcome message
    pub organization: String,
    /// Let Microsoft send the invitation email
    pub send_message: bool,
    pub cc_recipients: Vec<CcRecipient>,
}

impl Default for InvitationSettings {
    fn default() -> Self {
        Self {
            redirect_url: "https://www.zwergenland-babelsberg.de".to_string(),
            organization: "KiTa Zwergenland".to_string(),
            send_message: false,
            cc_recipients: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CcRecipient {
    pub name: String,
    pub address: String,
}

impl Settings {
    /// `<config dir>/zwergenland/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("zwergenland").join("config.toml"))
    }

    /// Load settings from `path`, or from the default location.
    ///
    /// An explicitly given file must exist; a missing default file yields
    /// the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    log::debug!("No settings file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let settings = Self::from_toml(&text)
            .with_context(|| format!("Invalid settings file: {}", path.display()))?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply environment overrides (currently `GROUP_PREFIXES`)
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(prefixes) = lookup(GROUP_PREFIXES_VAR) {
            let prefixes = parse_prefixes(&prefixes);
            if !prefixes.is_empty() {
                self.group_prefixes = prefixes;
            }
        }
        self
    }

    /// Resolve a layout name: configured layouts first, then the built-ins
    pub fn layout(&self, name: &str) -> Result<SheetConfiguration> {
        if let Some(layout) = self.layouts.get(name) {
            return Ok(layout.clone());
        }
        SheetConfiguration::preset(name).with_context(|| {
            let mut known: Vec<&str> = SheetConfiguration::preset_names().to_vec();
            known.extend(self.layouts.keys().map(String::as_str));
            format!("Unknown layout '{}'. Known layouts: {}", name, known.join(", "))
        })
    }
}

/// Split a comma separated prefix list, dropping empty entries
pub fn parse_prefixes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.graph.timeout(), Duration::from_secs(30));
        assert_eq!(settings.invitation.organization, "KiTa Zwergenland");
    }

    #[test]
    fn test_partial_file() {
        let settings = Settings::from_toml(
            r#"
            group_prefixes = ["Kita-", "Verein-"]

            [invitation]
            organization = "Zwergenland e.V."
            send_message = true

            [[invitation.cc_recipients]]
            name = "Vorstand"
            address = "vorstand@example.org"

            [layouts.hort]
            header_label = "Name Mutter"
            anchor_column = "D"
            first_data_row = 4
            record_1 = { first_name_column = "E", last_name_column = "D", email_column = "K" }
            record_2 = { first_name_column = "G", last_name_column = "F", email_column = "L" }
            "#,
        )
        .unwrap();

        assert_eq!(settings.group_prefixes, vec!["Kita-", "Verein-"]);
        assert!(settings.invitation.send_message);
        assert_eq!(settings.invitation.redirect_url, "https://www.zwergenland-babelsberg.de");
        assert_eq!(settings.invitation.cc_recipients[0].address, "vorstand@example.org");
        assert_eq!(settings.graph, GraphSettings::default());

        let hort = settings.layout("hort").unwrap();
        assert_eq!(hort.first_data_row, Some(4));
        assert_eq!(hort.record_2.email_column, "L");
    }

    #[test]
    fn test_layout_lookup_falls_back_to_presets() {
        let settings = Settings::default();
        assert_eq!(
            settings.layout("kindergarten").unwrap(),
            SheetConfiguration::kindergarten()
        );

        let err = settings.layout("hort").unwrap_err();
        assert!(err.to_string().contains("kindergarten, association"));
    }

    #[test]
    fn test_group_prefixes_from_env() {
        let settings = Settings {
            group_prefixes: vec!["Alt".to_string()],
            ..Settings::default()
        };

        let settings = settings.with_env(|k| (k == GROUP_PREFIXES_VAR).then(|| " Kita , ,Hort".to_string()));
        assert_eq!(settings.group_prefixes, vec!["Kita", "Hort"]);

        let settings = settings.with_env(|_| None);
        assert_eq!(settings.group_prefixes, vec!["Kita", "Hort"]);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = Settings::load(Some(Path::new("/nonexistent/zwergenland.toml")));
        assert!(result.is_err());
    }
}
