//! App registration credentials for the client-credentials flow

use anyhow::{Result, bail};

pub const TENANT_ID_VAR: &str = "TENANT_ID";
pub const CLIENT_ID_VAR: &str = "CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "CLIENT_SECRET";

#[derive(Clone)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

impl Credentials {
    /// Read credentials from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through `lookup`, naming every missing variable
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let tenant_id = get(TENANT_ID_VAR);
        let client_id = get(CLIENT_ID_VAR);
        let client_secret = get(CLIENT_SECRET_VAR);

        match (tenant_id, client_id, client_secret) {
            (Some(tenant_id), Some(client_id), Some(client_secret)) => Ok(Self {
                tenant_id,
                client_id,
                client_secret,
            }),
            (tenant_id, client_id, client_secret) => {
                let missing: Vec<&str> = [
                    (TENANT_ID_VAR, tenant_id.is_none()),
                    (CLIENT_ID_VAR, client_id.is_none()),
                    (CLIENT_SECRET_VAR, client_secret.is_none()),
                ]
                .iter()
                .filter(|(_, missing)| *missing)
                .map(|(name, _)| *name)
                .collect();
                bail!(
                    "Missing credentials: set {} in the environment or a .env file",
                    missing.join(", ")
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("TENANT_ID", "tenant"),
            ("CLIENT_ID", " client "),
            ("CLIENT_SECRET", "secret"),
        ]
        .into_iter()
        .collect();

        let creds = Credentials::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(creds.tenant_id, "tenant");
        assert_eq!(creds.client_id, "client");
        assert_eq!(creds.client_secret, "secret");
    }

    #[test]
    fn test_missing_variables_are_named() {
        let vars: HashMap<&str, &str> = [("CLIENT_ID", "client"), ("CLIENT_SECRET", "")]
            .into_iter()
            .collect();

        let err = Credentials::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("TENANT_ID"));
        assert!(message.contains("CLIENT_SECRET"));
        assert!(!message.contains("CLIENT_ID,"));
    }

    #[test]
    fn test_debug_hides_secret() {
        let creds = Credentials {
            tenant_id: "t".to_string(),
            client_id: "c".to_string(),
            client_secret: "hunter2".to_string(),
        };
        assert!(!format!("{:?}", creds).contains("hunter2"));
    }
}
