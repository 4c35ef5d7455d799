//! OAuth 2.0 client-credentials token acquisition

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::config::{Credentials, GraphSettings};

pub const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Access token issued to the app registration
#[derive(Clone, Deserialize)]
pub struct TokenInfo {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: u64,
}

impl std::fmt::Debug for TokenInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenInfo")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    token_type: String,
    #[serde(default)]
    expires_in: u64,
    error: Option<String>,
    error_description: Option<String>,
}

pub fn token_url(settings: &GraphSettings, tenant_id: &str) -> String {
    format!(
        "{}/{}/oauth2/v2.0/token",
        settings.login_url.trim_end_matches('/'),
        tenant_id
    )
}

/// Request an application token for Microsoft Graph
pub async fn fetch_token(
    http: &reqwest::Client,
    settings: &GraphSettings,
    credentials: &Credentials,
) -> Result<TokenInfo> {
    let url = token_url(settings, &credentials.tenant_id);
    log::debug!("POST {}", url);

    let form = [
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.as_str()),
        ("scope", GRAPH_SCOPE),
        ("grant_type", "client_credentials"),
    ];

    let response = http
        .post(&url)
        .form(&form)
        .send()
        .await
        .context("Failed to reach the Microsoft identity platform")?;

    let status = response.status();
    let body: TokenResponse = response
        .json()
        .await
        .with_context(|| format!("Unreadable token response (HTTP {})", status))?;

    parse_token_response(status, body)
}

fn parse_token_response(status: reqwest::StatusCode, body: TokenResponse) -> Result<TokenInfo> {
    if !status.is_success() {
        bail!(
            "Authentication failed (HTTP {}): {}",
            status,
            body.error_description
                .or(body.error)
                .unwrap_or_else(|| "no error description".to_string())
        );
    }

    let access_token = body
        .access_token
        .context("Token response did not contain an access_token")?;

    log::info!("Acquired access token, valid for {}s", body.expires_in);
    Ok(TokenInfo {
        access_token,
        token_type: body.token_type,
        expires_in: body.expires_in,
    })
}
