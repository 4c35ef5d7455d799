//! Authenticated HTTP client for Microsoft Graph

use anyhow::{Context, Result, anyhow};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::auth::{TokenInfo, fetch_token};
use crate::config::{Credentials, GraphSettings};

/// One page of a Graph collection response
#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(rename = "@odata.nextLink", default)]
    pub next_link: Option<String>,
}

/// Graph client holding a bearer token for the app registration
#[derive(Debug, Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    api_url: String,
    token: TokenInfo,
}

impl GraphClient {
    pub fn new(http: reqwest::Client, api_url: impl Into<String>, token: TokenInfo) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Build an HTTP client, acquire a token and return a ready client
    pub async fn connect(settings: &GraphSettings, credentials: &Credentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        let token = fetch_token(&http, settings, credentials).await?;
        Ok(Self::new(http, settings.api_url.clone(), token))
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        log::debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .bearer_auth(&self.token.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.context("Request to Microsoft Graph failed")?;
        log::debug!("-> HTTP {}", response.status());
        Ok(response)
    }

    /// GET a single resource; `None` on 404
    pub(crate) async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let response = self.send(self.request(Method::GET, &self.url(path))).await?;

        match response.status() {
            StatusCode::OK => Ok(Some(response.json().await.context("Unreadable response body")?)),
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(api_error(response, &format!("GET {}", path)).await),
        }
    }

    /// GET a collection, following `@odata.nextLink` until the last page
    pub(crate) async fn get_collection<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        collect_pages(move |next: Option<String>| {
            let request = match next {
                // The next link already carries the query
                Some(link) => self.request(Method::GET, &link),
                None => self.request(Method::GET, &self.url(path)).query(query),
            };
            async move { self.fetch_page(request, path).await }
        })
        .await
    }

    async fn fetch_page<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> Result<Page<T>> {
        let response = self.send(request).await?;
        if response.status() != StatusCode::OK {
            return Err(api_error(response, &format!("GET {}", path)).await);
        }
        response.json().await.context("Unreadable collection page")
    }

    /// Send a JSON body and require `expected` as status
    pub(crate) async fn send_json(
        &self,
        method: Method,
        path: &str,
        body: &Value,
        expected: StatusCode,
    ) -> Result<Response> {
        let action = format!("{} {}", method, path);
        let response = self
            .send(self.request(method, &self.url(path)).json(body))
            .await?;

        if response.status() != expected {
            return Err(api_error(response, &action).await);
        }
        Ok(response)
    }
}

/// Drain a paged collection. `fetch` gets `None` for the first page and the
/// previous page's next link after that.
pub(crate) async fn collect_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut next = None;

    loop {
        let page = fetch(next.take()).await?;
        items.extend(page.value);
        match page.next_link {
            Some(link) => next = Some(link),
            None => break,
        }
    }

    log::debug!("Collected {} item(s)", items.len());
    Ok(items)
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Turn an unexpected response into an error with the Graph error message
pub(crate) async fn api_error(response: Response, action: &str) -> anyhow::Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    anyhow!("{} failed (HTTP {}): {}", action, status, error_message(&body))
}

pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => format!("{}: {}", parsed.error.code, parsed.error.message),
        Err(_) if body.is_empty() => "empty response".to_string(),
        Err(_) => body.to_string(),
    }
}

/// Percent-encode an id for use as a path segment (guest UPNs contain '#')
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
