//! HTTP client for the completed-items endpoint

use crate::config::ApiConfig;
use crate::credential::ApiToken;
use crate::error::{Result, TodoistLogError};
use crate::todoist::{CompletedRequest, Page, PageSource, TimeRange};

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Todoist completed-items client
///
/// One POST per page, no retries. The token is held only to build the
/// `Authorization` header.
///
/// # Examples
///
/// ```
/// use todoist_log::config::ApiConfig;
/// use todoist_log::credential::ApiToken;
/// use todoist_log::todoist::TodoistClient;
///
/// let token = ApiToken::new("0123456789abcdef").unwrap();
/// let client = TodoistClient::new(&ApiConfig::default(), token).unwrap();
/// assert_eq!(client.url(), "https://api.todoist.com/sync/v9/completed/get_all");
/// ```
pub struct TodoistClient {
    client: Client,
    url: String,
    token: ApiToken,
}

impl TodoistClient {
    /// Create a client for the endpoint described by `config`
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: &ApiConfig, token: ApiToken) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("todoist-log/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TodoistLogError::from)?;

        let url = config.completed_url();
        tracing::debug!(
            url = %url,
            timeout_seconds = config.timeout_seconds,
            "Initialized Todoist client"
        );

        Ok(Self { client, url, token })
    }

    /// Endpoint URL requests are sent to
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for TodoistClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoistClient")
            .field("url", &self.url)
            .field("token", &self.token)
            .finish()
    }
}

#[async_trait]
impl PageSource for TodoistClient {
    async fn fetch_page(&self, range: &TimeRange, offset: u64) -> Result<Page> {
        let body = CompletedRequest::new(range, offset);

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, self.token.bearer())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Completed-items request failed: {}", e);
                TodoistLogError::Connection(e.to_string())
            })?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            tracing::warn!("Todoist rejected the API token (403)");
            return Err(TodoistLogError::InvalidCredential.into());
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Todoist returned error {}: {}", status, error_text);
            return Err(
                TodoistLogError::Connection(format!("{} for url ({})", status, self.url)).into(),
            );
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read completed-items response: {}", e);
            TodoistLogError::Connection(e.to_string())
        })?;

        let page: Page = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!("Failed to parse completed-items response: {}", e);
            TodoistLogError::MalformedResponse(e.to_string())
        })?;

        Ok(page)
    }
}
