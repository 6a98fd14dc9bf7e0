//! UIResearch REST API client.
//!
//! Thin async wrapper over `reqwest`:
//! - One pooled connection per origin
//! - No retries: every failure is terminal for the user action that caused it
//! - Non-success responses become [`ClientError::Api`] carrying the server's message

use reqwest::{Client, RequestBuilder, StatusCode};
use url::Url;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{
    LoginRequest, RegisterRequest, SearchResponse, TokenResponse, UserProfile, error_message,
};
use crate::search::SearchQuery;

/// UIResearch API client.
#[derive(Clone)]
pub struct ApiClient {
    /// HTTP client.
    client: Client,

    /// Server origin without a trailing slash.
    base_url: String,
}

impl ApiClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    /// Server origin this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an absolute URL for `path` with an optional query string.
    pub fn url(&self, path: &str, query: Option<&str>) -> ClientResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))?;
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.set_query(Some(query));
        }
        Ok(url)
    }

    /// Search for references.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with the `{error: {message}}` text on a
    /// non-success status, [`ClientError::Http`] when no response arrives.
    pub async fn search(&self, query: &SearchQuery) -> ClientResult<SearchResponse> {
        let url = self.url(api::SEARCH_PATH, Some(&query.to_query_string()))?;
        let body = self.send(self.client.get(url)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// URL that downloads the CSV export for `query`.
    pub fn export_csv_url(&self, query: &SearchQuery) -> ClientResult<Url> {
        self.url(api::EXPORT_CSV_PATH, Some(&query.to_query_string()))
    }

    /// Download the CSV export for `query`.
    pub async fn download_csv(&self, query: &SearchQuery) -> ClientResult<Vec<u8>> {
        let url = self.export_csv_url(query)?;
        tracing::debug!(path = url.path(), "Requesting CSV export");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::api(status.as_u16(), error_message(&text)));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Fetch the profile of the user owning `token`.
    pub async fn current_user(&self, token: &str) -> ClientResult<UserProfile> {
        let url = self.url(api::ME_PATH, None)?;
        let body = self.send(self.client.get(url).bearer_auth(token)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<TokenResponse> {
        let url = self.url(api::LOGIN_PATH, None)?;
        let form = serde_urlencoded::to_string(request)?;

        let builder = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(form);

        let body = self.send(builder).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Create an account.
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<UserProfile> {
        let url = self.url(api::REGISTER_PATH, None)?;
        let body_str = serde_json::to_string(request)?;

        let builder = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body_str);

        let body = self.send(builder).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a request and return the body of a successful response.
    async fn send(&self, builder: RequestBuilder) -> ClientResult<String> {
        let request = builder.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.client.execute(request).await.inspect_err(|e| {
            tracing::warn!(%method, %path, error = %e, "Request failed without a response");
        })?;

        let status = response.status();
        tracing::debug!(%method, %path, status = status.as_u16(), "Response received");

        let text = response.text().await?;
        Self::handle_response(status, text)
    }

    /// Map non-success status codes to [`ClientError::Api`].
    fn handle_response(status: StatusCode, text: String) -> ClientResult<String> {
        if status.is_success() {
            return Ok(text);
        }

        Err(ClientError::api(status.as_u16(), error_message(&text)))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.base_url).finish()
    }
}
