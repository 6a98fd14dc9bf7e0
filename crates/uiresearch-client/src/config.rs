//! Configuration for the UIResearch client.

use std::path::PathBuf;
use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Default server origin.
    pub const BASE_URL: &str = "http://localhost:8000";

    /// Search endpoint.
    pub const SEARCH_PATH: &str = "/search";

    /// CSV export endpoint (file download, no JSON contract).
    pub const EXPORT_CSV_PATH: &str = "/export/csv";

    /// Current user profile endpoint.
    pub const ME_PATH: &str = "/api/auth/me";

    /// Token issuance endpoint (form-encoded).
    pub const LOGIN_PATH: &str = "/api/auth/login";

    /// Account creation endpoint (JSON).
    pub const REGISTER_PATH: &str = "/api/auth/register";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Page locations and UI timings.
pub mod pages {
    use std::time::Duration;

    /// Home page.
    pub const HOME: &str = "/";

    /// Login page.
    pub const LOGIN: &str = "/static/login.html";

    /// Signup page.
    pub const SIGNUP: &str = "/static/signup.html";

    /// Delay before the export success notice is shown.
    pub const EXPORT_NOTICE_DELAY: Duration = Duration::from_secs(1);

    /// Delay before redirecting home after login.
    pub const LOGIN_REDIRECT_DELAY: Duration = Duration::from_secs(1);

    /// Delay before redirecting to login after registration.
    pub const REGISTER_REDIRECT_DELAY: Duration = Duration::from_secs(2);
}

/// Key under which the bearer token is persisted.
pub const TOKEN_STORAGE_KEY: &str = "auth_token";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server origin, e.g. `http://localhost:8000`.
    pub base_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Storage key for the bearer token.
    pub storage_key: String,

    /// File backing persistent token storage.
    pub token_file: PathBuf,

    /// Delay before the export success notice.
    pub export_notice_delay: Duration,
}

impl Config {
    /// Create a new configuration for the given server origin.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            storage_key: TOKEN_STORAGE_KEY.to_string(),
            token_file: default_token_file(),
            export_notice_delay: pages::EXPORT_NOTICE_DELAY,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            storage_key: TOKEN_STORAGE_KEY.to_string(),
            token_file: std::env::temp_dir().join("uiresearch-test-session.json"),
            export_notice_delay: Duration::from_millis(0), // No delay in tests
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `UIRESEARCH_BASE_URL` and `UIRESEARCH_TOKEN_FILE`.
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url =
            std::env::var("UIRESEARCH_BASE_URL").unwrap_or_else(|_| api::BASE_URL.to_string());
        url::Url::parse(&base_url)
            .map_err(|e| anyhow::anyhow!("invalid UIRESEARCH_BASE_URL {base_url:?}: {e}"))?;

        let mut config = Self::new(base_url);
        if let Ok(path) = std::env::var("UIRESEARCH_TOKEN_FILE") {
            config.token_file = PathBuf::from(path);
        }
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(api::BASE_URL)
    }
}

/// Per-user data directory, falling back to the working directory.
fn default_token_file() -> PathBuf {
    directories::ProjectDirs::from("org", "uiresearch", "uiresearch")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".uiresearch"))
        .join("session.json")
}
