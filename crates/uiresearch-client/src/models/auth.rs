//! Authentication payloads.

use serde::{Deserialize, Serialize};

/// Profile returned by `/api/auth/me` and `/api/auth/register`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub is_active: Option<bool>,

    #[serde(default)]
    pub is_verified: Option<bool>,

    #[serde(default)]
    pub created_at: Option<String>,
}

impl UserProfile {
    /// Name shown in the navigation bar.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.email
    }
}

/// OAuth2 password-grant form: `username=<email>&password=<password>`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest").field("username", &self.username).finish()
    }
}

/// Account creation body.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,

    /// Sent as `null` when the user left it blank.
    pub full_name: Option<String>,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .finish()
    }
}

/// Token issued by a successful login.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    #[serde(default)]
    pub token_type: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse").field("token_type", &self.token_type).finish()
    }
}
