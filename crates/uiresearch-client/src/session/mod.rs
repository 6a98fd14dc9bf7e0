//! Session management: the bearer token, login state, and the current user.
//!
//! Login state is token presence only. Whether the token is still valid is
//! learned from the server on the next authenticated call.

mod signup;
mod view;

use std::sync::Arc;
use std::time::Duration;

pub use signup::{SignupForm, password_strength};
pub use view::{AuthForm, AuthView, MenuIcon, MobileMenu, NavState};

use crate::client::ApiClient;
use crate::config::{TOKEN_STORAGE_KEY, pages};
use crate::error::ClientResult;
use crate::messages::{self, StatusMessage};
use crate::models::{LoginRequest, UserProfile};
use crate::storage::TokenStore;

/// A navigation the page should perform after a delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
    pub after: Duration,
}

impl Redirect {
    #[must_use]
    pub fn new(location: impl Into<String>, after: Duration) -> Self {
        Self { location: location.into(), after }
    }

    /// Navigate without waiting.
    #[must_use]
    pub fn immediate(location: impl Into<String>) -> Self {
        Self::new(location, Duration::ZERO)
    }
}

/// Owns the persisted token and the calls that depend on it.
#[derive(Clone)]
pub struct SessionManager {
    client: ApiClient,
    store: Arc<dyn TokenStore>,
    storage_key: String,
}

impl SessionManager {
    #[must_use]
    pub fn new(client: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        Self { client, store, storage_key: TOKEN_STORAGE_KEY.to_string() }
    }

    /// Use a storage key other than `auth_token`.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Read the token. Unreadable storage counts as no token.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        match self.store.get(&self.storage_key) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session token");
                None
            }
        }
    }

    /// Presence check only; no expiry validation.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    fn save_token(&self, token: &str) -> ClientResult<()> {
        self.store.set(&self.storage_key, token)
    }

    fn clear_token(&self) {
        if let Err(e) = self.store.remove(&self.storage_key) {
            tracing::warn!(error = %e, "Failed to clear session token");
        }
    }

    /// Forget the token locally and update the navigation.
    ///
    /// The server is not told; the token stays valid there until it expires.
    pub fn logout(&self, view: &mut AuthView) -> StatusMessage {
        self.clear_token();
        *view = self.auth_view();
        tracing::info!("Logged out");
        StatusMessage::success(messages::LOGGED_OUT)
    }

    /// Fetch the profile for the stored token.
    ///
    /// A rejected token is cleared silently. A network failure returns `None`
    /// and keeps the token, since the token may still be good.
    pub async fn fetch_current_user(&self) -> Option<UserProfile> {
        let token = self.token()?;

        match self.client.current_user(&token).await {
            Ok(user) => Some(user),
            Err(e) if e.is_rejection() => {
                tracing::warn!(status = ?e.status(), "Stored token rejected, clearing it");
                self.clear_token();
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "Error getting current user");
                None
            }
        }
    }

    /// Navigation state derivable without a network call.
    #[must_use]
    pub fn auth_view(&self) -> AuthView {
        if self.is_logged_in() { AuthView::logged_in() } else { AuthView::guest() }
    }

    /// Fill in the user's name once the profile arrives.
    ///
    /// Safe to call after the view has moved on: a view that is no longer
    /// logged in is left alone.
    pub async fn load_identity(&self, view: &mut AuthView) {
        if !view.user_menu_visible() {
            return;
        }
        if let Some(user) = self.fetch_current_user().await {
            view.apply_profile(&user);
        }
    }

    /// [`auth_view`](Self::auth_view) followed by [`load_identity`](Self::load_identity).
    pub async fn refresh_auth_ui(&self) -> AuthView {
        let mut view = self.auth_view();
        self.load_identity(&mut view).await;
        view
    }

    /// Exchange credentials for a token and persist it.
    ///
    /// On failure the stored token is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Redirect> {
        let request = LoginRequest { username: email.to_string(), password: password.to_string() };

        let response = self.client.login(&request).await?;
        self.save_token(&response.access_token)?;

        tracing::info!("Login succeeded");
        Ok(Redirect::new(pages::HOME, pages::LOGIN_REDIRECT_DELAY))
    }

    /// Validate the signup form, then create the account.
    pub async fn register(&self, form: &SignupForm) -> ClientResult<Redirect> {
        form.validate()?;

        let user = self.client.register(&form.to_request()).await?;
        tracing::info!(email = %user.email, "Account created");

        Ok(Redirect::new(pages::LOGIN, pages::REGISTER_REDIRECT_DELAY))
    }

    /// Drive the login form through one submission.
    pub async fn submit_login(&self, form: &mut AuthForm, email: &str, password: &str) -> bool {
        form.begin();

        match self.login(email, password).await {
            Ok(redirect) => {
                form.show_success(messages::LOGIN_SUCCESS, redirect);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Login error");
                form.show_error(e.to_user_message(messages::LOGIN_FAILED));
                false
            }
        }
    }

    /// Drive the signup form through one submission.
    ///
    /// Validation failures are reported without touching the network.
    pub async fn submit_register(&self, form: &mut AuthForm, signup: &SignupForm) -> bool {
        form.hide_messages();
        if let Err(e) = signup.validate() {
            form.show_error(e.to_user_message(messages::REGISTER_FAILED));
            return false;
        }

        form.begin();
        match self.register(signup).await {
            Ok(redirect) => {
                form.show_success(messages::REGISTER_SUCCESS, redirect);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Signup error");
                form.show_error(e.to_user_message(messages::REGISTER_FAILED));
                false
            }
        }
    }

    /// Auth pages send a logged-in user home.
    #[must_use]
    pub fn redirect_if_logged_in(&self) -> Option<Redirect> {
        self.is_logged_in().then(|| Redirect::immediate(pages::HOME))
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("storage_key", &self.storage_key)
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}
