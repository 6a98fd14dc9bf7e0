//! Navigation and auth-form view state.

use super::Redirect;
use crate::models::UserProfile;

/// Which navigation block is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    /// Login and signup buttons.
    Guest,
    /// User menu; the name appears once the profile has been fetched.
    LoggedIn { display_name: Option<String> },
}

/// Visible auth chrome of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthView {
    pub nav: NavState,
}

impl AuthView {
    #[must_use]
    pub const fn guest() -> Self {
        Self { nav: NavState::Guest }
    }

    #[must_use]
    pub const fn logged_in() -> Self {
        Self { nav: NavState::LoggedIn { display_name: None } }
    }

    #[must_use]
    pub const fn guest_visible(&self) -> bool {
        matches!(self.nav, NavState::Guest)
    }

    #[must_use]
    pub const fn user_menu_visible(&self) -> bool {
        matches!(self.nav, NavState::LoggedIn { .. })
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        match &self.nav {
            NavState::LoggedIn { display_name } => display_name.as_deref(),
            NavState::Guest => None,
        }
    }

    /// Show the user's name. Ignored if the view is showing guest chrome.
    pub fn apply_profile(&mut self, user: &UserProfile) {
        if let NavState::LoggedIn { display_name } = &mut self.nav {
            *display_name = Some(user.display_name().to_string());
        }
    }
}

/// Icon on the mobile menu button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuIcon {
    Hamburger,
    Close,
}

/// Collapsible navigation on narrow screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub const fn icon(&self) -> MenuIcon {
        if self.open { MenuIcon::Close } else { MenuIcon::Hamburger }
    }

    pub fn toggle(&mut self) -> MenuIcon {
        self.open = !self.open;
        self.icon()
    }

    /// Overlay click or navigation link click.
    pub fn close(&mut self) -> MenuIcon {
        self.open = false;
        self.icon()
    }
}

/// Login/signup form state: one message at a time, submit disabled while pending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub error: Option<String>,
    pub success: Option<String>,
    pub loading: bool,
    pub redirect: Option<Redirect>,
}

impl AuthForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hide_messages(&mut self) {
        self.error = None;
        self.success = None;
    }

    /// Submission started.
    pub fn begin(&mut self) {
        self.hide_messages();
        self.loading = true;
    }

    /// Show an error and re-enable the form.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.success = None;
        self.loading = false;
    }

    /// Show a success message. The form stays disabled until the redirect.
    pub fn show_success(&mut self, message: impl Into<String>, redirect: Redirect) {
        self.success = Some(message.into());
        self.error = None;
        self.redirect = Some(redirect);
    }

    #[must_use]
    pub const fn submit_enabled(&self) -> bool {
        !self.loading
    }
}
