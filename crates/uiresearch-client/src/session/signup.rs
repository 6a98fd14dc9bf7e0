//! Signup form validation.

use crate::error::{ClientError, ClientResult};
use crate::messages;
use crate::models::RegisterRequest;

/// Minimum password length accepted by the server.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Fields of the signup form.
#[derive(Clone, Default)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub terms_accepted: bool,
}

impl SignupForm {
    /// Check, in order: passwords match, password length, terms accepted.
    pub fn validate(&self) -> ClientResult<()> {
        if self.password != self.confirm_password {
            return Err(ClientError::validation("confirm_password", messages::PASSWORD_MISMATCH));
        }
        if password_len(&self.password) < MIN_PASSWORD_LEN {
            return Err(ClientError::validation("password", messages::PASSWORD_TOO_SHORT));
        }
        if !self.terms_accepted {
            return Err(ClientError::validation("terms", messages::TERMS_REQUIRED));
        }
        Ok(())
    }

    /// Request body; a blank full name is sent as `null`.
    #[must_use]
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            full_name: Some(self.full_name.clone()).filter(|n| !n.is_empty()),
        }
    }
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("terms_accepted", &self.terms_accepted)
            .finish()
    }
}

/// Length in UTF-16 code units, matching how the browser form measures it.
fn password_len(password: &str) -> usize {
    password.encode_utf16().count()
}

/// Score 0..=5: length >= 8, length >= 12, mixed case, a digit, a symbol.
#[must_use]
pub fn password_strength(password: &str) -> u8 {
    let len = password_len(password);
    let checks = [
        len >= 8,
        len >= 12,
        password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    u8::try_from(checks.iter().filter(|&&ok| ok).count()).unwrap_or(u8::MAX)
}
