//! Localized user-facing strings and the inline status message.

use std::fmt;

pub const SEARCHING: &str = "Buscando...";
pub const NO_RESULTS: &str = "No se encontraron resultados";
pub const UNKNOWN_ERROR: &str = "Error desconocido";
pub const CONNECTION_ERROR: &str = "Error de conexión. Por favor, intenta de nuevo.";
pub const ABSTRACT_SUMMARY: &str = "Ver abstract";

pub const EXPORT_PENDING: &str = "Generando CSV...";
pub const EXPORT_DONE: &str = "CSV descargado exitosamente";
pub const EXPORT_FAILED: &str = "Error al exportar CSV";

pub const LOGGED_OUT: &str = "Sesión cerrada exitosamente";
pub const LOGIN_SUCCESS: &str = "¡Inicio de sesión exitoso! Redirigiendo...";
pub const LOGIN_FAILED: &str = "Error al iniciar sesión. Verifica tus credenciales.";
pub const REGISTER_SUCCESS: &str =
    "¡Cuenta creada exitosamente! Redirigiendo al inicio de sesión...";
pub const REGISTER_FAILED: &str = "Error al crear la cuenta. Por favor, intenta de nuevo.";
pub const PASSWORD_MISMATCH: &str = "Las contraseñas no coinciden";
pub const PASSWORD_TOO_SHORT: &str = "La contraseña debe tener al menos 8 caracteres";
pub const TERMS_REQUIRED: &str = "Debes aceptar los términos y condiciones";

pub const PERIOD_MONTHLY: &str = "/mes";
pub const PERIOD_YEARLY: &str = "/mes (facturado anualmente)";
pub const FREE_PLAN_ACK: &str = "Ya estás en el plan gratuito. ¡Disfruta de UIResearch!";

/// Pluralized result count, e.g. `1 resultado encontrado`, `3 resultados encontrados`.
#[must_use]
pub fn results_found(count: u64) -> String {
    let s = if count == 1 { "" } else { "s" };
    format!("{count} resultado{s} encontrado{s}")
}

/// Visual class of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Info,
    Loading,
    Success,
    Error,
}

impl StatusKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message shown in a page's status area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    #[must_use]
    pub fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        Self { text: text.into(), kind }
    }

    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, StatusKind::Info)
    }

    #[must_use]
    pub fn loading(text: impl Into<String>) -> Self {
        Self::new(text, StatusKind::Loading)
    }

    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, StatusKind::Success)
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, StatusKind::Error)
    }

    /// CSS class list for the status element.
    #[must_use]
    pub fn css_class(&self) -> String {
        format!("status status-{}", self.kind)
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_found_pluralization() {
        assert_eq!(results_found(0), "0 resultados encontrados");
        assert_eq!(results_found(1), "1 resultado encontrado");
        assert_eq!(results_found(2), "2 resultados encontrados");
    }

    #[test]
    fn test_css_class() {
        assert_eq!(StatusMessage::loading(SEARCHING).css_class(), "status status-loading");
        assert_eq!(StatusMessage::error("x").css_class(), "status status-error");
    }
}
