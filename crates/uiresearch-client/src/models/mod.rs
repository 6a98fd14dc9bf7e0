//! Data models for the UIResearch REST API.
//!
//! All models use `#[serde(default)]` for optional fields so that partial
//! server responses still deserialize.

mod auth;
mod item;

pub use auth::{LoginRequest, RegisterRequest, TokenResponse, UserProfile};
pub use item::{ApiErrorBody, ErrorEnvelope, ResultItem, SearchResponse, error_message};
