//! UIResearch Client
//!
//! Typed client and headless presentation layer for the UIResearch academic
//! search service. Each page controller owns its view state and talks to the
//! REST API through one [`ApiClient`].
//!
//! # Features
//!
//! - **Session**: bearer token in persistent storage, login, signup, current user
//! - **Search**: form serialization, HTML-escaped result cards, CSV export,
//!   stale responses discarded by request sequence
//! - **Pricing**: monthly/yearly display, plan selection, one-shot scroll reveal
//!
//! # Example
//!
//! ```no_run
//! use uiresearch_client::{ApiClient, Config, SearchController, SearchForm};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = ApiClient::new(&config)?;
//!     let mut search = SearchController::new(client, config.export_notice_delay);
//!
//!     let view = search.submit(&SearchForm::with_defaults("neural networks")).await;
//!     println!("{}", view.results_html);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod messages;
pub mod models;
pub mod pricing;
pub mod render;
pub mod search;
pub mod session;
pub mod storage;

pub use client::ApiClient;
pub use config::Config;
pub use error::{ClientError, ClientResult};
pub use pricing::{BillingPeriod, Plan, PlanSelection, PricingPage};
pub use search::{SearchController, SearchForm, SearchOutcome, SearchQuery};
pub use session::SessionManager;
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
