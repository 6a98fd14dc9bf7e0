//! Search page controller: `idle -> searching -> (results | error)`.
//!
//! Each submission is issued a [`SearchTicket`] with a sequence number. Only the
//! outcome for the latest ticket is applied, so a slow early response can never
//! overwrite the view produced by a later search.

use std::time::Duration;

use url::Url;

use super::{SearchForm, SearchQuery};
use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::messages::{self, StatusMessage};
use crate::models::{ResultItem, SearchResponse};
use crate::render;

/// Where the search page is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Searching,
    Results,
    Error,
}

/// Visible state of the search page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchView {
    /// Status line; `None` while hidden.
    pub status: Option<StatusMessage>,

    /// Markup of the results area.
    pub results_html: String,

    /// Whether the CSV export control is shown.
    pub export_visible: bool,
}

/// A search that has been issued but not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: SearchQuery,
}

impl SearchTicket {
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    #[must_use]
    pub const fn query(&self) -> &SearchQuery {
        &self.query
    }
}

/// Result of one search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// `{items, count}` envelope.
    Results(SearchResponse),
    /// The server answered with an error; message from `{error: {message}}`.
    ApiError(Option<String>),
    /// No response reached the client.
    TransportError,
}

impl From<ClientResult<SearchResponse>> for SearchOutcome {
    fn from(result: ClientResult<SearchResponse>) -> Self {
        match result {
            Ok(response) => Self::Results(response),
            Err(e) if e.is_transport() => Self::TransportError,
            Err(e) => Self::ApiError(e.api_message().map(str::to_string)),
        }
    }
}

impl From<ClientError> for SearchOutcome {
    fn from(error: ClientError) -> Self {
        Err::<SearchResponse, _>(error).into()
    }
}

/// Navigation to the CSV download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportAction {
    /// Download URL built from the live form.
    pub url: Url,

    /// When to show the success notice. Nothing confirms the download itself.
    pub notice_after: Duration,
}

/// Search page controller.
#[derive(Debug)]
pub struct SearchController {
    client: ApiClient,
    export_notice_delay: Duration,
    state: SearchState,
    view: SearchView,
    results: Vec<ResultItem>,
    last_issued: u64,
}

impl SearchController {
    #[must_use]
    pub fn new(client: ApiClient, export_notice_delay: Duration) -> Self {
        Self {
            client,
            export_notice_delay,
            state: SearchState::Idle,
            view: SearchView::default(),
            results: Vec::new(),
            last_issued: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> SearchState {
        self.state
    }

    #[must_use]
    pub const fn view(&self) -> &SearchView {
        &self.view
    }

    /// Items of the last successful search.
    #[must_use]
    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Sequence number of the most recently issued search.
    #[must_use]
    pub const fn latest_seq(&self) -> u64 {
        self.last_issued
    }

    /// Submit the form and apply the response.
    pub async fn submit(&mut self, form: &SearchForm) -> &SearchView {
        let ticket = self.begin(form);
        let outcome = Self::fetch(&self.client, &ticket).await;
        self.apply(&ticket, outcome);
        &self.view
    }

    /// Enter `searching`: show the loading status, hide export, clear the results area.
    pub fn begin(&mut self, form: &SearchForm) -> SearchTicket {
        self.last_issued += 1;
        let ticket = SearchTicket { seq: self.last_issued, query: SearchQuery::from_form(form) };

        tracing::debug!(seq = ticket.seq, "Search issued");

        self.state = SearchState::Searching;
        self.view.status = Some(StatusMessage::loading(messages::SEARCHING));
        self.view.export_visible = false;
        self.view.results_html.clear();

        ticket
    }

    /// Run the request for `ticket`. Does not touch controller state.
    pub async fn fetch(client: &ApiClient, ticket: &SearchTicket) -> SearchOutcome {
        let result = client.search(&ticket.query).await;
        if let Err(e) = &result {
            tracing::error!(seq = ticket.seq, error = %e, "Search failed");
        }
        result.into()
    }

    /// Apply an outcome. Returns false, leaving the view untouched, when a
    /// newer search has been issued since `ticket`.
    pub fn apply(&mut self, ticket: &SearchTicket, outcome: SearchOutcome) -> bool {
        if ticket.seq != self.last_issued {
            tracing::warn!(
                seq = ticket.seq,
                latest = self.last_issued,
                "Discarding stale search response"
            );
            return false;
        }

        match outcome {
            SearchOutcome::Results(response) => {
                self.results = response.items;
                self.view.results_html = render::render_results(&self.results);
                self.view.status =
                    Some(StatusMessage::success(messages::results_found(response.count)));
                self.view.export_visible = response.count > 0;
                self.state = SearchState::Results;
            }
            SearchOutcome::ApiError(message) => {
                let message = message.as_deref().unwrap_or(messages::UNKNOWN_ERROR);
                self.view.status = Some(StatusMessage::error(format!("Error: {message}")));
                self.state = SearchState::Error;
            }
            SearchOutcome::TransportError => {
                self.view.status = Some(StatusMessage::error(messages::CONNECTION_ERROR));
                self.state = SearchState::Error;
            }
        }

        true
    }

    /// Start a CSV export of the form as it is now, not of the results on screen.
    pub fn export(&mut self, form: &SearchForm) -> ClientResult<ExportAction> {
        let query = SearchQuery::from_form(form);

        match self.client.export_csv_url(&query) {
            Ok(url) => {
                tracing::info!(path = url.path(), "Starting CSV export");
                self.view.status = Some(StatusMessage::loading(messages::EXPORT_PENDING));
                Ok(ExportAction { url, notice_after: self.export_notice_delay })
            }
            Err(e) => {
                tracing::error!(error = %e, "Export error");
                self.view.status = Some(StatusMessage::error(messages::EXPORT_FAILED));
                Err(e)
            }
        }
    }

    /// Show the export success notice.
    pub fn finish_export(&mut self) {
        self.view.status = Some(StatusMessage::success(messages::EXPORT_DONE));
    }

    /// [`export`](Self::export), then show the notice once the delay has elapsed.
    pub async fn export_and_notify(&mut self, form: &SearchForm) -> ClientResult<Url> {
        let action = self.export(form)?;
        tokio::time::sleep(action.notice_after).await;
        self.finish_export();
        Ok(action.url)
    }
}
