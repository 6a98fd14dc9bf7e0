//! Search form state and query serialization.
//!
//! A [`SearchForm`] holds field values in form order, like submitted form
//! data: an unchecked checkbox is simply absent. [`SearchQuery`] is the
//! normalized, serializable view of a form that both the search request and
//! the CSV export are built from.

mod controller;

pub use controller::{
    ExportAction, SearchController, SearchOutcome, SearchState, SearchTicket, SearchView,
};

/// Checkbox that defaults to `"false"` when unchecked.
pub const HAS_ABSTRACT: &str = "has_abstract";

/// Form field names understood by the search endpoint.
pub mod fields {
    pub const QUERY: &str = "q";
    pub const FROM_DATE: &str = "from_date";
    pub const UNTIL_DATE: &str = "until_date";
    pub const CONTENT_TYPE: &str = "content_type";
    pub const ROWS: &str = "rows";
    pub const MAX_RESULTS: &str = "max_results";
    pub const SORT: &str = "sort";
}

/// Live values of the search form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    entries: Vec<(String, String)>,
}

impl SearchForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The form as first rendered: every filter at its default, abstract required.
    #[must_use]
    pub fn with_defaults(query: impl Into<String>) -> Self {
        Self::new()
            .with(fields::QUERY, query)
            .with(fields::FROM_DATE, "2023-01-01")
            .with(fields::UNTIL_DATE, "2025-12-31")
            .with(fields::CONTENT_TYPE, "journal-article")
            .with(HAS_ABSTRACT, "true")
            .with(fields::ROWS, "30")
            .with(fields::MAX_RESULTS, "120")
            .with(fields::SORT, "relevance")
    }

    /// Builder form of [`SearchForm::set`].
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set `name` to `value`: the first entry is replaced and duplicates are
    /// dropped; a missing field is appended.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter().position(|(k, _)| k == name) {
            Some(first) => {
                self.entries[first].1 = value;
                let mut index = 0;
                self.entries.retain(|(k, _)| {
                    let keep = index <= first || k != name;
                    index += 1;
                    keep
                });
            }
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// Check or uncheck a checkbox. Unchecked boxes are absent from the form.
    pub fn set_checked(&mut self, name: &str, checked: bool) {
        if checked {
            self.set(name, "true");
        } else {
            self.remove(name);
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(k, _)| k != name);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    #[must_use]
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchForm {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// Normalized query parameters derived from a [`SearchForm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    params: Vec<(String, String)>,
}

impl SearchQuery {
    /// Snapshot the form, adding `has_abstract=false` when the box is unchecked.
    #[must_use]
    pub fn from_form(form: &SearchForm) -> Self {
        let mut form = form.clone();
        if !form.has(HAS_ABSTRACT) {
            form.set(HAS_ABSTRACT, "false");
        }
        Self { params: form.entries }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// `application/x-www-form-urlencoded` serialization (spaces become `+`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new()).extend_pairs(&self.params).finish()
    }
}

impl From<&SearchForm> for SearchQuery {
    fn from(form: &SearchForm) -> Self {
        Self::from_form(form)
    }
}
