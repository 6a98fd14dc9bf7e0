//! HTML rendering of search results.
//!
//! Every interpolated item field is HTML-escaped to prevent markup injection.

use crate::messages;
use crate::models::ResultItem;

/// Render the results area for a list of items.
#[must_use]
pub fn render_results(items: &[ResultItem]) -> String {
    if items.is_empty() {
        return format!(r#"<p class="no-results">{}</p>"#, messages::NO_RESULTS);
    }

    items.iter().map(render_card).collect()
}

/// Render a single result card.
#[must_use]
pub fn render_card(item: &ResultItem) -> String {
    let year = item.year.map(|y| format!(r#"<span class="year"> • {y}</span>"#)).unwrap_or_default();

    format!(
        r#"<article class="result-card">
<h2 class="result-title">{title}</h2>
<p class="result-authors">{authors}</p>
<p class="result-metadata"><span class="journal">{journal}</span>{year}</p>
<p class="result-doi"><a href="{url}" target="_blank" rel="noopener noreferrer">{doi}</a></p>
<details class="result-abstract">
<summary>{summary}</summary>
<p>{abstract_text}</p>
</details>
</article>
"#,
        title = html_escape(&item.title),
        authors = html_escape(&item.authors),
        journal = html_escape(&item.journal),
        year = year,
        url = html_escape(&item.url),
        doi = html_escape(&item.doi),
        summary = messages::ABSTRACT_SUMMARY,
        abstract_text = html_escape(&item.r#abstract),
    )
}

/// Escape HTML special characters.
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
