//! Markdown report rendering.
//!
//! Everything in this module is a pure function of its arguments: the
//! same outcome always renders to the same report, and malformed record
//! fields degrade to an unknown marker instead of failing.

use crate::config::display;
use crate::error::{DomainError, ErrorKind};
use crate::models::{OpenAccessStatus, PaperRecord, SearchOutcome};

/// Placeholder for a citation count the provider does not track.
/// Deliberately distinct from "0", which means "tracked, never cited".
const UNKNOWN_COUNT: &str = "\u{2014}";

/// Render a search outcome as one Markdown report.
#[must_use]
pub fn format_outcome(outcome: &SearchOutcome, query: &str) -> String {
    match outcome {
        SearchOutcome::Papers(records) => format_papers(records, query),
        SearchOutcome::Empty => format!(
            "No papers matched \"{query}\". Try broader keywords or check the spelling."
        ),
        SearchOutcome::Failed(error) => format_error(error),
    }
}

/// Format a result list as Markdown.
#[must_use]
pub fn format_papers(records: &[PaperRecord], query: &str) -> String {
    if records.is_empty() {
        return format_outcome(&SearchOutcome::Empty, query);
    }

    let mut output = format!("# Papers ({} results for \"{query}\")\n\n", records.len());

    for (i, record) in records.iter().enumerate() {
        output.push_str(&format_paper(record, i + 1));
        output.push_str("\n---\n\n");
    }

    output
}

/// Format a single paper entry.
#[must_use]
pub fn format_paper(record: &PaperRecord, index: usize) -> String {
    let mut output = format!("## {index}. {}\n\n", record.title_or_default());

    if !record.authors.is_empty() {
        output.push_str(&format!("**Authors**: {}\n\n", author_line(&record.authors)));
    }

    let mut meta = Vec::new();
    if let Some(year) = record.year {
        meta.push(format!("**Year**: {year}"));
    }
    meta.push(format!(
        "**Citations**: {}",
        record.citation_count.map_or_else(|| UNKNOWN_COUNT.to_string(), group_thousands)
    ));
    if let Some(venue) = &record.venue {
        meta.push(format!("**Venue**: {venue}"));
    }
    output.push_str(&format!("{}\n\n", meta.join(" | ")));

    if let Some(badge) = access_badge(record.open_access) {
        output.push_str(&format!("**Open Access**: {badge}\n\n"));
    }

    if let Some(doi) = &record.doi {
        output.push_str(&format!("**DOI**: [{doi}]({}{doi})\n\n", display::DOI_RESOLVER));
    }

    let mut links = Vec::new();
    if let Some(url) = &record.abstract_url {
        links.push(format!("[Abstract]({url})"));
    }
    if let Some(url) = &record.pdf_url {
        links.push(format!("[PDF]({url})"));
    }
    if !links.is_empty() {
        output.push_str(&format!("**Links**: {}\n", links.join(" | ")));
    }

    output
}

/// Render a normalized error as a single readable line.
#[must_use]
pub fn format_error(error: &DomainError) -> String {
    match error.kind {
        ErrorKind::Validation => {
            format!("Invalid request: {}. Correct the input and try again.", error.message)
        }
        ErrorKind::Timeout => {
            "The provider did not respond in time. Retry shortly, or narrow the search."
                .to_string()
        }
        ErrorKind::RateLimited => match error.retry_after() {
            Some(wait) => format!(
                "Rate limit reached. Wait {} seconds before searching again.",
                wait.as_secs()
            ),
            None => "Rate limit reached. Wait a minute before searching again.".to_string(),
        },
        ErrorKind::NotFound => {
            "The provider could not find the requested resource. Check the search parameters."
                .to_string()
        }
        ErrorKind::ProviderUnavailable => {
            "The provider is currently unavailable (server error). This is usually temporary; \
             retry in a few minutes."
                .to_string()
        }
        ErrorKind::Network => {
            format!("Could not reach the provider: {}. Check the network connection.", error.message)
        }
        ErrorKind::Unexpected => {
            format!("The search failed unexpectedly: {}.", error.message)
        }
    }
}

/// Authors up to the display threshold, then "et al." with the full count.
fn author_line(authors: &[String]) -> String {
    if authors.len() > display::MAX_AUTHORS {
        format!(
            "{} et al. ({} authors)",
            authors[..display::MAX_AUTHORS].join(", "),
            authors.len()
        )
    } else {
        authors.join(", ")
    }
}

const fn access_badge(status: OpenAccessStatus) -> Option<&'static str> {
    match status {
        OpenAccessStatus::Gold => Some("Gold Open Access"),
        OpenAccessStatus::Green => Some("Green Open Access"),
        OpenAccessStatus::Hybrid => Some("Hybrid Open Access"),
        OpenAccessStatus::Bronze => Some("Bronze Open Access"),
        OpenAccessStatus::Closed | OpenAccessStatus::Unknown => None,
    }
}

/// Group digits in threes: 1234567 renders as "1,234,567".
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
