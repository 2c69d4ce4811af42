//! Internal paper record, the provider-agnostic shape both adapters
//! deserialize into.

use serde::{Deserialize, Serialize};

/// How a paper's full text is licensed and hosted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenAccessStatus {
    /// Published open access in a fully OA venue.
    Gold,
    /// Free copy in a repository (all arXiv records).
    Green,
    /// OA article in an otherwise subscription venue.
    Hybrid,
    /// Free to read on the publisher page, no open license.
    Bronze,
    /// Paywalled.
    Closed,
    /// Provider did not say.
    #[default]
    Unknown,
}

impl OpenAccessStatus {
    /// Parse a provider status string; anything unrecognized is `Unknown`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "gold" => Self::Gold,
            "green" => Self::Green,
            "hybrid" => Self::Hybrid,
            "bronze" => Self::Bronze,
            "closed" => Self::Closed,
            _ => Self::Unknown,
        }
    }
}

/// One search hit, already normalized from the provider's wire shape.
///
/// Records are immutable once built and live only until the report for
/// their request has been rendered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Paper title.
    pub title: String,

    /// Every author the provider reported, in order. Display truncation
    /// is the formatter's job, not the adapter's.
    #[serde(default)]
    pub authors: Vec<String>,

    /// Publication year.
    #[serde(default)]
    pub year: Option<i32>,

    /// Journal, conference, or journal-ref string.
    #[serde(default)]
    pub venue: Option<String>,

    /// Bare DOI, resolver prefix already stripped.
    #[serde(default)]
    pub doi: Option<String>,

    /// Times cited. `None` means the provider does not track citations,
    /// which is not the same as zero.
    #[serde(default)]
    pub citation_count: Option<u64>,

    /// Open access classification.
    #[serde(default)]
    pub open_access: OpenAccessStatus,

    /// Landing page for the abstract.
    #[serde(default)]
    pub abstract_url: Option<String>,

    /// Direct full-text PDF link.
    #[serde(default)]
    pub pdf_url: Option<String>,
}

impl PaperRecord {
    /// Get the title, falling back to "Untitled".
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        if self.title.is_empty() { "Untitled" } else { &self.title }
    }

    /// Whether the provider reported a citation count at all.
    #[must_use]
    pub const fn has_citation_count(&self) -> bool {
        self.citation_count.is_some()
    }
}
