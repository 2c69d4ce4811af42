//! Search tool input and its validated form.
//!
//! `SearchPapersInput` is what arrives over the wire; `SearchRequest` is
//! what the rest of the pipeline sees. The only way to build a
//! `SearchRequest` is [`SearchRequest::validate`], which rejects anything
//! out of range instead of clamping it.

use serde::{Deserialize, Serialize};

use crate::config::api;
use crate::error::ValidationError;

/// Raw input for the paper search tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchPapersInput {
    /// Search phrase, matched against titles, abstracts, and full text.
    pub query: String,

    /// Maximum papers to return, 1 to 200.
    #[serde(default)]
    pub max_results: Option<i64>,

    /// Sort order: "relevance", "publication_date", or "cited_by_count".
    #[serde(default)]
    pub sort_by: Option<String>,

    /// Year filter: "2023", ">2020", "<2020", or "2020-2023".
    #[serde(default)]
    pub publication_year: Option<String>,

    /// Only return papers whose full text is free to read.
    #[serde(default)]
    pub open_access_only: Option<bool>,

    /// Only return papers cited at least this many times.
    #[serde(default)]
    pub min_citations: Option<i64>,
}

/// Result ordering, in the caller-facing vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Best match for the search phrase first.
    #[default]
    Relevance,
    /// Newest first.
    PublicationDate,
    /// Most cited first.
    #[serde(rename = "cited_by_count")]
    CitationCount,
}

impl SortOrder {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "relevance" => Some(Self::Relevance),
            "publication_date" => Some(Self::PublicationDate),
            "cited_by_count" => Some(Self::CitationCount),
            _ => None,
        }
    }
}

/// Publication-year constraint, parsed from the compact string grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearFilter {
    /// Exactly this year.
    Exact(i32),
    /// Strictly after this year.
    After(i32),
    /// Strictly before this year.
    Before(i32),
    /// Inclusive range.
    Range(i32, i32),
}

impl YearFilter {
    /// Parse "2023", ">2020", "<2020", or "2020-2023".
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        let invalid = || {
            ValidationError::new(
                "publication_year",
                format!("'{value}' is not a year, >year, <year, or year-year expression"),
            )
        };

        let parse_year = |s: &str| s.trim().parse::<i32>().map_err(|_| invalid());

        if let Some(rest) = value.strip_prefix('>') {
            return Ok(Self::After(parse_year(rest)?));
        }
        if let Some(rest) = value.strip_prefix('<') {
            return Ok(Self::Before(parse_year(rest)?));
        }
        if let Some((start, end)) = value.split_once('-') {
            let (start, end) = (parse_year(start)?, parse_year(end)?);
            if start > end {
                return Err(ValidationError::new(
                    "publication_year",
                    format!("range start {start} is after range end {end}"),
                ));
            }
            return Ok(Self::Range(start, end));
        }
        Ok(Self::Exact(parse_year(value)?))
    }

    /// Render in the OpenAlex `publication_year` filter grammar, which is
    /// the same compact grammar callers use.
    #[must_use]
    pub fn to_openalex(&self) -> String {
        match self {
            Self::Exact(y) => y.to_string(),
            Self::After(y) => format!(">{y}"),
            Self::Before(y) => format!("<{y}"),
            Self::Range(a, b) => format!("{a}-{b}"),
        }
    }

    /// Inclusive year bounds, for providers that only understand ranges.
    #[must_use]
    pub const fn bounds(&self) -> (Option<i32>, Option<i32>) {
        match *self {
            Self::Exact(y) => (Some(y), Some(y)),
            Self::After(y) => (Some(y + 1), None),
            Self::Before(y) => (None, Some(y - 1)),
            Self::Range(a, b) => (Some(a), Some(b)),
        }
    }
}

/// Typed facet filters carried by a validated request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Publication year constraint.
    pub year: Option<YearFilter>,
    /// Restrict to open access papers.
    pub open_access_only: bool,
    /// Minimum citation count.
    pub min_citations: Option<u32>,
}

/// A fully validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Trimmed, non-empty search phrase.
    pub query: String,
    /// Page size, guaranteed to be in [1, 200].
    pub max_results: u32,
    /// Result ordering.
    pub sort: SortOrder,
    /// Facet filters.
    pub filters: SearchFilters,
}

impl SearchRequest {
    /// Validate raw input, one check per field.
    ///
    /// Out-of-range and mistyped values are rejected with the offending
    /// field named; nothing is clamped or silently defaulted except the
    /// documented defaults for absent optional fields.
    pub fn validate(input: SearchPapersInput) -> Result<Self, ValidationError> {
        let query = input.query.trim().to_string();
        if query.is_empty() {
            return Err(ValidationError::new("query", "must not be empty"));
        }

        let max_results = match input.max_results {
            None => api::DEFAULT_MAX_RESULTS,
            Some(n) if (1..=i64::from(api::MAX_RESULTS_LIMIT)).contains(&n) => n as u32,
            Some(n) => {
                return Err(ValidationError::new(
                    "max_results",
                    format!("{n} is outside the allowed range 1 to {}", api::MAX_RESULTS_LIMIT),
                ));
            }
        };

        let sort = match input.sort_by.as_deref() {
            None => SortOrder::default(),
            Some(value) => SortOrder::parse(value).ok_or_else(|| {
                ValidationError::new(
                    "sort_by",
                    format!(
                        "'{value}' is not one of relevance, publication_date, cited_by_count"
                    ),
                )
            })?,
        };

        let year = input.publication_year.as_deref().map(YearFilter::parse).transpose()?;

        let min_citations = match input.min_citations {
            None => None,
            Some(n) if (0..=i64::from(u32::MAX)).contains(&n) => Some(n as u32),
            Some(n) => {
                return Err(ValidationError::new(
                    "min_citations",
                    format!("{n} must be a non-negative integer"),
                ));
            }
        };

        Ok(Self {
            query,
            max_results,
            sort,
            filters: SearchFilters {
                year,
                open_access_only: input.open_access_only.unwrap_or(false),
                min_citations,
            },
        })
    }
}
