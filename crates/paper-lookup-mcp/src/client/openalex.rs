//! OpenAlex works search.
//!
//! OpenAlex speaks JSON and takes its knobs as query parameters: `search`
//! for the phrase, `per_page` for the page size, `sort` in a
//! `field:desc` vocabulary, and a single comma-joined `filter` parameter
//! for facets. A `mailto` parameter opts the caller into the polite pool.

use serde::Deserialize;

use super::{PaperProvider, build_http_client, check_status};
use crate::config::{Config, display};
use crate::error::TransportResult;
use crate::models::{OpenAccessStatus, PaperRecord, SearchFilters, SearchRequest, SortOrder};

/// Work fields requested from the API; keeps response payloads small.
const SELECT_FIELDS: &str =
    "id,title,display_name,authorships,publication_year,doi,primary_location,open_access,cited_by_count";

/// Client for the OpenAlex bibliographic-metadata API.
pub struct OpenAlexClient {
    http: reqwest::Client,
    base_url: String,
    mailto: Option<String>,
}

impl OpenAlexClient {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            http: build_http_client(config)?,
            base_url: config.openalex_url.clone(),
            mailto: config.mailto.clone(),
        })
    }
}

#[async_trait::async_trait]
impl PaperProvider for OpenAlexClient {
    fn name(&self) -> &'static str {
        "openalex"
    }

    async fn search(&self, request: &SearchRequest) -> TransportResult<Vec<PaperRecord>> {
        let url = format!("{}/works", self.base_url);

        let mut params = vec![
            ("search".to_string(), request.query.clone()),
            ("per_page".to_string(), request.max_results.to_string()),
            ("sort".to_string(), sort_param(request.sort).to_string()),
            ("select".to_string(), SELECT_FIELDS.to_string()),
        ];

        let filter = build_filter(&request.filters);
        if !filter.is_empty() {
            params.push(("filter".to_string(), filter));
        }

        if let Some(mailto) = &self.mailto {
            params.push(("mailto".to_string(), mailto.clone()));
        }

        let response = self.http.get(&url).query(&params).send().await?;
        let response = check_status(response).await?;
        let body: WorksResponse = response.json().await?;

        Ok(body.results.iter().map(Work::to_record).collect())
    }
}

const fn sort_param(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::Relevance => "relevance_score:desc",
        SortOrder::PublicationDate => "publication_date:desc",
        SortOrder::CitationCount => "cited_by_count:desc",
    }
}

/// Compose the comma-joined `filter` parameter from the typed facets.
fn build_filter(filters: &SearchFilters) -> String {
    let mut parts = Vec::new();

    if let Some(year) = &filters.year {
        parts.push(format!("publication_year:{}", year.to_openalex()));
    }
    if filters.open_access_only {
        parts.push("is_oa:true".to_string());
    }
    if let Some(min) = filters.min_citations {
        // OpenAlex only has strict comparison, so ">= n" becomes "> n-1".
        parts.push(format!("cited_by_count:>{}", i64::from(min) - 1));
    }

    parts.join(",")
}

#[derive(Deserialize)]
struct WorksResponse {
    #[serde(default)]
    results: Vec<Work>,
}

#[derive(Deserialize, Default)]
struct Work {
    id: Option<String>,
    title: Option<String>,
    display_name: Option<String>,
    authorships: Option<Vec<Authorship>>,
    publication_year: Option<i32>,
    doi: Option<String>,
    primary_location: Option<PrimaryLocation>,
    open_access: Option<OpenAccess>,
    cited_by_count: Option<u64>,
}

#[derive(Deserialize)]
struct Authorship {
    author: Option<AuthorEntry>,
}

#[derive(Deserialize)]
struct AuthorEntry {
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct PrimaryLocation {
    source: Option<SourceEntry>,
}

#[derive(Deserialize)]
struct SourceEntry {
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct OpenAccess {
    is_oa: Option<bool>,
    oa_status: Option<String>,
    oa_url: Option<String>,
}

impl Work {
    /// Flatten the nested work shape into a [`PaperRecord`]. Every field
    /// may be null in practice, so absences degrade to empty/unknown
    /// values instead of failing the whole page.
    fn to_record(&self) -> PaperRecord {
        let authors = self
            .authorships
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|a| a.author.as_ref()?.display_name.clone())
            .collect();

        let open_access = match &self.open_access {
            Some(oa) => match oa.oa_status.as_deref() {
                Some(status) => OpenAccessStatus::parse(status),
                None if oa.is_oa == Some(false) => OpenAccessStatus::Closed,
                None => OpenAccessStatus::Unknown,
            },
            None => OpenAccessStatus::Unknown,
        };

        PaperRecord {
            title: self
                .title
                .clone()
                .or_else(|| self.display_name.clone())
                .unwrap_or_default(),
            authors,
            year: self.publication_year,
            venue: self
                .primary_location
                .as_ref()
                .and_then(|loc| loc.source.as_ref())
                .and_then(|s| s.display_name.clone()),
            doi: self.doi.as_deref().map(|d| d.replace(display::DOI_RESOLVER, "")),
            citation_count: self.cited_by_count,
            open_access,
            abstract_url: self.id.clone(),
            pdf_url: self.open_access.as_ref().and_then(|oa| oa.oa_url.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::YearFilter;

    #[test]
    fn test_sort_vocabulary() {
        assert_eq!(sort_param(SortOrder::Relevance), "relevance_score:desc");
        assert_eq!(sort_param(SortOrder::PublicationDate), "publication_date:desc");
        assert_eq!(sort_param(SortOrder::CitationCount), "cited_by_count:desc");
    }

    #[test]
    fn test_filter_composition() {
        let filters = SearchFilters {
            year: Some(YearFilter::Exact(2023)),
            open_access_only: true,
            min_citations: Some(50),
        };
        assert_eq!(build_filter(&filters), "publication_year:2023,is_oa:true,cited_by_count:>49");
        assert_eq!(build_filter(&SearchFilters::default()), "");
    }

    #[test]
    fn test_min_citations_zero_excludes_nothing() {
        let filters = SearchFilters { min_citations: Some(0), ..Default::default() };
        assert_eq!(build_filter(&filters), "cited_by_count:>-1");
    }

    #[test]
    fn test_work_with_nulls_degrades_gracefully() {
        let work: Work = serde_json::from_value(serde_json::json!({
            "id": "https://openalex.org/W123",
            "title": "Test Paper",
            "cited_by_count": 10,
            "authorships": [],
            "primary_location": null,
            "open_access": null
        }))
        .unwrap();

        let record = work.to_record();
        assert_eq!(record.title, "Test Paper");
        assert!(record.authors.is_empty());
        assert_eq!(record.open_access, OpenAccessStatus::Unknown);
        assert_eq!(record.citation_count, Some(10));
        assert!(record.venue.is_none());
    }

    #[test]
    fn test_doi_prefix_stripped() {
        let work: Work = serde_json::from_value(serde_json::json!({
            "title": "Test",
            "doi": "https://doi.org/10.1234/example"
        }))
        .unwrap();

        assert_eq!(work.to_record().doi.as_deref(), Some("10.1234/example"));
    }

    #[test]
    fn test_closed_access_when_provider_says_not_oa() {
        let work: Work = serde_json::from_value(serde_json::json!({
            "title": "Test",
            "open_access": {"is_oa": false}
        }))
        .unwrap();

        assert_eq!(work.to_record().open_access, OpenAccessStatus::Closed);
    }
}
