//! arXiv preprint search.
//!
//! arXiv's query API takes a Lucene-ish `search_query` string and answers
//! with an Atom feed, so this adapter owns both the query-vocabulary
//! translation and a streaming XML parse. arXiv has no citation data and
//! no citation ordering; `cited_by_count` sorting degrades to relevance
//! and every record's citation count stays unknown. All arXiv records are
//! green open access by definition.

use chrono::DateTime;
use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;
use std::sync::OnceLock;

use super::{PaperProvider, build_http_client, check_status};
use crate::config::Config;
use crate::error::{TransportError, TransportResult};
use crate::models::{OpenAccessStatus, PaperRecord, SearchRequest, SortOrder, YearFilter};

/// Client for the arXiv preprint-repository API.
pub struct ArxivClient {
    http: reqwest::Client,
    base_url: String,
}

impl ArxivClient {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self { http: build_http_client(config)?, base_url: config.arxiv_url.clone() })
    }
}

#[async_trait::async_trait]
impl PaperProvider for ArxivClient {
    fn name(&self) -> &'static str {
        "arxiv"
    }

    async fn search(&self, request: &SearchRequest) -> TransportResult<Vec<PaperRecord>> {
        let url = format!("{}/api/query", self.base_url);

        let params = [
            ("search_query".to_string(), build_search_query(request)),
            ("start".to_string(), "0".to_string()),
            ("max_results".to_string(), request.max_results.to_string()),
            ("sortBy".to_string(), sort_param(request.sort).to_string()),
            ("sortOrder".to_string(), "descending".to_string()),
        ];

        let response = self.http.get(&url).query(&params).send().await?;
        let response = check_status(response).await?;
        let body = response.text().await?;

        parse_atom_feed(&body)
    }
}

const fn sort_param(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::Relevance | SortOrder::CitationCount => "relevance",
        SortOrder::PublicationDate => "submittedDate",
    }
}

/// Translate the request into arXiv's `search_query` vocabulary. Year
/// filters become `submitted_date` ranges; the open-access and citation
/// facets have no arXiv equivalent and are not sent.
fn build_search_query(request: &SearchRequest) -> String {
    let mut parts = vec![format!("all:{}", request.query)];

    if let Some(year) = &request.filters.year {
        parts.push(submitted_date_clause(year));
    }

    parts.join(" AND ")
}

fn submitted_date_clause(year: &YearFilter) -> String {
    let (start, end) = year.bounds();
    let from = start.map_or_else(|| "*".to_string(), |y| format!("{y}0101"));
    let to = end.map_or_else(|| "*".to_string(), |y| format!("{y}1231"));
    format!("submitted_date:[{from} TO {to}]")
}

fn arxiv_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d{4}\.\d{4,5})(?:v\d+)?").expect("valid regex"))
}

/// Pull the canonical arXiv id out of an entry id URL, dropping any
/// version suffix. Falls back to the last path segment for old-style ids.
fn canonical_id(entry_id: &str) -> String {
    if let Some(captures) = arxiv_id_pattern().captures(entry_id) {
        return captures[1].to_string();
    }
    entry_id.rsplit('/').next().unwrap_or(entry_id).to_string()
}

fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One partially-assembled feed entry.
#[derive(Default)]
struct EntryState {
    entry_id: String,
    title: String,
    published: String,
    authors: Vec<String>,
    doi: Option<String>,
    journal_ref: Option<String>,
    abs_url: Option<String>,
    pdf_url: Option<String>,
}

impl EntryState {
    fn into_record(self) -> Option<PaperRecord> {
        let title = squash_whitespace(&self.title);
        if title.is_empty() {
            return None;
        }

        let id = canonical_id(&self.entry_id);
        let year = DateTime::parse_from_rfc3339(self.published.trim())
            .ok()
            .map(|date| date.format("%Y").to_string())
            .and_then(|y| y.parse().ok());

        Some(PaperRecord {
            title,
            authors: self.authors,
            year,
            venue: self.journal_ref.map(|j| squash_whitespace(&j)),
            doi: self.doi.map(|d| d.trim().to_string()),
            citation_count: None,
            open_access: OpenAccessStatus::Green,
            abstract_url: Some(
                self.abs_url.unwrap_or_else(|| format!("https://arxiv.org/abs/{id}")),
            ),
            pdf_url: self.pdf_url,
        })
    }

    /// Record a `<link>` element; arXiv marks the PDF link with a
    /// `title="pdf"` attribute and the landing page with `rel="alternate"`.
    fn add_link(&mut self, e: &quick_xml::events::BytesStart<'_>) {
        let mut href = None;
        let mut rel = None;
        let mut title = None;
        for attr in e.attributes().flatten() {
            let value = String::from_utf8_lossy(&attr.value).to_string();
            match attr.key.as_ref() {
                b"href" => href = Some(value),
                b"rel" => rel = Some(value),
                b"title" => title = Some(value),
                _ => {}
            }
        }
        let Some(href) = href else { return };
        if title.as_deref() == Some("pdf") {
            self.pdf_url = Some(href);
        } else if rel.as_deref() == Some("alternate") || href.contains("/abs/") {
            self.abs_url.get_or_insert(href);
        }
    }
}

/// Parse an arXiv Atom feed into records.
///
/// Event-driven rather than serde-based: the feed mixes the Atom and
/// arXiv namespaces and repeats elements, which maps poorly onto derive.
fn parse_atom_feed(xml: &str) -> TransportResult<Vec<PaperRecord>> {
    let mut reader = Reader::from_str(xml);
    let mut papers = Vec::new();
    let mut entry: Option<EntryState> = None;
    let mut current_tag = String::new();
    let mut in_author = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if tag == "entry" {
                    entry = Some(EntryState::default());
                } else if let Some(state) = entry.as_mut() {
                    if tag == "author" {
                        in_author = true;
                    } else if tag == "link" {
                        state.add_link(&e);
                    }
                    current_tag = tag;
                }
            }
            Ok(Event::Empty(e)) => {
                if let Some(state) = entry.as_mut() {
                    if e.name().as_ref() == b"link" {
                        state.add_link(&e);
                    }
                }
            }
            Ok(Event::Text(e)) => {
                let Some(state) = entry.as_mut() else {
                    buf.clear();
                    continue;
                };
                let text = e.unescape().unwrap_or_default().to_string();
                match current_tag.as_str() {
                    "id" if state.entry_id.is_empty() => state.entry_id = text.trim().to_string(),
                    "title" => state.title.push_str(&text),
                    "published" => state.published.push_str(&text),
                    "name" if in_author => {
                        let name = text.trim();
                        if !name.is_empty() {
                            state.authors.push(name.to_string());
                        }
                    }
                    "doi" | "arxiv:doi" => state.doi = Some(text),
                    "journal_ref" | "arxiv:journal_ref" => state.journal_ref = Some(text),
                    _ => {}
                }
            }
            Ok(Event::End(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if tag == "entry" {
                    if let Some(record) = entry.take().and_then(EntryState::into_record) {
                        papers.push(record);
                    }
                } else if tag == "author" {
                    in_author = false;
                }
                if tag == current_tag {
                    current_tag.clear();
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(TransportError::Decode(format!("malformed Atom feed: {e}"))),
            _ => {}
        }
        buf.clear();
    }

    Ok(papers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SearchFilters;

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:arxiv="http://arxiv.org/schemas/atom">
  <entry>
    <id>http://arxiv.org/abs/2301.12345v2</id>
    <title>Sparse Attention
      for Long Documents</title>
    <summary>We study sparse attention.</summary>
    <published>2023-01-15T00:00:00Z</published>
    <author><name>John Doe</name></author>
    <author><name>Jane Smith</name></author>
    <arxiv:doi>10.48550/arXiv.2301.12345</arxiv:doi>
    <arxiv:journal_ref>Proc. Example Conf. 2023</arxiv:journal_ref>
    <link href="http://arxiv.org/abs/2301.12345v2" rel="alternate" type="text/html"/>
    <link href="http://arxiv.org/pdf/2301.12345v2" title="pdf" type="application/pdf"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2302.00001v1</id>
    <title>Second Paper</title>
    <published>2023-02-01T00:00:00Z</published>
    <author><name>Ada Lovelace</name></author>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_atom_feed() {
        let papers = parse_atom_feed(SAMPLE_FEED).unwrap();
        assert_eq!(papers.len(), 2);

        let p = &papers[0];
        assert_eq!(p.title, "Sparse Attention for Long Documents");
        assert_eq!(p.authors, vec!["John Doe", "Jane Smith"]);
        assert_eq!(p.year, Some(2023));
        assert_eq!(p.doi.as_deref(), Some("10.48550/arXiv.2301.12345"));
        assert_eq!(p.venue.as_deref(), Some("Proc. Example Conf. 2023"));
        assert_eq!(p.abstract_url.as_deref(), Some("http://arxiv.org/abs/2301.12345v2"));
        assert_eq!(p.pdf_url.as_deref(), Some("http://arxiv.org/pdf/2301.12345v2"));
        assert_eq!(p.open_access, OpenAccessStatus::Green);
        assert!(p.citation_count.is_none());
    }

    #[test]
    fn test_entry_without_links_gets_canonical_abs_url() {
        let papers = parse_atom_feed(SAMPLE_FEED).unwrap();
        assert_eq!(papers[1].abstract_url.as_deref(), Some("https://arxiv.org/abs/2302.00001"));
    }

    #[test]
    fn test_empty_feed_is_ok() {
        let feed = r#"<?xml version="1.0"?><feed xmlns="http://www.w3.org/2005/Atom"></feed>"#;
        assert!(parse_atom_feed(feed).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_feed_is_decode_error() {
        let result = parse_atom_feed("<feed><entry><title>broken</entry></feed>");
        assert!(matches!(result, Err(TransportError::Decode(_))));
    }

    #[test]
    fn test_canonical_id_strips_version() {
        assert_eq!(canonical_id("http://arxiv.org/abs/2301.12345v3"), "2301.12345");
        assert_eq!(canonical_id("http://arxiv.org/abs/hep-th/9901001"), "9901001");
    }

    #[test]
    fn test_search_query_translation() {
        let request = SearchRequest {
            query: "quantum computing".to_string(),
            max_results: 5,
            sort: SortOrder::Relevance,
            filters: SearchFilters { year: Some(YearFilter::Range(2020, 2023)), ..Default::default() },
        };
        assert_eq!(
            build_search_query(&request),
            "all:quantum computing AND submitted_date:[20200101 TO 20231231]"
        );
    }

    #[test]
    fn test_open_ended_year_bounds_use_wildcard() {
        assert_eq!(
            submitted_date_clause(&YearFilter::After(2020)),
            "submitted_date:[20210101 TO *]"
        );
        assert_eq!(
            submitted_date_clause(&YearFilter::Before(2020)),
            "submitted_date:[* TO 20191231]"
        );
    }

    #[test]
    fn test_citation_sort_degrades_to_relevance() {
        assert_eq!(sort_param(SortOrder::CitationCount), "relevance");
        assert_eq!(sort_param(SortOrder::PublicationDate), "submittedDate");
    }
}
