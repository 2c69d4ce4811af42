//! Paper search tools: `search_papers_openalex` and `search_papers_arxiv`.

use serde_json::json;

use super::{McpTool, ToolContext};
use crate::client::PaperProvider;
use crate::error::{DomainError, ValidationError};
use crate::formatters;
use crate::models::{SearchOutcome, SearchPapersInput, SearchRequest};

/// Shared facade pipeline: Validate, then search, then normalize, then
/// format. Validation failures short-circuit before any network call and
/// come back through the same error renderer as provider failures.
async fn run_search(provider: &dyn PaperProvider, input: serde_json::Value) -> String {
    let raw: SearchPapersInput = match serde_json::from_value(input) {
        Ok(raw) => raw,
        Err(e) => {
            let error = DomainError::from(ValidationError::new("input", e.to_string()));
            tracing::warn!(provider = provider.name(), %error, "rejected malformed tool input");
            return formatters::format_error(&error);
        }
    };

    let request = match SearchRequest::validate(raw) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(provider = provider.name(), field = %e.field, "rejected search input");
            return formatters::format_error(&DomainError::from(e));
        }
    };

    tracing::info!(
        provider = provider.name(),
        query = %request.query,
        max_results = request.max_results,
        "searching"
    );

    let outcome = match provider.search(&request).await {
        Ok(records) => SearchOutcome::from_records(records),
        Err(e) => {
            let error = DomainError::from_transport(e);
            tracing::error!(
                provider = provider.name(),
                kind = error.kind.as_str(),
                message = %error.message,
                "search failed"
            );
            SearchOutcome::Failed(error)
        }
    };

    if matches!(outcome, SearchOutcome::Empty) {
        tracing::warn!(provider = provider.name(), query = %request.query, "no matches");
    }

    formatters::format_outcome(&outcome, &request.query)
}

/// JSON Schema shared by both search tools.
fn search_input_schema(query_hint: &str) -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": query_hint
            },
            "maxResults": {
                "type": "integer",
                "minimum": 1,
                "maximum": 200,
                "default": 10,
                "description": "Maximum papers to return"
            },
            "sortBy": {
                "type": "string",
                "enum": ["relevance", "publication_date", "cited_by_count"],
                "default": "relevance",
                "description": "Result ordering"
            },
            "publicationYear": {
                "type": "string",
                "description": "Year filter: '2023', '>2020', '<2020', or '2020-2023'"
            },
            "openAccessOnly": {
                "type": "boolean",
                "default": false,
                "description": "Only return papers whose full text is free to read"
            },
            "minCitations": {
                "type": "integer",
                "minimum": 0,
                "description": "Only return papers cited at least this many times"
            }
        },
        "required": ["query"]
    })
}

/// OpenAlex paper search tool.
pub struct SearchOpenAlexTool;

#[async_trait::async_trait]
impl McpTool for SearchOpenAlexTool {
    fn name(&self) -> &'static str {
        "search_papers_openalex"
    }

    fn description(&self) -> &'static str {
        "Search the OpenAlex scholarly database (240M+ works across all fields). \
         Returns titles, authors, venues, citation counts, open access status, and DOIs."
    }

    fn input_schema(&self) -> serde_json::Value {
        search_input_schema(
            "Search phrase, matched against titles, abstracts, and full text \
             (e.g. 'CRISPR gene editing')",
        )
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> String {
        run_search(ctx.openalex.as_ref(), input).await
    }
}

/// arXiv paper search tool.
pub struct SearchArxivTool;

#[async_trait::async_trait]
impl McpTool for SearchArxivTool {
    fn name(&self) -> &'static str {
        "search_papers_arxiv"
    }

    fn description(&self) -> &'static str {
        "Search arXiv preprints. Best for recent work in physics, mathematics, and \
         computer science; every result links to a freely readable PDF."
    }

    fn input_schema(&self) -> serde_json::Value {
        search_input_schema("Search phrase (e.g. 'sparse attention transformers')")
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> String {
        run_search(ctx.arxiv.as_ref(), input).await
    }
}
