//! Validator tests: bad input is rejected before any network traffic.

use std::sync::Arc;

use proptest::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use paper_lookup_mcp::client::{ArxivClient, OpenAlexClient};
use paper_lookup_mcp::config::Config;
use paper_lookup_mcp::models::{SearchPapersInput, SearchRequest};
use paper_lookup_mcp::tools::{McpTool, SearchOpenAlexTool, ToolContext};

fn setup_test_context(mock_server: &MockServer) -> ToolContext {
    let config = Config::for_testing(&mock_server.uri());
    ToolContext::new(
        Arc::new(OpenAlexClient::new(&config).unwrap()),
        Arc::new(ArxivClient::new(&config).unwrap()),
    )
}

/// Mount a catch-all mock that must never be hit, run the tool, and
/// return the report. Mock expectations are verified when the server drops.
async fn report_expecting_no_requests(input: serde_json::Value) -> String {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/openalex/works"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    SearchOpenAlexTool.execute(&ctx, input).await
}

#[tokio::test]
async fn test_empty_query_rejected_without_network_call() {
    let report = report_expecting_no_requests(json!({"query": "   "})).await;

    assert!(report.contains("Invalid request"), "got: {report}");
    assert!(report.contains("query"), "got: {report}");
}

#[tokio::test]
async fn test_out_of_range_max_results_rejected_without_network_call() {
    for bad in [0, 201, -5, 100_000] {
        let report =
            report_expecting_no_requests(json!({"query": "test", "maxResults": bad})).await;
        assert!(report.contains("Invalid request"), "maxResults={bad}, got: {report}");
        assert!(report.contains("max_results"), "maxResults={bad}, got: {report}");
    }
}

#[tokio::test]
async fn test_fractional_max_results_rejected_not_rounded() {
    let report = report_expecting_no_requests(json!({"query": "test", "maxResults": 2.5})).await;

    assert!(report.contains("Invalid request"), "got: {report}");
}

#[tokio::test]
async fn test_unknown_sort_rejected_not_defaulted() {
    let report =
        report_expecting_no_requests(json!({"query": "test", "sortBy": "best_first"})).await;

    assert!(report.contains("Invalid request"), "got: {report}");
    assert!(report.contains("sort_by"), "got: {report}");
}

#[tokio::test]
async fn test_malformed_year_filter_rejected() {
    let report =
        report_expecting_no_requests(json!({"query": "test", "publicationYear": "recent"})).await;

    assert!(report.contains("Invalid request"), "got: {report}");
    assert!(report.contains("publication_year"), "got: {report}");
}

#[tokio::test]
async fn test_mistyped_query_field_rejected() {
    let report = report_expecting_no_requests(json!({"query": 42})).await;

    assert!(report.contains("Invalid request"), "got: {report}");
}

// =============================================================================
// Property-based validator checks
// =============================================================================

fn raw_input(query: &str, max_results: Option<i64>) -> SearchPapersInput {
    SearchPapersInput {
        query: query.to_string(),
        max_results,
        sort_by: None,
        publication_year: None,
        open_access_only: None,
        min_citations: None,
    }
}

proptest! {
    /// Every integer outside [1, 200] is rejected, naming the field.
    #[test]
    fn out_of_range_max_results_always_rejected(
        n in prop_oneof![i64::MIN..=0i64, 201i64..=i64::MAX]
    ) {
        let err = SearchRequest::validate(raw_input("test", Some(n))).unwrap_err();
        prop_assert_eq!(err.field.as_str(), "max_results");
    }

    /// Every integer inside [1, 200] is accepted unchanged, never clamped.
    #[test]
    fn in_range_max_results_always_accepted(n in 1i64..=200i64) {
        let request = SearchRequest::validate(raw_input("test", Some(n))).unwrap();
        prop_assert_eq!(i64::from(request.max_results), n);
    }

    /// Non-blank queries survive validation with surrounding whitespace trimmed.
    #[test]
    fn queries_are_trimmed(query in "[a-zA-Z][a-zA-Z0-9 ]{0,40}") {
        let padded = format!("  {query}  ");
        let request = SearchRequest::validate(raw_input(&padded, None)).unwrap();
        prop_assert_eq!(request.query, query.trim().to_string());
    }
}
