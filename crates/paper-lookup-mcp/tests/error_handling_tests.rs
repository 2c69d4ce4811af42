//! Tests for provider failure scenarios.
//!
//! Each HTTP status an adapter can see must land in exactly one error
//! kind, and each kind must surface as its own report phrase rather than
//! a generic failure line.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use paper_lookup_mcp::client::{ArxivClient, OpenAlexClient};
use paper_lookup_mcp::config::Config;
use paper_lookup_mcp::tools::{McpTool, SearchArxivTool, SearchOpenAlexTool, ToolContext};

fn context_for(config: &Config) -> ToolContext {
    ToolContext::new(
        Arc::new(OpenAlexClient::new(config).unwrap()),
        Arc::new(ArxivClient::new(config).unwrap()),
    )
}

fn setup_test_context(mock_server: &MockServer) -> ToolContext {
    context_for(&Config::for_testing(&mock_server.uri()))
}

async fn openalex_report_for_status(template: ResponseTemplate) -> String {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/openalex/works"))
        .respond_with(template)
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    SearchOpenAlexTool.execute(&ctx, json!({"query": "test"})).await
}

#[tokio::test]
async fn test_403_reports_rate_limit() {
    let report =
        openalex_report_for_status(ResponseTemplate::new(403).set_body_string("slow down")).await;

    assert!(report.contains("Rate limit reached"), "got: {report}");
    // The rate-limit phrase is specific, not the generic failure line.
    assert!(!report.contains("failed unexpectedly"));
}

#[tokio::test]
async fn test_403_with_retry_after_includes_hint() {
    let report = openalex_report_for_status(
        ResponseTemplate::new(403)
            .insert_header("Retry-After", "60")
            .set_body_string("slow down"),
    )
    .await;

    assert!(report.contains("Wait 60 seconds"), "got: {report}");
}

#[tokio::test]
async fn test_404_reports_not_found() {
    let report =
        openalex_report_for_status(ResponseTemplate::new(404).set_body_string("gone")).await;

    assert!(report.contains("could not find"), "got: {report}");
}

#[tokio::test]
async fn test_500_reports_provider_unavailable() {
    let report =
        openalex_report_for_status(ResponseTemplate::new(500).set_body_string("oops")).await;

    assert!(report.contains("currently unavailable"), "got: {report}");
}

#[tokio::test]
async fn test_503_reports_provider_unavailable() {
    let report =
        openalex_report_for_status(ResponseTemplate::new(503).set_body_string("maintenance"))
            .await;

    assert!(report.contains("currently unavailable"), "got: {report}");
}

#[tokio::test]
async fn test_unmapped_status_reports_unexpected() {
    let report =
        openalex_report_for_status(ResponseTemplate::new(418).set_body_string("teapot")).await;

    assert!(report.contains("failed unexpectedly"), "got: {report}");
    assert!(report.contains("418"), "got: {report}");
}

#[tokio::test]
async fn test_timeout_reports_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/openalex/works"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"results": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let mut config = Config::for_testing(&mock_server.uri());
    config.request_timeout = Duration::from_millis(200);
    let ctx = context_for(&config);

    let report = SearchOpenAlexTool.execute(&ctx, json!({"query": "test"})).await;

    assert!(report.contains("did not respond in time"), "got: {report}");
}

#[tokio::test]
async fn test_connection_failure_reports_network_error() {
    // Nothing listens on this port.
    let config = Config::for_testing("http://127.0.0.1:9");
    let ctx = context_for(&config);

    let report = SearchOpenAlexTool.execute(&ctx, json!({"query": "test"})).await;

    assert!(report.contains("Could not reach the provider"), "got: {report}");
}

#[tokio::test]
async fn test_arxiv_failures_share_the_taxonomy() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/arxiv/api/query"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let report = SearchArxivTool.execute(&ctx, json!({"query": "test"})).await;

    assert!(report.contains("currently unavailable"), "got: {report}");
}

#[tokio::test]
async fn test_arxiv_malformed_feed_reports_unexpected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/arxiv/api/query"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<feed><entry><title>broken</entry></feed>"),
        )
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let report = SearchArxivTool.execute(&ctx, json!({"query": "test"})).await;

    assert!(report.contains("failed unexpectedly"), "got: {report}");
}
