//! MCP tool implementations.
//!
//! Each tool runs the same pipeline: parse and validate input, call its
//! provider adapter, normalize any failure, format the outcome. Tools
//! always produce a readable report string; failures never escape as
//! protocol-level errors.

mod search;

pub use search::{SearchArxivTool, SearchOpenAlexTool};

use std::sync::Arc;

use crate::client::{ArxivClient, OpenAlexClient};
use crate::config::Config;

/// Tool execution context.
pub struct ToolContext {
    /// Bibliographic-metadata provider.
    pub openalex: Arc<OpenAlexClient>,
    /// Preprint-repository provider.
    pub arxiv: Arc<ArxivClient>,
}

impl ToolContext {
    /// Create a new tool context from already-built clients.
    #[must_use]
    pub fn new(openalex: Arc<OpenAlexClient>, arxiv: Arc<ArxivClient>) -> Self {
        Self { openalex, arxiv }
    }

    /// Build both provider clients from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            openalex: Arc::new(OpenAlexClient::new(config)?),
            arxiv: Arc::new(ArxivClient::new(config)?),
        })
    }
}

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (e.g., "search_papers_openalex").
    fn name(&self) -> &'static str;

    /// Tool description for the calling agent.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool. Always returns a report; every failure path is
    /// rendered into readable text rather than propagated.
    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> String;
}

/// Register all tools.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    vec![Box::new(SearchOpenAlexTool), Box::new(SearchArxivTool)]
}
