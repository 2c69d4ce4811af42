//! Paper Lookup MCP Server
//!
//! A Model Context Protocol (MCP) server that looks up research papers on
//! OpenAlex (bibliographic metadata) and arXiv (preprints) and renders the
//! results as Markdown reports.
//!
//! # Pipeline
//!
//! Every tool call runs the same synchronous pipeline: validate the search
//! parameters, make exactly one HTTP round trip to the chosen provider,
//! normalize any failure into a stable error taxonomy, and format whatever
//! came back into a single readable report.
//!
//! # Example
//!
//! ```no_run
//! use paper_lookup_mcp::{Config, tools::ToolContext};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let ctx = ToolContext::from_config(&config)?;
//!
//!     // Hand ctx to the stdio server, or call tools directly.
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod server;
pub mod tools;

pub use config::Config;
pub use error::{DomainError, ErrorKind, TransportError, ValidationError};
pub use models::{PaperRecord, SearchOutcome, SearchRequest};
