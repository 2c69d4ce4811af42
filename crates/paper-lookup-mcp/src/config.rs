//! Configuration for the paper lookup MCP server.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// OpenAlex works endpoint base.
    pub const OPENALEX_API: &str = "https://api.openalex.org";

    /// arXiv query API base.
    pub const ARXIV_API: &str = "https://export.arxiv.org";

    /// Request timeout, matching the upstream documentation's recommendation.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Hard ceiling on `max_results` accepted from callers.
    pub const MAX_RESULTS_LIMIT: u32 = 200;

    /// Default page size when the caller does not ask for one.
    pub const DEFAULT_MAX_RESULTS: u32 = 10;
}

/// Report display constants.
///
/// These are presentation knobs, not invariants; tune freely.
pub mod display {
    /// Authors listed by name before collapsing to "et al.".
    pub const MAX_AUTHORS: usize = 3;

    /// Canonical DOI resolver prefix.
    pub const DOI_RESOLVER: &str = "https://doi.org/";
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Contact email sent to OpenAlex (`mailto` parameter, polite pool).
    pub mailto: Option<String>,

    /// Base URL for the OpenAlex API (overridable for mock servers).
    pub openalex_url: String,

    /// Base URL for the arXiv API (overridable for mock servers).
    pub arxiv_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Config {
    /// Create a new configuration with an optional contact email.
    ///
    /// Supplying an email puts OpenAlex requests in the polite pool,
    /// which gets a substantially higher rate limit.
    #[must_use]
    pub fn new(mailto: Option<String>) -> Self {
        Self {
            mailto,
            openalex_url: api::OPENALEX_API.to_string(),
            arxiv_url: api::ARXIV_API.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
        }
    }

    /// Create a test configuration pointing both providers at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            mailto: None,
            openalex_url: format!("{base_url}/openalex"),
            arxiv_url: format!("{base_url}/arxiv"),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }

    /// Create configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let mailto = std::env::var("PAPER_LOOKUP_MAILTO").ok();
        Ok(Self::new(mailto))
    }

    /// Check whether a contact email is configured.
    #[must_use]
    pub const fn has_mailto(&self) -> bool {
        self.mailto.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
