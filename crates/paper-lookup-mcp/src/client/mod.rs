//! Provider clients.
//!
//! Each external service gets one adapter implementing [`PaperProvider`].
//! An adapter owns the full translation for its provider: request fields
//! into that provider's query vocabulary, and the provider's wire shape
//! back into [`PaperRecord`]s. Everything downstream of this module is
//! provider-agnostic.
//!
//! Adapters make exactly one HTTP request per `search` call and surface
//! failures as raw [`TransportError`]s; classification into the stable
//! error taxonomy happens later, at the facade.

mod arxiv;
mod openalex;

use std::time::Duration;

pub use arxiv::ArxivClient;
pub use openalex::OpenAlexClient;

use crate::config::Config;
use crate::error::{TransportError, TransportResult};
use crate::models::{PaperRecord, SearchRequest};

/// Capability interface implemented once per provider.
#[async_trait::async_trait]
pub trait PaperProvider: Send + Sync {
    /// Short provider label used in logs and reports.
    fn name(&self) -> &'static str;

    /// Run one search round trip: exactly one outbound request, one
    /// result list. A response with zero matches is `Ok(vec![])`, not
    /// an error.
    async fn search(&self, request: &SearchRequest) -> TransportResult<Vec<PaperRecord>>;
}

/// Build the shared HTTP client an adapter holds for its lifetime.
pub(crate) fn build_http_client(config: &Config) -> anyhow::Result<reqwest::Client> {
    let user_agent = match &config.mailto {
        Some(email) => {
            format!("{}/{} (mailto:{email})", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        }
        None => format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
    };

    Ok(reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .gzip(true)
        .build()?)
}

/// Turn a non-2xx response into a [`TransportError::Status`], keeping the
/// body text for diagnostics and the `Retry-After` header when present.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> TransportResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs);

    let message = response.text().await.unwrap_or_default();
    Err(TransportError::Status {
        status: status.as_u16(),
        message: if message.is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            message
        },
        retry_after,
    })
}
