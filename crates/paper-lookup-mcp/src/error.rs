//! Error types for the paper lookup MCP server.
//!
//! Uses `thiserror` for structured error handling. Failures live on three
//! levels: `ValidationError` (bad caller input, raised before any network
//! traffic), `TransportError` (raw HTTP/decoding failures produced at the
//! provider boundary), and `DomainError` (the stable, caller-facing
//! taxonomy every failure is normalized into).

use std::time::Duration;

/// Input validation failure, naming the offending field.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value for '{field}': {message}")]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// What was wrong with it.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for a named field.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Raw failure from the provider boundary.
///
/// Adapters produce these without classifying them any further; the
/// mapping onto the stable taxonomy happens in [`DomainError::from_transport`].
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    /// HTTP transport error (connection, DNS, TLS, timeout, body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the provider.
    #[error("HTTP status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
        /// Parsed `Retry-After` header, if the provider sent one.
        retry_after: Option<Duration>,
    },

    /// Response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// The closed set of failure categories surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input was malformed; fix the request and resend.
    Validation,
    /// The provider did not answer within the configured timeout.
    Timeout,
    /// The provider refused the request because of rate limiting.
    RateLimited,
    /// The queried resource does not exist.
    NotFound,
    /// The provider is failing on its side (HTTP 5xx).
    ProviderUnavailable,
    /// The request never reached the provider.
    Network,
    /// Anything not covered above.
    Unexpected,
}

impl ErrorKind {
    /// Stable lowercase token, used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Timeout => "timeout",
            Self::RateLimited => "rate_limited",
            Self::NotFound => "not_found",
            Self::ProviderUnavailable => "provider_unavailable",
            Self::Network => "network",
            Self::Unexpected => "unexpected",
        }
    }
}

/// Normalized error carried through the rest of the pipeline.
///
/// Constructed by [`DomainError::from_transport`] (the single place raw
/// transport failures are classified) or by conversion from
/// [`ValidationError`], so every failure stage has the same external shape.
#[derive(thiserror::Error, Debug, Clone)]
#[error("{message}")]
pub struct DomainError {
    /// Failure category.
    pub kind: ErrorKind,
    /// Original diagnostic message.
    pub message: String,
    /// Suggested wait before retrying, for rate-limit errors.
    pub retry_after: Option<Duration>,
}

impl DomainError {
    /// Create an error of the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), retry_after: None }
    }

    /// Create a rate-limited error with an optional retry hint.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>, retry_after: Option<Duration>) -> Self {
        Self { kind: ErrorKind::RateLimited, message: message.into(), retry_after }
    }

    /// Classify a raw transport failure into the stable taxonomy.
    ///
    /// The match is exhaustive over everything an adapter can produce:
    /// timeouts, connection failures, each status bucket, and decoding
    /// errors. Nothing falls through silently; the remainder lands in
    /// [`ErrorKind::Unexpected`].
    #[must_use]
    pub fn from_transport(err: TransportError) -> Self {
        match err {
            TransportError::Http(e) => {
                let message = e.to_string();
                if e.is_timeout() {
                    Self::new(ErrorKind::Timeout, message)
                } else if e.is_connect() || e.is_request() {
                    Self::new(ErrorKind::Network, message)
                } else {
                    Self::new(ErrorKind::Unexpected, message)
                }
            }
            TransportError::Status { status, message, retry_after } => match status {
                403 => Self::rate_limited(message, retry_after),
                404 => Self::new(ErrorKind::NotFound, message),
                500..=599 => Self::new(
                    ErrorKind::ProviderUnavailable,
                    format!("provider returned HTTP {status}: {message}"),
                ),
                _ => Self::new(ErrorKind::Unexpected, format!("HTTP {status}: {message}")),
            },
            TransportError::Decode(message) => Self::new(ErrorKind::Unexpected, message),
        }
    }

    /// Get the retry-after hint if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self.kind {
            ErrorKind::RateLimited => self.retry_after,
            _ => None,
        }
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        Self::new(ErrorKind::Validation, err.to_string())
    }
}

impl From<TransportError> for DomainError {
    fn from(err: TransportError) -> Self {
        Self::from_transport(err)
    }
}

/// Result type alias for provider operations.
pub type TransportResult<T> = Result<T, TransportError>;
