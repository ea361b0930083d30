//! Network-related error types
//!
//! Every variant here is a *condition*, not an answer: a definitive
//! "package does not exist" never becomes a `NetworkError`, it is a
//! normal failed verification result. These errors are what the retry
//! executor classifies.

use std::borrow::Cow;

use thiserror::Error;

use crate::UserFacingError;

#[derive(Debug, Clone, Error)]
pub enum NetworkError {
    #[error("connection timeout to {url}")]
    Timeout { url: String },

    #[error("connection refused: {0}")]
    ConnectionRefused(String),

    #[error("rate limited by remote registry")]
    RateLimited { retry_after: Option<u64> },

    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl NetworkError {
    /// Classify a transient condition worth another attempt.
    ///
    /// `RequestFailed` carries whatever message the HTTP stack produced;
    /// timeouts and connection resets that were not surfaced structurally
    /// are recognized by message pattern.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. }
            | Self::ConnectionRefused(_)
            | Self::RateLimited { .. }
            | Self::Server { .. } => true,
            Self::RequestFailed(message) => {
                let message = message.to_ascii_lowercase();
                message.contains("timeout")
                    || message.contains("timed out")
                    || message.contains("connection reset")
            }
            Self::InvalidUrl(_) => false,
        }
    }
}

impl UserFacingError for NetworkError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::RateLimited { .. } => {
                Some("The registry is throttling requests; try again later.")
            }
            Self::Timeout { .. } | Self::ConnectionRefused(_) => {
                Some("Check your network connection.")
            }
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        self.is_transient()
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::Timeout { .. } => "network.timeout",
            Self::ConnectionRefused(_) => "network.connection_refused",
            Self::RateLimited { .. } => "network.rate_limited",
            Self::Server { .. } => "network.server_error",
            Self::RequestFailed(_) => "network.request_failed",
            Self::InvalidUrl(_) => "network.invalid_url",
        })
    }
}
