//! Shared response interpretation for verifier variants
//!
//! The contract every variant follows for non-success statuses:
//! 404 is a definitive negative answer (terminal failed result, never
//! retried); 429 raises a rate-limit error carrying the server's
//! retry-after when present; 5xx raises a retryable server error; any
//! other status is a terminal client error embedded in the result
//! message.

use pkgprobe_errors::{NetworkError, Result};
use pkgprobe_net::retry_after_secs;
use pkgprobe_types::{PackageManager, VerificationResult};
use reqwest::{Response, StatusCode};

pub(crate) const NOT_FOUND_MESSAGE: &str = "Package not found";

/// Interpret a non-success response into a terminal result or a
/// retryable error.
pub(crate) fn classify_failure(
    manager: PackageManager,
    package_name: &str,
    response: &Response,
) -> Result<VerificationResult> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Ok(VerificationResult::failed(
            manager,
            package_name,
            NOT_FOUND_MESSAGE,
        ));
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(NetworkError::RateLimited {
            retry_after: retry_after_secs(response),
        }
        .into());
    }

    if status.is_server_error() {
        return Err(NetworkError::Server {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("server error")
                .to_string(),
        }
        .into());
    }

    Ok(VerificationResult::failed(
        manager,
        package_name,
        format!("Registry error: {status}"),
    ))
}
