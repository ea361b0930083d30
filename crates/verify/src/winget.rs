//! winget community manifest verification
//!
//! winget package ids follow the `Publisher.Name[.MoreName]` convention
//! and map onto a manifest path in the community repository. Identifiers
//! that cannot be split (no dot, or an empty publisher segment) fail
//! before any network call.
//!
//! The manifest host signals quota exhaustion with a 403 whose
//! rate-limit-remaining header reads zero; only that exact combination is
//! treated as rate limiting, and any other 403 is a terminal client
//! error.

use pkgprobe_errors::{NetworkError, Result, VerifyError};
use pkgprobe_net::{retry_after_secs, NetClient};
use pkgprobe_types::{PackageManager, VerificationResult};
use reqwest::StatusCode;

use crate::response::classify_failure;

const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

#[derive(Debug, Clone)]
pub struct WingetVerifier {
    base_url: String,
}

impl WingetVerifier {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Split an identifier into (publisher, name) on the first dot
    ///
    /// # Errors
    ///
    /// Returns `VerifyError::MalformedIdentifier` when there is no dot or
    /// the publisher segment is empty.
    pub fn split_identifier(identifier: &str) -> Result<(&str, &str)> {
        let trimmed = identifier.trim();
        let Some((publisher, name)) = trimmed.split_once('.') else {
            return Err(VerifyError::MalformedIdentifier {
                identifier: trimmed.to_string(),
                reason: "expected Publisher.Name".to_string(),
            }
            .into());
        };
        if publisher.is_empty() {
            return Err(VerifyError::MalformedIdentifier {
                identifier: trimmed.to_string(),
                reason: "empty publisher segment".to_string(),
            }
            .into());
        }
        Ok((publisher, name))
    }

    /// Manifest URL for an identifier; pure function of the input
    ///
    /// # Errors
    ///
    /// Returns `VerifyError::MalformedIdentifier` for identifiers that
    /// cannot be split.
    pub fn request_url(&self, identifier: &str) -> Result<String> {
        let (publisher, name) = Self::split_identifier(identifier)?;
        let first = publisher
            .chars()
            .next()
            .map(|c| c.to_ascii_lowercase())
            .unwrap_or_default();
        Ok(format!(
            "{}/manifests/{first}/{publisher}/{name}",
            self.base_url
        ))
    }

    /// Check whether a manifest exists for the identifier
    ///
    /// # Errors
    ///
    /// Raises a network error for transient conditions; malformed
    /// identifiers and definitive answers come back as failed results.
    pub async fn verify(
        &self,
        client: &NetClient,
        package_name: &str,
    ) -> Result<VerificationResult> {
        let url = match self.request_url(package_name) {
            Ok(url) => url,
            // Structural failure: no network call is attempted
            Err(e) => {
                return Ok(VerificationResult::failed(
                    PackageManager::Winget,
                    package_name,
                    e.to_string(),
                ));
            }
        };

        let response = client.get(&url).await?;
        let status = response.status();

        if status.is_success() {
            return Ok(VerificationResult::verified(
                PackageManager::Winget,
                package_name,
            ));
        }

        // A 403 means rate limiting only when the quota header reads
        // exhausted; otherwise it stays a terminal client error.
        if status == StatusCode::FORBIDDEN {
            let exhausted = response
                .headers()
                .get(RATE_LIMIT_REMAINING_HEADER)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.trim() == "0");
            if exhausted {
                return Err(NetworkError::RateLimited {
                    retry_after: retry_after_secs(&response),
                }
                .into());
            }
        }

        classify_failure(PackageManager::Winget, package_name, &response)
    }
}
