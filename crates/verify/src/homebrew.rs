//! Homebrew formula/cask verification
//!
//! The catalog marks casks by prefixing the package name with `--cask `;
//! the marker selects the cask endpoint and is stripped before URL
//! substitution. Everything else queries the formula endpoint.

use pkgprobe_errors::Result;
use pkgprobe_net::NetClient;
use pkgprobe_types::{PackageManager, VerificationResult};

use crate::response::classify_failure;

const CASK_MARKER: &str = "--cask ";

#[derive(Debug, Clone)]
pub struct HomebrewVerifier {
    base_url: String,
}

impl HomebrewVerifier {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Query URL for a package name; pure function of the input
    #[must_use]
    pub fn request_url(&self, package_name: &str) -> String {
        let trimmed = package_name.trim();
        match trimmed.strip_prefix(CASK_MARKER) {
            Some(cask) => format!("{}/cask/{}.json", self.base_url, cask.trim()),
            None => format!("{}/formula/{}.json", self.base_url, trimmed),
        }
    }

    /// Check whether the formula or cask exists
    ///
    /// # Errors
    ///
    /// Raises a network error for transient conditions (rate limit, 5xx,
    /// transport failure); definitive answers come back as results.
    pub async fn verify(
        &self,
        client: &NetClient,
        package_name: &str,
    ) -> Result<VerificationResult> {
        let url = self.request_url(package_name);
        let response = client.get(&url).await?;

        if response.status().is_success() {
            return Ok(VerificationResult::verified(
                PackageManager::Homebrew,
                package_name,
            ));
        }

        classify_failure(PackageManager::Homebrew, package_name, &response)
    }
}
