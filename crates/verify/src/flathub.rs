//! Flathub application verification
//!
//! Flatpak application ids are reverse-domain identifiers
//! (`org.mozilla.firefox`) used verbatim in the query path after
//! whitespace trimming.

use pkgprobe_errors::Result;
use pkgprobe_net::NetClient;
use pkgprobe_types::{PackageManager, VerificationResult};

use crate::response::classify_failure;

#[derive(Debug, Clone)]
pub struct FlathubVerifier {
    base_url: String,
}

impl FlathubVerifier {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Query URL for an application id; pure function of the input
    #[must_use]
    pub fn request_url(&self, package_name: &str) -> String {
        format!("{}/{}", self.base_url, package_name.trim())
    }

    /// Check whether the application exists on Flathub
    ///
    /// # Errors
    ///
    /// Raises a network error for transient conditions; definitive
    /// answers come back as results.
    pub async fn verify(
        &self,
        client: &NetClient,
        package_name: &str,
    ) -> Result<VerificationResult> {
        let url = self.request_url(package_name);
        let response = client.get(&url).await?;

        if response.status().is_success() {
            return Ok(VerificationResult::verified(
                PackageManager::Flatpak,
                package_name,
            ));
        }

        classify_failure(PackageManager::Flatpak, package_name, &response)
    }
}
