//! Snapcraft store verification
//!
//! Catalog snap names may carry space-separated installation flags
//! (`code --classic`); only the first whitespace-delimited token is a
//! package name and the flags never reach the remote query. The store
//! API requires the `Snap-Device-Series` header.

use pkgprobe_errors::Result;
use pkgprobe_net::NetClient;
use pkgprobe_types::{PackageManager, VerificationResult};

use crate::response::classify_failure;

const DEVICE_SERIES_HEADER: (&str, &str) = ("Snap-Device-Series", "16");

#[derive(Debug, Clone)]
pub struct SnapcraftVerifier {
    base_url: String,
}

impl SnapcraftVerifier {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// The queried snap name: first token, install flags discarded
    #[must_use]
    pub fn strip_flags(package_name: &str) -> &str {
        package_name.trim().split_whitespace().next().unwrap_or("")
    }

    /// Query URL for a snap name; pure function of the input
    #[must_use]
    pub fn request_url(&self, package_name: &str) -> String {
        format!("{}/{}", self.base_url, Self::strip_flags(package_name))
    }

    /// Check whether the snap exists in the store
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
        let response = client
            .get_with_headers(&url, &[DEVICE_SERIES_HEADER])
            .await?;

        if response.status().is_success() {
            return Ok(VerificationResult::verified(
                PackageManager::Snap,
                package_name,
            ));
        }

        classify_failure(PackageManager::Snap, package_name, &response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_flags_never_reach_the_query() {
        let verifier = SnapcraftVerifier::new("https://api.snapcraft.io/v2/snaps/info");
        assert_eq!(
            verifier.request_url("code --classic"),
            "https://api.snapcraft.io/v2/snaps/info/code"
        );
        assert_eq!(
            verifier.request_url("code --classic --devmode"),
            verifier.request_url("code")
        );
    }

    #[test]
    fn plain_names_are_trimmed() {
        let verifier = SnapcraftVerifier::new("http://base");
        assert_eq!(verifier.request_url("  firefox  "), "http://base/firefox");
    }
}
