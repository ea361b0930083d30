//! Chocolatey community repository verification
//!
//! Chocolatey's registry speaks OData: existence is answered by a filter
//! query rather than a per-package path, and a 200 with an empty result
//! set means the package does not exist. Single quotes in the package id
//! must be doubled to stay inside the filter literal.

use pkgprobe_errors::{NetworkError, Result};
use pkgprobe_net::NetClient;
use pkgprobe_types::{PackageManager, VerificationResult};

use crate::response::{classify_failure, NOT_FOUND_MESSAGE};

#[derive(Debug, Clone)]
pub struct ChocolateyVerifier {
    base_url: String,
}

impl ChocolateyVerifier {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Double every single quote so it stays inside the OData literal
    #[must_use]
    pub fn escape_odata_literal(name: &str) -> String {
        name.replace('\'', "''")
    }

    /// Query URL for a package name; pure function of the input
    #[must_use]
    pub fn request_url(&self, package_name: &str) -> String {
        let escaped = Self::escape_odata_literal(package_name.trim());
        format!("{}?$filter=Id eq '{escaped}'", self.base_url)
    }

    /// Check whether at least one package record matches the id
    ///
    /// # Errors
    ///
    /// Raises a network error for transient conditions; definitive
    /// answers (including an empty result set) come back as results.
    pub async fn verify(
        &self,
        client: &NetClient,
        package_name: &str,
    ) -> Result<VerificationResult> {
        let url = self.request_url(package_name);
        let response = client.get(&url).await?;

        if !response.status().is_success() {
            return classify_failure(PackageManager::Chocolatey, package_name, &response);
        }

        let body = response
            .text()
            .await
            .map_err(|e| NetworkError::RequestFailed(e.to_string()))?;

        // The OData Atom feed carries one <entry> per matching record
        if body.contains("<entry") {
            Ok(VerificationResult::verified(
                PackageManager::Chocolatey,
                package_name,
            ))
        } else {
            Ok(VerificationResult::failed(
                PackageManager::Chocolatey,
                package_name,
                NOT_FOUND_MESSAGE,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_odata_filter_query() {
        let verifier = ChocolateyVerifier::new("https://community.chocolatey.org/api/v2/Packages()");
        assert_eq!(
            verifier.request_url("git"),
            "https://community.chocolatey.org/api/v2/Packages()?$filter=Id eq 'git'"
        );
    }

    #[test]
    fn quotes_are_doubled_at_escaped_positions() {
        let verifier = ChocolateyVerifier::new("http://base");
        assert_eq!(
            verifier.request_url("o'reilly's"),
            "http://base?$filter=Id eq 'o''reilly''s'"
        );
    }

    #[test]
    fn n_quotes_become_2n_quotes() {
        for n in 0..5 {
            let name: String = std::iter::repeat_n('\'', n).collect();
            let escaped = ChocolateyVerifier::escape_odata_literal(&name);
            assert_eq!(escaped.chars().filter(|c| *c == '\'').count(), 2 * n);
        }
    }
}
