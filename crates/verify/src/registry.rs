//! Verifier registry and the verifiable/unverifiable partition

use std::collections::HashMap;

use pkgprobe_config::RegistryConfig;
use pkgprobe_errors::Result;
use pkgprobe_net::NetClient;
use pkgprobe_types::{PackageManager, VerificationResult};

use crate::{
    ChocolateyVerifier, FlathubVerifier, HomebrewVerifier, SnapcraftVerifier, WingetVerifier,
};

/// Closed set of verifier variants, one per API-backed manager
#[derive(Debug, Clone)]
pub enum Verifier {
    Homebrew(HomebrewVerifier),
    Chocolatey(ChocolateyVerifier),
    Winget(WingetVerifier),
    Flathub(FlathubVerifier),
    Snapcraft(SnapcraftVerifier),
}

impl Verifier {
    /// Verify a raw package identifier against the remote registry
    ///
    /// # Errors
    ///
    /// Raises a network error for transient conditions; definitive
    /// answers come back as results with an empty `app_id`.
    pub async fn verify(
        &self,
        client: &NetClient,
        package_name: &str,
    ) -> Result<VerificationResult> {
        match self {
            Self::Homebrew(v) => v.verify(client, package_name).await,
            Self::Chocolatey(v) => v.verify(client, package_name).await,
            Self::Winget(v) => v.verify(client, package_name).await,
            Self::Flathub(v) => v.verify(client, package_name).await,
            Self::Snapcraft(v) => v.verify(client, package_name).await,
        }
    }
}

/// Static lookup from package manager to verifier variant
///
/// Constructed once at service instantiation and injected into callers;
/// there is no module-level singleton and no dynamic registration.
#[derive(Debug, Clone)]
pub struct VerifierRegistry {
    verifiers: HashMap<PackageManager, Verifier>,
}

impl VerifierRegistry {
    /// Managers with a public, queryable registry API
    pub const VERIFIABLE: [PackageManager; 5] = [
        PackageManager::Homebrew,
        PackageManager::Chocolatey,
        PackageManager::Winget,
        PackageManager::Flatpak,
        PackageManager::Snap,
    ];

    /// Managers with no public query API; always reported unverifiable
    pub const UNVERIFIABLE: [PackageManager; 6] = [
        PackageManager::Apt,
        PackageManager::Dnf,
        PackageManager::Pacman,
        PackageManager::Zypper,
        PackageManager::Yum,
        PackageManager::Scoop,
    ];

    /// Build the registry from configured base URLs
    #[must_use]
    pub fn new(config: &RegistryConfig) -> Self {
        let mut verifiers = HashMap::new();
        verifiers.insert(
            PackageManager::Homebrew,
            Verifier::Homebrew(HomebrewVerifier::new(&config.homebrew_base)),
        );
        verifiers.insert(
            PackageManager::Chocolatey,
            Verifier::Chocolatey(ChocolateyVerifier::new(&config.chocolatey_base)),
        );
        verifiers.insert(
            PackageManager::Winget,
            Verifier::Winget(WingetVerifier::new(&config.winget_base)),
        );
        verifiers.insert(
            PackageManager::Flatpak,
            Verifier::Flathub(FlathubVerifier::new(&config.flathub_base)),
        );
        verifiers.insert(
            PackageManager::Snap,
            Verifier::Snapcraft(SnapcraftVerifier::new(&config.snapcraft_base)),
        );
        Self { verifiers }
    }

    /// Look up the verifier for a manager, if it has one
    #[must_use]
    pub fn get(&self, manager: PackageManager) -> Option<&Verifier> {
        self.verifiers.get(&manager)
    }

    /// Whether a manager has a queryable registry API
    #[must_use]
    pub fn is_verifiable(manager: PackageManager) -> bool {
        Self::VERIFIABLE.contains(&manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_covers_all_managers_exactly_once() {
        let mut covered: Vec<PackageManager> = VerifierRegistry::VERIFIABLE
            .iter()
            .chain(VerifierRegistry::UNVERIFIABLE.iter())
            .copied()
            .collect();
        covered.sort();
        let mut all = PackageManager::ALL.to_vec();
        all.sort();
        assert_eq!(covered, all);
    }

    #[test]
    fn registry_matches_the_partition() {
        let registry = VerifierRegistry::new(&RegistryConfig::default());
        for manager in VerifierRegistry::VERIFIABLE {
            assert!(registry.get(manager).is_some());
            assert!(VerifierRegistry::is_verifiable(manager));
        }
        for manager in VerifierRegistry::UNVERIFIABLE {
            assert!(registry.get(manager).is_none());
            assert!(!VerifierRegistry::is_verifiable(manager));
        }
    }
}
