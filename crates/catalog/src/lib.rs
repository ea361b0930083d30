#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Application catalog for pkgprobe
//!
//! The catalog is the static list of applications and their per-manager
//! package identifiers. This crate only loads, validates, and iterates
//! it; authoring the data is somebody else's job.

use pkgprobe_errors::{CatalogError, Error};
use pkgprobe_types::PackageManager;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One catalog application with its package targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogApp {
    pub id: String,
    pub name: String,
    /// Manager-specific package identifiers, exactly as the installation
    /// script generator would use them (cask prefixes, install flags and
    /// all). Not every app declares a target for every manager.
    #[serde(default)]
    pub packages: BTreeMap<PackageManager, String>,
}

impl CatalogApp {
    /// The declared package identifier for a manager, if any
    #[must_use]
    pub fn package_for(&self, manager: PackageManager) -> Option<&str> {
        self.packages.get(&manager).map(String::as_str)
    }
}

/// The application catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub applications: Vec<CatalogApp>,
}

impl Catalog {
    /// Parse a catalog from JSON content
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or validation fails.
    pub fn from_json(content: &str) -> Result<Self, Error> {
        let catalog: Self =
            serde_json::from_str(content).map_err(|e| CatalogError::ParseFailed {
                message: e.to_string(),
            })?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load and validate a catalog file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or invalid.
    pub async fn load(path: &Path) -> Result<Self, Error> {
        let content = tokio::fs::read_to_string(path).await.map_err(|_| {
            Error::from(CatalogError::FileNotFound {
                path: path.display().to_string(),
            })
        })?;
        Self::from_json(&content)
    }

    /// Validate structural invariants
    ///
    /// # Errors
    ///
    /// Returns an error on empty or duplicate application ids, or empty
    /// package identifiers.
    pub fn validate(&self) -> Result<(), Error> {
        let mut seen = std::collections::HashSet::new();
        for app in &self.applications {
            if app.id.trim().is_empty() {
                return Err(CatalogError::ValidationFailed {
                    message: format!("application {:?} has an empty id", app.name),
                }
                .into());
            }
            if !seen.insert(app.id.as_str()) {
                return Err(CatalogError::ValidationFailed {
                    message: format!("duplicate application id: {}", app.id),
                }
                .into());
            }
            for (manager, package) in &app.packages {
                if package.trim().is_empty() {
                    return Err(CatalogError::ValidationFailed {
                        message: format!("{}: empty {manager} package name", app.id),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Applications in declaration order
    pub fn apps(&self) -> impl Iterator<Item = &CatalogApp> {
        self.applications.iter()
    }

    /// Look up one application by id
    #[must_use]
    pub fn get(&self, app_id: &str) -> Option<&CatalogApp> {
        self.applications.iter().find(|app| app.id == app_id)
    }

    /// Total number of (application, manager) package targets
    #[must_use]
    pub fn target_count(&self) -> u64 {
        self.applications
            .iter()
            .map(|app| app.packages.len() as u64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "applications": [
            {
                "id": "firefox",
                "name": "Firefox",
                "packages": {
                    "homebrew": "--cask firefox",
                    "snap": "firefox",
                    "apt": "firefox"
                }
            },
            {
                "id": "vscode",
                "name": "Visual Studio Code",
                "packages": {
                    "winget": "Microsoft.VisualStudioCode",
                    "snap": "code --classic"
                }
            }
        ]
    }"#;

    #[test]
    fn parses_and_validates_sample() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.applications.len(), 2);
        assert_eq!(catalog.target_count(), 5);

        let firefox = catalog.get("firefox").unwrap();
        assert_eq!(
            firefox.package_for(PackageManager::Homebrew),
            Some("--cask firefox")
        );
        assert_eq!(firefox.package_for(PackageManager::Winget), None);
    }

    #[test]
    fn rejects_duplicate_app_ids() {
        let content = r#"{
            "applications": [
                {"id": "a", "name": "A", "packages": {}},
                {"id": "a", "name": "A again", "packages": {}}
            ]
        }"#;
        assert!(Catalog::from_json(content).is_err());
    }

    #[test]
    fn rejects_empty_package_names() {
        let content = r#"{
            "applications": [
                {"id": "a", "name": "A", "packages": {"apt": "  "}}
            ]
        }"#;
        assert!(Catalog::from_json(content).is_err());
    }

    #[tokio::test]
    async fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        tokio::fs::write(&path, SAMPLE).await.unwrap();

        let catalog = Catalog::load(&path).await.unwrap();
        assert_eq!(catalog.applications.len(), 2);

        let missing = Catalog::load(&dir.path().join("nope.json")).await;
        assert!(missing.is_err());
    }
}
