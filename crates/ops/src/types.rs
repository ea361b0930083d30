//! Operation result types for CLI output

use pkgprobe_errors::{Error, OpsError};
use pkgprobe_types::{PackageManager, VerificationResult, VerificationSummary};

/// Operation result that can be serialized for CLI output
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type", content = "data")]
pub enum OperationResult {
    /// One completed verification
    Verification(VerificationResult),
    /// Aggregate of a full catalog sweep
    Sweep(VerificationSummary),
    /// Review queue listing
    FlaggedList(Vec<VerificationResult>),
    /// Outcome of a flag-clearing acknowledgement
    FlagCleared {
        app_id: String,
        manager: PackageManager,
        cleared: bool,
    },
    /// Catalog inspection report
    CatalogReport { applications: u64, targets: u64 },
    /// Generic success message
    Success(String),
}

impl OperationResult {
    /// Convert to JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| {
            OpsError::SerializationError {
                message: e.to_string(),
            }
            .into()
        })
    }
}
