//! Verification results and batch summaries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::manager::PackageManager;
use crate::timestamp;

/// Outcome of a single package verification check
///
/// `Verified`, `Failed` and `Unverifiable` are terminal for a given check.
/// `Pending` is a placeholder default only; a completed check never
/// produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyStatus {
    Verified,
    Failed,
    Unverifiable,
    Pending,
}

impl VerifyStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Failed => "failed",
            Self::Unverifiable => "unverifiable",
            Self::Pending => "pending",
        }
    }
}

impl std::fmt::Display for VerifyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VerifyStatus {
    type Err = pkgprobe_errors::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verified" => Ok(Self::Verified),
            "failed" => Ok(Self::Failed),
            "unverifiable" => Ok(Self::Unverifiable),
            "pending" => Ok(Self::Pending),
            _ => Err(pkgprobe_errors::PackageError::InvalidStatus {
                value: s.to_string(),
            }
            .into()),
        }
    }
}

impl Default for VerifyStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// The central record: one completed check of one (application, manager)
/// pairing
///
/// History is append-only; "the latest" result for a pairing is the record
/// with the maximum timestamp. Field names follow the persisted document
/// format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// Catalog application id; empty on results fresh out of a verifier,
    /// stamped by the orchestrator before the result leaves the subsystem
    pub app_id: String,
    pub package_manager_id: PackageManager,
    /// Manager-specific package identifier as declared in the catalog,
    /// including any manager syntax (cask prefix, install flags)
    pub package_name: String,
    pub status: VerifyStatus,
    #[serde(with = "timestamp::wire")]
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Set only when this failed check regressed from a previously
    /// verified latest result; cleared by explicit administrative action,
    /// never automatically
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub manual_review_flag: bool,
}

impl VerificationResult {
    /// A verified result for a package name, with the app id left for the
    /// orchestrator to stamp
    #[must_use]
    pub fn verified(manager: PackageManager, package_name: impl Into<String>) -> Self {
        Self::new(manager, package_name, VerifyStatus::Verified, None)
    }

    /// A terminal failed result carrying a human-readable reason
    #[must_use]
    pub fn failed(
        manager: PackageManager,
        package_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(
            manager,
            package_name,
            VerifyStatus::Failed,
            Some(reason.into()),
        )
    }

    /// A result for a manager with no queryable registry
    #[must_use]
    pub fn unverifiable(manager: PackageManager, package_name: impl Into<String>) -> Self {
        Self::new(manager, package_name, VerifyStatus::Unverifiable, None)
    }

    /// Placeholder record; never produced by a completed check
    #[must_use]
    pub fn pending(manager: PackageManager, package_name: impl Into<String>) -> Self {
        Self::new(manager, package_name, VerifyStatus::Pending, None)
    }

    fn new(
        manager: PackageManager,
        package_name: impl Into<String>,
        status: VerifyStatus,
        error_message: Option<String>,
    ) -> Self {
        Self {
            app_id: String::new(),
            package_manager_id: manager,
            package_name: package_name.into(),
            status,
            timestamp: Utc::now(),
            error_message,
            manual_review_flag: false,
        }
    }
}

/// Aggregate over one batch sweep
///
/// `errors` counts pairings whose check raised even after retries. Those
/// produced no result at all, as opposed to `failed` which counts
/// definitive negative answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total: u64,
    pub verified: u64,
    pub failed: u64,
    pub errors: u64,
    pub unverifiable: u64,
}

impl VerificationSummary {
    /// Fold one completed result into the summary.
    pub fn record(&mut self, status: VerifyStatus) {
        self.total += 1;
        match status {
            VerifyStatus::Verified => self.verified += 1,
            VerifyStatus::Failed => self.failed += 1,
            VerifyStatus::Unverifiable => self.unverifiable += 1,
            // A completed check never reports pending; counted nowhere.
            VerifyStatus::Pending => {}
        }
    }

    /// Fold one unrecoverable check error into the summary.
    pub fn record_error(&mut self) {
        self.total += 1;
        self.errors += 1;
    }
}
