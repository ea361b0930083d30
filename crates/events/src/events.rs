//! Domain-grouped event definitions

use pkgprobe_types::{PackageManager, VerificationSummary, VerifyStatus};
use serde::{Deserialize, Serialize};

/// Top-level event type, grouped by functional domain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum AppEvent {
    Verify(VerifyEvent),
    Sweep(SweepEvent),
    General(GeneralEvent),
}

/// Events from single-package verification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VerifyEvent {
    Started {
        app_id: String,
        manager: PackageManager,
        package_name: String,
    },
    Completed {
        app_id: String,
        manager: PackageManager,
        status: VerifyStatus,
    },
    /// A previously verified pairing came back failed and was flagged for
    /// human review
    RegressionFlagged {
        app_id: String,
        manager: PackageManager,
    },
    /// The result could not be persisted; verification itself succeeded
    StoreFailed {
        app_id: String,
        manager: PackageManager,
        message: String,
    },
}

/// Events from a full catalog sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SweepEvent {
    Started {
        apps: u64,
    },
    /// One pairing raised an unrecoverable error; the sweep continues
    ItemErrored {
        app_id: String,
        manager: PackageManager,
        message: String,
    },
    Completed {
        summary: VerificationSummary,
    },
}

/// General-purpose log-style events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeneralEvent {
    Debug { message: String },
    Warning { message: String },
    Error { message: String },
}
