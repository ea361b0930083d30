//! Administrative operations on flagged results
//!
//! These back the admin review routes: listing the review queue and
//! acknowledging a regression by clearing its flag. Clearing is an
//! explicit human action; the subsystem never unsets a flag on its own.

use pkgprobe_errors::Result;
use pkgprobe_state::FlaggedSort;
use pkgprobe_types::{PackageManager, VerificationResult};

use crate::context::OpsCtx;

/// List results flagged for manual review
///
/// # Errors
///
/// Returns an error if the store query fails.
pub async fn list_flagged(
    ctx: &OpsCtx,
    manager: Option<PackageManager>,
    sort: FlaggedSort,
) -> Result<Vec<VerificationResult>> {
    ctx.store.flagged(manager, sort).await
}

/// Clear the review flag on the latest record for a pairing
///
/// Returns `true` when a flagged record was actually cleared.
///
/// # Errors
///
/// Returns an error if the store update fails.
pub async fn clear_review_flag(
    ctx: &OpsCtx,
    app_id: &str,
    manager: PackageManager,
) -> Result<bool> {
    ctx.store.clear_review_flag(app_id, manager).await
}
