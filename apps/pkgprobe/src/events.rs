//! Event rendering through the tracing infrastructure
//!
//! Library crates emit events; this task drains the channel and turns
//! each event into a structured log record at the appropriate level.

use pkgprobe_events::{AppEvent, EventReceiver, GeneralEvent, SweepEvent, VerifyEvent};
use tracing::{debug, error, info, warn};

/// Drain events until every sender is dropped
pub async fn drain_events(mut rx: EventReceiver) {
    while let Some(event) = rx.recv().await {
        log_event(&event);
    }
}

fn log_event(event: &AppEvent) {
    match event {
        AppEvent::Verify(verify_event) => match verify_event {
            VerifyEvent::Started {
                app_id,
                manager,
                package_name,
            } => {
                debug!(
                    app_id = %app_id,
                    manager = %manager,
                    package = %package_name,
                    "Verification started"
                );
            }
            VerifyEvent::Completed {
                app_id,
                manager,
                status,
            } => {
                info!(
                    app_id = %app_id,
                    manager = %manager,
                    status = %status,
                    "Verification completed"
                );
            }
            VerifyEvent::RegressionFlagged { app_id, manager } => {
                warn!(
                    app_id = %app_id,
                    manager = %manager,
                    "Package regressed from verified to failed; flagged for review"
                );
            }
            VerifyEvent::StoreFailed {
                app_id,
                manager,
                message,
            } => {
                warn!(
                    app_id = %app_id,
                    manager = %manager,
                    message = %message,
                    "Result could not be persisted"
                );
            }
        },
        AppEvent::Sweep(sweep_event) => match sweep_event {
            SweepEvent::Started { apps } => {
                info!(apps = apps, "Catalog sweep started");
            }
            SweepEvent::ItemErrored {
                app_id,
                manager,
                message,
            } => {
                warn!(
                    app_id = %app_id,
                    manager = %manager,
                    message = %message,
                    "Check raised after retries; continuing sweep"
                );
            }
            SweepEvent::Completed { summary } => {
                info!(
                    total = summary.total,
                    verified = summary.verified,
                    failed = summary.failed,
                    errors = summary.errors,
                    unverifiable = summary.unverifiable,
                    "Catalog sweep completed"
                );
            }
        },
        AppEvent::General(general_event) => match general_event {
            GeneralEvent::Debug { message } => debug!("{message}"),
            GeneralEvent::Warning { message } => warn!("{message}"),
            GeneralEvent::Error { message } => error!("{message}"),
        },
    }
}
