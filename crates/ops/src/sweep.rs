//! Full-catalog batch sweep

use std::time::Duration;

use pkgprobe_errors::Result;
use pkgprobe_events::{AppEvent, EventEmitter, SweepEvent};
use pkgprobe_types::VerificationSummary;
use pkgprobe_verify::VerifierRegistry;

use crate::context::OpsCtx;
use crate::verify::{verify_package, VerifyOptions};

/// Options for a batch sweep
#[derive(Debug, Clone, Default)]
pub struct SweepOptions {
    /// Override the configured pacing delay between outbound requests
    pub pacing_delay: Option<Duration>,
    /// Options passed through to every single verification
    pub verify: VerifyOptions,
}

/// Verify every declared package target in the catalog
///
/// Strictly sequential: one pairing fully completes, retries included,
/// before the next begins, and a fixed pacing delay separates successive
/// network-bound requests. Unverifiable managers never touch the network
/// and are not paced. One pairing's unrecoverable error is counted and
/// swept past; it never aborts the run.
///
/// # Errors
///
/// Returns an error only when the context has no catalog; per-item
/// failures end up in the summary's `errors` count instead.
pub async fn verify_all(ctx: &OpsCtx, options: &SweepOptions) -> Result<VerificationSummary> {
    let catalog = ctx.catalog()?;
    let pacing = options
        .pacing_delay
        .unwrap_or_else(|| Duration::from_millis(ctx.config.sweep.pacing_delay_ms));

    ctx.emit(AppEvent::Sweep(SweepEvent::Started {
        apps: catalog.applications.len() as u64,
    }));

    let mut summary = VerificationSummary::default();
    let mut paced_call_behind = false;

    for app in catalog.apps() {
        for (manager, package_name) in &app.packages {
            let network_bound = VerifierRegistry::is_verifiable(*manager);
            if network_bound && paced_call_behind {
                tokio::time::sleep(pacing).await;
            }

            match verify_package(ctx, &app.id, *manager, package_name, &options.verify).await {
                Ok(result) => summary.record(result.status),
                Err(e) => {
                    summary.record_error();
                    ctx.emit(AppEvent::Sweep(SweepEvent::ItemErrored {
                        app_id: app.id.clone(),
                        manager: *manager,
                        message: e.to_string(),
                    }));
                }
            }

            if network_bound {
                paced_call_behind = true;
            }
        }
    }

    ctx.emit(AppEvent::Sweep(SweepEvent::Completed { summary }));
    Ok(summary)
}
