//! Single-package verification orchestration

use pkgprobe_errors::{OpsError, Result};
use pkgprobe_events::{AppEvent, EventEmitter, VerifyEvent};
use pkgprobe_net::{execute_with_retry, RetryPolicy};
use pkgprobe_types::{PackageManager, VerificationResult, VerifyStatus};

use crate::context::OpsCtx;

/// Options for a single verification call
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    /// Persist the result to the store (on by default)
    pub persist: bool,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self { persist: true }
    }
}

/// Verify one (application, manager, package) pairing
///
/// Unverifiable managers short-circuit to a synthesized result without
/// touching the network. For verifiable managers the matched verifier
/// runs through the retry executor; a retry-exhausted transient error
/// propagates as `Err` rather than being converted into a failed result,
/// preserving the distinction between "definitive negative answer" and
/// "could not get an answer".
///
/// # Errors
///
/// Returns an error when retries are exhausted on a transient condition.
pub async fn verify_package(
    ctx: &OpsCtx,
    app_id: &str,
    manager: PackageManager,
    package_name: &str,
    options: &VerifyOptions,
) -> Result<VerificationResult> {
    ctx.emit(AppEvent::Verify(VerifyEvent::Started {
        app_id: app_id.to_string(),
        manager,
        package_name: package_name.to_string(),
    }));

    let Some(verifier) = ctx.registry.get(manager) else {
        // No registry API: no network call, no retry, no regression check
        let mut result = VerificationResult::unverifiable(manager, package_name);
        result.app_id = app_id.to_string();
        persist(ctx, &result, options).await;
        ctx.emit(AppEvent::Verify(VerifyEvent::Completed {
            app_id: app_id.to_string(),
            manager,
            status: result.status,
        }));
        return Ok(result);
    };

    let policy = RetryPolicy::from_config(&ctx.config.retry);
    let mut result =
        execute_with_retry(&policy, || verifier.verify(&ctx.client, package_name)).await?;

    // Verifiers cannot know the catalog identity; stamp it here
    result.app_id = app_id.to_string();

    if result.status == VerifyStatus::Failed {
        flag_regression(ctx, &mut result).await;
    }

    persist(ctx, &result, options).await;

    ctx.emit(AppEvent::Verify(VerifyEvent::Completed {
        app_id: app_id.to_string(),
        manager,
        status: result.status,
    }));

    Ok(result)
}

/// Verify an application's declared target for one manager, resolving
/// the package name from the catalog
///
/// # Errors
///
/// Returns an error for unknown applications, applications without a
/// target for the manager, or a retry-exhausted verification.
pub async fn verify_app_target(
    ctx: &OpsCtx,
    app_id: &str,
    manager: PackageManager,
    options: &VerifyOptions,
) -> Result<VerificationResult> {
    let catalog = ctx.catalog()?;
    let app = catalog.get(app_id).ok_or_else(|| OpsError::UnknownApp {
        app_id: app_id.to_string(),
    })?;
    let package_name = app
        .package_for(manager)
        .ok_or_else(|| OpsError::NoPackageTarget {
            app_id: app_id.to_string(),
            manager: manager.to_string(),
        })?
        .to_string();

    verify_package(ctx, app_id, manager, &package_name, options).await
}

/// Mark a verified-to-failed transition for manual review.
///
/// The read-latest / decide / append sequence is not atomic against a
/// concurrent verification of the same pairing from another entry point;
/// the flag is a best-effort signal (the batch sweeper itself is
/// strictly sequential). A store read failure is treated as "no previous
/// record".
async fn flag_regression(ctx: &OpsCtx, result: &mut VerificationResult) {
    let previous = match ctx
        .store
        .latest(&result.app_id, result.package_manager_id)
        .await
    {
        Ok(previous) => previous,
        Err(e) => {
            ctx.emit_warning(format!(
                "could not read previous result for {}/{}: {e}",
                result.app_id, result.package_manager_id
            ));
            None
        }
    };

    if previous.is_some_and(|p| p.status == VerifyStatus::Verified) {
        result.manual_review_flag = true;
        ctx.emit(AppEvent::Verify(VerifyEvent::RegressionFlagged {
            app_id: result.app_id.clone(),
            manager: result.package_manager_id,
        }));
    }
}

/// Append the result to the store; a persistence outage must not mask a
/// completed verification, so failures are reported and swallowed.
async fn persist(ctx: &OpsCtx, result: &VerificationResult, options: &VerifyOptions) {
    if !options.persist {
        return;
    }
    if let Err(e) = ctx.store.append(result).await {
        ctx.emit(AppEvent::Verify(VerifyEvent::StoreFailed {
            app_id: result.app_id.clone(),
            manager: result.package_manager_id,
            message: e.to_string(),
        }));
    }
}
