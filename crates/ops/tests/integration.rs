//! Integration tests for the verification orchestrator and batch sweeper

use chrono::{Duration as ChronoDuration, Utc};
use httpmock::prelude::*;
use pkgprobe_catalog::Catalog;
use pkgprobe_config::Config;
use pkgprobe_errors::{Error, NetworkError};
use pkgprobe_net::NetClient;
use pkgprobe_ops::{
    clear_review_flag, list_flagged, verify_all, verify_package, OpsContextBuilder, OpsCtx,
    SweepOptions, VerifyOptions,
};
use pkgprobe_state::{FlaggedSort, VerificationStore};
use pkgprobe_types::{PackageManager, VerificationResult, VerifyStatus};
use pkgprobe_verify::VerifierRegistry;
use tempfile::TempDir;

/// Context wired to a mock registry server, with fast retries
async fn mock_ctx(server: &MockServer, dir: &TempDir) -> OpsCtx {
    mock_ctx_with_catalog(server, dir, None).await
}

async fn mock_ctx_with_catalog(
    server: &MockServer,
    dir: &TempDir,
    catalog: Option<Catalog>,
) -> OpsCtx {
    let mut config = Config::default();
    config.registries.homebrew_base = server.base_url();
    config.registries.chocolatey_base = format!("{}/choco", server.base_url());
    config.registries.winget_base = format!("{}/winget", server.base_url());
    config.registries.flathub_base = format!("{}/flathub", server.base_url());
    config.registries.snapcraft_base = format!("{}/snap", server.base_url());
    config.retry.max_retries = 2;
    config.retry.base_delay_ms = 1;
    config.sweep.pacing_delay_ms = 1;

    let store = VerificationStore::new(&dir.path().join("results.sqlite"))
        .await
        .unwrap();
    let (tx, _rx) = pkgprobe_events::channel();

    let mut builder = OpsContextBuilder::new()
        .with_registry(VerifierRegistry::new(&config.registries))
        .with_client(NetClient::with_defaults().unwrap())
        .with_store(store)
        .with_event_sender(tx)
        .with_config(config);
    if let Some(catalog) = catalog {
        builder = builder.with_catalog(catalog);
    }
    builder.build().unwrap()
}

fn verified_earlier(app_id: &str, manager: PackageManager, name: &str) -> VerificationResult {
    let mut result = VerificationResult::verified(manager, name);
    result.app_id = app_id.to_string();
    result.timestamp = Utc::now() - ChronoDuration::minutes(10);
    result
}

#[tokio::test]
async fn unverifiable_manager_short_circuits_without_network() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.path_contains("/");
        then.status(200);
    });
    let dir = TempDir::new().unwrap();
    let ctx = mock_ctx(&server, &dir).await;

    let result = verify_package(
        &ctx,
        "htop-app",
        PackageManager::Apt,
        "htop",
        &VerifyOptions::default(),
    )
    .await
    .unwrap();

    mock.assert_hits(0);
    assert_eq!(result.status, VerifyStatus::Unverifiable);
    assert_eq!(result.app_id, "htop-app");
    assert!(result.error_message.is_none());
    assert!(!result.manual_review_flag);
}

#[tokio::test]
async fn app_id_is_stamped_and_result_persisted() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/formula/wget.json");
        then.status(200).body("{}");
    });
    let dir = TempDir::new().unwrap();
    let ctx = mock_ctx(&server, &dir).await;

    let result = verify_package(
        &ctx,
        "wget-app",
        PackageManager::Homebrew,
        "wget",
        &VerifyOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(result.status, VerifyStatus::Verified);
    assert_eq!(result.app_id, "wget-app");

    let stored = ctx
        .store
        .latest("wget-app", PackageManager::Homebrew)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, VerifyStatus::Verified);
    assert_eq!(stored.package_name, "wget");
}

#[tokio::test]
async fn persistence_can_be_disabled_per_call() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/formula/wget.json");
        then.status(200).body("{}");
    });
    let dir = TempDir::new().unwrap();
    let ctx = mock_ctx(&server, &dir).await;

    verify_package(
        &ctx,
        "wget-app",
        PackageManager::Homebrew,
        "wget",
        &VerifyOptions { persist: false },
    )
    .await
    .unwrap();

    assert!(ctx
        .store
        .latest("wget-app", PackageManager::Homebrew)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn a_404_consumes_exactly_one_attempt() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/formula/ghost.json");
        then.status(404);
    });
    let dir = TempDir::new().unwrap();
    let ctx = mock_ctx(&server, &dir).await;

    let result = verify_package(
        &ctx,
        "ghost-app",
        PackageManager::Homebrew,
        "ghost",
        &VerifyOptions::default(),
    )
    .await
    .unwrap();

    mock.assert_hits(1);
    assert_eq!(result.status, VerifyStatus::Failed);
    assert!(result.error_message.unwrap().contains("not found"));
}

#[tokio::test]
async fn exhausted_5xx_retries_raise_instead_of_returning_a_result() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/formula/flaky.json");
        then.status(500);
    });
    let dir = TempDir::new().unwrap();
    let ctx = mock_ctx(&server, &dir).await;

    let err = verify_package(
        &ctx,
        "flaky-app",
        PackageManager::Homebrew,
        "flaky",
        &VerifyOptions::default(),
    )
    .await
    .unwrap_err();

    // Initial attempt plus two retries
    mock.assert_hits(3);
    assert!(matches!(
        err,
        Error::Network(NetworkError::Server { status: 500, .. })
    ));

    // Nothing was persisted for the pairing
    assert!(ctx
        .store
        .latest("flaky-app", PackageManager::Homebrew)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn exhausted_rate_limit_raises_with_server_delay() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/formula/busy.json");
        then.status(429).header("Retry-After", "0");
    });
    let dir = TempDir::new().unwrap();
    let ctx = mock_ctx(&server, &dir).await;

    let err = verify_package(
        &ctx,
        "busy-app",
        PackageManager::Homebrew,
        "busy",
        &VerifyOptions::default(),
    )
    .await
    .unwrap_err();

    mock.assert_hits(3);
    assert!(matches!(
        err,
        Error::Network(NetworkError::RateLimited { .. })
    ));
}

#[tokio::test]
async fn verified_to_failed_regression_sets_the_review_flag() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/formula/wget.json");
        then.status(404);
    });
    let dir = TempDir::new().unwrap();
    let ctx = mock_ctx(&server, &dir).await;

    ctx.store
        .append(&verified_earlier(
            "wget-app",
            PackageManager::Homebrew,
            "wget",
        ))
        .await
        .unwrap();

    let result = verify_package(
        &ctx,
        "wget-app",
        PackageManager::Homebrew,
        "wget",
        &VerifyOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(result.status, VerifyStatus::Failed);
    assert!(result.manual_review_flag);

    // The flagged record is the stored latest
    let stored = ctx
        .store
        .latest("wget-app", PackageManager::Homebrew)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.manual_review_flag);
}

#[tokio::test]
async fn no_prior_record_leaves_the_flag_unset() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/formula/ghost.json");
        then.status(404);
    });
    let dir = TempDir::new().unwrap();
    let ctx = mock_ctx(&server, &dir).await;

    let result = verify_package(
        &ctx,
        "ghost-app",
        PackageManager::Homebrew,
        "ghost",
        &VerifyOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(result.status, VerifyStatus::Failed);
    assert!(!result.manual_review_flag);
}

#[tokio::test]
async fn prior_failed_result_leaves_the_flag_unset() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/formula/gone.json");
        then.status(404);
    });
    let dir = TempDir::new().unwrap();
    let ctx = mock_ctx(&server, &dir).await;

    let mut previous = VerificationResult::failed(
        PackageManager::Homebrew,
        "gone",
        "Package not found",
    );
    previous.app_id = "gone-app".to_string();
    previous.timestamp = Utc::now() - ChronoDuration::minutes(10);
    ctx.store.append(&previous).await.unwrap();

    let result = verify_package(
        &ctx,
        "gone-app",
        PackageManager::Homebrew,
        "gone",
        &VerifyOptions::default(),
    )
    .await
    .unwrap();

    assert!(!result.manual_review_flag);
}

#[tokio::test]
async fn flag_clearing_is_an_explicit_administrative_action() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/formula/wget.json");
        then.status(404);
    });
    let dir = TempDir::new().unwrap();
    let ctx = mock_ctx(&server, &dir).await;

    ctx.store
        .append(&verified_earlier(
            "wget-app",
            PackageManager::Homebrew,
            "wget",
        ))
        .await
        .unwrap();
    verify_package(
        &ctx,
        "wget-app",
        PackageManager::Homebrew,
        "wget",
        &VerifyOptions::default(),
    )
    .await
    .unwrap();

    let flagged = list_flagged(&ctx, None, FlaggedSort::Timestamp).await.unwrap();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].app_id, "wget-app");

    assert!(clear_review_flag(&ctx, "wget-app", PackageManager::Homebrew)
        .await
        .unwrap());
    assert!(list_flagged(&ctx, None, FlaggedSort::Timestamp)
        .await
        .unwrap()
        .is_empty());
}

fn sweep_catalog() -> Catalog {
    Catalog::from_json(
        r#"{
        "applications": [
            {"id": "good", "name": "Good", "packages": {"homebrew": "good"}},
            {"id": "broken", "name": "Broken", "packages": {"homebrew": "broken"}},
            {"id": "gone", "name": "Gone", "packages": {"homebrew": "gone"}},
            {"id": "local", "name": "Local", "packages": {"apt": "local"}}
        ]
    }"#,
    )
    .unwrap()
}

#[tokio::test]
async fn sweep_counts_statuses_and_survives_item_errors() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/formula/good.json");
        then.status(200).body("{}");
    });
    server.mock(|when, then| {
        when.method(GET).path("/formula/gone.json");
        then.status(404);
    });
    let broken = server.mock(|when, then| {
        when.method(GET).path("/formula/broken.json");
        then.status(503);
    });

    let dir = TempDir::new().unwrap();
    let ctx = mock_ctx_with_catalog(&server, &dir, Some(sweep_catalog())).await;

    let summary = verify_all(&ctx, &SweepOptions::default()).await.unwrap();

    assert_eq!(summary.total, 4);
    assert_eq!(summary.verified, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.unverifiable, 1);
    assert_eq!(summary.errors, 1);

    // The erroring item used all of its attempts without stopping the
    // sweep: items after it were still processed
    broken.assert_hits(3);
    assert!(ctx
        .store
        .latest("gone", PackageManager::Homebrew)
        .await
        .unwrap()
        .is_some());
    assert!(ctx
        .store
        .latest("local", PackageManager::Apt)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn app_targets_resolve_from_the_catalog() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/formula/good.json");
        then.status(200).body("{}");
    });
    let dir = TempDir::new().unwrap();
    let ctx = mock_ctx_with_catalog(&server, &dir, Some(sweep_catalog())).await;

    let result = pkgprobe_ops::verify_app_target(
        &ctx,
        "good",
        PackageManager::Homebrew,
        &VerifyOptions::default(),
    )
    .await
    .unwrap();
    assert_eq!(result.status, VerifyStatus::Verified);

    let unknown = pkgprobe_ops::verify_app_target(
        &ctx,
        "nope",
        PackageManager::Homebrew,
        &VerifyOptions::default(),
    )
    .await;
    assert!(unknown.is_err());

    let no_target = pkgprobe_ops::verify_app_target(
        &ctx,
        "good",
        PackageManager::Snap,
        &VerifyOptions::default(),
    )
    .await;
    assert!(no_target.is_err());
}

#[tokio::test]
async fn sweep_without_catalog_is_a_missing_component() {
    let server = MockServer::start();
    let dir = TempDir::new().unwrap();
    let ctx = mock_ctx(&server, &dir).await;

    assert!(verify_all(&ctx, &SweepOptions::default()).await.is_err());
}
