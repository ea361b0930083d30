//! Runtime SQL queries for the verification result store

use pkgprobe_errors::Result;
use pkgprobe_types::{format_timestamp, normalize_timestamp, PackageManager, VerificationResult};
use sqlx::sqlite::SqliteRow;
use sqlx::{query, Pool, Row, Sqlite};
use std::str::FromStr;

/// Sort order for the review queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlaggedSort {
    /// Newest first
    #[default]
    Timestamp,
    /// By application id, newest first within an application
    App,
}

fn row_to_result(row: &SqliteRow) -> Result<VerificationResult> {
    let manager: String = row.get("package_manager_id");
    let status: String = row.get("status");
    let timestamp: String = row.get("timestamp");
    let flag: i64 = row.get("manual_review_flag");

    Ok(VerificationResult {
        app_id: row.get("app_id"),
        package_manager_id: PackageManager::from_str(&manager)?,
        package_name: row.get("package_name"),
        status: status.parse()?,
        timestamp: normalize_timestamp(&timestamp),
        error_message: row.get("error_message"),
        manual_review_flag: flag != 0,
    })
}

/// Append one result row; returns the storage-assigned row id
pub(crate) async fn append_result(
    pool: &Pool<Sqlite>,
    result: &VerificationResult,
) -> Result<i64> {
    let inserted = query(
        "INSERT INTO verification_results
         (app_id, package_manager_id, package_name, status, timestamp, error_message, manual_review_flag)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(&result.app_id)
    .bind(result.package_manager_id.as_str())
    .bind(&result.package_name)
    .bind(result.status.as_str())
    .bind(format_timestamp(&result.timestamp))
    .bind(result.error_message.as_deref())
    .bind(i64::from(result.manual_review_flag))
    .execute(pool)
    .await?;

    Ok(inserted.last_insert_rowid())
}

/// The most recent result for an (application, manager) pairing
pub(crate) async fn latest_result(
    pool: &Pool<Sqlite>,
    app_id: &str,
    manager: PackageManager,
) -> Result<Option<VerificationResult>> {
    let row = query(
        "SELECT app_id, package_manager_id, package_name, status, timestamp, error_message, manual_review_flag
         FROM verification_results
         WHERE app_id = ?1 AND package_manager_id = ?2
         ORDER BY timestamp DESC, id DESC
         LIMIT 1",
    )
    .bind(app_id)
    .bind(manager.as_str())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(row_to_result).transpose()
}

/// Full history for a pairing, newest first
pub(crate) async fn history(
    pool: &Pool<Sqlite>,
    app_id: &str,
    manager: PackageManager,
    limit: u32,
) -> Result<Vec<VerificationResult>> {
    let rows = query(
        "SELECT app_id, package_manager_id, package_name, status, timestamp, error_message, manual_review_flag
         FROM verification_results
         WHERE app_id = ?1 AND package_manager_id = ?2
         ORDER BY timestamp DESC, id DESC
         LIMIT ?3",
    )
    .bind(app_id)
    .bind(manager.as_str())
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_result).collect()
}

/// Results currently flagged for manual review
pub(crate) async fn flagged_results(
    pool: &Pool<Sqlite>,
    manager: Option<PackageManager>,
    sort: FlaggedSort,
) -> Result<Vec<VerificationResult>> {
    let order = match sort {
        FlaggedSort::Timestamp => "timestamp DESC, id DESC",
        FlaggedSort::App => "app_id ASC, timestamp DESC, id DESC",
    };
    let sql = format!(
        "SELECT app_id, package_manager_id, package_name, status, timestamp, error_message, manual_review_flag
         FROM verification_results
         WHERE manual_review_flag = 1 AND (?1 IS NULL OR package_manager_id = ?1)
         ORDER BY {order}"
    );

    let rows = query(&sql)
        .bind(manager.map(|m| m.as_str()))
        .fetch_all(pool)
        .await?;

    rows.iter().map(row_to_result).collect()
}

/// Clear the review flag on the latest record for a pairing
///
/// Returns `true` when a flagged record was cleared. This is the only
/// non-append mutation in the store.
pub(crate) async fn clear_review_flag(
    pool: &Pool<Sqlite>,
    app_id: &str,
    manager: PackageManager,
) -> Result<bool> {
    let updated = query(
        "UPDATE verification_results
         SET manual_review_flag = 0
         WHERE manual_review_flag = 1
           AND id = (
               SELECT id FROM verification_results
               WHERE app_id = ?1 AND package_manager_id = ?2
               ORDER BY timestamp DESC, id DESC
               LIMIT 1
           )",
    )
    .bind(app_id)
    .bind(manager.as_str())
    .execute(pool)
    .await?;

    Ok(updated.rows_affected() > 0)
}
