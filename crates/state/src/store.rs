//! Verification store implementation

use crate::queries;
use crate::FlaggedSort;
use pkgprobe_errors::{Error, Result};
use pkgprobe_types::{PackageManager, VerificationResult};
use sqlx::{Pool, Sqlite};
use std::path::Path;

/// Append-only store of verification results
#[derive(Clone)]
pub struct VerificationStore {
    pool: Pool<Sqlite>,
}

impl VerificationStore {
    /// Open (or create) the store at a database path and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation, the database connection,
    /// or migrations fail.
    pub async fn new(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(Error::from)?;
        }

        let pool = crate::create_pool(db_path).await?;
        crate::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a store over an existing pool (migrations already applied)
    #[must_use]
    pub fn with_pool(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Append one completed result; returns the storage-assigned row id
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn append(&self, result: &VerificationResult) -> Result<i64> {
        queries::append_result(&self.pool, result).await
    }

    /// The most recent result for an (application, manager) pairing
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt.
    pub async fn latest(
        &self,
        app_id: &str,
        manager: PackageManager,
    ) -> Result<Option<VerificationResult>> {
        queries::latest_result(&self.pool, app_id, manager).await
    }

    /// History for a pairing, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt.
    pub async fn history(
        &self,
        app_id: &str,
        manager: PackageManager,
        limit: u32,
    ) -> Result<Vec<VerificationResult>> {
        queries::history(&self.pool, app_id, manager, limit).await
    }

    /// Results flagged for manual review, optionally filtered by manager
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt.
    pub async fn flagged(
        &self,
        manager: Option<PackageManager>,
        sort: FlaggedSort,
    ) -> Result<Vec<VerificationResult>> {
        queries::flagged_results(&self.pool, manager, sort).await
    }

    /// Clear the review flag on the latest record for a pairing
    ///
    /// Administrative acknowledgement of a flagged regression; returns
    /// `true` when a flagged record was actually cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn clear_review_flag(
        &self,
        app_id: &str,
        manager: PackageManager,
    ) -> Result<bool> {
        queries::clear_review_flag(&self.pool, app_id, manager).await
    }
}
