//! Persistence boundary for GeoLens.
//!
//! [`ProfileStore`] is the document-store seam the orchestrators write
//! through: user records, workspace records, and append-only audit
//! reports. [`PgStore`] is the Postgres implementation; [`MemoryStore`]
//! backs orchestrator tests and local runs without a database.

pub mod memory;
pub mod pg;

use geolens_core::{AuditResult, BrandProfile, ReportRecord, UserRecord, WorkspaceRecord};
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use pg::{connect_pool, connect_pool_from_env, PgStore, PoolConfig};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("workspace not found: {0}")]
    WorkspaceNotFound(Uuid),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// The document-store boundary.
///
/// Multi-write operations (`complete_onboarding`, `record_audit`) are
/// single logical transactions: both writes land or neither is considered
/// complete.
#[allow(async_fn_in_trait)] // static dispatch only; orchestrators are generic over the store
pub trait ProfileStore {
    /// Fetch a user document by auth-provider id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on read failure.
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Insert a new user document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on write failure.
    async fn create_user(&self, user: &UserRecord) -> Result<(), StoreError>;

    /// Create the workspace for a completed onboarding and mark the owner
    /// onboarded, atomically. Returns the new workspace id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UserNotFound`] for an unknown `user_id`;
    /// neither write survives in that case.
    async fn complete_onboarding(
        &self,
        user_id: &str,
        profile: &BrandProfile,
    ) -> Result<Uuid, StoreError>;

    /// Fetch a workspace document by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on read failure.
    async fn get_workspace(&self, workspace_id: Uuid)
        -> Result<Option<WorkspaceRecord>, StoreError>;

    /// Fetch the most recently created workspace owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on read failure.
    async fn workspace_for_user(&self, user_id: &str)
        -> Result<Option<WorkspaceRecord>, StoreError>;

    /// Append an audit report and update the owning workspace's
    /// `last_report_id`/`last_audit_date`, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::WorkspaceNotFound`] for an unknown workspace;
    /// no report row survives in that case.
    async fn record_audit(
        &self,
        workspace_id: Uuid,
        user_id: &str,
        url: &str,
        result: &AuditResult,
    ) -> Result<ReportRecord, StoreError>;

    /// List a workspace's reports, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on read failure.
    async fn list_reports(&self, workspace_id: Uuid) -> Result<Vec<ReportRecord>, StoreError>;
}
