//! Postgres implementation of the document store.

use std::{env, time::Duration};

use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use geolens_core::{
    AuditResult, BrandProfile, ReportRecord, UserRecord, WorkspaceRecord, REPORT_TYPE_GEO_AUDIT,
};

use crate::{ProfileStore, StoreError};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MIN_CONNECTIONS: u32 = 1;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;

// Path relative to crates/geolens-store/Cargo.toml; resolves to
// <workspace-root>/migrations/
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }
}

impl PoolConfig {
    #[must_use]
    pub fn from_app_config(config: &geolens_core::AppConfig) -> Self {
        Self {
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
            acquire_timeout_secs: config.db_acquire_timeout_secs,
        }
    }
}

/// Connect to a Postgres pool using explicit URL and config.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the connection cannot be established.
pub async fn connect_pool(database_url: &str, config: PoolConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(database_url)
        .await
}

/// Connect to a Postgres pool, reading `DATABASE_URL` from the environment.
///
/// # Errors
///
/// Returns [`StoreError::MissingDatabaseUrl`] if `DATABASE_URL` is unset,
/// or [`StoreError::Sqlx`] if the connection cannot be established.
pub async fn connect_pool_from_env(config: PoolConfig) -> Result<PgPool, StoreError> {
    let database_url = env::var("DATABASE_URL").map_err(|_| StoreError::MissingDatabaseUrl)?;
    connect_pool(&database_url, config)
        .await
        .map_err(StoreError::from)
}

/// Postgres-backed [`ProfileStore`].
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run pending migrations against this store's pool.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Migration`] on migration failure.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    plan: String,
    role: String,
    onboarding_completed: bool,
    workspace_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            plan: row.plan,
            role: row.role,
            onboarding_completed: row.onboarding_completed,
            workspace_id: row.workspace_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WorkspaceRow {
    id: Uuid,
    owner_id: String,
    profile: Json<BrandProfile>,
    created_at: DateTime<Utc>,
    last_report_id: Option<Uuid>,
    last_audit_date: Option<DateTime<Utc>>,
}

impl From<WorkspaceRow> for WorkspaceRecord {
    fn from(row: WorkspaceRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            profile: row.profile.0,
            created_at: row.created_at,
            last_report_id: row.last_report_id,
            last_audit_date: row.last_audit_date,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReportRow {
    id: Uuid,
    workspace_id: Uuid,
    user_id: String,
    url: String,
    result: Json<AuditResult>,
    record_type: String,
    created_at: DateTime<Utc>,
}

impl From<ReportRow> for ReportRecord {
    fn from(row: ReportRow) -> Self {
        Self {
            id: row.id,
            workspace_id: row.workspace_id,
            user_id: row.user_id,
            url: row.url,
            result: row.result.0,
            record_type: row.record_type,
            created_at: row.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

const USER_COLUMNS: &str =
    "id, email, plan, role, onboarding_completed, workspace_id, created_at";
const WORKSPACE_COLUMNS: &str =
    "id, owner_id, profile, created_at, last_report_id, last_audit_date";
const REPORT_COLUMNS: &str =
    "id, workspace_id, user_id, url, result, record_type, created_at";

impl ProfileStore for PgStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(UserRecord::from))
    }

    async fn create_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO users (id, email, plan, role, onboarding_completed, workspace_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.plan)
        .bind(&user.role)
        .bind(user.onboarding_completed)
        .bind(user.workspace_id)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn complete_onboarding(
        &self,
        user_id: &str,
        profile: &BrandProfile,
    ) -> Result<Uuid, StoreError> {
        let workspace_id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO workspaces (id, owner_id, profile, created_at) \
             VALUES ($1, $2, $3, NOW())",
        )
        .bind(workspace_id)
        .bind(user_id)
        .bind(Json(profile))
        .execute(&mut *tx)
        .await?;

        let updated = sqlx::query(
            "UPDATE users SET onboarding_completed = TRUE, workspace_id = $1 WHERE id = $2",
        )
        .bind(workspace_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        // Unknown user: drop the transaction so the workspace insert never
        // becomes visible.
        if updated.rows_affected() == 0 {
            return Err(StoreError::UserNotFound(user_id.to_owned()));
        }

        tx.commit().await?;
        tracing::info!(user = user_id, workspace = %workspace_id, "onboarding completed");
        Ok(workspace_id)
    }

    async fn get_workspace(
        &self,
        workspace_id: Uuid,
    ) -> Result<Option<WorkspaceRecord>, StoreError> {
        let row = sqlx::query_as::<_, WorkspaceRow>(&format!(
            "SELECT {WORKSPACE_COLUMNS} FROM workspaces WHERE id = $1"
        ))
        .bind(workspace_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(WorkspaceRecord::from))
    }

    async fn workspace_for_user(
        &self,
        user_id: &str,
    ) -> Result<Option<WorkspaceRecord>, StoreError> {
        let row = sqlx::query_as::<_, WorkspaceRow>(&format!(
            "SELECT {WORKSPACE_COLUMNS} FROM workspaces \
             WHERE owner_id = $1 ORDER BY created_at DESC LIMIT 1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(WorkspaceRecord::from))
    }

    async fn record_audit(
        &self,
        workspace_id: Uuid,
        user_id: &str,
        url: &str,
        result: &AuditResult,
    ) -> Result<ReportRecord, StoreError> {
        let report_id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        // Touch the workspace first: an unknown workspace rolls back before
        // any report row exists, and surfaces as a typed error instead of a
        // foreign-key violation.
        let updated = sqlx::query(
            "UPDATE workspaces SET last_report_id = $1, last_audit_date = NOW() WHERE id = $2",
        )
        .bind(report_id)
        .bind(workspace_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(StoreError::WorkspaceNotFound(workspace_id));
        }

        let row = sqlx::query_as::<_, ReportRow>(&format!(
            "INSERT INTO reports (id, workspace_id, user_id, url, geo_score, result, record_type) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {REPORT_COLUMNS}"
        ))
        .bind(report_id)
        .bind(workspace_id)
        .bind(user_id)
        .bind(url)
        .bind(result.geo_score)
        .bind(Json(result))
        .bind(REPORT_TYPE_GEO_AUDIT)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(ReportRecord::from(row))
    }

    async fn list_reports(&self, workspace_id: Uuid) -> Result<Vec<ReportRecord>, StoreError> {
        let rows = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports \
             WHERE workspace_id = $1 ORDER BY created_at DESC"
        ))
        .bind(workspace_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ReportRecord::from).collect())
    }
}
