//! In-memory implementation of the document store.
//!
//! Backs orchestrator tests and database-free local runs. Both writes of
//! each multi-write operation happen under one lock, so the transactional
//! contract matches [`crate::PgStore`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use geolens_core::{
    AuditResult, BrandProfile, ReportRecord, UserRecord, WorkspaceRecord, REPORT_TYPE_GEO_AUDIT,
};

use crate::{ProfileStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<String, UserRecord>,
    workspaces: HashMap<Uuid, WorkspaceRecord>,
    reports: Vec<ReportRecord>,
    workspace_writes: usize,
    report_writes: usize,
}

/// In-memory [`ProfileStore`]. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Poisoning is recovered from: every operation completes its
        // writes inside one critical section, so the state a panicked
        // thread leaves behind is still consistent.
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Number of workspace creations performed. Used by idempotency tests.
    #[must_use]
    pub fn workspace_write_count(&self) -> usize {
        self.lock().workspace_writes
    }

    /// Number of report insertions performed.
    #[must_use]
    pub fn report_write_count(&self) -> usize {
        self.lock().report_writes
    }
}

impl ProfileStore for MemoryStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.lock().users.get(user_id).cloned())
    }

    async fn create_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        self.lock().users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn complete_onboarding(
        &self,
        user_id: &str,
        profile: &BrandProfile,
    ) -> Result<Uuid, StoreError> {
        let mut inner = self.lock();
        let workspace_id = Uuid::new_v4();

        {
            let Some(user) = inner.users.get_mut(user_id) else {
                return Err(StoreError::UserNotFound(user_id.to_owned()));
            };
            user.onboarding_completed = true;
            user.workspace_id = Some(workspace_id);
        }

        inner.workspaces.insert(
            workspace_id,
            WorkspaceRecord {
                id: workspace_id,
                owner_id: user_id.to_owned(),
                profile: profile.clone(),
                created_at: Utc::now(),
                last_report_id: None,
                last_audit_date: None,
            },
        );
        inner.workspace_writes += 1;

        Ok(workspace_id)
    }

    async fn get_workspace(
        &self,
        workspace_id: Uuid,
    ) -> Result<Option<WorkspaceRecord>, StoreError> {
        Ok(self.lock().workspaces.get(&workspace_id).cloned())
    }

    async fn workspace_for_user(
        &self,
        user_id: &str,
    ) -> Result<Option<WorkspaceRecord>, StoreError> {
        Ok(self
            .lock()
            .workspaces
            .values()
            .filter(|w| w.owner_id == user_id)
            .max_by_key(|w| w.created_at)
            .cloned())
    }

    async fn record_audit(
        &self,
        workspace_id: Uuid,
        user_id: &str,
        url: &str,
        result: &AuditResult,
    ) -> Result<ReportRecord, StoreError> {
        let mut inner = self.lock();

        let Some(workspace) = inner.workspaces.get_mut(&workspace_id) else {
            return Err(StoreError::WorkspaceNotFound(workspace_id));
        };

        let now = Utc::now();
        let report = ReportRecord {
            id: Uuid::new_v4(),
            workspace_id,
            user_id: user_id.to_owned(),
            url: url.to_owned(),
            result: result.clone(),
            record_type: REPORT_TYPE_GEO_AUDIT.to_owned(),
            created_at: now,
        };

        workspace.last_report_id = Some(report.id);
        workspace.last_audit_date = Some(now);
        inner.reports.push(report.clone());
        inner.report_writes += 1;

        Ok(report)
    }

    async fn list_reports(&self, workspace_id: Uuid) -> Result<Vec<ReportRecord>, StoreError> {
        let mut reports: Vec<ReportRecord> = self
            .lock()
            .reports
            .iter()
            .filter(|r| r.workspace_id == workspace_id)
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }
}
