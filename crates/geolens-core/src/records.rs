//! Persisted document shapes: users, workspaces, and reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::AuditResult;
use crate::profile::BrandProfile;

/// A user document, keyed by the auth-provider user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub plan: String,
    pub role: String,
    pub onboarding_completed: bool,
    pub workspace_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// A workspace document: the confirmed brand profile plus audit pointers.
///
/// Created once at onboarding completion; afterwards only
/// `last_report_id` and `last_audit_date` are updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRecord {
    pub id: Uuid,
    pub owner_id: String,
    pub profile: BrandProfile,
    pub created_at: DateTime<Utc>,
    pub last_report_id: Option<Uuid>,
    pub last_audit_date: Option<DateTime<Utc>>,
}

/// One persisted audit/report generation. Append-only per workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub user_id: String,
    pub url: String,
    pub result: AuditResult,
    pub record_type: String,
    pub created_at: DateTime<Utc>,
}

/// The record type written for GEO audit reports.
pub const REPORT_TYPE_GEO_AUDIT: &str = "geo_audit";
