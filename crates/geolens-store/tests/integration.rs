//! Offline tests for the store: pool configuration and the in-memory
//! implementation's transactional contract. No database required.

use chrono::Utc;
use geolens_core::{AuditDimension, AuditResult, BrandProfile, UserRecord};
use geolens_store::{MemoryStore, PoolConfig, ProfileStore, StoreError};
use uuid::Uuid;

fn test_user(id: &str) -> UserRecord {
    UserRecord {
        id: id.to_owned(),
        email: format!("{id}@example.com"),
        plan: "free".to_owned(),
        role: "owner".to_owned(),
        onboarding_completed: false,
        workspace_id: None,
        created_at: Utc::now(),
    }
}

fn test_profile(brand: &str) -> BrandProfile {
    BrandProfile {
        brand_name: brand.to_owned(),
        website_url: format!("https://{}.com", brand.to_lowercase()),
        industry: "Retail".to_owned(),
        ..BrandProfile::default()
    }
}

fn test_audit(score: i32) -> AuditResult {
    AuditResult {
        geo_score: score,
        summary: "summary".to_owned(),
        markdown_structure: AuditDimension {
            score,
            observation: "obs".to_owned(),
        },
        fact_density: AuditDimension {
            score,
            observation: "obs".to_owned(),
        },
        direct_answer_capability: AuditDimension {
            score,
            observation: "obs".to_owned(),
        },
        critical_fix: "fix".to_owned(),
    }
}

#[test]
fn pool_config_defaults() {
    let config = PoolConfig::default();
    assert_eq!(config.max_connections, 10);
    assert_eq!(config.min_connections, 1);
    assert_eq!(config.acquire_timeout_secs, 10);
}

#[tokio::test]
async fn complete_onboarding_creates_workspace_and_marks_user() {
    let store = MemoryStore::new();
    store.create_user(&test_user("u1")).await.expect("create user");

    let workspace_id = store
        .complete_onboarding("u1", &test_profile("Acme"))
        .await
        .expect("onboarding completes");

    let user = store
        .get_user("u1")
        .await
        .expect("get user")
        .expect("user exists");
    assert!(user.onboarding_completed);
    assert_eq!(user.workspace_id, Some(workspace_id));

    let workspace = store
        .get_workspace(workspace_id)
        .await
        .expect("get workspace")
        .expect("workspace exists");
    assert_eq!(workspace.owner_id, "u1");
    assert_eq!(workspace.profile.brand_name, "Acme");
    assert!(workspace.last_report_id.is_none());
}

#[tokio::test]
async fn complete_onboarding_unknown_user_leaves_no_workspace() {
    let store = MemoryStore::new();

    let err = store
        .complete_onboarding("ghost", &test_profile("Acme"))
        .await
        .expect_err("unknown user must fail");
    assert!(matches!(err, StoreError::UserNotFound(_)));
    assert_eq!(store.workspace_write_count(), 0);
}

#[tokio::test]
async fn record_audit_appends_report_and_updates_workspace_pointers() {
    let store = MemoryStore::new();
    store.create_user(&test_user("u1")).await.expect("create user");
    let workspace_id = store
        .complete_onboarding("u1", &test_profile("Acme"))
        .await
        .expect("onboarding completes");

    let report = store
        .record_audit(workspace_id, "u1", "https://acme.com", &test_audit(70))
        .await
        .expect("audit records");

    assert_eq!(report.workspace_id, workspace_id);
    assert_eq!(report.record_type, "geo_audit");
    assert_eq!(report.result.geo_score, 70);

    let workspace = store
        .get_workspace(workspace_id)
        .await
        .expect("get workspace")
        .expect("workspace exists");
    assert_eq!(workspace.last_report_id, Some(report.id));
    assert!(workspace.last_audit_date.is_some());
}

#[tokio::test]
async fn record_audit_unknown_workspace_persists_nothing() {
    let store = MemoryStore::new();

    let err = store
        .record_audit(Uuid::new_v4(), "u1", "https://acme.com", &test_audit(50))
        .await
        .expect_err("unknown workspace must fail");
    assert!(matches!(err, StoreError::WorkspaceNotFound(_)));
    assert_eq!(store.report_write_count(), 0);
}

#[tokio::test]
async fn list_reports_newest_first() {
    let store = MemoryStore::new();
    store.create_user(&test_user("u1")).await.expect("create user");
    let workspace_id = store
        .complete_onboarding("u1", &test_profile("Acme"))
        .await
        .expect("onboarding completes");

    for score in [40, 60, 80] {
        store
            .record_audit(workspace_id, "u1", "https://acme.com", &test_audit(score))
            .await
            .expect("audit records");
    }

    let reports = store.list_reports(workspace_id).await.expect("list reports");
    assert_eq!(reports.len(), 3);
    let created: Vec<_> = reports.iter().map(|r| r.created_at).collect();
    assert!(created.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn workspace_for_user_returns_latest() {
    let store = MemoryStore::new();
    store.create_user(&test_user("u1")).await.expect("create user");

    store
        .complete_onboarding("u1", &test_profile("First"))
        .await
        .expect("first onboarding");
    // Keep created_at strictly ordered between the two workspaces.
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = store
        .complete_onboarding("u1", &test_profile("Second"))
        .await
        .expect("second onboarding");

    let latest = store
        .workspace_for_user("u1")
        .await
        .expect("lookup")
        .expect("workspace exists");
    assert_eq!(latest.id, second);
}
