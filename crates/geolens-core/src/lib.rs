//! Shared domain types and configuration for GeoLens.
//!
//! Holds the brand profile assembled during onboarding, the persisted
//! workspace/user/report record shapes, the structured GEO audit result,
//! and environment-driven application configuration.

pub mod app_config;
pub mod audit;
pub mod config;
pub mod profile;
pub mod records;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use audit::{AuditDimension, AuditResult};
pub use profile::{BrandProfile, CompetitorSuggestion};
pub use records::{ReportRecord, UserRecord, WorkspaceRecord, REPORT_TYPE_GEO_AUDIT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
