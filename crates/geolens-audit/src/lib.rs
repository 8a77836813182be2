//! The GEO audit pipeline.
//!
//! One strictly sequential pass per run: resolve the caller's workspace,
//! scrape the target page, score it, persist the report. Any failure is
//! terminal for the run; retrying means starting the whole sequence over.

use std::fmt;

use geolens_core::ReportRecord;
use geolens_llm::{analyze_visibility, CompletionClient};
use geolens_scraper::ScrapeClient;
use geolens_store::ProfileStore;

/// Where a run currently is. Observable between and after runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditPhase {
    Initializing,
    Scraping,
    Analyzing,
    Saving,
    Complete,
    Error,
}

impl fmt::Display for AuditPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Initializing => "initializing",
            Self::Scraping => "scraping",
            Self::Analyzing => "analyzing",
            Self::Saving => "saving",
            Self::Complete => "complete",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// A fatal audit failure. Every variant leaves the auditor in
/// [`AuditPhase::Error`] with nothing persisted for the run.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("no such user: {0}")]
    UnknownUser(String),

    #[error("user {0} has no workspace")]
    MissingWorkspace(String),

    #[error(transparent)]
    Fetch(#[from] geolens_scraper::FetchError),

    #[error(transparent)]
    Llm(#[from] geolens_llm::LlmError),

    #[error(transparent)]
    Store(#[from] geolens_store::StoreError),
}

/// Runs GEO visibility audits for onboarded users.
pub struct GeoAuditor<S: ProfileStore> {
    scraper: ScrapeClient,
    llm: CompletionClient,
    store: S,
    phase: AuditPhase,
}

impl<S: ProfileStore> GeoAuditor<S> {
    pub fn new(scraper: ScrapeClient, llm: CompletionClient, store: S) -> Self {
        Self {
            scraper,
            llm,
            store,
            phase: AuditPhase::Initializing,
        }
    }

    #[must_use]
    pub fn phase(&self) -> AuditPhase {
        self.phase
    }

    /// Audits `url` on behalf of `user_id` and persists the report.
    ///
    /// Phases advance only on success: a scrape or analysis failure moves
    /// straight to [`AuditPhase::Error`] without ever reaching Saving, so
    /// a failed run writes nothing. Calling `run` again restarts the full
    /// sequence from Initializing.
    ///
    /// # Errors
    ///
    /// - [`AuditError::UnknownUser`] / [`AuditError::MissingWorkspace`] —
    ///   the caller cannot be resolved to a workspace.
    /// - [`AuditError::Fetch`] — the scrape failed.
    /// - [`AuditError::Llm`] — the analysis failed or returned an invalid
    ///   result.
    /// - [`AuditError::Store`] — the final persist failed.
    pub async fn run(&mut self, user_id: &str, url: &str) -> Result<ReportRecord, AuditError> {
        self.phase = AuditPhase::Initializing;
        match self.advance(user_id, url).await {
            Ok(record) => {
                self.phase = AuditPhase::Complete;
                tracing::info!(
                    user = user_id,
                    url,
                    geo_score = record.result.geo_score,
                    "audit complete"
                );
                Ok(record)
            }
            Err(e) => {
                tracing::error!(user = user_id, url, phase = %self.phase, error = %e, "audit failed");
                self.phase = AuditPhase::Error;
                Err(e)
            }
        }
    }

    async fn advance(&mut self, user_id: &str, url: &str) -> Result<ReportRecord, AuditError> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| AuditError::UnknownUser(user_id.to_owned()))?;
        let workspace = self
            .store
            .workspace_for_user(&user.id)
            .await?
            .ok_or_else(|| AuditError::MissingWorkspace(user_id.to_owned()))?;

        self.phase = AuditPhase::Scraping;
        let page = self.scraper.fetch(url).await?;

        self.phase = AuditPhase::Analyzing;
        let result = analyze_visibility(&self.llm, &page.markdown).await?;

        self.phase = AuditPhase::Saving;
        let record = self
            .store
            .record_audit(workspace.id, user_id, url, &result)
            .await?;
        Ok(record)
    }
}
