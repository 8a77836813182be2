//! The onboarding wizard state machine.
//!
//! A linear five-step form (`Identity → Location → Focus → Competition →
//! Voice`) followed by a terminal submission. Hard-dependency failures
//! (fetch, classify, persist) surface to the caller and leave the wizard
//! where it was; enrichment failures degrade silently.

use std::collections::BTreeSet;
use std::fmt;

use tokio::sync::mpsc;
use uuid::Uuid;

use geolens_core::{BrandProfile, CompetitorSuggestion};
use geolens_llm::{
    classify_industry, find_competitors, generate_topics, suggest_audience, suggest_moat,
    CompletionClient,
};
use geolens_scraper::ScrapeClient;
use geolens_store::ProfileStore;

use crate::error::OnboardingError;
use crate::merge::{EnrichmentBatch, ProfileField, ProfileUpdate};

/// Confirmed competitor slots on a profile.
pub const MAX_CONFIRMED_COMPETITORS: usize = 3;

/// Wizard position. Linear, no skips; `Back` is the only reverse edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Identity,
    Location,
    Focus,
    Competition,
    Voice,
    Submitting,
    Done,
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Identity => "identity",
            Self::Location => "location",
            Self::Focus => "focus",
            Self::Competition => "competition",
            Self::Voice => "voice",
            Self::Submitting => "submitting",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Session state injected at construction, never looked up ambiently.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
}

/// Drives one user's onboarding from first URL to persisted workspace.
///
/// Background enrichments run as spawned tasks and report back through a
/// merge queue; [`OnboardingOrchestrator::pump`] drains it without
/// blocking, so navigation never waits on an enrichment.
pub struct OnboardingOrchestrator<S: ProfileStore> {
    session: Session,
    scraper: ScrapeClient,
    llm: CompletionClient,
    store: S,
    step: WizardStep,
    profile: BrandProfile,
    touched: BTreeSet<ProfileField>,
    suggested_competitors: Vec<CompetitorSuggestion>,
    scraped_markdown: Option<String>,
    merge_tx: mpsc::UnboundedSender<EnrichmentBatch>,
    merge_rx: mpsc::UnboundedReceiver<EnrichmentBatch>,
    pending: usize,
    submitting: bool,
    workspace_id: Option<Uuid>,
    audience_triggers: u32,
    topic_triggers: u32,
    moat_triggers: u32,
    competitor_triggers: u32,
}

impl<S: ProfileStore> OnboardingOrchestrator<S> {
    pub fn new(session: Session, scraper: ScrapeClient, llm: CompletionClient, store: S) -> Self {
        let (merge_tx, merge_rx) = mpsc::unbounded_channel();
        Self {
            session,
            scraper,
            llm,
            store,
            step: WizardStep::Identity,
            profile: BrandProfile::default(),
            touched: BTreeSet::new(),
            suggested_competitors: Vec::new(),
            scraped_markdown: None,
            merge_tx,
            merge_rx,
            pending: 0,
            submitting: false,
            workspace_id: None,
            audience_triggers: 0,
            topic_triggers: 0,
            moat_triggers: 0,
            competitor_triggers: 0,
        }
    }

    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    #[must_use]
    pub fn profile(&self) -> &BrandProfile {
        &self.profile
    }

    /// Advisory competitor scratch list, refreshed by the finder.
    #[must_use]
    pub fn suggestions(&self) -> &[CompetitorSuggestion] {
        &self.suggested_competitors
    }

    #[must_use]
    pub fn workspace_id(&self) -> Option<Uuid> {
        self.workspace_id
    }

    #[must_use]
    pub fn topic_triggers(&self) -> u32 {
        self.topic_triggers
    }

    #[must_use]
    pub fn moat_triggers(&self) -> u32 {
        self.moat_triggers
    }

    #[must_use]
    pub fn competitor_triggers(&self) -> u32 {
        self.competitor_triggers
    }

    #[must_use]
    pub fn audience_triggers(&self) -> u32 {
        self.audience_triggers
    }

    /// Records a form-field edit by the user.
    ///
    /// Sets the field's touched flag, so no queued or future enrichment
    /// result can overwrite it.
    pub fn apply_user_edit(&mut self, update: ProfileUpdate) {
        self.touched.insert(update.field());
        update.apply(&mut self.profile);
    }

    /// Runs the Identity-step auto-fill: fetch, then classify, then
    /// fire-and-forget enrichments.
    ///
    /// Fetch and classify are sequential hard dependencies. Their
    /// resulting profile writes are staged and applied only after both
    /// succeed, so a failure leaves every form field unchanged.
    ///
    /// # Errors
    ///
    /// - [`OnboardingError::InvalidStep`] — called outside Identity.
    /// - [`OnboardingError::Fetch`] / [`OnboardingError::Llm`] — the hard
    ///   dependencies failed; the wizard stays at Identity, untouched.
    pub async fn auto_fill(&mut self, url: &str) -> Result<(), OnboardingError> {
        if self.step != WizardStep::Identity {
            return Err(OnboardingError::InvalidStep {
                action: "auto-fill",
                step: self.step,
            });
        }

        let page = self.scraper.fetch(url).await?;
        let meta = &page.metadata;
        let scraped_name = meta
            .og_site_name
            .clone()
            .or_else(|| meta.title.clone())
            .unwrap_or_default();
        let classify_name = if scraped_name.is_empty() {
            self.profile.brand_name.clone()
        } else {
            scraped_name.clone()
        };

        let industry = classify_industry(&self.llm, &page.markdown, &classify_name).await?;

        let mut staged = vec![
            ProfileUpdate::WebsiteUrl(url.to_owned()),
            ProfileUpdate::Industry(industry.clone()),
        ];
        if !scraped_name.is_empty() {
            staged.push(ProfileUpdate::BrandName(scraped_name));
        }
        if let Some(tagline) = meta.description.clone() {
            staged.push(ProfileUpdate::Tagline(tagline));
        }
        if let Some(description) = meta.og_description.clone().or_else(|| meta.description.clone())
        {
            staged.push(ProfileUpdate::Description(description));
        }
        if let Some(logo) = meta.og_image.clone().or_else(|| meta.favicon.clone()) {
            staged.push(ProfileUpdate::LogoUrl(logo));
        }
        for update in staged {
            self.merge_update("auto_fill", update);
        }

        self.scraped_markdown = Some(page.markdown.clone());
        tracing::info!(url, industry = %industry, "auto-fill complete, spawning enrichments");

        self.spawn_audience(industry.clone(), page.markdown);
        self.spawn_topics(industry);
        self.spawn_moat();
        Ok(())
    }

    /// Advances one step.
    ///
    /// Entering Competition triggers the step's enrichments: topics when
    /// the industry is known and no topics exist yet, and the competitor
    /// finder and moat advisor unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::InvalidStep`] from Voice and later;
    /// Voice exits through [`OnboardingOrchestrator::submit`].
    pub fn next(&mut self) -> Result<WizardStep, OnboardingError> {
        self.pump();
        let to = match self.step {
            WizardStep::Identity => WizardStep::Location,
            WizardStep::Location => WizardStep::Focus,
            WizardStep::Focus => {
                self.on_enter_competition();
                WizardStep::Competition
            }
            WizardStep::Competition => WizardStep::Voice,
            WizardStep::Voice | WizardStep::Submitting | WizardStep::Done => {
                return Err(OnboardingError::InvalidStep {
                    action: "advance",
                    step: self.step,
                });
            }
        };
        self.step = to;
        Ok(to)
    }

    /// Steps backward.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::InvalidStep`] at Identity and once
    /// submission has started.
    pub fn back(&mut self) -> Result<WizardStep, OnboardingError> {
        self.pump();
        let to = match self.step {
            WizardStep::Location => WizardStep::Identity,
            WizardStep::Focus => WizardStep::Location,
            WizardStep::Competition => WizardStep::Focus,
            WizardStep::Voice => WizardStep::Competition,
            WizardStep::Identity | WizardStep::Submitting | WizardStep::Done => {
                return Err(OnboardingError::InvalidStep {
                    action: "go back",
                    step: self.step,
                });
            }
        };
        self.step = to;
        Ok(to)
    }

    /// Copies a suggested competitor into the confirmed list.
    ///
    /// Re-confirming an already-confirmed domain is a no-op.
    ///
    /// # Errors
    ///
    /// - [`OnboardingError::UnknownSuggestion`] — index out of range.
    /// - [`OnboardingError::CompetitorSlotsFull`] — all
    ///   [`MAX_CONFIRMED_COMPETITORS`] slots are taken.
    pub fn confirm_competitor(&mut self, index: usize) -> Result<(), OnboardingError> {
        let suggestion = self
            .suggested_competitors
            .get(index)
            .cloned()
            .ok_or(OnboardingError::UnknownSuggestion(index))?;
        if self
            .profile
            .competitors
            .iter()
            .any(|c| c.domain == suggestion.domain)
        {
            return Ok(());
        }
        if self.profile.competitors.len() >= MAX_CONFIRMED_COMPETITORS {
            return Err(OnboardingError::CompetitorSlotsFull {
                max: MAX_CONFIRMED_COMPETITORS,
            });
        }
        self.profile.competitors.push(suggestion);
        Ok(())
    }

    /// Persists the workspace and marks the user onboarded.
    ///
    /// Outstanding enrichments are settled first so their (gated) results
    /// make it into the persisted profile. Idempotent: once a submission
    /// has completed, later calls return the same workspace id without a
    /// second store write.
    ///
    /// # Errors
    ///
    /// - [`OnboardingError::SubmitInProgress`] — a submission is already
    ///   in flight for this session.
    /// - [`OnboardingError::InvalidStep`] — called before Voice.
    /// - [`OnboardingError::Store`] — the persist failed; the wizard
    ///   returns to Voice for a retry.
    pub async fn submit(&mut self) -> Result<Uuid, OnboardingError> {
        if let Some(id) = self.workspace_id {
            return Ok(id);
        }
        if self.submitting {
            return Err(OnboardingError::SubmitInProgress);
        }
        if self.step != WizardStep::Voice {
            return Err(OnboardingError::InvalidStep {
                action: "submit",
                step: self.step,
            });
        }

        self.submitting = true;
        self.step = WizardStep::Submitting;
        self.settle().await;

        match self
            .store
            .complete_onboarding(&self.session.user_id, &self.profile)
            .await
        {
            Ok(id) => {
                self.submitting = false;
                self.workspace_id = Some(id);
                self.step = WizardStep::Done;
                tracing::info!(user = %self.session.user_id, workspace = %id, "onboarding complete");
                Ok(id)
            }
            Err(e) => {
                self.submitting = false;
                self.step = WizardStep::Voice;
                Err(e.into())
            }
        }
    }

    /// Drains the merge queue without blocking.
    pub fn pump(&mut self) {
        while let Ok(batch) = self.merge_rx.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            self.absorb(batch);
        }
    }

    /// Waits for every outstanding enrichment task and merges its result.
    pub async fn settle(&mut self) {
        while self.pending > 0 {
            let Some(batch) = self.merge_rx.recv().await else {
                break;
            };
            self.pending = self.pending.saturating_sub(1);
            self.absorb(batch);
        }
    }

    fn absorb(&mut self, batch: EnrichmentBatch) {
        let EnrichmentBatch {
            source,
            updates,
            suggestions,
        } = batch;
        for update in updates {
            self.merge_update(source, update);
        }
        if !suggestions.is_empty() {
            self.suggested_competitors = suggestions;
        }
    }

    fn merge_update(&mut self, source: &'static str, update: ProfileUpdate) {
        let field = update.field();
        if self.touched.contains(&field) {
            tracing::debug!(source, ?field, "dropping suggestion for user-edited field");
            return;
        }
        update.apply(&mut self.profile);
    }

    fn on_enter_competition(&mut self) {
        if !self.profile.industry.is_empty() && self.profile.related_topics.is_empty() {
            self.spawn_topics(self.profile.industry.clone());
        }
        self.spawn_competitors();
        self.spawn_moat();
    }

    fn spawn_audience(&mut self, industry: String, markdown: String) {
        self.audience_triggers += 1;
        self.pending += 1;
        let llm = self.llm.clone();
        let tx = self.merge_tx.clone();
        tokio::spawn(async move {
            let suggestion = suggest_audience(&llm, &industry, &markdown).await;
            let mut updates = Vec::new();
            if !suggestion.persona.is_empty() {
                updates.push(ProfileUpdate::Persona(suggestion.persona));
            }
            if !suggestion.pain_point.is_empty() {
                updates.push(ProfileUpdate::PainPoint(suggestion.pain_point));
            }
            let _ = tx.send(EnrichmentBatch::fields("audience_advisor", updates));
        });
    }

    fn spawn_topics(&mut self, industry: String) {
        self.topic_triggers += 1;
        self.pending += 1;
        let llm = self.llm.clone();
        let tx = self.merge_tx.clone();
        tokio::spawn(async move {
            let topics = generate_topics(&llm, &industry).await;
            let updates = if topics.is_empty() {
                Vec::new()
            } else {
                vec![ProfileUpdate::RelatedTopics(topics)]
            };
            let _ = tx.send(EnrichmentBatch::fields("topic_generator", updates));
        });
    }

    fn spawn_moat(&mut self) {
        self.moat_triggers += 1;
        self.pending += 1;
        let llm = self.llm.clone();
        let tx = self.merge_tx.clone();
        let brand = self.profile.brand_name.clone();
        let description = self.profile.description.clone();
        let industry = self.profile.industry.clone();
        tokio::spawn(async move {
            let moat = suggest_moat(&llm, &brand, &description, &industry).await;
            let updates = if moat.is_empty() {
                Vec::new()
            } else {
                vec![ProfileUpdate::Moat(moat)]
            };
            let _ = tx.send(EnrichmentBatch::fields("moat_advisor", updates));
        });
    }

    fn spawn_competitors(&mut self) {
        self.competitor_triggers += 1;
        self.pending += 1;
        let llm = self.llm.clone();
        let tx = self.merge_tx.clone();
        let industry = self.profile.industry.clone();
        let region = self.profile.headquarters.clone();
        let brand = self.profile.brand_name.clone();
        let content = self.scraped_markdown.clone();
        tokio::spawn(async move {
            let suggestions =
                match find_competitors(&llm, &industry, &region, &brand, content.as_deref()).await
                {
                    Ok(suggestions) => suggestions,
                    Err(e) => {
                        tracing::warn!(
                            source = "competitor_finder",
                            error = %e,
                            "competitor discovery failed"
                        );
                        Vec::new()
                    }
                };
            let _ = tx.send(EnrichmentBatch::competitors("competitor_finder", suggestions));
        });
    }
}
