use crate::wizard::WizardStep;

/// Failures surfaced to the user during the onboarding wizard.
///
/// Best-effort enrichment failures never appear here; they degrade to
/// defaults inside the enrichment tasks.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error(transparent)]
    Fetch(#[from] geolens_scraper::FetchError),

    #[error(transparent)]
    Llm(#[from] geolens_llm::LlmError),

    #[error(transparent)]
    Store(#[from] geolens_store::StoreError),

    #[error("a submission is already in flight for this session")]
    SubmitInProgress,

    #[error("cannot {action} from step {step}")]
    InvalidStep {
        action: &'static str,
        step: WizardStep,
    },

    #[error("no competitor suggestion at index {0}")]
    UnknownSuggestion(usize),

    #[error("all {max} confirmed competitor slots are taken")]
    CompetitorSlotsFull { max: usize },
}
