//! Onboarding wizard orchestration.
//!
//! Sequences content fetch, industry classification, and the best-effort
//! enrichments into a step-by-step form state machine, then hands the
//! confirmed profile to the store as one atomic completion.

pub mod error;
pub mod merge;
pub mod wizard;

pub use error::OnboardingError;
pub use merge::{EnrichmentBatch, ProfileField, ProfileUpdate};
pub use wizard::{
    OnboardingOrchestrator, Session, WizardStep, MAX_CONFIRMED_COMPETITORS,
};
