//! The in-progress brand profile assembled across the onboarding wizard.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A competitor discovered by the LLM, or confirmed by the user.
///
/// `domain` is the only required field. `reason` is a short free-text
/// justification (around 15 words by prompt convention, not enforced).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorSuggestion {
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// The mutable record describing a user's brand.
///
/// Owned by the onboarding session until submitted, then by the persisted
/// [`crate::WorkspaceRecord`]. Serialized in camelCase because this is the
/// document-store shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandProfile {
    pub website_url: String,
    pub brand_name: String,
    pub tagline: String,
    pub description: String,
    pub logo_url: String,
    pub headquarters: String,
    pub industry: String,
    pub persona: String,
    pub pain_point: String,
    pub moat: String,
    pub platforms: BTreeSet<String>,
    pub related_topics: Vec<String>,
    /// User-confirmed competitors. At most 3 slots by UI convention;
    /// enforced by the onboarding orchestrator, not by this type.
    pub competitors: Vec<CompetitorSuggestion>,
    /// Brand tone on a 1–5 scale.
    pub brand_tone_score: i16,
}

impl Default for BrandProfile {
    fn default() -> Self {
        Self {
            website_url: String::new(),
            brand_name: String::new(),
            tagline: String::new(),
            description: String::new(),
            logo_url: String::new(),
            headquarters: String::new(),
            industry: String::new(),
            persona: String::new(),
            pain_point: String::new(),
            moat: String::new(),
            platforms: BTreeSet::new(),
            related_topics: Vec::new(),
            competitors: Vec::new(),
            brand_tone_score: 3,
        }
    }
}
