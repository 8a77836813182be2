//! Field-level profile updates and the enrichment merge queue types.
//!
//! Background enrichment tasks never mutate the profile directly. They
//! emit an [`EnrichmentBatch`] into an mpsc queue; the orchestrator
//! applies each update only if the user has not already edited the target
//! field. User edits always win over late-arriving suggestions.

use geolens_core::{BrandProfile, CompetitorSuggestion};

/// The profile fields tracked by the touched-field gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProfileField {
    WebsiteUrl,
    BrandName,
    Tagline,
    Description,
    LogoUrl,
    Headquarters,
    Industry,
    Persona,
    PainPoint,
    Moat,
    RelatedTopics,
    BrandToneScore,
}

/// One field write, carrying the new value.
///
/// Used both for user edits (which set the touched flag) and for staged
/// or background updates (which respect it).
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileUpdate {
    WebsiteUrl(String),
    BrandName(String),
    Tagline(String),
    Description(String),
    LogoUrl(String),
    Headquarters(String),
    Industry(String),
    Persona(String),
    PainPoint(String),
    Moat(String),
    RelatedTopics(Vec<String>),
    BrandToneScore(i16),
}

impl ProfileUpdate {
    /// The gate field this update targets.
    #[must_use]
    pub fn field(&self) -> ProfileField {
        match self {
            Self::WebsiteUrl(_) => ProfileField::WebsiteUrl,
            Self::BrandName(_) => ProfileField::BrandName,
            Self::Tagline(_) => ProfileField::Tagline,
            Self::Description(_) => ProfileField::Description,
            Self::LogoUrl(_) => ProfileField::LogoUrl,
            Self::Headquarters(_) => ProfileField::Headquarters,
            Self::Industry(_) => ProfileField::Industry,
            Self::Persona(_) => ProfileField::Persona,
            Self::PainPoint(_) => ProfileField::PainPoint,
            Self::Moat(_) => ProfileField::Moat,
            Self::RelatedTopics(_) => ProfileField::RelatedTopics,
            Self::BrandToneScore(_) => ProfileField::BrandToneScore,
        }
    }

    /// Writes the carried value into `profile`.
    pub fn apply(self, profile: &mut BrandProfile) {
        match self {
            Self::WebsiteUrl(v) => profile.website_url = v,
            Self::BrandName(v) => profile.brand_name = v,
            Self::Tagline(v) => profile.tagline = v,
            Self::Description(v) => profile.description = v,
            Self::LogoUrl(v) => profile.logo_url = v,
            Self::Headquarters(v) => profile.headquarters = v,
            Self::Industry(v) => profile.industry = v,
            Self::Persona(v) => profile.persona = v,
            Self::PainPoint(v) => profile.pain_point = v,
            Self::Moat(v) => profile.moat = v,
            Self::RelatedTopics(v) => profile.related_topics = v,
            Self::BrandToneScore(v) => profile.brand_tone_score = v,
        }
    }
}

/// What one background enrichment task resolved to.
///
/// A task sends exactly one batch, even when everything it tried failed
/// (an empty `updates` list), so the orchestrator can account for every
/// outstanding task in `settle`.
#[derive(Debug)]
pub struct EnrichmentBatch {
    pub source: &'static str,
    pub updates: Vec<ProfileUpdate>,
    /// Advisory competitor suggestions. Not gated: they land in the
    /// orchestrator's scratch list, never in the profile itself.
    pub suggestions: Vec<CompetitorSuggestion>,
}

impl EnrichmentBatch {
    #[must_use]
    pub fn fields(source: &'static str, updates: Vec<ProfileUpdate>) -> Self {
        Self {
            source,
            updates,
            suggestions: Vec::new(),
        }
    }

    #[must_use]
    pub fn competitors(source: &'static str, suggestions: Vec<CompetitorSuggestion>) -> Self {
        Self {
            source,
            updates: Vec::new(),
            suggestions,
        }
    }
}
