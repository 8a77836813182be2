//! Structured GEO audit result shapes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One scored dimension of a GEO audit, with the model's observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditDimension {
    pub score: i32,
    pub observation: String,
}

/// The structured payload produced by one visibility-scoring pass over a
/// scraped page. Immutable once persisted.
///
/// CamelCase matches the strict-JSON shape the analysis prompt demands
/// from the model, so this type deserializes the model output directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub geo_score: i32,
    pub summary: String,
    pub markdown_structure: AuditDimension,
    pub fact_density: AuditDimension,
    pub direct_answer_capability: AuditDimension,
    pub critical_fix: String,
}

#[derive(Debug, Error)]
pub enum AuditValidationError {
    #[error("audit score {field} out of range: {value} (expected 0-100)")]
    ScoreOutOfRange { field: &'static str, value: i32 },
}

impl AuditResult {
    /// Check that every score sits in `[0, 100]`.
    ///
    /// The model is instructed to stay in range but is not trusted to;
    /// out-of-range payloads must never reach persistence.
    ///
    /// # Errors
    ///
    /// Returns [`AuditValidationError::ScoreOutOfRange`] naming the first
    /// offending field.
    pub fn validate(&self) -> Result<(), AuditValidationError> {
        let scores = [
            ("geoScore", self.geo_score),
            ("markdownStructure", self.markdown_structure.score),
            ("factDensity", self.fact_density.score),
            ("directAnswerCapability", self.direct_answer_capability.score),
        ];
        for (field, value) in scores {
            if !(0..=100).contains(&value) {
                return Err(AuditValidationError::ScoreOutOfRange { field, value });
            }
        }
        Ok(())
    }
}
