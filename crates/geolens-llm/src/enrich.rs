//! Best-effort profile enrichments: audience, topics, moat.
//!
//! These advisors must never block the onboarding flow. Each one degrades
//! to an empty value on any failure, logging a warning, so the caller can
//! merge whatever succeeded.

use serde::Deserialize;

use crate::client::CompletionClient;
use crate::error::LlmError;
use crate::extract::{extract_structured_payload, PayloadShape};
use crate::prompts;
use crate::text::{strip_quotes, truncate_chars};

/// Content excerpt budget for the audience prompt.
const AUDIENCE_CONTENT_CHARS: usize = 800;

/// A suggested buyer persona with its primary pain point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudienceSuggestion {
    pub persona: String,
    pub pain_point: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAudience {
    #[serde(default)]
    persona: String,
    #[serde(default)]
    pain_point: String,
}

/// Suggests a buyer persona and pain point for the industry.
///
/// Best-effort: returns empty strings on any failure.
pub async fn suggest_audience(
    client: &CompletionClient,
    industry: &str,
    content: &str,
) -> AudienceSuggestion {
    match try_suggest_audience(client, industry, content).await {
        Ok(suggestion) => suggestion,
        Err(e) => {
            tracing::warn!(source = "audience_advisor", error = %e, "audience suggestion failed");
            AudienceSuggestion::default()
        }
    }
}

async fn try_suggest_audience(
    client: &CompletionClient,
    industry: &str,
    content: &str,
) -> Result<AudienceSuggestion, LlmError> {
    let excerpt = truncate_chars(content, AUDIENCE_CONTENT_CHARS);
    let raw = client
        .complete(None, &prompts::audience(industry, excerpt))
        .await?;

    let payload = extract_structured_payload(&raw, PayloadShape::Object)?;
    let parsed: RawAudience =
        serde_json::from_str(&payload).map_err(|e| LlmError::Deserialize {
            context: "audience suggestion object".to_owned(),
            source: e,
        })?;

    Ok(AudienceSuggestion {
        persona: parsed.persona.trim().to_owned(),
        pain_point: parsed.pain_point.trim().to_owned(),
    })
}

/// Generates related topic clusters for an industry.
///
/// Expects a flat comma-separated list; splits and trims. Best-effort:
/// returns an empty list on any failure.
pub async fn generate_topics(client: &CompletionClient, industry: &str) -> Vec<String> {
    match client.complete(None, &prompts::topics(industry)).await {
        Ok(raw) => split_topics(&raw),
        Err(e) => {
            tracing::warn!(source = "topic_generator", error = %e, "topic generation failed");
            Vec::new()
        }
    }
}

fn split_topics(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| strip_quotes(t).to_owned())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Suggests a one-sentence differentiation statement.
///
/// Best-effort: returns an empty string on any failure.
pub async fn suggest_moat(
    client: &CompletionClient,
    brand_name: &str,
    description: &str,
    industry: &str,
) -> String {
    match client
        .complete(None, &prompts::moat(brand_name, description, industry))
        .await
    {
        Ok(raw) => strip_quotes(&raw).to_owned(),
        Err(e) => {
            tracing::warn!(source = "moat_advisor", error = %e, "moat suggestion failed");
            String::new()
        }
    }
}
