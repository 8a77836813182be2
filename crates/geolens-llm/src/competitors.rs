//! Competitor discovery via the completion service.

use serde::Deserialize;

use geolens_core::CompetitorSuggestion;

use crate::client::CompletionClient;
use crate::error::LlmError;
use crate::extract::{extract_structured_payload, PayloadShape};
use crate::prompts;
use crate::text::truncate_chars;

/// Only this many leading characters of page content accompany the prompt.
pub const COMPETITOR_CONTENT_CHARS: usize = 800;

/// At most this many suggestions are returned, however many the model lists.
pub const MAX_SUGGESTIONS: usize = 5;

/// Lenient wire shape: the model sometimes omits or renames fields.
#[derive(Debug, Deserialize)]
struct RawCompetitor {
    #[serde(default)]
    domain: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

/// Discovers up to [`MAX_SUGGESTIONS`] competitors for a brand.
///
/// `industry` and `region` are preconditions, not defaults: empty values
/// are caller bugs and fail fast. Callers wanting UI continuation on
/// failure substitute an empty list themselves.
///
/// # Errors
///
/// - [`LlmError::MissingInput`] — empty `industry` or `region`.
/// - [`LlmError::Extraction`] — no `[...]` payload in the response.
/// - [`LlmError::Deserialize`] — the extracted payload does not parse.
/// - Transport errors from [`CompletionClient::complete`].
pub async fn find_competitors(
    client: &CompletionClient,
    industry: &str,
    region: &str,
    brand_name: &str,
    content: Option<&str>,
) -> Result<Vec<CompetitorSuggestion>, LlmError> {
    if industry.trim().is_empty() {
        return Err(LlmError::MissingInput("industry"));
    }
    if region.trim().is_empty() {
        return Err(LlmError::MissingInput("region"));
    }

    let excerpt = content.map(|c| truncate_chars(c, COMPETITOR_CONTENT_CHARS));
    let raw = client
        .complete(
            None,
            &prompts::competitors(industry, region, brand_name, excerpt),
        )
        .await?;

    parse_suggestions(&raw)
}

/// Parses a raw model response into a capped suggestion list.
///
/// Fences are stripped and the first top-level array extracted before
/// parsing. Entries without a domain are dropped rather than failing the
/// batch; only the first [`MAX_SUGGESTIONS`] survivors are kept.
fn parse_suggestions(raw: &str) -> Result<Vec<CompetitorSuggestion>, LlmError> {
    let payload = extract_structured_payload(raw, PayloadShape::Array)?;

    let entries: Vec<RawCompetitor> =
        serde_json::from_str(&payload).map_err(|e| LlmError::Deserialize {
            context: "competitor suggestion array".to_owned(),
            source: e,
        })?;

    let suggestions = entries
        .into_iter()
        .filter(|entry| !entry.domain.trim().is_empty())
        .map(|entry| CompetitorSuggestion {
            domain: entry.domain.trim().to_owned(),
            name: entry.name.filter(|n| !n.trim().is_empty()),
            reason: entry.reason.filter(|r| !r.trim().is_empty()),
        })
        .take(MAX_SUGGESTIONS)
        .collect();

    Ok(suggestions)
}
