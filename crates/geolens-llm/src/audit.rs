//! Structured GEO visibility analysis over scraped content.

use geolens_core::AuditResult;

use crate::client::CompletionClient;
use crate::error::LlmError;
use crate::extract::{extract_structured_payload, PayloadShape};
use crate::prompts;
use crate::text::truncate_chars;

/// Content cap for the analysis prompt.
pub const AUDIT_CONTENT_CHARS: usize = 15_000;

/// Runs the structured visibility analysis and returns a validated result.
///
/// Hard dependency of the audit pipeline: failure halts the audit, there
/// is no partial recovery and no retry.
///
/// # Errors
///
/// - Transport errors from [`CompletionClient::complete`].
/// - [`LlmError::Extraction`] — no `{...}` payload in the response.
/// - [`LlmError::Deserialize`] — payload does not match the audit shape.
/// - [`LlmError::InvalidAudit`] — a score outside `[0, 100]`.
pub async fn analyze_visibility(
    client: &CompletionClient,
    markdown: &str,
) -> Result<AuditResult, LlmError> {
    let excerpt = truncate_chars(markdown, AUDIT_CONTENT_CHARS);
    let raw = client
        .complete(Some(prompts::AUDIT_SYSTEM), &prompts::audit(excerpt))
        .await?;

    let payload = extract_structured_payload(&raw, PayloadShape::Object)?;
    let result: AuditResult =
        serde_json::from_str(&payload).map_err(|e| LlmError::Deserialize {
            context: "visibility analysis object".to_owned(),
            source: e,
        })?;

    result.validate()?;

    tracing::debug!(geo_score = result.geo_score, "visibility analysis complete");
    Ok(result)
}
