//! Industry classification from scraped page content.

use crate::client::CompletionClient;
use crate::error::LlmError;
use crate::prompts;
use crate::text::{strip_quotes, truncate_chars};

/// Only this many leading characters of page content are submitted.
/// Required behavior, not an optimization: the label depends on which
/// prefix the model sees.
pub const CLASSIFY_CONTENT_CHARS: usize = 1000;

/// Classifies a brand's industry from its page content.
///
/// Returns a short free-text label (2-3 words by prompt convention) with
/// surrounding quote characters stripped. Hard dependency: callers must
/// not proceed to industry-dependent steps on failure.
///
/// # Errors
///
/// Returns [`LlmError`] on transport failure or an empty/blank model
/// response. No retry.
pub async fn classify_industry(
    client: &CompletionClient,
    content: &str,
    brand_name: &str,
) -> Result<String, LlmError> {
    let excerpt = truncate_chars(content, CLASSIFY_CONTENT_CHARS);
    let raw = client
        .complete(None, &prompts::industry(brand_name, excerpt))
        .await?;

    let label = strip_quotes(&raw);
    if label.is_empty() {
        return Err(LlmError::EmptyResponse);
    }

    tracing::debug!(brand = brand_name, industry = label, "classified industry");
    Ok(label.to_owned())
}
