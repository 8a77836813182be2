//! Fixed prompt templates for every model operation.
//!
//! Templates live in one place so prompt changes never hide inside call
//! sites. Context excerpts are truncated by the callers, not here.

pub(crate) fn industry(brand_name: &str, content: &str) -> String {
    format!(
        "Classify the industry of the brand \"{brand_name}\" based on this website \
         content. Respond with a short label of 2-3 words, nothing else.\n\n\
         Website content:\n{content}"
    )
}

pub(crate) fn competitors(
    industry: &str,
    region: &str,
    brand_name: &str,
    content: Option<&str>,
) -> String {
    let context = content
        .map(|c| format!("\n\nWebsite content for context:\n{c}"))
        .unwrap_or_default();
    format!(
        "List up to 5 direct competitors of \"{brand_name}\", a company in the \
         {industry} industry operating in {region}. Respond with a JSON array of \
         objects with keys \"domain\" (required), \"name\", and \"reason\" \
         (under 15 words). No other text.{context}"
    )
}

pub(crate) fn audience(industry: &str, content: &str) -> String {
    format!(
        "Describe the primary buyer of a company in the {industry} industry, \
         based on this website content. Respond with a JSON object with keys \
         \"persona\" (a short role description) and \"painPoint\" (one sentence). \
         No other text.\n\nWebsite content:\n{content}"
    )
}

pub(crate) fn topics(industry: &str) -> String {
    format!(
        "List 8 content topic clusters relevant to the {industry} industry. \
         Respond with a single comma-separated list, no numbering, no other text."
    )
}

pub(crate) fn moat(brand_name: &str, description: &str, industry: &str) -> String {
    format!(
        "In one sentence, state what differentiates \"{brand_name}\" \
         ({description}) from other companies in the {industry} industry. \
         Respond with the sentence only."
    )
}

/// System prompt for the GEO visibility analysis. Demands strict JSON so
/// the response deserializes directly into `AuditResult`.
pub(crate) const AUDIT_SYSTEM: &str = "You are a Generative Engine Optimization (GEO) \
auditor. You score how well a web page surfaces in AI-generated answers. Respond with \
strict JSON only, matching exactly this shape: {\"geoScore\": <integer 0-100>, \
\"summary\": <string>, \"markdownStructure\": {\"score\": <integer 0-100>, \
\"observation\": <string>}, \"factDensity\": {\"score\": <integer 0-100>, \
\"observation\": <string>}, \"directAnswerCapability\": {\"score\": <integer 0-100>, \
\"observation\": <string>}, \"criticalFix\": <string>}. No markdown, no commentary.";

pub(crate) fn audit(content: &str) -> String {
    format!("Audit this page content for AI search visibility:\n\n{content}")
}
