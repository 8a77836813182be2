//! Wire and result types for the scraping vendor API.

use serde::{Deserialize, Serialize};

/// Request body for the vendor's scrape endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct ScrapeRequest<'a> {
    pub url: &'a str,
    pub formats: &'a [&'a str],
}

/// Top-level response envelope: `{ "data": { "markdown", "metadata" } }`.
#[derive(Debug, Deserialize)]
pub(crate) struct ScrapeEnvelope {
    pub data: ScrapeData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScrapeData {
    /// Absent when the vendor could not produce markdown for the page.
    pub markdown: Option<String>,
    #[serde(default)]
    pub metadata: PageMetadata,
}

/// Page metadata extracted by the scraping vendor. All fields optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub og_image: Option<String>,
    pub favicon: Option<String>,
    pub og_site_name: Option<String>,
    pub og_description: Option<String>,
}

/// Normalized page content: markdown body plus metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedPage {
    pub markdown: String,
    pub metadata: PageMetadata,
}
