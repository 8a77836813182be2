//! HTTP client for the scraping vendor's scrape endpoint.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::FetchError;
use crate::types::{ScrapeEnvelope, ScrapeRequest, ScrapedPage};

const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev/v1/scrape";

/// Client for the scraping vendor API.
///
/// One `POST {url, formats}` with bearer auth per [`ScrapeClient::fetch`]
/// call, bounded by the configured timeout (30 s in production config).
/// No retries: a failed fetch is surfaced to the caller, which must not
/// proceed to dependent pipeline steps.
#[derive(Debug, Clone)]
pub struct ScrapeClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl ScrapeClient {
    /// Creates a client pointed at the production scrape endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, FetchError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom endpoint URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FetchError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("geolens/0.1 (visibility-onboarding)")
            .build()?;

        let endpoint = Url::parse(base_url).map_err(|e| FetchError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }

    /// Fetches one page as markdown plus metadata.
    ///
    /// The target `url` is forwarded verbatim; a malformed URL surfaces as
    /// an error from the vendor, not from this client.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Http`] — network failure or timeout.
    /// - [`FetchError::UnexpectedStatus`] — non-2xx from the vendor, with
    ///   the upstream message attached.
    /// - [`FetchError::Deserialize`] — response body is not the expected
    ///   envelope.
    /// - [`FetchError::Api`] — a 2xx response with no markdown content.
    pub async fn fetch(&self, url: &str) -> Result<ScrapedPage, FetchError> {
        let request = ScrapeRequest {
            url,
            formats: &["markdown"],
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let envelope: ScrapeEnvelope =
            serde_json::from_str(&body).map_err(|e| FetchError::Deserialize {
                context: format!("scrape response for {url}"),
                source: e,
            })?;

        // A parsed envelope without markdown is still a failed fetch:
        // downstream classification has nothing to work with.
        let markdown = envelope.data.markdown.ok_or_else(|| FetchError::Api {
            url: url.to_owned(),
            message: "scrape response contained no markdown content".to_owned(),
        })?;

        tracing::debug!(url, bytes = markdown.len(), "fetched page content");

        Ok(ScrapedPage {
            markdown,
            metadata: envelope.data.metadata,
        })
    }
}
