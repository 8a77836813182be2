use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from completion service: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("completion service returned an empty response")]
    EmptyResponse,

    #[error("failed to extract structured data from response")]
    Extraction,

    #[error("missing required input: {0}")]
    MissingInput(&'static str),

    #[error(transparent)]
    InvalidAudit(#[from] geolens_core::audit::AuditValidationError),

    #[error("invalid completion service base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
