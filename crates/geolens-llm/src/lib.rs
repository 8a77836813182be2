//! LLM-backed enrichment and analysis for GeoLens.
//!
//! Wraps a chat-completion vendor behind [`CompletionClient`] and exposes
//! the pipeline's prompt operations on top of it: industry classification,
//! competitor discovery, the best-effort audience/topic/moat advisors, and
//! the structured GEO visibility analysis.
//!
//! All structured model output goes through
//! [`extract::extract_structured_payload`], which strips code fences and
//! pulls the first bracketed JSON substring before parsing.

pub mod audit;
pub mod classify;
pub mod client;
pub mod competitors;
pub mod enrich;
pub mod error;
pub mod extract;

mod prompts;
mod text;

pub use audit::analyze_visibility;
pub use classify::classify_industry;
pub use client::CompletionClient;
pub use competitors::find_competitors;
pub use enrich::{generate_topics, suggest_audience, suggest_moat, AudienceSuggestion};
pub use error::LlmError;
pub use extract::{extract_structured_payload, PayloadShape};
