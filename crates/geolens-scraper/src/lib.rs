//! Content fetching for GeoLens.
//!
//! Wraps the scraping vendor's HTTP API: one POST per page turns a URL into
//! normalized markdown plus page metadata. Single attempt per invocation;
//! retries, if wanted, belong to the caller.

pub mod client;
pub mod error;
pub mod types;

pub use client::ScrapeClient;
pub use error::FetchError;
pub use types::{PageMetadata, ScrapedPage};
