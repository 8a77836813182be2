//! Visibility report rendering for GeoLens.
//!
//! Deterministic transform from a brand profile plus platform metrics to a
//! downloadable PDF. No network, no persistence: given identical inputs
//! and a fixed `generated_at` timestamp, the output bytes are identical.

pub mod metrics;
pub mod pdf;

use thiserror::Error;

pub use metrics::{mock_platform_metrics, PlatformMetric, ReportSummary};
pub use pdf::{render_report, report_filename, MAX_METRIC_ROWS};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("metric table has {count} rows, exceeding the single-page capacity of {max}")]
    TooManyRows { count: usize, max: usize },
}
