//! Platform metrics and aggregate summary math.

/// Visibility of a brand on one AI answer platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformMetric {
    pub name: String,
    /// Visibility score in `[0, 100]`.
    pub score: i32,
    pub mentions: u32,
    pub citations: u32,
}

impl PlatformMetric {
    fn new(name: &str, score: i32, mentions: u32, citations: u32) -> Self {
        Self {
            name: name.to_owned(),
            score,
            mentions,
            citations,
        }
    }
}

/// The fixed five-platform table rendered when no live metrics exist yet.
///
/// Placeholder data by design: a fresh workspace has no audit history, and
/// the report must still render. Callers with a real audit pass live
/// metrics instead.
#[must_use]
pub fn mock_platform_metrics() -> Vec<PlatformMetric> {
    vec![
        PlatformMetric::new("ChatGPT", 78, 12, 8),
        PlatformMetric::new("Claude", 65, 9, 5),
        PlatformMetric::new("Perplexity", 82, 15, 11),
        PlatformMetric::new("Gemini", 71, 10, 7),
        PlatformMetric::new("Bing AI", 58, 7, 4),
    ]
}

/// Aggregates across the platform table: rounded mean score and totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub average_score: i32,
    pub total_mentions: u32,
    pub total_citations: u32,
}

impl ReportSummary {
    /// Computes the aggregate band values. Empty input yields all zeros.
    #[must_use]
    pub fn from_metrics(metrics: &[PlatformMetric]) -> Self {
        if metrics.is_empty() {
            return Self {
                average_score: 0,
                total_mentions: 0,
                total_citations: 0,
            };
        }

        let score_sum: i32 = metrics.iter().map(|m| m.score).sum();
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        let average_score = (f64::from(score_sum) / metrics.len() as f64).round() as i32;

        Self {
            average_score,
            total_mentions: metrics.iter().map(|m| m.mentions).sum(),
            total_citations: metrics.iter().map(|m| m.citations).sum(),
        }
    }
}
