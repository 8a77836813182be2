use chrono::{NaiveDate, TimeZone, Utc};

use geolens_core::{BrandProfile, CompetitorSuggestion};
use geolens_report::{
    mock_platform_metrics, render_report, report_filename, PlatformMetric, RenderError,
    MAX_METRIC_ROWS,
};

fn sample_profile() -> BrandProfile {
    BrandProfile {
        website_url: "https://acme.example".to_owned(),
        brand_name: "Acme".to_owned(),
        tagline: "Anvils that arrive on time".to_owned(),
        industry: "Industrial hardware".to_owned(),
        headquarters: "Columbus, OH".to_owned(),
        persona: "Procurement lead at a mid-size manufacturer".to_owned(),
        pain_point: "Unreliable supplier lead times".to_owned(),
        moat: "Same-day regional delivery network".to_owned(),
        related_topics: vec!["drop forging".to_owned(), "tool steel".to_owned()],
        competitors: vec![CompetitorSuggestion {
            domain: "ironworks.example".to_owned(),
            name: Some("Ironworks".to_owned()),
            reason: None,
        }],
        ..BrandProfile::default()
    }
}

fn byte_index(haystack: &[u8], needle: &str) -> usize {
    haystack
        .windows(needle.len())
        .position(|w| w == needle.as_bytes())
        .unwrap_or_else(|| panic!("{needle:?} not found in rendered bytes"))
}

#[test]
fn identical_inputs_yield_identical_bytes() {
    let profile = sample_profile();
    let at = Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap();

    let first = render_report(&profile, None, at).expect("render");
    let second = render_report(&profile, None, at).expect("render");

    assert_eq!(first, second);
}

#[test]
fn mock_table_and_aggregates_appear_in_output() {
    let profile = sample_profile();
    let at = Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap();

    let bytes = render_report(&profile, None, at).expect("render");

    byte_index(&bytes, "Acme");
    byte_index(&bytes, "2025-03-09");
    byte_index(&bytes, "78%");
    byte_index(&bytes, "Average visibility 71%");
    byte_index(&bytes, "53 mentions");
    byte_index(&bytes, "35 citations");
}

#[test]
fn mock_rows_render_in_fixed_order() {
    let profile = sample_profile();
    let at = Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap();

    let bytes = render_report(&profile, None, at).expect("render");

    let mut last = 0;
    for metric in mock_platform_metrics() {
        let at = byte_index(&bytes, &metric.name);
        assert!(at > last, "{} rendered out of order", metric.name);
        last = at;
    }
}

#[test]
fn live_metrics_replace_the_mock_table() {
    let profile = sample_profile();
    let at = Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap();
    let live = vec![PlatformMetric {
        name: "ChatGPT".to_owned(),
        score: 91,
        mentions: 4,
        citations: 2,
    }];

    let bytes = render_report(&profile, Some(&live), at).expect("render");

    byte_index(&bytes, "91%");
    byte_index(&bytes, "Average visibility 91%");
    assert!(
        bytes.windows(10).all(|w| w != b"Perplexity"),
        "mock rows leaked into a live-metrics report"
    );
}

#[test]
fn oversized_table_is_rejected() {
    let profile = sample_profile();
    let at = Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap();
    let rows: Vec<PlatformMetric> = (0..=MAX_METRIC_ROWS)
        .map(|i| PlatformMetric {
            name: format!("Engine {i}"),
            score: 50,
            mentions: 1,
            citations: 1,
        })
        .collect();

    let err = render_report(&profile, Some(&rows), at).expect_err("must reject");
    assert!(matches!(
        err,
        RenderError::TooManyRows { count, max }
            if count == MAX_METRIC_ROWS + 1 && max == MAX_METRIC_ROWS
    ));
}

#[test]
fn sparse_profile_still_renders() {
    let profile = BrandProfile {
        website_url: "https://bare.example".to_owned(),
        brand_name: "Bare".to_owned(),
        ..BrandProfile::default()
    };
    let at = Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap();

    let bytes = render_report(&profile, None, at).expect("render");
    byte_index(&bytes, "Bare");
}

#[test]
fn filename_pairs_with_report_date() {
    let date = NaiveDate::from_ymd_opt(2025, 3, 9).expect("valid date");
    assert_eq!(
        report_filename("Acme", date),
        "acme-visibility-report-2025-03-09.pdf"
    );
}
