//! PDF assembly for the visibility report.
//!
//! Built directly on `pdf-writer` object writers, single A4 page. Every
//! object id and coordinate is fixed, so identical inputs produce
//! byte-identical documents.

use chrono::{DateTime, NaiveDate, Utc};
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use geolens_core::BrandProfile;

use crate::metrics::{mock_platform_metrics, PlatformMetric, ReportSummary};
use crate::RenderError;

/// Single-page capacity of the platform table.
pub const MAX_METRIC_ROWS: usize = 12;

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 40.0;

const FONT_REGULAR: Name<'static> = Name(b"F1");
const FONT_BOLD: Name<'static> = Name(b"F2");

const COL_PLATFORM: f32 = MARGIN;
const COL_SCORE: f32 = 260.0;
const COL_MENTIONS: f32 = 360.0;
const COL_CITATIONS: f32 = 470.0;
const ROW_HEIGHT: f32 = 22.0;

const NAVY: (f32, f32, f32) = (0.11, 0.16, 0.29);
const GREEN: (f32, f32, f32) = (0.13, 0.65, 0.37);
const ORANGE: (f32, f32, f32) = (0.92, 0.55, 0.15);
const RED: (f32, f32, f32) = (0.86, 0.25, 0.22);
const BAND_GRAY: (f32, f32, f32) = (0.93, 0.94, 0.96);
const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);
const WHITE: (f32, f32, f32) = (1.0, 1.0, 1.0);

/// Score-band color: green at 75 and above, orange at 60, red below.
fn score_color(score: i32) -> (f32, f32, f32) {
    if score >= 75 {
        GREEN
    } else if score >= 60 {
        ORANGE
    } else {
        RED
    }
}

/// Builds the download filename: `<brand-slug>-visibility-report-<date>.pdf`.
#[must_use]
pub fn report_filename(brand_name: &str, date: NaiveDate) -> String {
    let slug = slugify(brand_name);
    let slug = if slug.is_empty() { "brand".to_owned() } else { slug };
    format!("{slug}-visibility-report-{}.pdf", date.format("%Y-%m-%d"))
}

fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else if c == ' ' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// PDF literal strings here are WinAnsi-adjacent; anything outside
/// printable ASCII is replaced rather than mis-encoded.
fn sanitize(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (' '..='~').contains(&c) { c as u8 } else { b'?' })
        .collect()
}

/// Clips long free-text values so they stay inside the page width.
fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{cut}...")
}

fn set_fill(content: &mut Content, (r, g, b): (f32, f32, f32)) {
    content.set_fill_rgb(r, g, b);
}

fn text_at(content: &mut Content, font: Name<'_>, size: f32, x: f32, y: f32, text: &str) {
    content.begin_text();
    content.set_font(font, size);
    content.next_line(x, y);
    content.show(Str(&sanitize(text)));
    content.end_text();
}

fn filled_rect(content: &mut Content, color: (f32, f32, f32), x: f32, y: f32, w: f32, h: f32) {
    set_fill(content, color);
    content.rect(x, y, w, h);
    content.fill_nonzero();
}

/// Renders the visibility report for a brand profile.
///
/// `metrics: None` falls back to the fixed mock platform table (a fresh
/// workspace has no audit history); live metrics are passed as `Some`.
/// Pure and deterministic: no clock reads, no I/O.
///
/// # Errors
///
/// Returns [`RenderError::TooManyRows`] when the table exceeds
/// [`MAX_METRIC_ROWS`].
pub fn render_report(
    profile: &BrandProfile,
    metrics: Option<&[PlatformMetric]>,
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>, RenderError> {
    let mock = metrics.is_none().then(mock_platform_metrics);
    let metrics: &[PlatformMetric] = metrics.unwrap_or_else(|| mock.as_deref().unwrap_or(&[]));

    if metrics.len() > MAX_METRIC_ROWS {
        return Err(RenderError::TooManyRows {
            count: metrics.len(),
            max: MAX_METRIC_ROWS,
        });
    }

    let summary = ReportSummary::from_metrics(metrics);

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let font_regular_id = Ref::new(4);
    let font_bold_id = Ref::new(5);
    let content_id = Ref::new(6);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    {
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        page.parent(page_tree_id);
        page.contents(content_id);
        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        fonts.pair(FONT_REGULAR, font_regular_id);
        fonts.pair(FONT_BOLD, font_bold_id);
    }

    pdf.type1_font(font_regular_id).base_font(Name(b"Helvetica"));
    pdf.type1_font(font_bold_id).base_font(Name(b"Helvetica-Bold"));

    let mut content = Content::new();

    // Header band.
    filled_rect(&mut content, NAVY, 0.0, 772.0, PAGE_WIDTH, 70.0);
    set_fill(&mut content, WHITE);
    text_at(&mut content, FONT_BOLD, 20.0, MARGIN, 808.0, "AI Visibility Report");
    let generated = generated_at.format("%Y-%m-%d").to_string();
    let subtitle = format!("{} - generated {generated}", profile.brand_name);
    text_at(&mut content, FONT_REGULAR, 11.0, MARGIN, 786.0, &subtitle);

    // Brand identity block.
    set_fill(&mut content, BLACK);
    let mut y = 740.0;
    text_at(&mut content, FONT_BOLD, 13.0, MARGIN, y, &profile.brand_name);
    y -= 18.0;
    text_at(&mut content, FONT_REGULAR, 11.0, MARGIN, y, &profile.website_url);
    y -= 16.0;
    if !profile.tagline.is_empty() {
        text_at(&mut content, FONT_REGULAR, 11.0, MARGIN, y, &clip(&profile.tagline, 90));
        y -= 16.0;
    }
    let industry_line = match (profile.industry.is_empty(), profile.headquarters.is_empty()) {
        (false, false) => format!("{} / {}", profile.industry, profile.headquarters),
        (false, true) => profile.industry.clone(),
        (true, false) => profile.headquarters.clone(),
        (true, true) => String::new(),
    };
    if !industry_line.is_empty() {
        text_at(&mut content, FONT_REGULAR, 11.0, MARGIN, y, &industry_line);
        y -= 16.0;
    }
    y -= 14.0;

    // Platform table header.
    text_at(&mut content, FONT_BOLD, 11.0, COL_PLATFORM, y, "Platform");
    text_at(&mut content, FONT_BOLD, 11.0, COL_SCORE, y, "Score");
    text_at(&mut content, FONT_BOLD, 11.0, COL_MENTIONS, y, "Mentions");
    text_at(&mut content, FONT_BOLD, 11.0, COL_CITATIONS, y, "Citations");
    y -= 6.0;
    filled_rect(&mut content, BLACK, MARGIN, y, PAGE_WIDTH - 2.0 * MARGIN, 0.8);
    y -= ROW_HEIGHT;

    // Platform rows: colored swatch behind each score.
    for metric in metrics {
        filled_rect(&mut content, score_color(metric.score), COL_SCORE - 6.0, y - 4.0, 48.0, 16.0);
        set_fill(&mut content, WHITE);
        text_at(&mut content, FONT_BOLD, 11.0, COL_SCORE, y, &format!("{}%", metric.score));
        set_fill(&mut content, BLACK);
        text_at(&mut content, FONT_REGULAR, 11.0, COL_PLATFORM, y, &metric.name);
        text_at(
            &mut content,
            FONT_REGULAR,
            11.0,
            COL_MENTIONS,
            y,
            &metric.mentions.to_string(),
        );
        text_at(
            &mut content,
            FONT_REGULAR,
            11.0,
            COL_CITATIONS,
            y,
            &metric.citations.to_string(),
        );
        y -= ROW_HEIGHT;
    }

    // Aggregate summary band.
    y -= 6.0;
    filled_rect(&mut content, BAND_GRAY, MARGIN, y - 10.0, PAGE_WIDTH - 2.0 * MARGIN, 32.0);
    set_fill(&mut content, BLACK);
    let summary_line = format!(
        "Average visibility {}%   {} mentions   {} citations",
        summary.average_score, summary.total_mentions, summary.total_citations
    );
    text_at(&mut content, FONT_BOLD, 11.0, MARGIN + 10.0, y, &summary_line);
    y -= 44.0;

    // Brand profile field list.
    text_at(&mut content, FONT_BOLD, 12.0, MARGIN, y, "Brand profile");
    y -= 18.0;
    let topics = profile.related_topics.join(", ");
    let competitors = profile
        .competitors
        .iter()
        .map(|c| c.domain.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let fields: [(&str, String); 6] = [
        ("Persona", clip(&profile.persona, 90)),
        ("Pain point", clip(&profile.pain_point, 90)),
        ("Moat", clip(&profile.moat, 90)),
        ("Related topics", clip(&topics, 90)),
        ("Competitors", clip(&competitors, 90)),
        ("Brand tone", format!("{} / 5", profile.brand_tone_score)),
    ];
    for (label, value) in fields {
        if value.is_empty() {
            continue;
        }
        text_at(&mut content, FONT_BOLD, 10.0, MARGIN, y, &format!("{label}:"));
        text_at(&mut content, FONT_REGULAR, 10.0, MARGIN + 90.0, y, &value);
        y -= 15.0;
    }

    pdf.stream(content_id, &content.finish());

    Ok(pdf.finish())
}
